//! `bkm remove <id>` – delete a bookmark, asking first unless `--yes` or disabled in config.

use anyhow::Result;
use bkm_core::actions::{self, Notifier};
use bkm_core::{BookmarkId, BookmarkStore, DurableSlot};

use crate::cli::feedback::StdinConfirm;

pub fn run_remove<S: DurableSlot>(
    store: &mut BookmarkStore<S>,
    id: u64,
    ask: bool,
    notifier: &mut impl Notifier,
) -> Result<()> {
    let id = BookmarkId(id);
    let deleted = if ask {
        actions::delete_with_confirmation(store, id, &mut StdinConfirm, notifier)?
    } else {
        actions::delete_with_confirmation(store, id, &mut |_: &str| true, notifier)?
    };
    if !deleted {
        println!("Kept bookmark {id}");
    }
    Ok(())
}
