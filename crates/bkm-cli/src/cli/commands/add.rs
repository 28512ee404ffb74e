//! `bkm add <name> <url> [--category C]` – validate and store a bookmark.

use anyhow::Result;
use bkm_core::actions::{self, Notifier};
use bkm_core::{BookmarkStore, DurableSlot, NewBookmark};

pub fn run_add<S: DurableSlot>(
    store: &mut BookmarkStore<S>,
    name: &str,
    url: &str,
    category: &str,
    notifier: &mut impl Notifier,
) -> Result<()> {
    let form = NewBookmark::new(name, url, category);
    if actions::submit(store, &form, notifier)?.is_none() {
        tracing::debug!(%url, "add rejected");
    }
    Ok(())
}
