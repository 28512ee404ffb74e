//! `bkm visit <id>` – print the navigable URL of a bookmark.

use anyhow::Result;
use bkm_core::actions;
use bkm_core::{BookmarkId, BookmarkStore, DurableSlot};

pub fn run_visit<S: DurableSlot>(store: &BookmarkStore<S>, id: u64) -> Result<()> {
    let url = actions::visit(store, BookmarkId(id))?;
    println!("{}", url.navigable);
    Ok(())
}
