//! `bkm categories` – categories in use, in first-seen order.

use anyhow::Result;
use bkm_core::{BookmarkStore, DurableSlot};

pub fn run_categories<S: DurableSlot>(store: &BookmarkStore<S>) -> Result<()> {
    let categories = store.categories();
    if categories.is_empty() {
        println!("No categories yet.");
    }
    for c in categories {
        println!("{c}");
    }
    Ok(())
}
