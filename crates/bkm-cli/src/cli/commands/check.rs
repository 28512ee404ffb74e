//! `bkm check <name> <url>` – per-field feedback without adding anything.

use anyhow::Result;
use bkm_core::validate::{check_form, is_duplicate_url};
use bkm_core::{BookmarkStore, DurableSlot, NewBookmark};

use crate::cli::feedback::render_form_check;

pub fn run_check<S: DurableSlot>(store: &BookmarkStore<S>, name: &str, url: &str) -> Result<()> {
    let check = check_form(&NewBookmark::new(name, url, ""));
    print!("{}", render_form_check(&check));
    if check.url_valid && is_duplicate_url(url, store.list()) {
        println!("  note: this URL is already bookmarked");
    }
    Ok(())
}
