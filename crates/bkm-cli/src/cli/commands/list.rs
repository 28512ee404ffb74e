//! `bkm list` – show the filtered and sorted view.

use anyhow::Result;
use bkm_core::query::{Query, SortKey};
use bkm_core::{Bookmark, BookmarkStore, DurableSlot};
use std::io::{self, Write};

pub fn run_list<S: DurableSlot>(
    store: &BookmarkStore<S>,
    search: &str,
    category: &str,
    sort: &str,
) -> Result<()> {
    let sort_key = sort.parse::<SortKey>().unwrap_or_else(|e| {
        tracing::warn!("{e}; keeping collection order");
        SortKey::Unsorted
    });
    let view = Query::new(search, category, sort_key).apply(store.list());
    let mut out = io::stdout().lock();
    write_view(&mut out, store, &view)?;
    Ok(())
}

/// Render a view. `#` is the record's 1-based position in the full collection.
pub(crate) fn write_view<S: DurableSlot>(
    out: &mut impl Write,
    store: &BookmarkStore<S>,
    view: &[&Bookmark],
) -> io::Result<()> {
    if view.is_empty() {
        writeln!(out, "No bookmarks found.")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:<4} {:<6} {:<24} {:<12} {}",
        "#", "ID", "NAME", "CATEGORY", "URL"
    )?;
    for b in view {
        let pos = store
            .position_of(b.id)
            .map(|p| (p + 1).to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:<4} {:<6} {:<24} {:<12} {}",
            pos, b.id, b.site_name, b.category, b.site_url
        )?;
    }
    Ok(())
}
