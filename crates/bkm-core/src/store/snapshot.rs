//! On-disk format of the collection and its decoding (versioned or legacy array).

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::bookmark::{Bookmark, BookmarkId};

/// Current format version written by [`PersistedCollection`].
pub const FORMAT_VERSION: u8 = 1;

/// Whole collection as written to the durable slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedCollection {
    #[serde(default = "default_version")]
    pub version: u8,
    /// Next identifier to hand out. Never lower than any stored id + 1 after decoding.
    #[serde(default)]
    pub next_id: u64,
    pub bookmarks: Vec<Bookmark>,
}

fn default_version() -> u8 {
    FORMAT_VERSION
}

impl PersistedCollection {
    pub fn new(bookmarks: Vec<Bookmark>, next_id: u64) -> Self {
        Self {
            version: FORMAT_VERSION,
            next_id,
            bookmarks,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionRef<'a> {
    version: u8,
    next_id: u64,
    bookmarks: &'a [Bookmark],
}

/// Encode the collection in the current format without copying the records.
pub fn encode(bookmarks: &[Bookmark], next_id: u64) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&CollectionRef {
        version: FORMAT_VERSION,
        next_id,
        bookmarks,
    })
}

/// Decode slot content. Blank content means nothing stored.
///
/// Accepts the versioned object and the bare array written by the browser
/// version. Records without an id (or with a repeated one) get fresh ids.
/// Bytes that are not valid UTF-8 JSON, and ids that leave no room for a
/// next one, are decode errors.
pub fn decode(data: &[u8]) -> Result<PersistedCollection, serde_json::Error> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(PersistedCollection::new(Vec::new(), 1));
    }
    let value: serde_json::Value = serde_json::from_slice(data)?;
    let mut collection = if value.is_array() {
        let bookmarks: Vec<Bookmark> = serde_json::from_value(value)?;
        PersistedCollection::new(bookmarks, 1)
    } else {
        let parsed: PersistedCollection = serde_json::from_value(value)?;
        if parsed.version != FORMAT_VERSION {
            return Err(serde_json::Error::custom(format!(
                "unsupported format version {} (expected {})",
                parsed.version, FORMAT_VERSION
            )));
        }
        parsed
    };
    collection.next_id = assign_missing_ids(&mut collection.bookmarks, collection.next_id)
        .ok_or_else(|| serde_json::Error::custom("bookmark ids exhausted (id at u64::MAX)"))?;
    Ok(collection)
}

/// Give every unassigned or repeated id a fresh one. Returns the next free id,
/// or None if the id space overflows.
fn assign_missing_ids(bookmarks: &mut [Bookmark], next_id: u64) -> Option<u64> {
    let max_existing = bookmarks.iter().map(|b| b.id.0).max().unwrap_or(0);
    let mut next = next_id.max(max_existing.checked_add(1)?).max(1);
    let mut seen = HashSet::new();
    for b in bookmarks.iter_mut() {
        if b.id.is_unassigned() || !seen.insert(b.id) {
            b.id = BookmarkId(next);
            seen.insert(b.id);
            next = next.checked_add(1)?;
        }
    }
    Some(next)
}
