//! Error taxonomy for collection operations.
//!
//! Invalid input and duplicates are recovered locally by the caller (turned into
//! notices); `OutOfRange`/`NotFound` abort the single operation and leave the
//! collection untouched; `Storage` carries I/O failures of the durable slot.

use crate::bookmark::BookmarkId;

#[derive(Debug, thiserror::Error)]
pub enum BookmarkError {
    /// Name and/or URL failed the format check. No mutation happened.
    #[error("invalid bookmark input (name valid: {name_valid}, url valid: {url_valid})")]
    Invalid { name_valid: bool, url_valid: bool },

    /// URL already present (case-insensitive). No mutation happened.
    #[error("URL already bookmarked: {url}")]
    Duplicate { url: String },

    /// Positional address outside `0..len`, typically a stale index.
    #[error("index {index} out of range (collection has {len} bookmarks)")]
    OutOfRange { index: usize, len: usize },

    /// Identifier no longer present in the collection.
    #[error("no bookmark with id {0}")]
    NotFound(BookmarkId),

    /// Persisted data could not be decoded.
    #[error("stored bookmarks in {slot} are corrupt: {source}")]
    Corrupt {
        slot: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl BookmarkError {
    /// True for conditions the caller reports as user feedback rather than failure.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            BookmarkError::Invalid { .. } | BookmarkError::Duplicate { .. }
        )
    }
}
