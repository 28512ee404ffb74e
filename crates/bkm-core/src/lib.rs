pub mod config;
pub mod logging;

pub mod actions;
pub mod bookmark;
pub mod error;
pub mod query;
pub mod store;
pub mod url_model;
pub mod validate;

pub use bookmark::{Bookmark, BookmarkId, NewBookmark};
pub use error::BookmarkError;
pub use query::{Query, SortKey};
pub use store::{BookmarkStore, DurableSlot, FileSlot, LoadReport, MemorySlot};
