//! Collection store: owns the ordered bookmark list and keeps the durable slot in sync.
//!
//! Every successful add or delete rewrites the whole collection to the slot.
//! If that write fails the in-memory change is rolled back, so memory and disk
//! never disagree after an operation returns.

mod slot;
mod snapshot;

pub use slot::{DurableSlot, FileSlot, MemorySlot};
pub use snapshot::{decode, encode, PersistedCollection, FORMAT_VERSION};

use anyhow::Context;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::bookmark::{Bookmark, BookmarkId, NewBookmark, DEFAULT_CATEGORY};
use crate::error::BookmarkError;
use crate::validate::{check_form, is_duplicate_url};

/// What happened while opening a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    /// Nothing stored yet.
    Empty,
    /// Stored collection decoded.
    Loaded { count: usize },
    /// Stored data was unreadable; the store starts empty. Report this to the user once.
    Recovered {
        reason: String,
        preserved: Option<String>,
    },
}

/// Owned handle to the bookmark collection.
#[derive(Debug)]
pub struct BookmarkStore<S> {
    slot: S,
    bookmarks: Vec<Bookmark>,
    next_id: u64,
    default_category: String,
}

impl<S: DurableSlot> BookmarkStore<S> {
    /// Load the collection, failing with [`BookmarkError::Corrupt`] if the slot holds invalid data.
    pub fn load(slot: S) -> Result<Self, BookmarkError> {
        let (store, _) = Self::load_inner(slot).map_err(|(_, e)| e)?;
        Ok(store)
    }

    /// Load the collection; corrupt data is moved aside and replaced by an empty collection.
    pub fn open(slot: S) -> Result<(Self, LoadReport), BookmarkError> {
        match Self::load_inner(slot) {
            Ok(loaded) => Ok(loaded),
            Err((slot, BookmarkError::Corrupt { slot: name, source })) => {
                tracing::warn!(slot = %name, "stored bookmarks unreadable, starting empty: {}", source);
                let preserved = slot.quarantine()?;
                if let Some(ref p) = preserved {
                    tracing::warn!("corrupt bookmark data preserved at {}", p);
                }
                let store = Self::from_parts(slot, Vec::new(), 1);
                store.save()?;
                Ok((
                    store,
                    LoadReport::Recovered {
                        reason: source.to_string(),
                        preserved,
                    },
                ))
            }
            Err((_, e)) => Err(e),
        }
    }

    fn load_inner(slot: S) -> Result<(Self, LoadReport), (S, BookmarkError)> {
        let data = match slot.read() {
            Ok(d) => d,
            Err(e) => return Err((slot, BookmarkError::Storage(e))),
        };
        let Some(data) = data else {
            tracing::debug!(slot = %slot.describe(), "no stored bookmarks");
            return Ok((Self::from_parts(slot, Vec::new(), 1), LoadReport::Empty));
        };
        match decode(&data) {
            Ok(collection) => {
                let count = collection.bookmarks.len();
                tracing::debug!(slot = %slot.describe(), count, "loaded bookmarks");
                let store = Self::from_parts(slot, collection.bookmarks, collection.next_id);
                store.warn_on_duplicate_urls();
                let report = if count == 0 {
                    LoadReport::Empty
                } else {
                    LoadReport::Loaded { count }
                };
                Ok((store, report))
            }
            Err(source) => {
                let name = slot.describe();
                Err((slot, BookmarkError::Corrupt { slot: name, source }))
            }
        }
    }

    fn from_parts(slot: S, bookmarks: Vec<Bookmark>, next_id: u64) -> Self {
        Self {
            slot,
            bookmarks,
            next_id: next_id.max(1),
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }

    // Uniqueness is only checked on insert; data edited elsewhere may still repeat URLs.
    fn warn_on_duplicate_urls(&self) {
        let mut seen = HashSet::new();
        let dupes = self
            .bookmarks
            .iter()
            .filter(|b| !seen.insert(b.site_url.to_lowercase()))
            .count();
        if dupes > 0 {
            tracing::warn!(dupes, "stored collection contains repeated URLs");
        }
    }

    /// Category used when an added bookmark has none.
    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        if !category.trim().is_empty() {
            self.default_category = category;
        }
        self
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Records in insertion order.
    pub fn list(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    pub fn get(&self, id: BookmarkId) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    pub fn get_at(&self, index: usize) -> Result<&Bookmark, BookmarkError> {
        self.bookmarks.get(index).ok_or(BookmarkError::OutOfRange {
            index,
            len: self.bookmarks.len(),
        })
    }

    /// Current position of `id` in the collection.
    pub fn position_of(&self, id: BookmarkId) -> Option<usize> {
        self.bookmarks.iter().position(|b| b.id == id)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.bookmarks
            .iter()
            .map(|b| b.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Validate, create, append and persist a bookmark. Returns its position.
    pub fn add(&mut self, input: &NewBookmark) -> Result<usize, BookmarkError> {
        self.add_at_time(input, Utc::now())
    }

    /// [`add`](Self::add) with an explicit creation time.
    pub fn add_at_time(
        &mut self,
        input: &NewBookmark,
        now: DateTime<Utc>,
    ) -> Result<usize, BookmarkError> {
        let check = check_form(input);
        if !check.is_valid() {
            return Err(BookmarkError::Invalid {
                name_valid: check.name_valid,
                url_valid: check.url_valid,
            });
        }
        if is_duplicate_url(&input.url, &self.bookmarks) {
            return Err(BookmarkError::Duplicate {
                url: input.url.clone(),
            });
        }

        let id = BookmarkId(self.next_id);
        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| anyhow::anyhow!("bookmark ids exhausted at {id}"))?;
        let record = Bookmark::create(input, id, now, &self.default_category);
        self.bookmarks.push(record);
        let prev_next_id = std::mem::replace(&mut self.next_id, next_id);

        if let Err(e) = self.save() {
            self.bookmarks.pop();
            self.next_id = prev_next_id;
            return Err(e);
        }
        tracing::info!(%id, url = %input.url, "bookmark added");
        Ok(self.bookmarks.len() - 1)
    }

    /// Remove the record at `index` and persist. Later records shift down by one.
    pub fn remove_at(&mut self, index: usize) -> Result<Bookmark, BookmarkError> {
        if index >= self.bookmarks.len() {
            return Err(BookmarkError::OutOfRange {
                index,
                len: self.bookmarks.len(),
            });
        }
        let removed = self.bookmarks.remove(index);
        if let Err(e) = self.save() {
            self.bookmarks.insert(index, removed);
            return Err(e);
        }
        tracing::info!(id = %removed.id, index, "bookmark deleted");
        Ok(removed)
    }

    /// Remove by identifier, translating to the current position.
    pub fn remove(&mut self, id: BookmarkId) -> Result<Bookmark, BookmarkError> {
        let index = self.position_of(id).ok_or(BookmarkError::NotFound(id))?;
        self.remove_at(index)
    }

    /// Serialize the whole collection and replace the slot content.
    pub fn save(&self) -> Result<(), BookmarkError> {
        let json = encode(&self.bookmarks, self.next_id).context("serialize bookmarks")?;
        self.slot.write(&json)?;
        tracing::debug!(slot = %self.slot.describe(), count = self.bookmarks.len(), "saved bookmarks");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
