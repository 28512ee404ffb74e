//! User-facing flows over the store: submit a form, delete with confirmation, visit.
//!
//! The store reports rejections as errors; these flows turn them into
//! [`Notice`]s for a [`Notifier`] and only propagate real failures.

use crate::bookmark::{BookmarkId, NewBookmark};
use crate::error::BookmarkError;
use crate::store::{BookmarkStore, DurableSlot, LoadReport};
use crate::url_model::{normalize, NormalizedUrl};

/// Semantic events for the notification collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Added {
        id: BookmarkId,
        name: String,
    },
    DuplicateRejected {
        url: String,
    },
    Deleted {
        id: BookmarkId,
        name: String,
    },
    InvalidInput {
        name_valid: bool,
        url_valid: bool,
    },
    /// Stored data was unreadable and the collection was reset.
    StorageReset {
        reason: String,
        preserved: Option<String>,
    },
}

/// Renders notices however the front end sees fit.
pub trait Notifier {
    fn notify(&mut self, notice: &Notice);
}

/// Collects notices in memory.
impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: &Notice) {
        self.push(notice.clone());
    }
}

/// Asks the user whether a named bookmark may be deleted.
pub trait Confirm {
    fn confirm_delete(&mut self, name: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm_delete(&mut self, name: &str) -> bool {
        self(name)
    }
}

/// Emit the one-time notice for a recovered load, if any.
pub fn report_load(report: &LoadReport, notifier: &mut impl Notifier) {
    if let LoadReport::Recovered { reason, preserved } = report {
        notifier.notify(&Notice::StorageReset {
            reason: reason.clone(),
            preserved: preserved.clone(),
        });
    }
}

/// Submit a creation form. Returns the new id, or None if the input was rejected.
pub fn submit<S: DurableSlot>(
    store: &mut BookmarkStore<S>,
    form: &NewBookmark,
    notifier: &mut impl Notifier,
) -> Result<Option<BookmarkId>, BookmarkError> {
    match store.add(form) {
        Ok(index) => {
            let rec = store.get_at(index)?;
            let (id, name) = (rec.id, rec.site_name.clone());
            notifier.notify(&Notice::Added { id, name });
            Ok(Some(id))
        }
        Err(BookmarkError::Invalid {
            name_valid,
            url_valid,
        }) => {
            tracing::debug!(name_valid, url_valid, "rejected invalid bookmark input");
            notifier.notify(&Notice::InvalidInput {
                name_valid,
                url_valid,
            });
            Ok(None)
        }
        Err(BookmarkError::Duplicate { url }) => {
            tracing::debug!(%url, "rejected duplicate bookmark");
            notifier.notify(&Notice::DuplicateRejected { url });
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Ask for confirmation, then delete. Returns whether the record was deleted.
///
/// Nothing changes until the confirmation returns; declining is a no-op.
pub fn delete_with_confirmation<S: DurableSlot>(
    store: &mut BookmarkStore<S>,
    id: BookmarkId,
    confirm: &mut impl Confirm,
    notifier: &mut impl Notifier,
) -> Result<bool, BookmarkError> {
    let name = store
        .get(id)
        .map(|b| b.site_name.clone())
        .ok_or(BookmarkError::NotFound(id))?;
    if !confirm.confirm_delete(&name) {
        tracing::debug!(%id, "deletion cancelled");
        return Ok(false);
    }
    let removed = store.remove(id)?;
    notifier.notify(&Notice::Deleted {
        id,
        name: removed.site_name,
    });
    Ok(true)
}

/// URL forms for opening a bookmark.
pub fn visit<S: DurableSlot>(
    store: &BookmarkStore<S>,
    id: BookmarkId,
) -> Result<NormalizedUrl, BookmarkError> {
    store
        .get(id)
        .map(|b| normalize(&b.site_url))
        .ok_or(BookmarkError::NotFound(id))
}
