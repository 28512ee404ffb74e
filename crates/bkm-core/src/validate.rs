//! Pure input checks: name/URL shape and case-insensitive URL uniqueness.
//!
//! Nothing here touches presentation state. Callers render field feedback from
//! the returned [`FormCheck`].

use regex::Regex;
use std::sync::LazyLock;

use crate::bookmark::{Bookmark, NewBookmark};

// ASCII word characters, matching the browser form's patterns.
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_]{3,}(?:\s+[A-Za-z0-9_]+)*$").expect("valid name regex")
});
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:[A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]+(?:/[A-Za-z0-9_./?%&=-]*)?$")
        .expect("valid url regex")
});

/// One or more whitespace-separated words; the first at least 3 characters long.
pub fn validate_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// Optional `http(s)://`, dotted host labels, optional simple path. Shape only.
pub fn validate_url(url: &str) -> bool {
    URL_RE.is_match(url)
}

/// Per-field outcome of validating a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormCheck {
    pub name_valid: bool,
    pub url_valid: bool,
}

impl FormCheck {
    pub fn is_valid(&self) -> bool {
        self.name_valid && self.url_valid
    }
}

/// Validate both fields of a form. The category is free text and never rejected.
pub fn check_form(form: &NewBookmark) -> FormCheck {
    FormCheck {
        name_valid: validate_name(&form.name),
        url_valid: validate_url(&form.url),
    }
}

/// True iff some existing record's URL equals `candidate`, ignoring case.
pub fn is_duplicate_url(candidate: &str, collection: &[Bookmark]) -> bool {
    let candidate = candidate.to_lowercase();
    collection
        .iter()
        .any(|b| b.site_url.to_lowercase() == candidate)
}
