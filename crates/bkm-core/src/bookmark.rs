//! Bookmark record model and record creation.
//!
//! A record is created once from a validated [`NewBookmark`] and is never
//! edited afterwards; the store only hands out shared references.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category assigned when the form leaves it blank.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Stable identifier of a record. Assigned by the store, never reused within a collection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BookmarkId(pub u64);

impl BookmarkId {
    /// Id 0 marks a record that has not been assigned one yet (legacy data).
    pub fn is_unassigned(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for BookmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Raw form input: `{ name, url, category }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBookmark {
    pub name: String,
    pub url: String,
    pub category: String,
}

impl NewBookmark {
    pub fn new(name: impl Into<String>, url: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            category: category.into(),
        }
    }
}

/// One persisted bookmark. Field names on disk match the browser-era format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(default)]
    pub id: BookmarkId,
    #[serde(rename = "siteName")]
    pub site_name: String,
    #[serde(rename = "siteURL")]
    pub site_url: String,
    #[serde(default = "default_category")]
    pub category: String,
    /// ISO-8601 timestamp. Kept as text so unparseable legacy values survive a round-trip.
    #[serde(rename = "dateAdded", default)]
    pub date_added: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Bookmark {
    /// Build a record from already-validated form input.
    ///
    /// The name gets its first character uppercased, the URL and category are
    /// stored exactly as entered, and an empty category falls back to `default_category`.
    pub fn create(
        input: &NewBookmark,
        id: BookmarkId,
        now: DateTime<Utc>,
        default_category: &str,
    ) -> Self {
        Self {
            id,
            site_name: capitalize(&input.name),
            site_url: input.url.clone(),
            category: if input.category.is_empty() {
                default_category.to_string()
            } else {
                input.category.clone()
            },
            date_added: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Creation time in Unix milliseconds; missing or unparseable dates count as epoch 0.
    pub fn added_at_millis(&self) -> i64 {
        parse_timestamp(&self.date_added)
            .map(|dt| dt.timestamp_millis())
            .unwrap_or(0)
    }
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` (taken as UTC) and bare dates.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
