//! Derived views: search, category filter and sort over a borrowed collection.
//!
//! A view is recomputed from scratch on every call and never mutates the source.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::bookmark::Bookmark;

/// Order applied to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recently added first.
    #[default]
    Newest,
    Oldest,
    NameAsc,
    NameDesc,
    /// Keep collection order.
    Unsorted,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::NameAsc => "nameAsc",
            SortKey::NameDesc => "nameDesc",
            SortKey::Unsorted => "none",
        }
    }

    /// Lenient parse: anything unrecognized means "no reordering".
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(SortKey::Unsorted)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "nameAsc" | "name-asc" => Ok(SortKey::NameAsc),
            "nameDesc" | "name-desc" => Ok(SortKey::NameDesc),
            "none" | "" => Ok(SortKey::Unsorted),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// The three inputs of a view: search term, category filter, sort key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Case-insensitive substring of name or URL. Empty = no search.
    pub search: String,
    /// Exact category. Empty = all categories.
    pub category: String,
    pub sort: SortKey,
}

impl Query {
    pub fn new(search: impl Into<String>, category: impl Into<String>, sort: SortKey) -> Self {
        Self {
            search: search.into(),
            category: category.into(),
            sort,
        }
    }

    /// Filter and sort `collection`. Sorting is stable: equal keys keep filtered order.
    pub fn apply<'a>(&self, collection: &'a [Bookmark]) -> Vec<&'a Bookmark> {
        let term = self.search.to_lowercase();
        let mut view: Vec<&Bookmark> = collection
            .iter()
            .filter(|b| {
                term.is_empty()
                    || b.site_name.to_lowercase().contains(&term)
                    || b.site_url.to_lowercase().contains(&term)
            })
            .filter(|b| self.category.is_empty() || b.category == self.category)
            .collect();

        match self.sort {
            SortKey::Newest => view.sort_by_key(|b| std::cmp::Reverse(b.added_at_millis())),
            SortKey::Oldest => view.sort_by_key(|b| b.added_at_millis()),
            SortKey::NameAsc => view.sort_by(|a, b| locale_cmp(&a.site_name, &b.site_name)),
            SortKey::NameDesc => view.sort_by(|a, b| locale_cmp(&b.site_name, &a.site_name)),
            SortKey::Unsorted => {}
        }
        view
    }
}

/// Convenience wrapper over [`Query::apply`].
pub fn query<'a>(
    collection: &'a [Bookmark],
    search: &str,
    category: &str,
    sort: SortKey,
) -> Vec<&'a Bookmark> {
    Query::new(search, category, sort).apply(collection)
}

/// Approximation of a locale collation for names. Characters compare by class
/// first (whitespace, then punctuation and symbols, then digits, then letters),
/// then case-insensitively; remaining ties put lowercase before uppercase,
/// so "_abc" < "1abc" < "apple" < "Apple" < "banana".
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = |s: &str| {
        s.chars()
            .flat_map(char::to_lowercase)
            .map(|c| (collation_class(c), c))
            .collect::<Vec<_>>()
    };
    primary(a).cmp(&primary(b)).then_with(|| {
        a.chars()
            .zip(b.chars())
            .find(|(x, y)| x != y)
            .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => x.cmp(&y),
            })
            .unwrap_or_else(|| a.len().cmp(&b.len()))
    })
}

fn collation_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    }
}
