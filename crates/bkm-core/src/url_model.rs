//! Display and navigable forms of a stored URL.

/// The two forms of a bookmark URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl {
    /// Exactly as stored.
    pub display: String,
    /// Stored URL, prefixed with `https://` unless it already starts with `http`.
    pub navigable: String,
}

/// Derive both forms. Performs no validation; the URL is expected to have passed the validator.
pub fn normalize(raw: &str) -> NormalizedUrl {
    let navigable = if raw.starts_with("http") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };
    NormalizedUrl {
        display: raw.to_string(),
        navigable,
    }
}
