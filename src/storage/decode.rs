//! Tolerant decoding of JSON-valued columns
//!
//! A corrupted or legacy row must never break retrieval, so every structured
//! column is decoded through [`decode_or`], which falls back to a typed
//! default and logs the failure instead of returning an error.

use serde::de::DeserializeOwned;

/// Decode `raw` as `T`, returning `fallback()` on malformed input.
///
/// `column` and `id` are only used for the log line.
pub fn decode_or<T, F>(raw: &str, column: &str, id: &str, fallback: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(component = id, column, "malformed JSON column, using default: {}", e);
            fallback()
        }
    }
}

/// Like [`decode_or`] for nullable columns: `NULL` stays `None`, malformed
/// text decodes to `Some(fallback())`.
pub fn decode_optional_or<T, F>(raw: Option<&str>, column: &str, id: &str, fallback: F) -> Option<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    raw.map(|text| decode_or(text, column, id, fallback))
}
