//! Scheme normalization for submitted URLs.
//!
//! Normalization is a literal prefix test: anything that does not already
//! start with `http://` or `https://` gets `http://` prepended. Host case,
//! trailing slashes and query strings are left untouched, so
//! `http://Example.com` and `http://example.com/` deduplicate as different
//! URLs.

use crate::error::AppError;
use serde_json::json;

/// Scheme prepended to URLs that lack a recognized one.
pub const DEFAULT_SCHEME: &str = "http://";

/// Normalizes a submitted URL.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the input is empty or whitespace only.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com").unwrap(), "http://example.com");
/// assert_eq!(normalize_url("https://example.com").unwrap(), "https://example.com");
/// ```
pub fn normalize_url(input: &str) -> Result<String, AppError> {
    if input.trim().is_empty() {
        return Err(AppError::bad_request(
            "URL is required",
            json!({ "field": "url" }),
        ));
    }

    if input.starts_with("http://") || input.starts_with("https://") {
        Ok(input.to_string())
    } else {
        Ok(format!("{DEFAULT_SCHEME}{input}"))
    }
}
