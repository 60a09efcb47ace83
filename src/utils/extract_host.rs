//! Short URL construction from the request's `Host` header.

use crate::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;

/// Returns the `Host` header value, port included.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if:
/// - The `Host` header is missing or empty
/// - The header value contains invalid UTF-8
pub fn extract_host_from_headers(headers: &HeaderMap) -> Result<String, AppError> {
    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?
        .trim();

    if host.is_empty() {
        return Err(AppError::bad_request("Missing Host header", json!({})));
    }

    Ok(host.to_string())
}

/// Builds the full short URL shown to the user.
///
/// Uses `public_base_url` when configured, otherwise the request's host.
///
/// # Examples
///
/// ```ignore
/// let url = short_url(Some("https://s.example.com/"), &headers, "aB3xZ")?;
/// assert_eq!(url, "https://s.example.com/aB3xZ");
/// ```
pub fn short_url(
    public_base_url: Option<&str>,
    headers: &HeaderMap,
    slug: &str,
) -> Result<String, AppError> {
    let base = match public_base_url {
        Some(base) => base.trim_end_matches('/').to_string(),
        None => extract_host_from_headers(headers)?,
    };

    Ok(format!("{base}/{slug}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};

    fn headers_with_host(host: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static(host));
        headers
    }

    #[test]
    fn test_extract_host_keeps_port() {
        let headers = headers_with_host("localhost:3000");
        assert_eq!(extract_host_from_headers(&headers).unwrap(), "localhost:3000");
    }

    #[test]
    fn test_extract_host_ipv6() {
        let headers = headers_with_host("[::1]:8080");
        assert_eq!(extract_host_from_headers(&headers).unwrap(), "[::1]:8080");
    }

    #[test]
    fn test_extract_host_missing() {
        let result = extract_host_from_headers(&HeaderMap::new());
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[test]
    fn test_extract_host_empty() {
        let headers = headers_with_host("");
        assert!(extract_host_from_headers(&headers).is_err());
    }

    #[test]
    fn test_short_url_from_host() {
        let headers = headers_with_host("s.example.com");
        assert_eq!(
            short_url(None, &headers, "aB3xZ").unwrap(),
            "s.example.com/aB3xZ"
        );
    }

    #[test]
    fn test_short_url_prefers_base_url() {
        let headers = headers_with_host("internal:3000");
        assert_eq!(
            short_url(Some("https://s.example.com/"), &headers, "aB3xZ").unwrap(),
            "https://s.example.com/aB3xZ"
        );
    }

    #[test]
    fn test_short_url_base_url_without_host_header() {
        assert_eq!(
            short_url(Some("https://s.example.com"), &HeaderMap::new(), "q").unwrap(),
            "https://s.example.com/q"
        );
    }
}
