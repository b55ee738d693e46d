//! Destination URL validation and normalization.
//!
//! Link destinations are stored in a canonical form so the same target entered
//! twice looks the same in the editor and in analytics.

use url::Url;

/// Longest destination URL accepted, after trimming.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL is longer than {MAX_URL_LENGTH} characters")]
    TooLong,

    #[error("Failed to normalize URL: {0}")]
    NormalizationFailed(String),
}

/// Normalizes a destination URL.
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. Only absolute `http`/`https` URLs with a host are accepted
/// 3. The host is lowercased
/// 4. Default ports (80, 443) and fragments are removed
/// 5. Path and query are preserved as-is
///
/// # Errors
///
/// Returns [`UrlNormalizationError`] describing the first rule violated.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_url(" HTTPS://Shop.Example.COM:443/sale#top ").unwrap(),
///     "https://shop.example.com/sale"
/// );
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let input = input.trim();
    if input.len() > MAX_URL_LENGTH {
        return Err(UrlNormalizationError::TooLong);
    }

    let mut url =
        Url::parse(input).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or(UrlNormalizationError::MissingHost)?
        .to_ascii_lowercase();
    url.set_host(Some(&host)).map_err(|_| {
        UrlNormalizationError::NormalizationFailed("Failed to set normalized host".to_string())
    })?;

    url.set_fragment(None);

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port {
        url.set_port(None).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("Failed to remove default port".to_string())
        })?;
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases_host() {
        assert_eq!(
            normalize_url("  https://Shop.EXAMPLE.com/Sale  ").unwrap(),
            "https://shop.example.com/Sale"
        );
    }

    #[test]
    fn test_normalize_adds_root_path() {
        assert_eq!(
            normalize_url("https://example.com").unwrap(),
            "https://example.com/"
        );
    }

    #[test]
    fn test_normalize_drops_default_ports_only() {
        assert_eq!(
            normalize_url("http://example.com:80/a").unwrap(),
            "http://example.com/a"
        );
        assert_eq!(
            normalize_url("https://example.com:443/a").unwrap(),
            "https://example.com/a"
        );
        assert_eq!(
            normalize_url("https://example.com:8443/a").unwrap(),
            "https://example.com:8443/a"
        );
    }

    #[test]
    fn test_normalize_drops_fragment_keeps_query() {
        assert_eq!(
            normalize_url("https://example.com/p?utm_source=bio&ref=ig#top").unwrap(),
            "https://example.com/p?utm_source=bio&ref=ig"
        );
    }

    #[test]
    fn test_rejects_relative_and_garbage() {
        assert!(matches!(
            normalize_url("example.com/shop"),
            Err(UrlNormalizationError::InvalidFormat(_))
        ));
        assert!(matches!(
            normalize_url(""),
            Err(UrlNormalizationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_non_http_schemes() {
        for input in [
            "javascript:alert(1)",
            "data:text/html,hi",
            "mailto:me@example.com",
            "ftp://example.com/file",
            "file:///etc/passwd",
        ] {
            assert!(
                matches!(
                    normalize_url(input),
                    Err(UrlNormalizationError::UnsupportedProtocol)
                ),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_overlong_url() {
        let url = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(matches!(
            normalize_url(&url),
            Err(UrlNormalizationError::TooLong)
        ));
    }
}
