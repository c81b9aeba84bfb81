use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HOST_PATTERN: Regex = Regex::new(r"^https?://([^/?#]+)").unwrap();
    static ref PATH_PATTERN: Regex = Regex::new(r"^https?://[^/?#]+(/[^?#]*)").unwrap();
}

/// Authority of an absolute http(s) URL, verbatim (no lowercasing, port kept).
///
/// Returns an empty string for relative or otherwise unmatched URLs.
pub fn extract_host(url: &str) -> String {
    HOST_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Path of an absolute http(s) URL, up to the first `?` or `#`.
///
/// Falls back to `/` when there is no path segment or the URL doesn't match.
pub fn extract_path(url: &str) -> String {
    PATH_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "/".to_string())
}
