//! Helpers for joining the backend base URL with endpoint paths.
//!
//! The base URL comes from user configuration and may or may not carry a
//! trailing slash; endpoints are always joined with exactly one.

/// Remove trailing slashes from a base URL.
///
/// # Examples
///
/// ```
/// use qchat::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:8000"), "http://localhost:8000");
/// assert_eq!(normalize_base_url("http://localhost:8000/"), "http://localhost:8000");
/// assert_eq!(normalize_base_url("https://chat.example.com/api///"), "https://chat.example.com/api");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path with a single slash.
///
/// An empty endpoint addresses the backend root, which is where the liveness
/// check lives.
///
/// ```
/// use qchat::utils::url::construct_api_url;
///
/// assert_eq!(construct_api_url("http://localhost:8000/", "/chat"), "http://localhost:8000/chat");
/// assert_eq!(construct_api_url("http://localhost:8000", ""), "http://localhost:8000/");
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{normalized_base}/{endpoint}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:8000"),
            "http://localhost:8000"
        );
        assert_eq!(
            normalize_base_url("http://localhost:8000/"),
            "http://localhost:8000"
        );
        assert_eq!(
            normalize_base_url("  https://qchat.example.com///  "),
            "https://qchat.example.com"
        );
        assert_eq!(normalize_base_url(""), "");
        assert_eq!(normalize_base_url("///"), "");
    }

    #[test]
    fn test_construct_api_url() {
        assert_eq!(
            construct_api_url("http://localhost:8000", "chat"),
            "http://localhost:8000/chat"
        );
        assert_eq!(
            construct_api_url("http://localhost:8000/", "/chat"),
            "http://localhost:8000/chat"
        );
        assert_eq!(
            construct_api_url("https://example.com/proxy///", "///chat"),
            "https://example.com/proxy/chat"
        );
        assert_eq!(
            construct_api_url("http://localhost:8000/", ""),
            "http://localhost:8000/"
        );
    }
}
