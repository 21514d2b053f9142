//! URL utilities for consistent endpoint handling
//!
//! Users configure the service base URL with or without a trailing slash;
//! these helpers keep the constructed endpoint URLs free of double slashes.

/// Normalize a base URL by removing trailing slashes
///
/// # Examples
///
/// ```
/// use minbar::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://127.0.0.1:5000"), "http://127.0.0.1:5000");
/// assert_eq!(normalize_base_url("http://127.0.0.1:5000/"), "http://127.0.0.1:5000");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Construct a complete endpoint URL from a base URL and an endpoint path
///
/// # Examples
///
/// ```
/// use minbar::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://127.0.0.1:5000", "ask"),
///     "http://127.0.0.1:5000/ask"
/// );
/// assert_eq!(
///     construct_api_url("http://127.0.0.1:5000/", "/ask"),
///     "http://127.0.0.1:5000/ask"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{normalized_base}/{endpoint}")
}
