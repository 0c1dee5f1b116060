//! Client Configuration
//!
//! Backend location and request defaults, resolved once at startup.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};

/// Used when `BORROWDESK_API_URL` is not set at build time
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Every request gives up after this long
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `http://localhost:8000/api` (no trailing slash)
    pub base_url: String,
    /// Server root with the `/api` segment removed, e.g. `http://localhost:8000`
    pub server_url: String,
    pub timeout: Duration,
    /// Send cookies with every request
    pub with_credentials: bool,
    pub default_headers: HeaderMap,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let server_url = strip_api_segment(&base_url);

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Self {
            base_url,
            server_url,
            timeout: REQUEST_TIMEOUT,
            with_credentials: true,
            default_headers,
        }
    }

    /// Read the base URL baked in at compile time.
    ///
    /// A browser bundle has no process environment, so the value is captured
    /// by `option_env!` when the crate is built.
    pub fn from_env() -> Self {
        let base_url = option_env!("BORROWDESK_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_API_URL);
        Self::new(base_url)
    }

    /// Absolute URL for an API route such as `/user/items`
    pub fn api_url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Absolute URL for a route outside the API root, such as `/sanctum/csrf-cookie`
    pub fn server_endpoint(&self, path: &str) -> String {
        join_url(&self.server_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn join_url(root: &str, path: &str) -> String {
    format!("{}/{}", root.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Remove a trailing `api` path segment. `http://host/api` -> `http://host`.
fn strip_api_segment(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    match trimmed.strip_suffix("/api") {
        Some(root) => root.to_string(),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api");
        assert_eq!(config.server_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.with_credentials);
        assert_eq!(config.default_headers.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(config.default_headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_trailing_slashes_are_trimmed() {
        let config = ClientConfig::new("https://inventory.example.com/api/");
        assert_eq!(config.base_url, "https://inventory.example.com/api");
        assert_eq!(config.server_url, "https://inventory.example.com");
        assert_eq!(config.api_url("/user/items"), "https://inventory.example.com/api/user/items");
        assert_eq!(
            config.server_endpoint("/sanctum/csrf-cookie"),
            "https://inventory.example.com/sanctum/csrf-cookie"
        );
    }

    #[test]
    fn test_api_segment_must_be_whole() {
        let config = ClientConfig::new("https://example.com/rapi");
        assert_eq!(config.server_url, "https://example.com/rapi");
    }
}
