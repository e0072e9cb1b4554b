// API client configuration

use std::env;

/// Environment variable overriding the API base URL
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";

/// Base URL used when no override is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Connection settings for [`crate::ApiClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Create a configuration for an explicit base URL
    ///
    /// A single trailing slash is stripped so that paths starting with `/`
    /// can be appended verbatim.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
        }
    }

    /// Read the base URL from `API_BASE_URL`, falling back to
    /// `http://localhost:5000`
    pub fn from_env() -> Self {
        let base_url = env::var(API_BASE_URL_ENV)
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn normalize_base_url(mut base_url: String) -> String {
    if base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}
