//! Client configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

const fn default_timeout_ms() -> u64 {
    30_000
}

/// Configuration for the API client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every relative request path is joined onto.
    pub base_url: Url,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ClientConfig {
    /// Creates a configuration with the default timeout.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout_ms: default_timeout_ms(),
        }
    }

    /// Parses the base URL from a string.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBaseUrl`] if the string is not a
    /// valid absolute URL.
    pub fn parse(base_url: &str) -> DomainResult<Self> {
        let url = Url::parse(base_url)
            .map_err(|e| DomainError::InvalidBaseUrl(format!("{e}: {base_url}")))?;
        Ok(Self::new(url))
    }

    /// Joins a relative path onto the base URL.
    ///
    /// Trailing and leading slashes are normalized so `api/` + `/orders`
    /// and `api` + `orders` both yield `api/orders`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_endpoint_normalizes_slashes() {
        let config = ClientConfig::parse("https://api.shop.example/v1/").unwrap();
        assert_eq!(
            config.endpoint("/auth/user/refresh"),
            "https://api.shop.example/v1/auth/user/refresh"
        );
        assert_eq!(
            config.endpoint("category"),
            "https://api.shop.example/v1/category"
        );
    }

    #[test]
    fn test_parse_rejects_invalid_url() {
        assert!(ClientConfig::parse("not a url").is_err());
    }

    #[test]
    fn test_default_timeout() {
        let config = ClientConfig::parse("https://api.shop.example").unwrap();
        assert_eq!(config.timeout_ms, 30_000);
    }
}
