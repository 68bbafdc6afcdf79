//! Connection settings for the invoicing API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default API root of the hosted Invoice Ninja service.
pub const DEFAULT_BASE_URL: &str = "https://app.invoiceninja.com/api/v1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// `[invoice_ninja]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NinjaConfig {
    /// API root, e.g. `https://invoicing.example.com/api/v1`.
    pub base_url: String,
    /// API token sent as `X-Ninja-Token`.
    pub token: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for NinjaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl NinjaConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Absolute URL of an API resource.
    #[must_use]
    pub fn endpoint(&self, resource: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            resource.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NinjaConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.token.is_empty());
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_endpoint_joins_slashes() {
        let config = NinjaConfig {
            base_url: "https://ninja.example.com/api/v1/".to_string(),
            ..NinjaConfig::default()
        };
        assert_eq!(
            config.endpoint("/invoices"),
            "https://ninja.example.com/api/v1/invoices"
        );
        assert_eq!(
            config.endpoint("static"),
            "https://ninja.example.com/api/v1/static"
        );
    }
}
