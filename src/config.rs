//! Client configuration.
//!
//! TOML-deserializable settings for the gateway connection. Both API keys
//! come from the merchant's Worldpay dashboard; the service key
//! authenticates server-side calls and the client key is echoed into
//! token requests.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{Result, WorldpayError};

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.worldpay.com/v1";

/// Gateway connection settings.
///
/// # Examples
///
/// ```toml
/// service_key = "T_S_f50ecb46-ca82-44a7-9c40-421818af5c4a"
/// client_key = "T_C_6d103f82-76bb-4ad8-b1fb-d33d1ff93fee"
/// timeout_secs = 65
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server-side API key.
    pub service_key: String,

    /// Client-side API key.
    pub client_key: String,

    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_timeout_secs() -> u64 {
    65
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Creates a configuration from the two API keys, with defaults for
    /// everything else.
    #[must_use]
    pub fn new(service_key: &str, client_key: &str) -> Self {
        Self {
            service_key: service_key.to_owned(),
            client_key: client_key.to_owned(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] for malformed TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|err| WorldpayError::Validation(format!("invalid configuration: {err}")))
    }

    /// Reads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] when the file cannot be read
    /// or parsed.
    pub fn from_toml_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            WorldpayError::Validation(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Validates configuration values are within acceptable bounds.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] when either key is empty,
    /// the base URL is not HTTPS, or a timeout is outside its range:
    /// - `timeout_secs`: 1-300 seconds
    /// - `connect_timeout_secs`: 1-60 seconds
    pub fn validate(&self) -> Result<()> {
        if self.service_key.is_empty() {
            return Err(WorldpayError::Validation("service_key must be set".into()));
        }
        if self.client_key.is_empty() {
            return Err(WorldpayError::Validation("client_key must be set".into()));
        }
        let url = Url::parse(&self.base_url)
            .map_err(|err| WorldpayError::Validation(format!("invalid base_url: {err}")))?;
        if url.scheme() != "https" {
            return Err(WorldpayError::Validation(
                "base_url must use the https scheme".into(),
            ));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(WorldpayError::Validation(
                "timeout_secs must be between 1 and 300".into(),
            ));
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 60 {
            return Err(WorldpayError::Validation(
                "connect_timeout_secs must be between 1 and 60".into(),
            ));
        }
        Ok(())
    }

    /// Returns the request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the connection timeout as a [`Duration`].
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_toml() {
        let config = Config::from_toml_str(
            r#"
            service_key = "T_S_xxx"
            client_key = "T_C_yyy"
            "#,
        )
        .unwrap();
        assert_eq!(config.service_key, "T_S_xxx");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(65));
        config.validate().unwrap();
    }

    #[test]
    fn test_missing_keys_rejected() {
        assert!(Config::from_toml_str("service_key = \"T_S_xxx\"").is_err());
        assert!(Config::new("", "T_C_yyy").validate().is_err());
        assert!(Config::new("T_S_xxx", "").validate().is_err());
    }

    #[test]
    fn test_base_url_must_be_https() {
        let mut config = Config::new("T_S_xxx", "T_C_yyy");
        config.base_url = "http://api.worldpay.com/v1".into();
        assert!(config.validate().is_err());
        config.base_url = "not a url".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_bounds() {
        let mut config = Config::new("T_S_xxx", "T_C_yyy");
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
        config.timeout_secs = 301;
        assert!(config.validate().is_err());
        config.timeout_secs = 65;
        config.connect_timeout_secs = 61;
        assert!(config.validate().is_err());
    }
}
