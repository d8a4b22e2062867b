//! Client configuration
//!
//! Where the feed API lives and how many posts to ask for per page.
//! Config can come from a YAML (or JSON) file, from the environment,
//! or from the builder. Layers do not validate on their own; call
//! [`ClientConfig::validate`] once every layer is applied.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default API location used by the original web client
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default number of posts requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Environment variable overriding the API base URL
pub const ENV_API_URL: &str = "MINISOCIAL_API_URL";

/// Environment variable overriding the page size
pub const ENV_PAGE_SIZE: &str = "MINISOCIAL_PAGE_SIZE";

/// Configuration for talking to the feed API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Posts per page
    pub page_size: u32,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(30),
            user_agent: format!("minisocial-feed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load config from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse config from a YAML string
    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Apply `MINISOCIAL_API_URL` / `MINISOCIAL_PAGE_SIZE` if set
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(size) = lookup(ENV_PAGE_SIZE).filter(|v| !v.is_empty()) {
            self.page_size = size
                .parse()
                .map_err(|e| Error::invalid_value(ENV_PAGE_SIZE, format!("{size:?}: {e}")))?;
        }
        Ok(self)
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than 0"));
        }
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        Ok(())
    }
}

/// Builder for [`ClientConfig`]
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the page size
    pub fn page_size(mut self, size: u32) -> Self {
        self.config.page_size = size;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use test_case::test_case;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("minisocial-feed/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder()
            .base_url("https://api.minisocial.dev")
            .page_size(25)
            .timeout(Duration::from_secs(5))
            .user_agent("test-agent/1.0")
            .build();

        assert_eq!(config.base_url, "https://api.minisocial.dev");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = ClientConfig::from_yaml("base_url: https://api.example.com\npage_size: 20\n")
            .unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"base_url": "http://feed.internal:9000", "timeout": 3}}"#
        )
        .unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://feed.internal:9000");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::from_file(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test_case("page_size: 0" ; "zero page size")]
    #[test_case("base_url: ''" ; "empty base url")]
    #[test_case("base_url: not a url" ; "unparseable base url")]
    #[test_case("base_url: ftp://files.example.com" ; "non http scheme")]
    fn test_invalid_yaml_rejected(yaml: &str) {
        let config = ClientConfig::from_yaml(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_API_URL, "https://staging.minisocial.dev"),
            (ENV_PAGE_SIZE, "5"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::default()
            .with_overrides_from(|k| env.get(k).map(ToString::to_string))
            .unwrap();
        assert_eq!(config.base_url, "https://staging.minisocial.dev");
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn test_overrides_bad_page_size() {
        let err = ClientConfig::default()
            .with_overrides_from(|k| (k == ENV_PAGE_SIZE).then(|| "ten".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_invalid_override_replaced_by_later_layer() {
        let env: HashMap<&str, &str> = [(ENV_API_URL, "not a url"), (ENV_PAGE_SIZE, "0")]
            .into_iter()
            .collect();

        let mut config = ClientConfig::default()
            .with_overrides_from(|k| env.get(k).map(ToString::to_string))
            .unwrap();
        assert!(config.validate().is_err());

        config.base_url = "http://127.0.0.1:9000".to_string();
        config.page_size = 5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_absent() {
        let config = ClientConfig::default().with_overrides_from(|_| None).unwrap();
        assert_eq!(config, ClientConfig::default());
    }
}
