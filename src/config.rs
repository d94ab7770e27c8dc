//! Top-level application configuration.
//!
//! Configuration is stored in `.medidesk/config.yaml` and includes:
//! - The hospital API base URL and bearer token
//! - Request timeout
//! - Auto-refresh polling interval
//!
//! Environment variables `MEDIDESK_API_URL` and `MEDIDESK_API_TOKEN`
//! override the file, so a token never has to land on disk.

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{MedideskError, Result};
use crate::types::MEDIDESK_DIR;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default, skip_serializing_if = "PollConfig::is_default")]
    pub poll: PollConfig,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the hospital API, e.g. `https://hms.example.org/api`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Bearer token. Prefer the MEDIDESK_API_TOKEN environment variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: None,
            token: None,
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Auto-refresh interval in seconds (default: 30)
    #[serde(default = "default_poll_interval")]
    pub interval: u64,
}

impl PollConfig {
    pub fn is_default(&self) -> bool {
        *self == PollConfig::default()
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig {
            interval: default_poll_interval(),
        }
    }
}

fn default_poll_interval() -> u64 {
    30
}

impl Config {
    pub fn config_path() -> PathBuf {
        PathBuf::from(MEDIDESK_DIR).join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// API base URL, environment variable first
    pub fn api_url(&self) -> Option<String> {
        if let Ok(url) = env::var("MEDIDESK_API_URL")
            && !url.is_empty()
        {
            return Some(url);
        }
        self.api.base_url.clone()
    }

    /// Bearer token, environment variable first
    pub fn api_token(&self) -> Option<String> {
        if let Ok(token) = env::var("MEDIDESK_API_TOKEN")
            && !token.is_empty()
        {
            return Some(token);
        }
        self.api.token.clone()
    }

    /// Read a dotted config key. The token comes back redacted.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "api.base_url" => Ok(self.api.base_url.clone().unwrap_or_default()),
            "api.token" => Ok(self
                .api
                .token
                .as_ref()
                .map(|_| "[REDACTED]".to_string())
                .unwrap_or_default()),
            "api.timeout" => Ok(self.api.timeout.to_string()),
            "poll.interval" => Ok(self.poll.interval.to_string()),
            _ => Err(MedideskError::Config(format!("unknown key '{}'", key))),
        }
    }

    /// Set a dotted config key from its string form
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => self.api.base_url = Some(value.to_string()),
            "api.token" => self.api.token = Some(value.to_string()),
            "api.timeout" => {
                self.api.timeout = value.parse().map_err(|_| {
                    MedideskError::Config(format!("api.timeout must be a number, got '{}'", value))
                })?;
            }
            "poll.interval" => {
                self.poll.interval = value.parse().map_err(|_| {
                    MedideskError::Config(format!(
                        "poll.interval must be a number, got '{}'",
                        value
                    ))
                })?;
            }
            _ => return Err(MedideskError::Config(format!("unknown key '{}'", key))),
        }
        Ok(())
    }
}

pub const VALID_CONFIG_KEYS: &[&str] =
    &["api.base_url", "api.token", "api.timeout", "poll.interval"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api.base_url.is_none());
        assert!(config.api.token.is_none());
        assert_eq!(config.api.timeout, 30);
        assert_eq!(config.poll.interval, 30);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.set("api.base_url", "http://hospital.local/api").unwrap();
        config.set("api.timeout", "10").unwrap();

        let yaml = serde_yaml_ng::to_string(&config).unwrap();
        let parsed: Config = serde_yaml_ng::from_str(&yaml).unwrap();

        assert_eq!(
            parsed.api.base_url.as_deref(),
            Some("http://hospital.local/api")
        );
        assert_eq!(parsed.api.timeout, 10);
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        let mut config = Config::default();
        assert!(config.set("api.retries", "3").is_err());
    }

    #[test]
    fn test_get_redacts_token() {
        let mut config = Config::default();
        config.set("api.token", "s3cret").unwrap();
        assert_eq!(config.get("api.token").unwrap(), "[REDACTED]");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("s3cret"));
    }
}
