//! Plugin configuration.
//!
//! Loaded from TOML; every key is optional.
//!
//! ```toml
//! timezone = "+09:00"
//! post_type = "post"
//! meta_key = "expiration_date"
//! log_filter = "postexp_core=debug,info"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::HostTimeZone;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Zone used to read timestamps that carry no offset.
    pub timezone: HostTimeZone,

    pub post_type: String,

    pub meta_key: String,

    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: HostTimeZone::utc(),
            post_type: "post".to_string(),
            meta_key: "expiration_date".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.meta_key, "expiration_date");
        assert_eq!(config.post_type, "post");
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_toml_str(
            r#"
            timezone = "+09:00"
            meta_key = "expires_at"
            "#,
        )
        .unwrap();
        assert_eq!(config.timezone.to_string(), "+09:00");
        assert_eq!(config.meta_key, "expires_at");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn bad_timezone_is_a_parse_error() {
        let err = Config::from_toml_str(r#"timezone = "Mars/Olympus""#).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml_str(r#"colour = "red""#).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::load("/nonexistent/postexp.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/postexp.toml"));
    }
}
