//! Process configuration, read once at startup.
//!
//! # Environment Variables
//!
//! - `OPENAI_API_KEY` — credential for the completion API. May be absent at
//!   startup; every dispatch then fails.
//! - `OPENAI_BASE_URL` — alternate API base URL (default: OpenAI)
//! - `OPENAI_ORGANIZATION` — organization sent as `OpenAI-Organization`
//! - `HOST` — bind address (default: `0.0.0.0`)
//! - `PORT` — HTTP port (default: 8080)
//!
//! A `.env` file in the working directory is loaded first, without
//! overriding variables that are already set.

use thiserror::Error;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value '{0}': expected an integer between 0 and 65535")]
    InvalidPort(String),
}

/// Server and client configuration.
#[derive(Clone, Default)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub organization: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl AppConfig {
    /// Load `.env` and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u16>()
                    .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            ),
            None => None,
        };

        Ok(Self {
            api_key: get("OPENAI_API_KEY"),
            base_url: get("OPENAI_BASE_URL"),
            organization: get("OPENAI_ORGANIZATION"),
            host: get("HOST"),
            port,
        })
    }

    /// `host:port` to bind the HTTP listener to.
    pub fn bind_addr(&self) -> String {
        format!(
            "{}:{}",
            self.host.as_deref().unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT)
        )
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("organization", &self.organization)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert!(!cfg.has_api_key());
        assert_eq!(cfg.base_url, None);
        assert_eq!(cfg.organization, None);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_reads_values() {
        let cfg = config(&[
            ("OPENAI_API_KEY", "sk-abc"),
            ("OPENAI_BASE_URL", "http://localhost:9000/v1"),
            ("OPENAI_ORGANIZATION", "org-123"),
            ("HOST", "127.0.0.1"),
            ("PORT", " 3000 "),
        ])
        .unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("sk-abc"));
        assert_eq!(cfg.base_url.as_deref(), Some("http://localhost:9000/v1"));
        assert_eq!(cfg.organization.as_deref(), Some("org-123"));
        assert_eq!(cfg.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_blank_values_are_unset() {
        let cfg = config(&[("OPENAI_API_KEY", "  "), ("PORT", "")]).unwrap();
        assert!(!cfg.has_api_key());
        assert_eq!(cfg.port, None);
    }

    #[test]
    fn test_invalid_port() {
        let err = config(&[("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(ref v) if v == "http"));
        assert!(config(&[("PORT", "70000")]).is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let cfg = config(&[("OPENAI_API_KEY", "sk-secret")]).unwrap();
        assert!(!format!("{:?}", cfg).contains("sk-secret"));
    }
}
