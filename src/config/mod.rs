//! Configuration and file locations

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Ten years
const MAX_SESSION_HOURS: u32 = 24 * 365 * 10;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the marketplace REST API
    pub api_base_url: String,
    /// Lifetime of the client-side session watermark, in hours
    pub session_hours: u32,
    /// Login entry point used in redirects
    pub login_path: String,
    /// Per-request timeout; unset means wait indefinitely
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            session_hours: 24,
            login_path: "/login".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Get config directory path
    fn config_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "market-cli", "market-cli")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }

    /// Get config file path
    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Where the session record is persisted
    pub fn session_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("session.toml"))
    }

    /// Load configuration from disk, falling back to defaults
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config file")?;
        if config.api_base_url.trim().is_empty() {
            anyhow::bail!("api_base_url must not be empty");
        }
        if config.session_hours > MAX_SESSION_HOURS {
            anyhow::bail!(
                "session_hours = {} exceeds the maximum of {}",
                config.session_hours,
                MAX_SESSION_HOURS
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = Config::parse("api_base_url = \"https://market.example.com/api\"\n").unwrap();
        assert_eq!(config.api_base_url, "https://market.example.com/api");
        assert_eq!(config.session_hours, 24);
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.request_timeout_secs, None);
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse(
            r#"
api_base_url = "https://market.example.com/api"
session_hours = 2
login_path = "/auth/sign-in"
request_timeout_secs = 15
"#,
        )
        .unwrap();
        assert_eq!(config.session_hours, 2);
        assert_eq!(config.login_path, "/auth/sign-in");
        assert_eq!(config.request_timeout_secs, Some(15));
    }

    #[test]
    fn test_rejects_oversized_session_hours() {
        let err = Config::parse("session_hours = 4000000000").unwrap_err();
        assert!(err.to_string().contains("session_hours"));
        assert!(Config::parse("session_hours = 87600").is_ok());
    }

    #[test]
    fn test_rejects_empty_base_url() {
        assert!(Config::parse("api_base_url = \"  \"").is_err());
        assert!(Config::parse("session_hours = \"many\"").is_err());
    }
}
