//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default admissions API base URL
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// Default path of the admission endpoint under the base URL
pub const DEFAULT_ADMISSION_PATH: &str = "/admissions";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Env var overriding `api_base_url`
pub const API_URL_ENV: &str = "ADMISSION_API_URL";

/// Env var overriding `auth_token`
pub const API_TOKEN_ENV: &str = "ADMISSION_API_TOKEN";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TuiConfig {
    /// Base URL of the admissions API
    pub api_base_url: Option<String>,
    /// Path of the admission endpoint, appended to the base URL
    pub admission_path: Option<String>,
    /// Bearer token sent with the submission
    pub auth_token: Option<String>,
    /// Request timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("edu", "campus", "admission-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Log file location, if a data directory exists for this platform
    pub fn log_file() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("admission-tui.log"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override file values with non-empty environment values
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = non_empty(API_URL_ENV) {
            self.api_base_url = Some(url);
        }
        if let Some(token) = non_empty(API_TOKEN_ENV) {
            self.auth_token = Some(token);
        }
    }

    /// Full URL the application is posted to
    pub fn endpoint(&self) -> String {
        let base = self
            .api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/');
        let path = self
            .admission_path
            .as_deref()
            .unwrap_or(DEFAULT_ADMISSION_PATH)
            .trim_start_matches('/');
        format!("{base}/{path}")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Token to send, ignoring blank values
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.api_base_url.is_none());
        assert!(config.auth_token().is_none());
        assert_eq!(config.endpoint(), "http://127.0.0.1:5000/api/admissions");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_endpoint_joins_slashes_once() {
        let config = TuiConfig {
            api_base_url: Some("https://college.example.edu/api/".to_string()),
            admission_path: Some("/v1/applications".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.endpoint(),
            "https://college.example.edu/api/v1/applications"
        );
    }

    #[test]
    fn test_zero_timeout_falls_back() {
        let config = TuiConfig {
            request_timeout_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let config = TuiConfig {
            auth_token: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.auth_token().is_none());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = TuiConfig {
            api_base_url: Some("http://file".to_string()),
            auth_token: Some("file-token".to_string()),
            ..Default::default()
        };
        config.apply_env(env(&[
            (API_URL_ENV, "http://env"),
            (API_TOKEN_ENV, "env-token"),
        ]));
        assert_eq!(config.api_base_url.as_deref(), Some("http://env"));
        assert_eq!(config.auth_token(), Some("env-token"));
    }

    #[test]
    fn test_empty_env_keeps_file_values() {
        let mut config = TuiConfig {
            api_base_url: Some("http://file".to_string()),
            ..Default::default()
        };
        config.apply_env(env(&[(API_URL_ENV, "")]));
        assert_eq!(config.api_base_url.as_deref(), Some("http://file"));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, TuiConfig::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Unknown keys are ignored
        let json = r#"{"api_base_url": "http://x", "theme": "dark"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.api_base_url.as_deref(), Some("http://x"));
    }

    #[test]
    fn test_log_file_sits_beside_data() {
        if let Some(path) = TuiConfig::log_file() {
            assert!(path.ends_with("admission-tui.log"));
        }
    }
}
