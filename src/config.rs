// src/config.rs
//! Client configuration: defaults, optional `chat.yml`, then environment overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ChatError, Result};

pub const DEFAULT_SOCKET_URL: &str = "http://localhost:3001";
pub const DEFAULT_CONFIG_FILE: &str = "chat.yml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub socket_url: String,
    pub title: String,
    pub welcome_message: String,
    pub placeholder: String,
    /// `None` disables the pending-request timeout.
    pub request_timeout_secs: Option<u64>,
    pub reconnect_delay_ms: u64,
    pub toast_duration_ms: u64,
    pub log_dir: String,
    pub debug: bool,
    pub dark_theme: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            socket_url: DEFAULT_SOCKET_URL.to_string(),
            title: "Mental Health Support".to_string(),
            welcome_message: "Hello. I'm here to listen. How are you feeling today?".to_string(),
            placeholder: "Share what's on your mind...".to_string(),
            request_timeout_secs: Some(60),
            reconnect_delay_ms: 1000,
            toast_duration_ms: 2000,
            log_dir: "./logs".to_string(),
            debug: false,
            dark_theme: false,
        }
    }
}

impl ClientConfig {
    /// Loads from `CHAT_CONFIG` (or `./chat.yml` when present) and applies env overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var("CHAT_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(|| {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            });

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Applies overrides from a variable lookup (the process environment in production).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SOCKET_URL").filter(|v| !v.trim().is_empty()) {
            self.socket_url = url;
        }
        if let Some(dir) = lookup("LOG_DIR").filter(|v| !v.trim().is_empty()) {
            self.log_dir = dir;
        }
        if let Some(debug) = lookup("DEBUG") {
            self.debug = debug == "true";
        }
        if let Some(raw) = lookup("REQUEST_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ChatError::ConfigError(format!("REQUEST_TIMEOUT_SECS is not a number: {}", raw))
            })?;
            self.request_timeout_secs = (secs > 0).then_some(secs);
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ClientConfig::from_yaml("socket_url: http://chat.local:4000\ndark_theme: true\n")
            .unwrap();

        assert_eq!(config.socket_url, "http://chat.local:4000");
        assert!(config.dark_theme);
        assert_eq!(config.reconnect_delay_ms, 1000);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_null_timeout_disables_it() {
        let config = ClientConfig::from_yaml("request_timeout_secs: null\n").unwrap();
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_zero_timeout_in_yaml_disables_it() {
        let config = ClientConfig::from_yaml("request_timeout_secs: 0\n").unwrap();
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let result = ClientConfig::from_yaml("socket_url: [unterminated");
        assert!(matches!(result, Err(ChatError::YamlError(_))));
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("SOCKET_URL", "https://support.example.org"),
            ("DEBUG", "true"),
            ("REQUEST_TIMEOUT_SECS", "0"),
        ]);
        let mut config = ClientConfig::default();
        config.apply_env(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(config.socket_url, "https://support.example.org");
        assert!(config.debug);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_blank_socket_url_falls_back_to_default() {
        let vars = env(&[("SOCKET_URL", "  ")]);
        let mut config = ClientConfig::default();
        config.apply_env(|key| vars.get(key).cloned()).unwrap();
        assert_eq!(config.socket_url, DEFAULT_SOCKET_URL);
    }

    #[test]
    fn test_bad_timeout_env_is_rejected() {
        let vars = env(&[("REQUEST_TIMEOUT_SECS", "soon")]);
        let mut config = ClientConfig::default();
        assert!(config.apply_env(|key| vars.get(key).cloned()).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chat.yml");
        std::fs::write(&path, "title: Night Line\ntoast_duration_ms: 500\n").unwrap();

        let config = ClientConfig::from_file(&path).unwrap();
        assert_eq!(config.title, "Night Line");
        assert_eq!(config.toast_duration(), Duration::from_millis(500));
    }
}
