//! Configuration handling for the client

use crate::api::DEFAULT_BASE_URL;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User configuration, stored as JSON in the platform config directory
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    /// Base URL of the content API
    pub api_base_url: Option<String>,
    /// Bearer token attached to every request
    pub api_token: Option<String>,
    /// Refuse to submit entries with blank required fields
    pub enforce_required: Option<bool>,
    /// Send the `required` flag when creating content types
    pub send_required_flag: Option<bool>,
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "content-studio", "content-studio")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        tracing::info!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Layer `overrides` on top of this config; set values in `overrides` win
    pub fn merged_with(self, overrides: AppConfig) -> AppConfig {
        AppConfig {
            api_base_url: overrides.api_base_url.or(self.api_base_url),
            api_token: overrides.api_token.or(self.api_token),
            enforce_required: overrides.enforce_required.or(self.enforce_required),
            send_required_flag: overrides.send_required_flag.or(self.send_required_flag),
        }
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn enforce_required(&self) -> bool {
        self.enforce_required.unwrap_or(false)
    }

    pub fn send_required_flag(&self) -> bool {
        self.send_required_flag.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("content-studio-test-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url(), DEFAULT_BASE_URL);
        assert!(!config.enforce_required());
        assert!(config.send_required_flag());
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"api_base_url": "http://cms.local/api", "theme": "dark"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.api_base_url(), "http://cms.local/api");
    }

    #[test]
    fn test_overrides_win_and_gaps_fall_through() {
        let file = AppConfig {
            api_base_url: Some("http://file/api".into()),
            api_token: Some("file-token".into()),
            enforce_required: Some(true),
            send_required_flag: None,
        };
        let cli = AppConfig {
            api_base_url: Some("http://cli/api".into()),
            ..Default::default()
        };

        let merged = file.merged_with(cli);
        assert_eq!(merged.api_base_url(), "http://cli/api");
        assert_eq!(merged.api_token.as_deref(), Some("file-token"));
        assert!(merged.enforce_required());
        assert!(merged.send_required_flag());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let config = AppConfig::load_from(&scratch_path("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_creates_parent_and_round_trips() {
        let path = scratch_path("config.json");
        let config = AppConfig {
            api_base_url: Some("http://localhost:5000/api".into()),
            enforce_required: Some(true),
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let path = scratch_path("config.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        assert!(AppConfig::load_from(&path).is_err());

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}
