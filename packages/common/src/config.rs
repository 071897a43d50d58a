use crate::CommonResult;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Debounce window of the autosave status indicator
    pub autosave_delay_ms: u64,

    /// Maximum snapshots kept by the editing history (0 = unlimited)
    pub history_limit: usize,

    /// Lifetime of issued preview tokens
    pub preview_ttl_secs: i64,

    pub default_locale: String,

    pub default_store_target: String,

    /// Preset theme used for pages that do not pick one
    pub default_theme: String,
}

impl Config {
    /// Load config from a directory, falling back to defaults when the
    /// directory has no config file
    pub fn load(cwd: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_path = Self::path_in(cwd);

        if config_path.exists() {
            Self::read(&config_path)
                .with_context(|| format!("failed to load {}", config_path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Read and parse a config file
    pub fn read(path: &Path) -> CommonResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(json: &str) -> CommonResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Get the config file location for a directory
    pub fn path_in(cwd: impl AsRef<Path>) -> PathBuf {
        cwd.as_ref().join(DEFAULT_CONFIG_NAME)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            autosave_delay_ms: 800,
            history_limit: 0,
            preview_ttl_secs: 3600,
            default_locale: "en".to_string(),
            default_store_target: "default".to_string(),
            default_theme: "classic".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "autosaveDelayMs": 250,
            "historyLimit": 50,
            "previewTtlSecs": 60,
            "defaultLocale": "fr",
            "defaultTheme": "midnight"
        }"#;

        let config = Config::parse(json).unwrap();
        assert_eq!(config.autosave_delay_ms, 250);
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.preview_ttl_secs, 60);
        assert_eq!(config.default_locale, "fr");
        assert_eq!(config.default_theme, "midnight");
        // Unset keys keep their defaults
        assert_eq!(config.default_store_target, "default");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.autosave_delay_ms, 800);
        assert_eq!(config.history_limit, 0);
        assert_eq!(config.default_theme, "classic");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let result = Config::parse(r#"{ "historyLimit": "lots" }"#);
        assert!(matches!(result, Err(crate::CommonError::Config(_))));
    }
}
