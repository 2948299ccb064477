//! Extractor settings
//!
//! Settings are loaded from (in order of priority):
//! 1. JSON file (~/.config/quire/extractor.json)
//! 2. Environment variable overrides
//! 3. Built-in defaults
//!
//! Every field is optional in the file; missing fields keep their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings filename in the Quire config directory
const SETTINGS_FILE: &str = "extractor.json";

/// Tunables for one extraction run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorSettings {
    /// Wait after triggering expansion before reading the view
    pub settle_ms: u64,
    /// Bodies with this many characters or fewer are discarded as noise
    pub min_body_chars: usize,
    /// Leading characters of a body used for its dedup signature
    pub signature_chars: usize,
    /// Signatures this short or shorter are not trusted (candidate dropped)
    pub signature_min_chars: usize,
    /// Leading characters compared when checking quoted copies by containment
    pub containment_chars: usize,
    /// Timestamp candidates must be shorter than this
    pub timestamp_max_chars: usize,
    /// Quotes per container that fit between two containers' sort keys
    pub max_quotes_per_container: usize,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            settle_ms: 1000,
            min_body_chars: 15,
            signature_chars: 100,
            signature_min_chars: 10,
            containment_chars: 50,
            timestamp_max_chars: 30,
            max_quotes_per_container: 9,
        }
    }
}

impl ExtractorSettings {
    /// Load settings using the following priority:
    /// 1. JSON file (~/.config/quire/extractor.json)
    /// 2. Environment overrides (QUIRE_SETTLE_MS, QUIRE_MIN_BODY_CHARS)
    /// 3. Defaults
    pub fn load() -> Result<Self> {
        let settings = if config::config_exists(SETTINGS_FILE) {
            config::load_json(SETTINGS_FILE)?
        } else {
            Self::default()
        };

        settings.with_env_overrides()
    }

    /// Load settings from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        config::load_json_file(path)
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse extractor settings JSON")
    }

    /// Apply environment variable overrides on top of these settings
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(value) = std::env::var("QUIRE_SETTLE_MS") {
            self.settle_ms = value
                .trim()
                .parse()
                .with_context(|| format!("QUIRE_SETTLE_MS is not a number: {}", value))?;
        }
        if let Ok(value) = std::env::var("QUIRE_MIN_BODY_CHARS") {
            self.min_body_chars = value
                .trim()
                .parse()
                .with_context(|| format!("QUIRE_MIN_BODY_CHARS is not a number: {}", value))?;
        }
        Ok(self)
    }

    /// Write these settings to ~/.config/quire/extractor.json
    pub fn save(&self) -> Result<()> {
        config::save_json(SETTINGS_FILE, self)
    }

    /// Write these settings to a specific JSON file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        config::save_json_file(path, self)
    }

    /// Settle interval as a duration
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Settings with no settle wait, for views that never change
    pub fn without_settle(mut self) -> Self {
        self.settle_ms = 0;
        self
    }

    /// Get the default settings file path (~/.config/quire/extractor.json)
    pub fn default_settings_path() -> Option<PathBuf> {
        config::config_path(SETTINGS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ExtractorSettings::default();
        assert_eq!(settings.settle(), Duration::from_millis(1000));
        assert_eq!(settings.min_body_chars, 15);
        assert_eq!(settings.signature_chars, 100);
        assert_eq!(settings.timestamp_max_chars, 30);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = ExtractorSettings::from_json(r#"{ "settle_ms": 250 }"#).unwrap();
        assert_eq!(settings.settle_ms, 250);
        assert_eq!(settings.min_body_chars, 15);
        assert_eq!(settings.containment_chars, 50);
    }

    #[test]
    fn test_invalid_json() {
        assert!(ExtractorSettings::from_json(r#"{ "settle_ms": "soon" }"#).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extractor.json");
        std::fs::write(&path, r#"{ "min_body_chars": 20, "settle_ms": 0 }"#).unwrap();

        let settings = ExtractorSettings::from_file(&path).unwrap();
        assert_eq!(settings.min_body_chars, 20);
        assert_eq!(settings.settle(), Duration::ZERO);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extractor.json");
        let mut settings = ExtractorSettings::default();
        settings.max_quotes_per_container = 4;

        settings.save_to(&path).unwrap();
        assert_eq!(ExtractorSettings::from_file(&path).unwrap(), settings);
    }

    #[test]
    fn test_without_settle() {
        let settings = ExtractorSettings::default().without_settle();
        assert_eq!(settings.settle_ms, 0);
    }
}
