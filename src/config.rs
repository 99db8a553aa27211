use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::core::diff_parser::IgnoreRule;
use crate::error::ReviewError;

pub const CONFIG_FILE: &str = ".reviewrc.json";

/// Settings for one review run. Loaded once at startup from `.reviewrc.json`
/// in the working directory, with environment overrides applied on top, and
/// immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewConfig {
    pub api_key: Option<String>,
    pub api_endpoint: String,
    pub ignore_files: Vec<String>,
    pub max_diff_lines: usize,
    pub model: String,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_endpoint: "https://api.deepseek.com/chat/completions".to_string(),
            ignore_files: vec![
                ".lock".to_string(),
                ".json".to_string(),
                ".md".to_string(),
                ".gitignore".to_string(),
            ],
            max_diff_lines: 300,
            model: "deepseek-chat".to_string(),
        }
    }
}

impl ReviewConfig {
    pub fn load() -> Self {
        let mut config = Self::load_from(Path::new("."));
        config.apply_env_overrides(
            std::env::var("REVIEW_API_KEY").ok(),
            std::env::var("REVIEW_API_ENDPOINT").ok(),
        );
        config
    }

    /// Reads the config file from `dir`. A missing or malformed file falls
    /// back to defaults; malformed JSON additionally warns.
    pub fn load_from(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                warn!("failed to parse {}, using defaults: {}", CONFIG_FILE, err);
                Self::default()
            }
        }
    }

    /// Environment wins over the config file; empty values are ignored.
    pub fn apply_env_overrides(&mut self, api_key: Option<String>, api_endpoint: Option<String>) {
        if let Some(key) = api_key.filter(|v| !v.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(endpoint) = api_endpoint.filter(|v| !v.is_empty()) {
            self.api_endpoint = endpoint;
        }
    }

    pub fn require_api_key(&self) -> Result<&str, ReviewError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ReviewError::MissingApiKey)
    }

    pub fn ignore_rules(&self) -> Vec<IgnoreRule> {
        self.ignore_files
            .iter()
            .map(|entry| IgnoreRule::parse(entry))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReviewConfig::load_from(dir.path());
        assert_eq!(config.max_diff_lines, 300);
        assert_eq!(config.model, "deepseek-chat");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{not json").unwrap();
        let config = ReviewConfig::load_from(dir.path());
        assert_eq!(config.max_diff_lines, 300);
        assert_eq!(
            config.api_endpoint,
            "https://api.deepseek.com/chat/completions"
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"maxDiffLines": 42, "model": "gpt-4o"}"#,
        )
        .unwrap();
        let config = ReviewConfig::load_from(dir.path());
        assert_eq!(config.max_diff_lines, 42);
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(
            config.ignore_files,
            vec![".lock", ".json", ".md", ".gitignore"]
        );
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let mut config = ReviewConfig {
            api_key: Some("from-file".to_string()),
            ..ReviewConfig::default()
        };
        config.apply_env_overrides(
            Some("from-env".to_string()),
            Some("http://localhost:9999".to_string()),
        );
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.api_endpoint, "http://localhost:9999");
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = ReviewConfig {
            api_key: Some("from-file".to_string()),
            ..ReviewConfig::default()
        };
        let endpoint = config.api_endpoint.clone();
        config.apply_env_overrides(Some(String::new()), Some(String::new()));
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.api_endpoint, endpoint);
    }

    #[test]
    fn require_api_key_rejects_missing_or_empty() {
        let config = ReviewConfig::default();
        assert!(matches!(
            config.require_api_key(),
            Err(ReviewError::MissingApiKey)
        ));

        let config = ReviewConfig {
            api_key: Some(String::new()),
            ..ReviewConfig::default()
        };
        assert!(config.require_api_key().is_err());

        let config = ReviewConfig {
            api_key: Some("sk-test".to_string()),
            ..ReviewConfig::default()
        };
        assert_eq!(config.require_api_key().unwrap(), "sk-test");
    }
}
