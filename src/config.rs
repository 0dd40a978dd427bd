use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{PipelineError, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://data.europarl.europa.eu/api/v2";

/// Pipeline "valves". The hosting framework edits these; the pipeline only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    #[serde(default = "default_api_base_url", alias = "API_BASE_URL")]
    pub api_base_url: String,
    #[serde(default = "default_max_results", alias = "MAX_RESULTS")]
    pub max_results: usize,
    #[serde(default = "default_timeout_secs", alias = "TIMEOUT")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_max_results() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            max_results: default_max_results(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PipelineConfig {
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".europarl-pipeline")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub async fn load_or_default() -> Result<Self> {
        Self::load_from(&Self::config_file()).await
    }

    /// Load valves from `path` (defaults when the file is missing), then apply
    /// `EUROPARL_*` environment overrides.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            Self::from_json(&content)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let mut config: PipelineConfig = serde_json::from_str(content)
            .map_err(|e| PipelineError::Config(format!("invalid config file: {}", e)))?;
        config.clamp();
        Ok(config)
    }

    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        tokio::fs::write(path, content).await?;

        Ok(())
    }

    /// Environment lookup is injected so tests don't have to touch the process env.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("EUROPARL_API_BASE_URL") {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
        if let Some(max) = lookup("EUROPARL_MAX_RESULTS").and_then(|v| v.trim().parse().ok()) {
            self.max_results = max;
        }
        if let Some(timeout) = lookup("EUROPARL_TIMEOUT").and_then(|v| v.trim().parse().ok()) {
            self.timeout_secs = timeout;
        }
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.max_results = self.max_results.clamp(1, 100);
        self.timeout_secs = self.timeout_secs.clamp(1, 300);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_valves() {
        let config = PipelineConfig::default();
        assert_eq!(config.api_base_url, "https://data.europarl.europa.eu/api/v2");
        assert_eq!(config.max_results, 10);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_from_json_accepts_valve_names() {
        let config = PipelineConfig::from_json(
            r#"{"API_BASE_URL": "http://localhost:9000/api", "MAX_RESULTS": 5, "TIMEOUT": 12}"#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:9000/api");
        assert_eq!(config.max_results, 5);
        assert_eq!(config.timeout_secs, 12);
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = PipelineConfig::from_json(r#"{"max_results": 3}"#).unwrap();
        assert_eq!(config.max_results, 3);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = PipelineConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_env_overrides_and_clamping() {
        let env: HashMap<&str, &str> = [
            ("EUROPARL_API_BASE_URL", " http://mirror.example/api "),
            ("EUROPARL_MAX_RESULTS", "500"),
            ("EUROPARL_TIMEOUT", "abc"),
        ]
        .into_iter()
        .collect();

        let mut config = PipelineConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_base_url, "http://mirror.example/api");
        assert_eq!(config.max_results, 100);
        // unparsable values leave the current setting alone
        assert_eq!(config.timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_save_then_load_from_disk() {
        let path = std::env::temp_dir()
            .join(format!("europarl-pipeline-test-{}", std::process::id()))
            .join("config.json");
        let config = PipelineConfig {
            api_base_url: "http://localhost:9000/api".to_string(),
            max_results: 7,
            timeout_secs: 5,
        };

        config.save_to(&path).await.unwrap();
        let loaded = PipelineConfig::load_from(&path).await.unwrap();
        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;

        assert_eq!(loaded.max_results, 7);
        assert_eq!(loaded.timeout_secs, 5);
    }
}
