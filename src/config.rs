// src/config.rs

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bound applied to both /health and /predict. A call that does not
    /// complete within this window is treated as a failure, never left
    /// hanging.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> Result<(), String> {
        Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid API base URL '{}': {}", self.base_url, e))?;
        if self.timeout_secs == 0 {
            return Err("Timeout must be at least 1 second".into());
        }
        Ok(())
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("phishscope/api.json")
}

pub fn load() -> Option<ApiConfig> {
    fs::read_to_string(config_path())
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
}

pub fn save(cfg: &ApiConfig) -> Result<(), String> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    let text = serde_json::to_string_pretty(cfg).map_err(|e| e.to_string())?;
    fs::write(path, text).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let cfg = ApiConfig {
            base_url: "http://localhost:5000/".into(),
            timeout_secs: 15,
        };
        assert_eq!(cfg.endpoint("/predict"), "http://localhost:5000/predict");
        assert_eq!(cfg.endpoint("health"), "http://localhost:5000/health");
    }

    #[test]
    fn validate_rejects_garbage_urls_and_zero_timeout() {
        let mut cfg = ApiConfig::default();
        assert!(cfg.validate().is_ok());

        cfg.base_url = "not a url".into();
        assert!(cfg.validate().is_err());

        cfg.base_url = default_base_url();
        cfg.timeout_secs = 0;
        assert!(cfg.validate().is_err());
    }
}
