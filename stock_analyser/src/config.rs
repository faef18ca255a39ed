//! Analyser configuration
//!
//! Loaded from a JSON file. Every field has a default, so a missing file or
//! a file written for an older version still loads. Environment variables
//! override the file and command-line flags override both.

use crate::error::{AnalyserError, Result};
use market_data::yahoo::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Config file used when neither the command line nor the environment names one
pub const DEFAULT_CONFIG_FILE: &str = "stock_analyser.json";

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "STOCK_ANALYSER_CONFIG";
/// Environment variable overriding [`AnalyserConfig::output_dir`]
pub const OUTPUT_DIR_ENV: &str = "STOCK_ANALYSER_OUTPUT_DIR";
/// Environment variable overriding [`AnalyserConfig::base_url`]
pub const BASE_URL_ENV: &str = "STOCK_ANALYSER_BASE_URL";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("charts")
}

/// Settings of the data download and the chart export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyserConfig {
    /// Chart endpoint of the price data provider
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory receiving chart CSV files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            output_dir: default_output_dir(),
        }
    }
}

impl AnalyserConfig {
    /// Load the config from `path`, falling back to defaults when the file does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| AnalyserError::Config(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(OUTPUT_DIR_ENV).filter(|v| !v.is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        self
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
