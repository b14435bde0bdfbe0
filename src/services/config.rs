//! User configuration service
//!
//! Defaults live in `~/.seriesfill/config.json`. Every key is optional:
//!
//! ```json
//! { "granularity": "week", "metrics": ["revenue"], "encoding": "auto", "date_field": "date" }
//! ```

use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::services::date_codec::DateEncoding;
use crate::types::{Granularity, Result, SeriesError};

const CONFIG_FILE: &str = "config.json";

/// Persisted defaults for series builds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub granularity: Granularity,
    /// Empty = every numeric field found in the input
    pub metrics: Vec<String>,
    pub encoding: DateEncoding,
    /// Name of the record field holding the date
    pub date_field: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            granularity: Granularity::Day,
            metrics: Vec::new(),
            encoding: DateEncoding::Auto,
            date_field: "date".to_string(),
        }
    }
}

/// Loads and saves [`Config`]
pub struct ConfigService {
    config_dir: PathBuf,
}

impl ConfigService {
    /// Service rooted at `~/.seriesfill/`
    pub fn new() -> Result<Self> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| SeriesError::Config("Cannot determine home directory".into()))?;
        Ok(Self {
            config_dir: base_dirs.home_dir().join(".seriesfill"),
        })
    }

    /// Service rooted at a custom directory
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Load config; a missing file yields defaults, a malformed one is an error
    pub fn load(&self) -> Result<Config> {
        let path = self.config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content)
            .map_err(|e| SeriesError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save(&self, config: &Config) -> Result<PathBuf> {
        fs::create_dir_all(&self.config_dir)?;
        let path = self.config_path();
        let content = serde_json::to_string_pretty(config)
            .map_err(|e| SeriesError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, content)?;
        Ok(path)
    }
}
