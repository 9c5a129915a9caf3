use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::fetcher::{DEFAULT_BASE_URL, DEFAULT_FORMAT, DEFAULT_TIMEOUT_SECS, FetchOptions};

/// Top-level configuration read from disk.
///
/// Every field is optional in the file; missing ones fall back to defaults.
///
/// Example TOML:
/// ```toml
/// base_url = "https://wttr.in"
/// timeout_secs = 10
/// format = "%l: %c %t"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Weather-text endpoint the city is appended to.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// wttr.in format template. `None` or an empty string requests the full forecast.
    pub format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            format: Some(DEFAULT_FORMAT.to_string()),
        }
    }
}

impl Config {
    /// Load config from the platform config directory, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    /// Load config from an explicit path, or return defaults if the file is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "wttr", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            format: self.format.clone().filter(|f| !f.is_empty()),
        }
    }
}
