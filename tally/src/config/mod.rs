//! Configuration management for tally
//!
//! Default config location: ~/.tally/config.toml

use crate::aggregations::types::{
    EngineOptions, DEFAULT_DATE_HISTOGRAM_SIZE, DEFAULT_HISTOGRAM_SIZE, DEFAULT_TERMS_SIZE,
};
use anyhow::{anyhow, Result};
use chrono::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Locale for date bucket labels, e.g. "en_US" or "de_DE"
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_terms_size")]
    pub terms_size: usize,
    #[serde(default = "default_histogram_size")]
    pub histogram_size: usize,
    #[serde(default = "default_date_histogram_size")]
    pub date_histogram_size: usize,
}

fn default_locale() -> String {
    "en_US".to_string()
}

fn default_terms_size() -> usize {
    DEFAULT_TERMS_SIZE
}

fn default_histogram_size() -> usize {
    DEFAULT_HISTOGRAM_SIZE
}

fn default_date_histogram_size() -> usize {
    DEFAULT_DATE_HISTOGRAM_SIZE
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            terms_size: default_terms_size(),
            histogram_size: default_histogram_size(),
            date_histogram_size: default_date_histogram_size(),
        }
    }
}

impl EngineConfig {
    pub fn options(&self) -> Result<EngineOptions> {
        let locale = Locale::try_from(self.locale.as_str())
            .map_err(|_| anyhow!("Unknown locale: {}", self.locale))?;
        Ok(EngineOptions {
            locale,
            terms_size: self.terms_size,
            histogram_size: self.histogram_size,
            date_histogram_size: self.date_histogram_size,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// Log output format: "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

/// Default config directory (~/.tally)
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".tally"))
        .unwrap_or_else(|| PathBuf::from(".tally"))
}

/// Expand ~ to home directory
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let s = path.to_string_lossy();
    if let Some(rest) = s.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Cannot determine home directory"))?;
        Ok(home.join(rest))
    } else if s == "~" {
        dirs::home_dir().ok_or_else(|| anyhow!("Cannot determine home directory"))
    } else {
        Ok(path.to_path_buf())
    }
}

impl Config {
    /// Load config from default location (~/.tally/config.toml)
    pub fn load() -> Result<Self> {
        Self::load_from(&default_config_dir())
    }

    /// Load config from specific directory
    pub fn load_from(dir: &Path) -> Result<Self> {
        let config_path = dir.join("config.toml");

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        config.expand_paths()?;
        Ok(config)
    }

    /// Load config file, writing defaults there if it does not exist yet
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.expand_paths()?;
            Ok(config)
        } else {
            let config = Config::default();
            if let Some(parent) = config_path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = config.save(config_path);
            Ok(config)
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn expand_paths(&mut self) -> Result<()> {
        if let Some(ref f) = self.logging.file {
            self.logging.file = Some(expand_tilde(f)?);
        }
        Ok(())
    }
}
