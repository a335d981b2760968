//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global configuration for docline
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub extract: ExtractConfig,
}

/// Defaults for `docline extract`; command-line flags take precedence
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub max_full_text_chars: usize,
    pub min_title_words: usize,
    pub workers: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        let defaults = docline_extract::Config::default();
        Self {
            max_full_text_chars: defaults.max_full_text_chars,
            min_title_words: defaults.min_title_words,
            workers: defaults.workers,
        }
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./docline.toml (current directory)
    /// 2. ~/.config/docline/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("docline.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "docline") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
