//! Batch extraction configuration

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::record::{DEFAULT_MAX_FULL_TEXT_CHARS, Limits};
use crate::title::DEFAULT_MIN_TITLE_WORDS;

/// Runtime configuration for one extraction run
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory of source documents
    pub source_dir: PathBuf,
    /// JSON Lines output file
    pub output_path: PathBuf,
    /// Character limit for `full_text`
    pub max_full_text_chars: usize,
    /// Minimum words for a line to count as a title
    pub min_title_words: usize,
    /// Parallel extraction workers
    pub workers: usize,
}

/// Worker count when none is configured: available cores, at most 8.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
        .min(8)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::new(),
            output_path: PathBuf::new(),
            max_full_text_chars: DEFAULT_MAX_FULL_TEXT_CHARS,
            min_title_words: DEFAULT_MIN_TITLE_WORDS,
            workers: default_workers(),
        }
    }
}

impl Config {
    pub fn new(source_dir: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_path: output_path.into(),
            ..Default::default()
        }
    }

    pub fn limits(&self) -> Limits {
        Limits {
            min_title_words: self.min_title_words,
            max_full_text_chars: self.max_full_text_chars,
        }
    }

    /// Check everything that would make the run fail before it starts.
    ///
    /// Creates the output's parent directory if needed and probes that a
    /// file can be created there.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_full_text_chars == 0 {
            return Err(ConfigError::ZeroLimit("max_full_text_chars"));
        }
        if self.min_title_words == 0 {
            return Err(ConfigError::ZeroLimit("min_title_words"));
        }
        if self.workers == 0 {
            return Err(ConfigError::ZeroLimit("workers"));
        }

        if !self.source_dir.exists() {
            return Err(ConfigError::SourceMissing(self.source_dir.clone()));
        }
        if !self.source_dir.is_dir() {
            return Err(ConfigError::SourceNotDirectory(self.source_dir.clone()));
        }

        if self.output_path.as_os_str().is_empty() || self.output_path.is_dir() {
            return Err(ConfigError::OutputIsDirectory(self.output_path.clone()));
        }
        let parent = match self.output_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let unwritable = |source| ConfigError::OutputUnwritable {
            path: self.output_path.clone(),
            source,
        };
        std::fs::create_dir_all(parent).map_err(unwritable)?;
        probe_writable(parent).map_err(unwritable)
    }
}

/// Create and remove a scratch file in `dir`.
fn probe_writable(dir: &Path) -> std::io::Result<()> {
    let probe = dir.join(format!(".docline-probe-{}", std::process::id()));
    std::fs::File::create(&probe)?;
    std::fs::remove_file(&probe)
}
