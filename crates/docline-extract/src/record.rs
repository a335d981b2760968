//! Document record schema and assembly

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::metadata::infer_metadata;
use crate::sanitize::{sanitize, sanitize_truncated};

pub const MAX_TITLE_CHARS: usize = 300;
pub const MAX_ABSTRACT_CHARS: usize = 5_000;
pub const MAX_AUTHORS: usize = 10;
/// Keeps `full_text` under the index's highlight analysis-offset ceiling.
pub const DEFAULT_MAX_FULL_TEXT_CHARS: usize = 50_000;

/// One normalized, bounded document, one JSON line in the output stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Source file stem; unique within a batch
    pub id: String,
    /// Hex blake3 digest of the raw source bytes
    pub fingerprint: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    #[serde(default)]
    pub full_text: String,
    /// Filled by a later provenance step
    #[serde(default)]
    pub url: String,
}

/// Field size limits applied during assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub min_title_words: usize,
    pub max_full_text_chars: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_title_words: crate::title::DEFAULT_MIN_TITLE_WORDS,
            max_full_text_chars: DEFAULT_MAX_FULL_TEXT_CHARS,
        }
    }
}

/// Record id for a source file: its base name without extension.
pub fn document_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Build a record from one document's extracted text.
///
/// Metadata is inferred from `first_page`; every text field is sanitized
/// and then hard-truncated to its character limit.
pub fn assemble(
    id: String,
    fingerprint: String,
    full_text: &str,
    first_page: &str,
    limits: &Limits,
) -> DocumentRecord {
    let meta = infer_metadata(first_page, limits.min_title_words);

    let authors = meta
        .authors
        .iter()
        .map(|name| sanitize(name))
        .filter(|name| !name.is_empty())
        .take(MAX_AUTHORS)
        .collect();

    DocumentRecord {
        id,
        fingerprint,
        title: sanitize_truncated(&meta.title, MAX_TITLE_CHARS),
        authors,
        year: meta.year,
        abstract_text: sanitize_truncated(&meta.abstract_text, MAX_ABSTRACT_CHARS),
        full_text: sanitize_truncated(full_text, limits.max_full_text_chars),
        url: String::new(),
    }
}
