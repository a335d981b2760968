//! Text extraction backends
//!
//! Turning a binary document into text is delegated to a [`TextExtractor`].
//! Backends report failures as [`ExtractionError`]; the batch driver treats
//! any of them as "skip this document".

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

use crate::error::ExtractionError;

/// Separator between pages in joined text.
const PAGE_BREAK: &str = "\u{0c}";

/// Which pages to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRange {
    All,
    First,
}

/// Text of one document: every page, plus the first page on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    pub full_text: String,
    pub first_page: String,
}

impl ExtractedText {
    pub fn from_pages(pages: &[String]) -> Self {
        Self {
            full_text: pages.join(PAGE_BREAK),
            first_page: first_page(pages).to_string(),
        }
    }
}

/// First page with any visible content; leading blank pages are skipped.
///
/// This differs from taking page 0 unconditionally: a blank cover or
/// scanner separator page does not leave the metadata empty.
fn first_page(pages: &[String]) -> &str {
    pages
        .iter()
        .find(|p| !p.trim().is_empty())
        .map(String::as_str)
        .unwrap_or("")
}

/// Split extracted text into pages on form feeds.
pub fn split_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text.split(PAGE_BREAK).map(str::to_string).collect();
    if pages.len() > 1 && pages.last().is_some_and(|p| p.is_empty()) {
        pages.pop();
    }
    pages
}

/// A document-format backend.
pub trait TextExtractor: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Text of every page, in document order.
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, ExtractionError>;

    /// Text of the requested pages.
    fn extract(&self, path: &Path, pages: PageRange) -> Result<String, ExtractionError> {
        let all = self.extract_pages(path)?;
        Ok(match pages {
            PageRange::All => all.join(PAGE_BREAK),
            PageRange::First => first_page(&all).to_string(),
        })
    }
}

/// PDF backend on top of `pdf-extract`.
#[derive(Debug, Default)]
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, ExtractionError> {
        let bytes = std::fs::read(path)?;
        // The parser can panic on malformed input; contain it to this document
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&bytes)
        }));
        match result {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(ExtractionError::Parse(e.to_string())),
            Err(_) => Err(ExtractionError::Parse("PDF parser panicked".to_string())),
        }
    }
}

/// Plain UTF-8 text backend; form feeds separate pages.
#[derive(Debug, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &'static str {
        "txt"
    }

    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, ExtractionError> {
        let bytes = std::fs::read(path)?;
        let text = std::str::from_utf8(&bytes).map_err(ExtractionError::Encoding)?;
        Ok(split_pages(text))
    }
}

/// Extractors keyed by lower-cased file extension.
#[derive(Clone)]
pub struct ExtractorRegistry {
    by_extension: BTreeMap<String, Arc<dyn TextExtractor>>,
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}

impl ExtractorRegistry {
    /// Registry with no backends.
    pub fn empty() -> Self {
        Self {
            by_extension: BTreeMap::new(),
        }
    }

    /// Register `extractor` for files ending in `.extension`.
    pub fn register(mut self, extension: &str, extractor: Arc<dyn TextExtractor>) -> Self {
        self.by_extension
            .insert(extension.to_ascii_lowercase(), extractor);
        self
    }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        self.by_extension.keys().map(String::as_str).collect()
    }

    /// Backend for `path`, chosen by its extension.
    pub fn for_path(&self, path: &Path) -> Result<&dyn TextExtractor, ExtractionError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        self.by_extension
            .get(&ext)
            .map(|e| &**e)
            .ok_or(ExtractionError::Unsupported(ext))
    }

    pub fn supports(&self, path: &Path) -> bool {
        self.for_path(path).is_ok()
    }
}

impl Default for ExtractorRegistry {
    /// PDF and plain-text backends.
    fn default() -> Self {
        Self::empty()
            .register("pdf", Arc::new(PdfExtractor))
            .register("txt", Arc::new(PlainTextExtractor))
    }
}
