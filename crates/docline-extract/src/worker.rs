//! Per-document processing: extract → fingerprint → assemble

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use docline_core::{fingerprint_file, short_fingerprint};

use crate::error::ExtractionError;
use crate::extractor::{ExtractedText, ExtractorRegistry};
use crate::record::{DocumentRecord, Limits, assemble, document_id};

/// One enumerated source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub id: String,
}

impl SourceDocument {
    pub fn new(path: PathBuf) -> Self {
        let id = document_id(&path);
        Self { path, id }
    }

    /// File name for log lines
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// What happened to one document
#[derive(Debug)]
pub enum Outcome {
    Emitted(Box<DocumentRecord>),
    Skipped(ExtractionError),
}

/// Process a single document.
///
/// All-or-nothing: any extraction or read failure returns an error and no
/// record. Metadata heuristics never fail.
pub fn process_document(
    doc: &SourceDocument,
    registry: &ExtractorRegistry,
    limits: &Limits,
) -> Result<(DocumentRecord, Duration), ExtractionError> {
    let start = Instant::now();
    let extractor = registry.for_path(&doc.path)?;
    let pages = extractor.extract_pages(&doc.path)?;
    let text = ExtractedText::from_pages(&pages);
    let fingerprint = fingerprint_file(&doc.path)?;

    let record = assemble(
        doc.id.clone(),
        fingerprint,
        &text.full_text,
        &text.first_page,
        limits,
    );
    Ok((record, start.elapsed()))
}

/// Process a document and log the result, turning failures into a skip.
pub fn run_document(doc: &SourceDocument, registry: &ExtractorRegistry, limits: &Limits) -> Outcome {
    match process_document(doc, registry, limits) {
        Ok((record, elapsed)) => {
            log::debug!(
                "{} [{}]: {} chars, title {:?} ({:.2}s)",
                doc.file_name(),
                short_fingerprint(&record.fingerprint),
                record.full_text.chars().count(),
                record.title,
                elapsed.as_secs_f64()
            );
            Outcome::Emitted(Box::new(record))
        }
        Err(e) => {
            log::warn!("{}: skipped: {e}", doc.file_name());
            Outcome::Skipped(e)
        }
    }
}

/// Shorthand for tests and callers holding a bare path
pub fn process_path(
    path: &Path,
    registry: &ExtractorRegistry,
    limits: &Limits,
) -> Result<DocumentRecord, ExtractionError> {
    process_document(&SourceDocument::new(path.to_path_buf()), registry, limits).map(|(r, _)| r)
}
