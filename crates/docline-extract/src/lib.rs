//! Docline Extract - document → search-index record pipeline
//!
//! Turns a directory of documents into JSON Lines records for bulk
//! indexing. Bibliographic metadata (title, authors, year, abstract) is
//! inferred heuristically from each document's first page; every text field
//! is scrubbed of control characters and cut to the index's size limits;
//! each record carries a content fingerprint of the source bytes.
//!
//! # Example
//!
//! ```ignore
//! use docline_extract::{Config, ExtractorRegistry, run};
//! use docline_core::ProgressContext;
//!
//! let config = Config::new("papers/", "papers.jsonl");
//! let summary = run(&config, &ExtractorRegistry::default(), &ProgressContext::new())?;
//! println!("Emitted {} records", summary.documents_emitted);
//! ```

pub mod abstract_text;
pub mod authors;
pub mod config;
pub mod error;
pub mod extractor;
pub mod lines;
pub mod loader;
pub mod metadata;
pub mod record;
pub mod runner;
pub mod sanitize;
pub mod stats;
pub mod title;
pub mod worker;
pub mod year;

// Re-exports
pub use config::Config;
pub use error::{ConfigError, ExtractionError};
pub use extractor::{
    ExtractedText, ExtractorRegistry, PageRange, PdfExtractor, PlainTextExtractor, TextExtractor,
};
pub use loader::{FieldCoverage, JsonlReader, LoadStats, scan_jsonl, scan_records};
pub use metadata::{InferredMetadata, infer_metadata};
pub use record::{DocumentRecord, Limits, assemble};
pub use runner::{BatchPhase, run};
pub use sanitize::sanitize;
pub use stats::{BatchSummary, SkippedDocument};
