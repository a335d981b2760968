//! Tolerant JSON Lines reader for the bulk-load side
//!
//! Streams records back out of an extraction run without loading the file
//! into memory. Malformed lines are logged and counted, never fatal.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::record::DocumentRecord;
use crate::sanitize::truncate_chars;

/// Index highlighting rejects fields analyzed past this many characters.
pub const MAX_INDEXED_FULL_TEXT_CHARS: usize = 1_000_000;

/// Line counters for one pass over a JSONL file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Non-blank lines read
    pub lines: usize,
    pub records: usize,
    pub malformed: usize,
}

/// Iterator over the well-formed records of a JSONL stream.
///
/// A read error other than invalid UTF-8 ends iteration; it is kept and
/// can be retrieved with [`JsonlReader::take_error`].
pub struct JsonlReader<R> {
    reader: R,
    buf: String,
    line_no: usize,
    stats: LoadStats,
    error: Option<io::Error>,
}

impl JsonlReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("JSONL file not found: {}", path.display()))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonlReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::with_capacity(4096),
            line_no: 0,
            stats: LoadStats::default(),
            error: None,
        }
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    /// The read error that stopped iteration, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<R: BufRead> Iterator for JsonlReader<R> {
    type Item = DocumentRecord;

    fn next(&mut self) -> Option<DocumentRecord> {
        loop {
            self.buf.clear();
            if self.error.is_some() {
                return None;
            }
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    // Invalid UTF-8 counts against this line only
                    self.line_no += 1;
                    self.stats.lines += 1;
                    self.stats.malformed += 1;
                    log::warn!("line {}: {e}", self.line_no);
                    continue;
                }
                Err(e) => {
                    self.error = Some(e);
                    return None;
                }
            }
            self.line_no += 1;

            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }
            self.stats.lines += 1;

            match serde_json::from_str::<DocumentRecord>(line) {
                Ok(mut record) => {
                    if record.full_text.chars().count() > MAX_INDEXED_FULL_TEXT_CHARS {
                        record.full_text =
                            truncate_chars(&record.full_text, MAX_INDEXED_FULL_TEXT_CHARS);
                    }
                    self.stats.records += 1;
                    return Some(record);
                }
                Err(e) => {
                    self.stats.malformed += 1;
                    log::warn!("line {}: {e}", self.line_no);
                }
            }
        }
    }
}

/// How many records carry each inferred field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldCoverage {
    pub records: usize,
    pub title: usize,
    pub authors: usize,
    pub year: usize,
    pub abstract_text: usize,
}

impl FieldCoverage {
    pub fn add(&mut self, record: &DocumentRecord) {
        self.records += 1;
        self.title += usize::from(!record.title.is_empty());
        self.authors += usize::from(!record.authors.is_empty());
        self.year += usize::from(record.year.is_some());
        self.abstract_text += usize::from(!record.abstract_text.is_empty());
    }

    /// `count` as a percentage of all records
    pub fn pct(&self, count: usize) -> f64 {
        if self.records == 0 {
            0.0
        } else {
            count as f64 / self.records as f64 * 100.0
        }
    }
}

/// Read a whole JSONL file, returning load stats and field coverage.
pub fn scan_jsonl(path: &Path) -> Result<(LoadStats, FieldCoverage)> {
    let reader = JsonlReader::open(path)?;
    scan_records(reader).with_context(|| format!("failed to read {}", path.display()))
}

/// Drain `reader`, failing if the underlying stream errors part way.
pub fn scan_records<R: BufRead>(mut reader: JsonlReader<R>) -> Result<(LoadStats, FieldCoverage)> {
    let mut coverage = FieldCoverage::default();
    for record in reader.by_ref() {
        coverage.add(&record);
    }
    if let Some(e) = reader.take_error() {
        let stats = reader.stats();
        return Err(anyhow::Error::new(e).context(format!(
            "read error after {} lines ({} records)",
            stats.lines, stats.records
        )));
    }
    Ok((reader.stats(), coverage))
}
