//! Batch statistics and reporting.
//!
//! `BatchSummary` is the user-visible result of a run: documents seen,
//! emitted and skipped (with reasons), plus the output artifact size.

use std::path::PathBuf;
use std::time::Duration;

use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use docline_core::{fmt_bytes, fmt_num};

/// Skipped rows shown in the table before eliding the rest
const MAX_SKIPPED_ROWS: usize = 20;

/// A document that produced no record, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    pub file: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub output_path: PathBuf,
    /// Files enumerated in the source directory
    pub documents_seen: usize,
    /// Records written to the output stream
    pub documents_emitted: usize,
    pub skipped: Vec<SkippedDocument>,
    /// Documents never attempted because shutdown was requested
    pub not_attempted: usize,
    pub output_bytes: u64,
    pub elapsed: Duration,
    pub interrupted: bool,
}

impl BatchSummary {
    pub fn documents_skipped(&self) -> usize {
        self.skipped.len()
    }

    fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.documents_emitted as f64 / secs
        } else {
            0.0
        }
    }

    /// Format summary table as a string.
    pub fn format_table(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![
                Cell::new("Extraction")
                    .fg(Color::Cyan)
                    .add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Value").fg(Color::Cyan),
            ]);

        table.add_row(vec![
            Cell::new("Output"),
            Cell::new(self.output_path.display().to_string()),
        ]);
        table.add_row(vec![Cell::new("Documents seen"), Cell::new(fmt_num(self.documents_seen))]);
        table.add_row(vec![
            Cell::new("Records emitted"),
            Cell::new(fmt_num(self.documents_emitted)).fg(Color::Green),
        ]);
        let skipped = Cell::new(fmt_num(self.documents_skipped()));
        table.add_row(vec![
            Cell::new("Skipped"),
            if self.skipped.is_empty() {
                skipped
            } else {
                skipped.fg(Color::Yellow)
            },
        ]);
        if self.interrupted {
            table.add_row(vec![
                Cell::new("Not attempted"),
                Cell::new(fmt_num(self.not_attempted)).fg(Color::Red),
            ]);
        }
        table.add_row(vec![Cell::new("Output size"), Cell::new(fmt_bytes(self.output_bytes))]);
        table.add_row(vec![
            Cell::new("Time"),
            Cell::new(format!("{:.1}s ({:.1} docs/s)", self.elapsed.as_secs_f64(), self.rate())),
        ]);

        let mut out = table.to_string();
        if !self.skipped.is_empty() {
            out.push('\n');
            out.push_str(&self.format_skipped_table());
        }
        out
    }

    fn format_skipped_table(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![
                Cell::new("Skipped document").fg(Color::Yellow),
                Cell::new("Reason").fg(Color::Yellow),
            ]);
        for s in self.skipped.iter().take(MAX_SKIPPED_ROWS) {
            table.add_row(vec![Cell::new(&s.file), Cell::new(&s.reason)]);
        }
        if self.skipped.len() > MAX_SKIPPED_ROWS {
            table.add_row(vec![
                Cell::new(format!("… {} more", self.skipped.len() - MAX_SKIPPED_ROWS)),
                Cell::new(""),
            ]);
        }
        table.to_string()
    }

    /// Print summary table to stderr (TTY mode).
    pub fn print(&self) {
        eprintln!("\n{}", self.format_table());
    }

    /// Log summary as plain log lines (non-TTY mode).
    pub fn log(&self) {
        log::info!("=== Extraction Summary ===");
        log::info!(
            "Documents: {} seen, {} emitted, {} skipped",
            fmt_num(self.documents_seen),
            fmt_num(self.documents_emitted),
            fmt_num(self.documents_skipped())
        );
        for s in &self.skipped {
            log::info!("  skipped {}: {}", s.file, s.reason);
        }
        if self.interrupted {
            log::warn!(
                "Interrupted: {} documents not attempted",
                fmt_num(self.not_attempted)
            );
        }
        log::info!(
            "Wrote {} ({})",
            self.output_path.display(),
            fmt_bytes(self.output_bytes)
        );
        log::info!(
            "Time: {:.1}s ({:.1} docs/s)",
            self.elapsed.as_secs_f64(),
            self.rate()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> BatchSummary {
        BatchSummary {
            output_path: PathBuf::from("out/docs.jsonl"),
            documents_seen: 3,
            documents_emitted: 2,
            skipped: vec![SkippedDocument {
                file: "broken.pdf".into(),
                reason: "parse: invalid file header".into(),
            }],
            output_bytes: 2048,
            elapsed: Duration::from_secs(2),
            ..Default::default()
        }
    }

    #[test]
    fn table_lists_counts_and_skips() {
        let table = summary().format_table();
        assert!(table.contains("Documents seen"));
        assert!(table.contains("2.0 KiB"));
        assert!(table.contains("broken.pdf"));
        assert!(table.contains("invalid file header"));
        assert!(!table.contains("Not attempted"));
    }

    #[test]
    fn interrupted_run_shows_remaining() {
        let mut s = summary();
        s.interrupted = true;
        s.not_attempted = 7;
        assert!(s.format_table().contains("Not attempted"));
    }

    #[test]
    fn long_skip_lists_are_elided() {
        let mut s = summary();
        s.skipped = (0..25)
            .map(|i| SkippedDocument {
                file: format!("doc{i}.pdf"),
                reason: "parse".into(),
            })
            .collect();
        let table = s.format_table();
        assert!(table.contains("doc19.pdf"));
        assert!(!table.contains("doc20.pdf"));
        assert!(table.contains("5 more"));
    }

    #[test]
    fn zero_elapsed_rate() {
        let s = BatchSummary::default();
        assert_eq!(s.rate(), 0.0);
        assert_eq!(s.documents_skipped(), 0);
    }
}
