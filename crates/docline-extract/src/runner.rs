//! Batch driver: enumerate → extract in parallel → ordered streaming write

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, sync_channel};
use std::time::Instant;

use anyhow::{Context, Result};
use docline_core::{JsonlSink, ProgressContext, WorkQueue, is_shutdown_requested};
use indicatif::ProgressBar;

use crate::config::Config;
use crate::extractor::ExtractorRegistry;
use crate::record::Limits;
use crate::stats::{BatchSummary, SkippedDocument};
use crate::worker::{self, Outcome, SourceDocument};

/// Where a run is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPhase {
    Idle,
    Enumerating,
    Processing,
    Done,
}

impl std::fmt::Display for BatchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Enumerating => "enumerating",
            Self::Processing => "processing",
            Self::Done => "done",
        })
    }
}

fn enter(phase: BatchPhase) {
    log::debug!("batch phase: {phase}");
}

/// Documents to process, plus files rejected during enumeration.
#[derive(Debug, Default)]
pub struct Enumeration {
    pub documents: Vec<SourceDocument>,
    pub rejected: Vec<SkippedDocument>,
}

impl Enumeration {
    pub fn seen(&self) -> usize {
        self.documents.len() + self.rejected.len()
    }
}

/// List supported files directly inside `source_dir`, sorted by file name.
///
/// Extensions match case-insensitively. A file whose id (stem) was already
/// taken by an earlier file is rejected so ids stay unique in the batch.
pub fn enumerate_documents(source_dir: &Path, registry: &ExtractorRegistry) -> Result<Enumeration> {
    let options = glob::MatchOptions {
        case_sensitive: false,
        ..Default::default()
    };
    let base = glob::Pattern::escape(&source_dir.to_string_lossy());

    let mut paths: Vec<PathBuf> = Vec::new();
    for ext in registry.extensions() {
        let pattern = format!("{base}/*.{ext}");
        paths.extend(
            glob::glob_with(&pattern, options)
                .with_context(|| format!("invalid glob pattern: {pattern}"))?
                .filter_map(|e| e.ok())
                .filter(|p| p.is_file()),
        );
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    paths.dedup();

    let mut enumeration = Enumeration::default();
    let mut ids: HashMap<String, String> = HashMap::new();
    for path in paths {
        let doc = SourceDocument::new(path);
        if let Some(first) = ids.get(&doc.id) {
            log::warn!("{}: skipped: duplicate id {:?} (see {first})", doc.file_name(), doc.id);
            enumeration.rejected.push(SkippedDocument {
                file: doc.file_name(),
                reason: format!("duplicate id {:?} (see {first})", doc.id),
            });
            continue;
        }
        ids.insert(doc.id.clone(), doc.file_name());
        enumeration.documents.push(doc);
    }
    Ok(enumeration)
}

/// What the writer thread saw
struct WriterReport {
    sink: JsonlSink,
    emitted: usize,
    skipped: Vec<SkippedDocument>,
}

/// Run one extraction batch.
///
/// Configuration problems are fatal and reported before any document is
/// touched. Per-document failures are logged and skipped.
pub fn run(
    config: &Config,
    registry: &ExtractorRegistry,
    progress: &ProgressContext,
) -> Result<BatchSummary> {
    enter(BatchPhase::Idle);
    config.validate().context("Invalid configuration")?;
    let start = Instant::now();

    enter(BatchPhase::Enumerating);
    let enumeration = enumerate_documents(&config.source_dir, registry)?;
    let documents_seen = enumeration.seen();
    log::info!(
        "Found {} documents in {} ({})",
        documents_seen,
        config.source_dir.display(),
        registry.extensions().join(", ")
    );

    enter(BatchPhase::Processing);
    let sink = JsonlSink::create(&config.output_path)
        .with_context(|| format!("Failed to create {}", config.output_path.display()))?;
    let queue = WorkQueue::new(enumeration.documents);
    let limits = config.limits();
    let pb = progress.document_bar("extract", queue.total());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build()
        .context("Failed to create thread pool")?;
    log::info!("Processing {} documents with {} workers", queue.total(), config.workers);

    let report = process_queue(&queue, registry, &limits, &pool, config.workers, sink, &pb)?;
    pb.finish_and_clear();

    let not_attempted = queue.unclaimed();
    let interrupted = is_shutdown_requested() && not_attempted > 0;
    if interrupted {
        log::warn!("Shutdown requested, {not_attempted} documents not attempted");
    }

    let sink_stats = report
        .sink
        .finalize()
        .with_context(|| format!("Failed to finalize {}", config.output_path.display()))?;

    let mut skipped = enumeration.rejected;
    skipped.extend(report.skipped);
    skipped.sort_by(|a, b| a.file.cmp(&b.file));

    enter(BatchPhase::Done);
    Ok(BatchSummary {
        output_path: config.output_path.clone(),
        documents_seen,
        documents_emitted: report.emitted,
        skipped,
        not_attempted,
        output_bytes: sink_stats.bytes,
        elapsed: start.elapsed(),
        interrupted,
    })
}

/// Drain `queue` with `workers` pool threads while a single writer thread
/// appends outcomes to `sink` in queue order.
fn process_queue(
    queue: &WorkQueue<SourceDocument>,
    registry: &ExtractorRegistry,
    limits: &Limits,
    pool: &rayon::ThreadPool,
    workers: usize,
    sink: JsonlSink,
    pb: &ProgressBar,
) -> Result<WriterReport> {
    let (tx, rx) = sync_channel::<(usize, &SourceDocument, Outcome)>(workers * 2);

    std::thread::scope(|scope| {
        let writer = scope.spawn(move || write_in_order(rx, sink, pb));

        pool.scope(|s| {
            for _ in 0..workers {
                let tx = tx.clone();
                s.spawn(move |_| {
                    while !is_shutdown_requested() {
                        let Some((idx, doc)) = queue.next() else {
                            break;
                        };
                        let outcome = worker::run_document(doc, registry, limits);
                        // Writer gone means output failed; stop claiming work
                        if tx.send((idx, doc, outcome)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(tx);

        writer
            .join()
            .map_err(|_| anyhow::anyhow!("writer thread panicked"))?
    })
}

/// Single writer: buffers outcomes that arrive early and emits strictly in
/// enumeration order, one whole line per record.
fn write_in_order(
    rx: Receiver<(usize, &SourceDocument, Outcome)>,
    mut sink: JsonlSink,
    pb: &ProgressBar,
) -> Result<WriterReport> {
    let mut pending: BTreeMap<usize, (&SourceDocument, Outcome)> = BTreeMap::new();
    let mut next = 0usize;
    let mut emitted = 0usize;
    let mut skipped = Vec::new();

    let mut emit = |doc: &SourceDocument, outcome: Outcome, sink: &mut JsonlSink| -> Result<()> {
        pb.inc(1);
        pb.set_message(doc.file_name());
        match outcome {
            Outcome::Emitted(record) => {
                sink.write_record(&record)
                    .with_context(|| format!("Failed to write record {}", record.id))?;
                emitted += 1;
            }
            Outcome::Skipped(e) => skipped.push(SkippedDocument {
                file: doc.file_name(),
                reason: e.to_string(),
            }),
        }
        Ok(())
    };

    for (idx, doc, outcome) in rx {
        pending.insert(idx, (doc, outcome));
        while let Some((doc, outcome)) = pending.remove(&next) {
            emit(doc, outcome, &mut sink)?;
            next += 1;
        }
    }
    // Only reachable with gaps if a worker stopped mid-claim
    for (doc, outcome) in pending.into_values() {
        emit(doc, outcome, &mut sink)?;
    }

    Ok(WriterReport {
        sink,
        emitted,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &[u8]) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn enumerates_sorted_supported_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.txt", b"B");
        write(dir.path(), "a.pdf", b"A");
        write(dir.path(), "C.PDF", b"C");
        write(dir.path(), "notes.md", b"ignored");
        std::fs::create_dir(dir.path().join("sub.pdf")).unwrap();

        let e = enumerate_documents(dir.path(), &ExtractorRegistry::default()).unwrap();
        let ids: Vec<&str> = e.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["C", "a", "b"]);
        assert!(e.rejected.is_empty());
        assert_eq!(e.seen(), 3);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "paper.pdf", b"pdf");
        write(dir.path(), "paper.txt", b"txt");

        let e = enumerate_documents(dir.path(), &ExtractorRegistry::default()).unwrap();
        assert_eq!(e.documents.len(), 1);
        assert_eq!(e.documents[0].file_name(), "paper.pdf");
        assert_eq!(e.rejected.len(), 1);
        assert_eq!(e.rejected[0].file, "paper.txt");
        assert!(e.rejected[0].reason.contains("duplicate id"));
    }

    #[test]
    fn glob_special_chars_in_dir_name() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("corpus [2019]");
        std::fs::create_dir(&src).unwrap();
        write(&src, "x.txt", b"x");
        let e = enumerate_documents(&src, &ExtractorRegistry::default()).unwrap();
        assert_eq!(e.documents.len(), 1);
    }

    #[test]
    fn output_order_independent_of_workers() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir(&src).unwrap();
        for i in 0..40 {
            let body = format!("Document Number {i} Has A Title\nAuthor {i}\n");
            write(&src, &format!("doc{i:02}.txt"), body.as_bytes());
        }

        let mut config = Config::new(&src, dir.path().join("out.jsonl"));
        config.workers = 6;
        let summary = run(&config, &ExtractorRegistry::default(), &ProgressContext::hidden()).unwrap();
        assert_eq!(summary.documents_emitted, 40);

        let content = std::fs::read_to_string(&config.output_path).unwrap();
        let ids: Vec<String> = content
            .lines()
            .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap()["id"].as_str().unwrap().to_string())
            .collect();
        let expected: Vec<String> = (0..40).map(|i| format!("doc{i:02}")).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn empty_corpus_writes_empty_file() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir(&src).unwrap();
        let config = Config::new(&src, dir.path().join("out.jsonl"));
        let summary = run(&config, &ExtractorRegistry::default(), &ProgressContext::hidden()).unwrap();
        assert_eq!(summary.documents_seen, 0);
        assert_eq!(summary.documents_emitted, 0);
        assert_eq!(summary.output_bytes, 0);
        assert!(config.output_path.exists());
    }

    #[test]
    fn invalid_config_fails_before_output() {
        let dir = TempDir::new().unwrap();
        let config = Config::new(dir.path().join("missing"), dir.path().join("out.jsonl"));
        let err = run(&config, &ExtractorRegistry::default(), &ProgressContext::hidden()).unwrap_err();
        assert!(format!("{err:#}").contains("source directory not found"));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn phase_names() {
        assert_eq!(BatchPhase::Enumerating.to_string(), "enumerating");
        assert_eq!(BatchPhase::Done.to_string(), "done");
    }
}
