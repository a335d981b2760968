//! Interrupted batch: the shutdown flag is process-global, so this lives in
//! its own test binary.

use std::path::Path;
use std::sync::Arc;

use docline_core::{ProgressContext, is_shutdown_requested, request_shutdown};
use docline_extract::{
    Config, ExtractionError, ExtractorRegistry, PlainTextExtractor, TextExtractor, run,
};
use tempfile::TempDir;

/// Plain-text backend that raises the shutdown flag after reading `stop_at`,
/// as a SIGINT arriving mid-batch would.
struct InterruptingExtractor {
    stop_at: &'static str,
}

impl TextExtractor for InterruptingExtractor {
    fn name(&self) -> &'static str {
        "txt"
    }

    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, ExtractionError> {
        let pages = PlainTextExtractor.extract_pages(path)?;
        if path.file_stem().is_some_and(|s| s == self.stop_at) {
            request_shutdown();
        }
        Ok(pages)
    }
}

#[test]
fn shutdown_mid_batch_finalizes_partial_output() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("corpus");
    std::fs::create_dir(&src).unwrap();
    for i in 0..10 {
        let body = format!("Interrupted Batch Document Number {i}\nJane Doe\n");
        std::fs::write(src.join(format!("doc{i:02}.txt")), body).unwrap();
    }

    let mut config = Config::new(&src, dir.path().join("out/docs.jsonl"));
    config.workers = 1;
    let registry =
        ExtractorRegistry::empty().register("txt", Arc::new(InterruptingExtractor { stop_at: "doc02" }));

    assert!(!is_shutdown_requested());
    let summary = run(&config, &registry, &ProgressContext::hidden()).unwrap();
    assert!(is_shutdown_requested());

    // The document in flight when the flag went up still completes
    assert!(summary.interrupted);
    assert_eq!(summary.documents_seen, 10);
    assert_eq!(summary.documents_emitted, 3);
    assert_eq!(summary.not_attempted, 7);
    assert_eq!(summary.documents_skipped(), 0);

    // Partial output is renamed into place, no tmp left behind
    let content = std::fs::read_to_string(&config.output_path).unwrap();
    let ids: Vec<String> = content
        .lines()
        .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap()["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["doc00", "doc01", "doc02"]);
    assert_eq!(summary.output_bytes, content.len() as u64);
    assert!(!docline_core::sink::tmp_path_for(&config.output_path).exists());
}
