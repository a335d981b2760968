//! Docline Core - Common infrastructure for document extraction pipelines
//!
//! This crate provides the pieces every docline pipeline shares:
//! logging and progress output, graceful shutdown, work distribution,
//! content fingerprinting and the atomic JSON Lines sink.

pub mod fingerprint;
pub mod logging;
pub mod progress;
pub mod shutdown;
pub mod sink;
pub mod work_queue;

// Re-exports for convenience
pub use fingerprint::{fingerprint_bytes, fingerprint_file, fingerprint_reader, short_fingerprint};
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{ProgressContext, SharedProgress, fmt_bytes, fmt_num};
pub use shutdown::{install_signal_handlers, is_shutdown_requested, request_shutdown, shutdown_flag};
pub use sink::{JsonlSink, SinkStats};
pub use work_queue::WorkQueue;
