//! JSON Lines output sink with atomic tmp→rename

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Lines and bytes written by a finalized sink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkStats {
    pub lines: usize,
    pub bytes: u64,
}

/// Buffered JSON Lines writer.
///
/// Records go to `<output>.tmp`; [`finalize`](JsonlSink::finalize) flushes
/// and renames onto the final path. A sink dropped without finalizing
/// removes its tmp file, so the output path only ever holds a complete run.
pub struct JsonlSink {
    writer: Option<BufWriter<File>>,
    tmp_path: PathBuf,
    final_path: PathBuf,
    stats: SinkStats,
    line_buf: Vec<u8>,
}

impl std::fmt::Debug for JsonlSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonlSink")
            .field("final_path", &self.final_path)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// `<path>.tmp` next to the final output
pub fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

impl JsonlSink {
    /// Create a sink writing to a temporary file next to `final_path`
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let tmp_path = tmp_path_for(final_path);

        // Clean up stale tmp file
        if tmp_path.exists() {
            log::warn!("Removing stale tmp file: {}", tmp_path.display());
            fs::remove_file(&tmp_path)?;
        }

        let file = File::create(&tmp_path)?;
        Ok(Self {
            writer: Some(BufWriter::new(file)),
            tmp_path,
            final_path: final_path.to_path_buf(),
            stats: SinkStats::default(),
            line_buf: Vec::with_capacity(4096),
        })
    }

    /// Serialize `record` as one JSON line.
    ///
    /// The line is fully serialized before anything is written, so a record
    /// that fails to serialize leaves no partial line behind.
    pub fn write_record<T: Serialize>(&mut self, record: &T) -> io::Result<()> {
        self.line_buf.clear();
        serde_json::to_writer(&mut self.line_buf, record).map_err(io::Error::other)?;
        self.line_buf.push(b'\n');

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| io::Error::other("sink already finalized"))?;
        writer.write_all(&self.line_buf)?;
        self.stats.lines += 1;
        self.stats.bytes += self.line_buf.len() as u64;
        Ok(())
    }

    /// Finalize: flush and atomically rename tmp → final
    pub fn finalize(mut self) -> io::Result<SinkStats> {
        if let Some(writer) = self.writer.take() {
            let file = writer.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
        }
        fs::rename(&self.tmp_path, &self.final_path)?;
        Ok(self.stats)
    }
}

impl Drop for JsonlSink {
    fn drop(&mut self) {
        // Still holding the writer means finalize never ran
        if self.writer.take().is_some() {
            let _ = fs::remove_file(&self.tmp_path);
        }
    }
}
