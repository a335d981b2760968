//! Blake3 content fingerprints for provenance and deduplication
//!
//! Fingerprints identify document *content*: two files with the same bytes
//! share a fingerprint no matter where they live or what they are called.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Read buffer for streaming hashes. Memory use stays at one chunk
/// regardless of file size.
pub const CHUNK_SIZE: usize = 128 * 1024;

/// Fingerprint a file's raw bytes, reading in fixed-size chunks.
pub fn fingerprint_file(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    fingerprint_reader(file)
}

/// Fingerprint everything readable from `reader`.
pub fn fingerprint_reader(mut reader: impl Read) -> io::Result<String> {
    let mut hasher = blake3::Hasher::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}

/// Fingerprint in-memory bytes.
pub fn fingerprint_bytes(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// First 8 hex characters of a fingerprint, for log lines.
pub fn short_fingerprint(fingerprint: &str) -> &str {
    fingerprint.get(..8).unwrap_or(fingerprint)
}
