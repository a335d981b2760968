//! Error types for document extraction and batch configuration

use std::path::PathBuf;

/// Failure to obtain text from one source document.
///
/// Always recovered by the batch driver: the document is logged and
/// skipped, and the batch carries on.
#[derive(Debug)]
pub enum ExtractionError {
    /// Source file could not be read
    Io(std::io::Error),
    /// Document is corrupt, encrypted or otherwise unparseable
    Parse(String),
    /// Text is not valid UTF-8
    Encoding(std::str::Utf8Error),
    /// No extractor registered for the file extension
    Unsupported(String),
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO: {e}"),
            Self::Parse(msg) => write!(f, "parse: {msg}"),
            Self::Encoding(e) => write!(f, "encoding: {e}"),
            Self::Unsupported(ext) => write!(f, "unsupported document type: {ext:?}"),
        }
    }
}

impl std::error::Error for ExtractionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encoding(e) => Some(e),
            Self::Parse(_) | Self::Unsupported(_) => None,
        }
    }
}

impl From<std::io::Error> for ExtractionError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Invalid batch configuration. Fatal: reported before any document is
/// touched.
#[derive(Debug)]
pub enum ConfigError {
    SourceMissing(PathBuf),
    SourceNotDirectory(PathBuf),
    OutputIsDirectory(PathBuf),
    OutputUnwritable { path: PathBuf, source: std::io::Error },
    ZeroLimit(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceMissing(p) => write!(f, "source directory not found: {}", p.display()),
            Self::SourceNotDirectory(p) => {
                write!(f, "source path is not a directory: {}", p.display())
            }
            Self::OutputIsDirectory(p) => {
                write!(f, "output path is a directory: {}", p.display())
            }
            Self::OutputUnwritable { path, source } => {
                write!(f, "output location not writable: {}: {source}", path.display())
            }
            Self::ZeroLimit(name) => write!(f, "{name} must be greater than zero"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OutputUnwritable { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn extraction_display_io() {
        let err = ExtractionError::from(std::io::Error::new(ErrorKind::NotFound, "gone"));
        assert!(format!("{err}").starts_with("IO:"));
    }

    #[test]
    fn extraction_display_unsupported() {
        let err = ExtractionError::Unsupported("docx".to_string());
        assert_eq!(format!("{err}"), "unsupported document type: \"docx\"");
    }

    #[test]
    fn config_display_names_path() {
        let err = ConfigError::SourceMissing(PathBuf::from("/no/such/dir"));
        assert!(format!("{err}").contains("/no/such/dir"));
    }

    #[test]
    fn config_unwritable_has_source() {
        use std::error::Error;
        let err = ConfigError::OutputUnwritable {
            path: PathBuf::from("/ro/out.jsonl"),
            source: std::io::Error::new(ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
    }
}
