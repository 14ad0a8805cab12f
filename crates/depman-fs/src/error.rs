//! Error types for depman-fs

use std::path::PathBuf;

/// Result type for depman-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while accessing a manifest source
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest source too large: {path} is {size} bytes (max {max})")]
    SourceTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("No manifest found in {dir} (looked for {candidates})")]
    ManifestNotFound { dir: PathBuf, candidates: String },

    #[error("Manifest source is not valid UTF-8: {path}")]
    NotUtf8 { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
