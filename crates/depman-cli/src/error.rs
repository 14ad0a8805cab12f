//! Error types for depman-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from depman-manifest
    #[error(transparent)]
    Manifest(#[from] depman_manifest::Error),

    /// Error from depman-fs
    #[error(transparent)]
    Fs(#[from] depman_fs::Error),

    /// JSON output failed
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to install tracing subscriber: {0}")]
    Tracing(#[from] tracing::subscriber::SetGlobalDefaultError),
}
