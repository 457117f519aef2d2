//! Error types for document output.

use std::path::PathBuf;

/// Errors that can occur while writing a rendered document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// An I/O error occurred while writing the document.
    #[error("failed to write document {path}: {source}")]
    Io {
        /// The destination path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
