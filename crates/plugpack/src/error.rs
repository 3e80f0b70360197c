//! Error types for packaging operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during packaging operations.
///
/// Per-item copy problems are deliberately absent here: a missing or
/// unreadable asset is a [`crate::CopyOutcome`], tolerated and counted by the
/// assembler. Only structural failures terminate a build.
#[derive(Debug, Error)]
pub enum PackError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ZIP archive error.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Manifest validation error.
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// Could not create or write the staging directory or the manifest file.
    #[error("Staging failure at {}: {source}", path.display())]
    Staging {
        path: PathBuf,
        source: std::io::Error,
    },
}
