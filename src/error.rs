// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide error type.
///
/// Sanitization itself never fails: malformed markup is left untouched.
/// Everything here comes from the file-batch layer around it.
#[derive(Debug, Error)]
pub enum ScrubError {
    /// The target is neither a file nor a directory. Fatal for the run.
    #[error("{} is not a valid file or directory", .0.display())]
    InvalidPath(PathBuf),

    /// Reading or writing one file failed. The batch skips the file.
    #[error("failed to process {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed for one entry.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrubError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
