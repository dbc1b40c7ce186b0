//! Per-file analysis errors
//!
//! Every variant is scoped to a single file. The pipeline converts them into
//! a `Failed` record state; none of them abort a batch.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Lossless container header is malformed or missing its signature
    #[error("invalid container {}: {reason}", path.display())]
    InvalidContainer { path: PathBuf, reason: String },

    /// No readable embedded tags (non-fatal)
    #[error("no embedded tags: {0}")]
    TagReadFailure(String),

    /// Too few samples for the spectral pass (non-fatal)
    #[error("only {found} samples available, need at least {required}")]
    InsufficientSamples { found: usize, required: usize },

    /// Open, seek or stat failure
    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A job panicked inside its worker
    #[error("analysis worker panicked: {0}")]
    WorkerPanic(String),
}

impl AnalysisError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_container(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidContainer {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether extraction can carry on past this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::TagReadFailure(_) | Self::InsufficientSamples { .. }
        )
    }
}

/// Convenience Result type for per-file analysis
pub type Result<T> = std::result::Result<T, AnalysisError>;
