//! Error types for ensemble-verify.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop verification outright.
///
/// Content problems are never errors — they become violations in the
/// report. Only I/O failures other than a missing file abort the scan.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`VerifyError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> VerifyError {
    VerifyError::Io {
        path: path.into(),
        source,
    }
}
