//! Error types for ensemble-build.

use std::path::PathBuf;

use thiserror::Error;

use ensemble_core::{ParseError, SchemaError};
use ensemble_renderer::RenderError;

/// All errors that can arise from a generation run.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The brief document could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The parsed brief violates the schema.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// The target directory exists and is not empty.
    #[error("output path '{path}' is not empty")]
    OutputNotEmpty { path: PathBuf },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    /// Process exit code for this error. Each rejection class gets its own
    /// code so scripted callers can branch without scraping stderr.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::Parse(_) => 2,
            BuildError::Schema(SchemaError::UnknownPolicy { .. }) => 4,
            BuildError::Schema(SchemaError::UnsafePath { .. }) => 5,
            BuildError::Schema(_) => 3,
            BuildError::Render(RenderError::MissingTemplate { .. }) => 6,
            BuildError::Render(_) => 8,
            BuildError::OutputNotEmpty { .. } => 7,
            BuildError::Io { .. } => 9,
        }
    }
}

/// Convenience constructor for [`BuildError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BuildError {
    BuildError::Io {
        path: path.into(),
        source,
    }
}
