//! Error types for ensemble-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The emission plan named a template the embedded catalog lacks.
    /// An internal defect, not a brief problem.
    #[error("template '{name}' is missing from the embedded catalog")]
    MissingTemplate { name: String },

    /// Two planned files landed on the same output path.
    #[error("duplicate output path '{path}' in rendered tree")]
    DuplicatePath { path: PathBuf },

    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),
}
