//! # ensemble-build
//!
//! The generation pipeline: brief in, repository tree out.
//!
//! Call [`generate`] to run the full fail-fast chain — parse, validate,
//! render, write — for a brief file and an empty target directory. Every
//! error class carries its own process exit code via
//! [`BuildError::exit_code`], and a failed run never leaves partial output
//! on disk.

pub mod digest;
pub mod error;
pub mod pipeline;
pub mod writer;

pub use digest::tree_digest;
pub use error::BuildError;
pub use pipeline::{brief_from_text, generate, render_tree, GenerateReport, WriteOutcome};
pub use writer::write_tree;
