//! # ensemble-verify
//!
//! Post-generation validation of a materialized workflow tree.
//!
//! [`verify_tree`] reads a generated tree back from disk and checks it
//! against what its own documents claim: every listed role has a skill
//! document with the required sections, every named policy is mentioned in
//! every skill document, the scaffold script presence matches the draft-PR
//! flag, references resolve, and helper scripts are executable. Violations
//! are aggregated, never fail-fast; an empty [`ValidationReport`] is the
//! sole success condition.
//!
//! The scan deliberately ignores whatever produced the tree. It re-derives
//! all facts from the filesystem, so it also catches divergence between
//! what a generator intended and what actually landed on disk.

pub mod checks;
pub mod docscan;
pub mod error;
pub mod report;

pub use checks::{verify_tree, FIXED_DIRS, HELPER_SCRIPTS};
pub use error::VerifyError;
pub use report::{ValidationReport, Violation, ViolationKind};
