//! Validation report — the aggregated outcome of a verification scan.

use std::fmt;

use serde::Serialize;

/// What kind of defect a violation describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A file the tree must contain is absent.
    MissingFile,
    /// A document is present but lacks a required section.
    MissingSection,
    /// A document is present but lacks a required line or marker.
    MissingMarker,
    /// Role directories on disk disagree with the documented role list.
    RoleMismatch,
    /// A policy named in the overview is absent from a skill document.
    PolicyOmitted,
    /// A documented reference path does not resolve inside the tree.
    UnresolvedReference,
    /// The scaffold script's presence contradicts the documented flag.
    ScaffoldMismatch,
    /// A helper script is missing its executable bit.
    NotExecutable,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViolationKind::MissingFile => "missing file",
            ViolationKind::MissingSection => "missing section",
            ViolationKind::MissingMarker => "missing marker",
            ViolationKind::RoleMismatch => "role mismatch",
            ViolationKind::PolicyOmitted => "policy omitted",
            ViolationKind::UnresolvedReference => "unresolved reference",
            ViolationKind::ScaffoldMismatch => "scaffold mismatch",
            ViolationKind::NotExecutable => "not executable",
        };
        f.write_str(s)
    }
}

/// One defect found in a materialized tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Offending path (or document) relative to the tree root.
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.path, self.message, self.kind)
    }
}

/// Every violation found in one scan, in scan order.
///
/// Empty report ⇔ the tree is well-formed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn new() -> ValidationReport {
        ValidationReport::default()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub(crate) fn push(&mut self, kind: ViolationKind, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation {
            kind,
            path: path.into(),
            message: message.into(),
        });
    }
}
