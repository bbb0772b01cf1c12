//! Error types for ensemble-core.

use thiserror::Error;

/// All errors that can arise while parsing a brief document.
///
/// Both parse strategies report through this type, so callers cannot tell
/// which strategy rejected a malformed document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Briefs are two-space indented; tabs are rejected up front.
    #[error("tab character in indentation (line {line})")]
    Tab { line: usize },

    #[error("unexpected indentation (line {line})")]
    Indentation { line: usize },

    #[error("missing ':' in mapping entry (line {line})")]
    MissingColon { line: usize },

    #[error("duplicate key '{key}' (line {line})")]
    DuplicateKey { key: String, line: usize },

    #[error("list item where a mapping entry was expected (line {line})")]
    UnexpectedListItem { line: usize },

    #[error("unexpected content after the document (line {line})")]
    TrailingContent { line: usize },

    #[error("brief must be a mapping at the top level")]
    TopLevelNotMapping,

    /// A mapping key that is itself a sequence or mapping.
    #[error("mapping keys must be scalars")]
    NonScalarKey,

    /// A section or entry has the wrong shape, e.g. a scalar where a
    /// sequence of mappings is required.
    #[error("'{field}' must be {expected}, found {found}")]
    UnexpectedShape {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// All errors the schema validator can report.
///
/// Validation is fail-fast: the earliest rule a brief violates is the one
/// returned, in the documented checking order.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    #[error("'{field}' must be {expected}, found {found}")]
    InvalidType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("'{field}' must be a boolean, found {found}")]
    NotBoolean { field: String, found: &'static str },

    #[error("brief declares no roles")]
    EmptyRoles,

    #[error("duplicate role name '{name}'")]
    DuplicateRole { name: String },

    #[error("role name '{name}' collides with a fixed path in the generated tree")]
    ReservedRoleName { name: String },

    #[error("unknown policy '{name}'; not in the policy catalog")]
    UnknownPolicy { name: String },

    #[error("duplicate policy '{name}'")]
    DuplicatePolicy { name: String },

    #[error("unknown template binding '{name}'")]
    UnknownTemplate { name: String },

    #[error("unsafe path '{path}' in '{field}'; paths must stay inside the output tree")]
    UnsafePath { field: String, path: String },
}
