//! Schema validation.
//!
//! Turns a [`RawBrief`] into a validated [`Brief`] or reports the first
//! blocking problem. Checking order is fixed: system, workflow, roles,
//! policies, template bindings, references. Defaults are applied here and
//! nowhere else, so everything downstream sees fully populated fields.

use std::path::{Component, Path, PathBuf};

use crate::brief::{
    Brief, PolicyName, PolicyRef, RawBrief, Reference, Role, RoleName, System, TemplateBindings,
    Workflow,
};
use crate::catalog::PolicyCatalog;
use crate::error::SchemaError;
use crate::value::Scalar;

/// Directory names the generated tree claims for itself; no role may use
/// them.
pub const RESERVED_DIRS: &[&str] = &["scripts", "templates", "references", "assets", "logs"];

const DEFAULT_DESCRIPTION: &str = "No description provided.";
const DEFAULT_PURPOSE: &str = "No purpose provided.";
const DEFAULT_CONTRACT: &str = "agent-process-contract.md";

/// Validate `raw` against the brief schema and `catalog`.
pub fn validate(raw: RawBrief, catalog: &PolicyCatalog) -> Result<Brief, SchemaError> {
    let system = System {
        name: require_string(raw.system.name.as_ref(), "system.name")?,
        description: optional_string(
            raw.system.description.as_ref(),
            "system.description",
            DEFAULT_DESCRIPTION,
        )?,
        version: require_version(raw.system.version.as_ref())?,
    };

    let pr_process_contract = optional_string(
        raw.workflow.pr_process_contract.as_ref(),
        "workflow.pr_process_contract",
        DEFAULT_CONTRACT,
    )?;
    if !safe_relative(&pr_process_contract) {
        return Err(SchemaError::UnsafePath {
            field: "workflow.pr_process_contract".to_string(),
            path: pr_process_contract,
        });
    }
    let workflow = Workflow {
        pr_process_contract,
        use_worktrees: optional_bool(
            raw.workflow.use_worktrees.as_ref(),
            "workflow.use_worktrees",
            true,
        )?,
        create_draft_prs: optional_bool(
            raw.workflow.create_draft_prs.as_ref(),
            "workflow.create_draft_prs",
            false,
        )?,
    };

    if raw.roles.is_empty() {
        return Err(SchemaError::EmptyRoles);
    }
    let mut roles: Vec<Role> = Vec::with_capacity(raw.roles.len());
    for (idx, role) in raw.roles.iter().enumerate() {
        let field = format!("roles[{idx}].name");
        let name = require_string(role.name.as_ref(), &field)?;
        if !safe_segment(&name) {
            return Err(SchemaError::UnsafePath { field, path: name });
        }
        if is_reserved_role_name(&name, &workflow.pr_process_contract) {
            return Err(SchemaError::ReservedRoleName { name });
        }
        if roles.iter().any(|r| r.name.0 == name) {
            return Err(SchemaError::DuplicateRole { name });
        }
        let description = optional_string(
            role.description.as_ref(),
            &format!("roles[{idx}].description"),
            DEFAULT_DESCRIPTION,
        )?;
        roles.push(Role {
            name: RoleName(name),
            description,
        });
    }

    let mut policies: Vec<PolicyRef> = Vec::with_capacity(raw.policies.len());
    for (idx, scalar) in raw.policies.iter().enumerate() {
        let name = require_string(Some(scalar), &format!("policies[{idx}]"))?;
        if !catalog.contains(&name) {
            return Err(SchemaError::UnknownPolicy { name });
        }
        if policies.iter().any(|p| p.name.0 == name) {
            return Err(SchemaError::DuplicatePolicy { name });
        }
        policies.push(PolicyRef {
            name: PolicyName(name),
        });
    }

    let mut templates = TemplateBindings::default();
    for (name, value) in &raw.templates {
        let field = format!("templates.{name}");
        let path = require_string(Some(value), &field)?;
        if !safe_relative(&path) {
            return Err(SchemaError::UnsafePath { field, path });
        }
        match name.as_str() {
            "pr_body" => templates.pr_body = PathBuf::from(path),
            "acceptance_checklist" => templates.acceptance_checklist = PathBuf::from(path),
            other => {
                return Err(SchemaError::UnknownTemplate {
                    name: other.to_string(),
                })
            }
        }
    }

    let mut references: Vec<Reference> = Vec::with_capacity(raw.references.len());
    for (idx, reference) in raw.references.iter().enumerate() {
        let field = format!("references[{idx}].path");
        let path = require_string(reference.path.as_ref(), &field)?;
        if !safe_relative(&path) {
            return Err(SchemaError::UnsafePath { field, path });
        }
        let purpose = optional_string(
            reference.purpose.as_ref(),
            &format!("references[{idx}].purpose"),
            DEFAULT_PURPOSE,
        )?;
        references.push(Reference {
            path: PathBuf::from(path),
            purpose,
        });
    }

    Ok(Brief {
        system,
        workflow,
        roles,
        policies,
        templates,
        references,
    })
}

// ---------------------------------------------------------------------------
// Field extraction
// ---------------------------------------------------------------------------

fn require_string(scalar: Option<&Scalar>, field: &str) -> Result<String, SchemaError> {
    match scalar {
        None | Some(Scalar::Null) => Err(SchemaError::MissingField {
            field: field.to_string(),
        }),
        Some(Scalar::Str(s)) if s.trim().is_empty() => Err(SchemaError::MissingField {
            field: field.to_string(),
        }),
        Some(Scalar::Str(s)) => Ok(s.clone()),
        Some(other) => Err(SchemaError::InvalidType {
            field: field.to_string(),
            expected: "a string",
            found: other.type_name(),
        }),
    }
}

/// Version may be written as a bare integer (`version: 1`) or a string.
fn require_version(scalar: Option<&Scalar>) -> Result<String, SchemaError> {
    match scalar {
        None | Some(Scalar::Null) => Err(SchemaError::MissingField {
            field: "system.version".to_string(),
        }),
        Some(Scalar::Str(s)) if s.trim().is_empty() => Err(SchemaError::MissingField {
            field: "system.version".to_string(),
        }),
        Some(Scalar::Str(s)) => Ok(s.clone()),
        Some(Scalar::Int(i)) => Ok(i.to_string()),
        Some(other) => Err(SchemaError::InvalidType {
            field: "system.version".to_string(),
            expected: "a string or integer",
            found: other.type_name(),
        }),
    }
}

fn optional_string(
    scalar: Option<&Scalar>,
    field: &str,
    default: &str,
) -> Result<String, SchemaError> {
    match scalar {
        None | Some(Scalar::Null) => Ok(default.to_string()),
        Some(Scalar::Str(s)) if s.trim().is_empty() => Ok(default.to_string()),
        Some(Scalar::Str(s)) => Ok(s.clone()),
        Some(other) => Err(SchemaError::InvalidType {
            field: field.to_string(),
            expected: "a string",
            found: other.type_name(),
        }),
    }
}

fn optional_bool(scalar: Option<&Scalar>, field: &str, default: bool) -> Result<bool, SchemaError> {
    match scalar {
        None | Some(Scalar::Null) => Ok(default),
        Some(Scalar::Bool(b)) => Ok(*b),
        Some(other) => Err(SchemaError::NotBoolean {
            field: field.to_string(),
            found: other.type_name(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Path safety
// ---------------------------------------------------------------------------

/// A path that cannot leave the output tree: relative, no parent or current
/// directory segments, no backslashes, colons, or control characters. The
/// colon/control bans keep the path usable as a one-line document list
/// entry, which the verifier splits at the first ':'.
pub fn safe_relative(path: &str) -> bool {
    if path.is_empty()
        || path.contains('\\')
        || path.contains(':')
        || path.chars().any(char::is_control)
    {
        return false;
    }
    let p = Path::new(path);
    !p.is_absolute()
        && p.components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// A single path segment usable as a directory name and as the name part of
/// a document list entry (everything before the first ':').
fn safe_segment(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains(':')
        && !name.chars().any(char::is_control)
}

fn is_reserved_role_name(name: &str, contract: &str) -> bool {
    RESERVED_DIRS.contains(&name) || name == "AGENTS.md" || name == "SKILLS.md" || name == contract
}
