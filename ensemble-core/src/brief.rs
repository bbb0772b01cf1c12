//! Brief model.
//!
//! Two layers on purpose: [`RawBrief`] is what the parser hands over, with
//! field presence and scalar types still open. [`Brief`] only exists after
//! schema validation, so anything that takes a `&Brief` is statically
//! downstream of the validator.

use std::fmt;
use std::path::PathBuf;

use crate::error::ParseError;
use crate::value::{Scalar, Value};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A role's name. Doubles as the role's directory name in the generated
/// tree, which is why the validator gates it so hard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleName(pub String);

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoleName {
    fn from(s: &str) -> Self {
        RoleName(s.to_string())
    }
}

impl From<String> for RoleName {
    fn from(s: String) -> Self {
        RoleName(s)
    }
}

/// A policy module name, resolved against the policy catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PolicyName(pub String);

impl fmt::Display for PolicyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PolicyName {
    fn from(s: &str) -> Self {
        PolicyName(s.to_string())
    }
}

impl From<String> for PolicyName {
    fn from(s: String) -> Self {
        PolicyName(s)
    }
}

// ---------------------------------------------------------------------------
// Raw brief
// ---------------------------------------------------------------------------

/// Parsed but not yet validated brief.
///
/// Shape (mappings where mappings belong, sequences where sequences belong)
/// is already enforced; field types and presence are not.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawBrief {
    pub system: RawSystem,
    pub workflow: RawWorkflow,
    pub roles: Vec<RawRole>,
    pub policies: Vec<Scalar>,
    /// Template binding name to declared path, in declared order.
    pub templates: Vec<(String, Scalar)>,
    pub references: Vec<RawReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSystem {
    pub name: Option<Scalar>,
    pub description: Option<Scalar>,
    pub version: Option<Scalar>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawWorkflow {
    pub pr_process_contract: Option<Scalar>,
    pub use_worktrees: Option<Scalar>,
    pub create_draft_prs: Option<Scalar>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRole {
    pub name: Option<Scalar>,
    pub description: Option<Scalar>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawReference {
    pub path: Option<Scalar>,
    pub purpose: Option<Scalar>,
}

impl RawBrief {
    /// Shape a parsed document into brief form.
    ///
    /// `system`, `workflow` and `templates` must be mappings; `roles` and
    /// `references` sequences of mappings; `policies` a sequence of
    /// scalars. A section that is present but null counts as absent, the
    /// same as a key the document never mentions.
    pub fn from_value(doc: &Value) -> Result<RawBrief, ParseError> {
        if doc.as_mapping().is_none() {
            return Err(ParseError::TopLevelNotMapping);
        }
        let mut brief = RawBrief::default();

        if let Some(section) = non_null(doc.get("system")) {
            let entries = expect_mapping(section, "system")?;
            brief.system = RawSystem {
                name: scalar_field(entries, "name", "system.name")?,
                description: scalar_field(entries, "description", "system.description")?,
                version: scalar_field(entries, "version", "system.version")?,
            };
        }

        if let Some(section) = non_null(doc.get("workflow")) {
            let entries = expect_mapping(section, "workflow")?;
            brief.workflow = RawWorkflow {
                pr_process_contract: scalar_field(
                    entries,
                    "pr_process_contract",
                    "workflow.pr_process_contract",
                )?,
                use_worktrees: scalar_field(entries, "use_worktrees", "workflow.use_worktrees")?,
                create_draft_prs: scalar_field(
                    entries,
                    "create_draft_prs",
                    "workflow.create_draft_prs",
                )?,
            };
        }

        if let Some(section) = non_null(doc.get("roles")) {
            for item in expect_sequence(section, "roles")? {
                let entries = expect_mapping(item, "roles entry")?;
                brief.roles.push(RawRole {
                    name: scalar_field(entries, "name", "role name")?,
                    description: scalar_field(entries, "description", "role description")?,
                });
            }
        }

        if let Some(section) = non_null(doc.get("policies")) {
            for item in expect_sequence(section, "policies")? {
                let scalar = item.as_scalar().ok_or_else(|| ParseError::UnexpectedShape {
                    field: "policies entry".to_string(),
                    expected: "a scalar",
                    found: item.type_name(),
                })?;
                brief.policies.push(scalar.clone());
            }
        }

        if let Some(section) = non_null(doc.get("templates")) {
            for (key, value) in expect_mapping(section, "templates")? {
                let scalar = value.as_scalar().ok_or_else(|| ParseError::UnexpectedShape {
                    field: format!("templates.{key}"),
                    expected: "a scalar",
                    found: value.type_name(),
                })?;
                brief.templates.push((key.clone(), scalar.clone()));
            }
        }

        if let Some(section) = non_null(doc.get("references")) {
            for item in expect_sequence(section, "references")? {
                let entries = expect_mapping(item, "references entry")?;
                brief.references.push(RawReference {
                    path: scalar_field(entries, "path", "reference path")?,
                    purpose: scalar_field(entries, "purpose", "reference purpose")?,
                });
            }
        }

        Ok(brief)
    }
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    match value {
        Some(Value::Scalar(Scalar::Null)) | None => None,
        Some(v) => Some(v),
    }
}

fn expect_mapping<'a>(value: &'a Value, field: &str) -> Result<&'a [(String, Value)], ParseError> {
    value.as_mapping().ok_or_else(|| ParseError::UnexpectedShape {
        field: field.to_string(),
        expected: "a mapping",
        found: value.type_name(),
    })
}

fn expect_sequence<'a>(value: &'a Value, field: &str) -> Result<&'a [Value], ParseError> {
    value.as_sequence().ok_or_else(|| ParseError::UnexpectedShape {
        field: field.to_string(),
        expected: "a sequence",
        found: value.type_name(),
    })
}

fn lookup<'a>(entries: &'a [(String, Value)], key: &str) -> Option<&'a Value> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

fn scalar_field(
    entries: &[(String, Value)],
    key: &str,
    field: &str,
) -> Result<Option<Scalar>, ParseError> {
    match lookup(entries, key) {
        None => Ok(None),
        Some(value) => {
            let scalar = value.as_scalar().ok_or_else(|| ParseError::UnexpectedShape {
                field: field.to_string(),
                expected: "a scalar",
                found: value.type_name(),
            })?;
            Ok(Some(scalar.clone()))
        }
    }
}

// ---------------------------------------------------------------------------
// Validated brief
// ---------------------------------------------------------------------------

/// A fully validated brief. Construct through [`crate::schema::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brief {
    pub system: System,
    pub workflow: Workflow,
    pub roles: Vec<Role>,
    pub policies: Vec<PolicyRef>,
    pub templates: TemplateBindings,
    pub references: Vec<Reference>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct System {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workflow {
    /// File name of the process contract document at the tree root.
    pub pr_process_contract: String,
    pub use_worktrees: bool,
    pub create_draft_prs: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub name: RoleName,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRef {
    pub name: PolicyName,
}

/// Output paths for the overridable document templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBindings {
    pub pr_body: PathBuf,
    pub acceptance_checklist: PathBuf,
}

impl Default for TemplateBindings {
    fn default() -> Self {
        TemplateBindings {
            pr_body: PathBuf::from("templates/pr-body.md"),
            acceptance_checklist: PathBuf::from("templates/acceptance-checklist.md"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Path of the stub inside the generated tree, exactly as declared.
    pub path: PathBuf,
    pub purpose: String,
}
