//! Template context — serializable rendering payload built from a validated
//! [`Brief`].
//!
//! Nothing time- or environment-dependent may enter this struct: rendering
//! must be a pure function of the brief and the policy catalog, so two runs
//! anywhere produce byte-identical output.

use std::path::Path;

use serde::Serialize;

use ensemble_core::{Brief, PolicyCatalog};

use crate::error::RenderError;

/// Rendering payload handed to every template.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    pub system: SystemCtx,
    pub workflow: WorkflowCtx,
    pub roles: Vec<RoleCtx>,
    pub policies: Vec<PolicyCtx>,
    pub templates: TemplatesCtx,
    pub references: Vec<ReferenceCtx>,
    pub commands: CommandsCtx,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemCtx {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowCtx {
    pub process_contract: String,
    pub use_worktrees: bool,
    pub create_draft_prs: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleCtx {
    pub name: String,
    /// Verbatim description, rendered into the skill document's Mission.
    pub description: String,
    /// Description collapsed onto one line, for document list entries.
    pub summary: String,
    /// Relative path of this role's skill document.
    pub skill_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyCtx {
    pub name: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplatesCtx {
    pub pr_body: String,
    pub acceptance_checklist: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceCtx {
    pub path: String,
    /// Display title derived from the file stem.
    pub title: String,
    pub purpose: String,
}

/// Commands the generated documents tell contributors to run.
#[derive(Debug, Clone, Serialize)]
pub struct CommandsCtx {
    pub verify: String,
}

impl TemplateContext {
    /// Build a context from a validated brief and the catalog it was
    /// validated against. A policy missing from `catalog` renders with an
    /// empty summary; validation and rendering are expected to share one
    /// catalog.
    pub fn from_brief(brief: &Brief, catalog: &PolicyCatalog) -> Self {
        let roles = brief
            .roles
            .iter()
            .map(|role| RoleCtx {
                name: role.name.0.clone(),
                description: role.description.clone(),
                summary: one_line(&role.description),
                skill_path: format!("{}/SKILL.md", role.name),
            })
            .collect();

        let policies = brief
            .policies
            .iter()
            .map(|policy| PolicyCtx {
                name: policy.name.0.clone(),
                summary: catalog.summary(&policy.name.0).unwrap_or_default().to_string(),
            })
            .collect();

        let references = brief
            .references
            .iter()
            .map(|reference| ReferenceCtx {
                path: display_path(&reference.path),
                title: stub_title(&reference.path),
                purpose: one_line(&reference.purpose),
            })
            .collect();

        TemplateContext {
            system: SystemCtx {
                name: brief.system.name.clone(),
                description: one_line(&brief.system.description),
                version: brief.system.version.clone(),
            },
            workflow: WorkflowCtx {
                process_contract: brief.workflow.pr_process_contract.clone(),
                use_worktrees: brief.workflow.use_worktrees,
                create_draft_prs: brief.workflow.create_draft_prs,
            },
            roles,
            policies,
            templates: TemplatesCtx {
                pr_body: display_path(&brief.templates.pr_body),
                acceptance_checklist: display_path(&brief.templates.acceptance_checklist),
            },
            references,
            commands: CommandsCtx {
                verify: "ensemble verify .".to_string(),
            },
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}

/// Collapse free text onto one line. Multi-line values would split the
/// document list entries the verifier re-reads line by line.
fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Paths are validated relative with forward slashes, so their display form
/// is stable across platforms.
fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// `references/style-guide.md` becomes `Style Guide`.
fn stub_title(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("reference");
    let words: Vec<String> = stem
        .split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect();
    if words.is_empty() {
        "Reference".to_string()
    } else {
        words.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ensemble_core::{
        PolicyName, PolicyRef, Reference, Role, RoleName, System, TemplateBindings, Workflow,
    };
    use std::path::PathBuf;

    fn make_brief() -> Brief {
        Brief {
            system: System {
                name: "content-studio".to_string(),
                description: "Editorial pipeline".to_string(),
                version: "2".to_string(),
            },
            workflow: Workflow {
                pr_process_contract: "agent-process-contract.md".to_string(),
                use_worktrees: true,
                create_draft_prs: false,
            },
            roles: vec![
                Role {
                    name: RoleName::from("writer"),
                    description: "Drafts articles".to_string(),
                },
                Role {
                    name: RoleName::from("editor"),
                    description: "Reviews drafts".to_string(),
                },
            ],
            policies: vec![PolicyRef {
                name: PolicyName::from("plagiarism-check"),
            }],
            templates: TemplateBindings::default(),
            references: vec![Reference {
                path: PathBuf::from("references/style-guide.md"),
                purpose: "House style rules".to_string(),
            }],
        }
    }

    #[test]
    fn context_fields_populated() {
        let brief = make_brief();
        let ctx = TemplateContext::from_brief(&brief, &PolicyCatalog::builtin());
        assert_eq!(ctx.system.name, "content-studio");
        assert_eq!(ctx.roles[0].skill_path, "writer/SKILL.md");
        assert_eq!(ctx.policies[0].name, "plagiarism-check");
        assert!(ctx.policies[0].summary.contains("originality"));
        assert_eq!(ctx.references[0].title, "Style Guide");
        assert_eq!(ctx.commands.verify, "ensemble verify .");
    }

    #[test]
    fn multiline_text_collapses_for_list_entries_only() {
        let mut brief = make_brief();
        brief.system.description = "Editorial pipeline\nfor long-form articles".to_string();
        brief.roles[0].description = "Drafts articles\nfrom approved outlines".to_string();
        brief.references[0].purpose = "House style\nrules".to_string();

        let ctx = TemplateContext::from_brief(&brief, &PolicyCatalog::builtin());
        assert_eq!(ctx.system.description, "Editorial pipeline for long-form articles");
        assert_eq!(ctx.roles[0].summary, "Drafts articles from approved outlines");
        assert_eq!(
            ctx.roles[0].description,
            "Drafts articles\nfrom approved outlines"
        );
        assert_eq!(ctx.references[0].purpose, "House style rules");
    }

    #[test]
    fn to_tera_context_succeeds() {
        let brief = make_brief();
        let ctx = TemplateContext::from_brief(&brief, &PolicyCatalog::builtin());
        ctx.to_tera_context().expect("context conversion");
    }

    #[test]
    fn stub_titles_capitalize_dashed_stems() {
        assert_eq!(stub_title(Path::new("references/style-guide.md")), "Style Guide");
        assert_eq!(stub_title(Path::new("sources.md")), "Sources");
        assert_eq!(stub_title(Path::new("references/API-notes.md")), "Api Notes");
    }
}
