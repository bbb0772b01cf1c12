//! Tera rendering engine — embedded template catalog and [`Renderer`].
//!
//! # Output map
//!
//! | Template                      | Output path                              |
//! |-------------------------------|------------------------------------------|
//! | `agents.md.tera`              | `AGENTS.md`                              |
//! | `skills.md.tera`              | `SKILLS.md`                              |
//! | `process-contract.md.tera`    | `workflow.pr_process_contract`           |
//! | `pr-body.md.tera`             | `templates.pr_body` binding              |
//! | `acceptance-checklist.md.tera`| `templates.acceptance_checklist` binding |
//! | `agent-worktree.sh.tera`      | `scripts/agent-worktree.sh` (exec)       |
//! | `agent-chat.sh.tera`          | `scripts/agent-chat.sh` (exec)           |
//! | `scaffold-prs.sh.tera`        | `scripts/scaffold_prs.sh` (exec, opt-in) |
//! | `role-skill.md.tera`          | `<role>/SKILL.md`, one per role          |
//! | `reference-stub.md.tera`      | declared reference path, one per entry   |

use tera::Tera;

use ensemble_core::{Brief, PolicyCatalog};

use crate::context::TemplateContext;
use crate::error::RenderError;
use crate::plan::{template, EmissionPlan, Payload};
use crate::tree::RenderedTree;

// ---------------------------------------------------------------------------
// Embedded templates — baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    (template::AGENTS, include_str!("templates/agents.md.tera")),
    (template::SKILLS, include_str!("templates/skills.md.tera")),
    (
        template::PROCESS_CONTRACT,
        include_str!("templates/process-contract.md.tera"),
    ),
    (
        template::ROLE_SKILL,
        include_str!("templates/role-skill.md.tera"),
    ),
    (template::PR_BODY, include_str!("templates/pr-body.md.tera")),
    (
        template::ACCEPTANCE_CHECKLIST,
        include_str!("templates/acceptance-checklist.md.tera"),
    ),
    (
        template::WORKTREE_SCRIPT,
        include_str!("templates/agent-worktree.sh.tera"),
    ),
    (
        template::CHAT_SCRIPT,
        include_str!("templates/agent-chat.sh.tera"),
    ),
    (
        template::SCAFFOLD_SCRIPT,
        include_str!("templates/scaffold-prs.sh.tera"),
    ),
    (
        template::REFERENCE_STUB,
        include_str!("templates/reference-stub.md.tera"),
    ),
];

fn build_tera() -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    let items: Vec<(String, String)> = TPLS
        .iter()
        .map(|(name, content)| ((*name).to_string(), (*content).to_string()))
        .collect();
    tera.add_raw_templates(items)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Tera-based renderer over the embedded template catalog.
///
/// Create once with [`Renderer::new`] and reuse; rendering itself is a pure
/// function of the brief and the catalog.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Construct a new [`Renderer`] with the embedded templates.
    pub fn new() -> Result<Renderer, RenderError> {
        Ok(Renderer { tera: build_tera()? })
    }

    /// Render the complete tree for a validated brief.
    pub fn render(&self, brief: &Brief, catalog: &PolicyCatalog) -> Result<RenderedTree, RenderError> {
        let plan = EmissionPlan::for_brief(brief);
        self.render_plan(brief, catalog, &plan)
    }

    /// Render a prepared emission plan.
    pub fn render_plan(
        &self,
        brief: &Brief,
        catalog: &PolicyCatalog,
        plan: &EmissionPlan,
    ) -> Result<RenderedTree, RenderError> {
        let ctx = TemplateContext::from_brief(brief, catalog);
        let base = ctx.to_tera_context()?;

        let mut tree = RenderedTree::new();
        for planned in plan.files() {
            let mut tera_ctx = base.clone();
            match planned.payload {
                Payload::Shared => {}
                Payload::Role(idx) => tera_ctx.insert("role", &ctx.roles[idx]),
                Payload::Reference(idx) => tera_ctx.insert("reference", &ctx.references[idx]),
            }
            let contents = self
                .tera
                .render(planned.template, &tera_ctx)
                .map_err(|e| not_found_or(e, planned.template))?;
            tree.insert(planned.path.clone(), contents, planned.executable)?;
        }
        Ok(tree)
    }
}

/// Tera's template-not-found is the catalog-gap defect; everything else
/// passes through as an engine error.
fn not_found_or(err: tera::Error, name: &str) -> RenderError {
    if matches!(err.kind, tera::ErrorKind::TemplateNotFound(_)) {
        RenderError::MissingTemplate {
            name: name.to_string(),
        }
    } else {
        RenderError::Tera(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
