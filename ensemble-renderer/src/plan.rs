//! Emission plan — which files a brief produces, decided before rendering.
//!
//! Conditional emission is declarative: flags and list lengths are evaluated
//! once here and the render loop walks the plan without branching. The
//! draft-PR scaffold appears iff `workflow.create_draft_prs`; one stub per
//! reference, so the references directory exists exactly when references are
//! declared; one skill document per role.

use std::path::PathBuf;

use ensemble_core::Brief;

/// Template names in the embedded catalog.
pub mod template {
    pub const AGENTS: &str = "agents.md.tera";
    pub const SKILLS: &str = "skills.md.tera";
    pub const PROCESS_CONTRACT: &str = "process-contract.md.tera";
    pub const ROLE_SKILL: &str = "role-skill.md.tera";
    pub const PR_BODY: &str = "pr-body.md.tera";
    pub const ACCEPTANCE_CHECKLIST: &str = "acceptance-checklist.md.tera";
    pub const WORKTREE_SCRIPT: &str = "agent-worktree.sh.tera";
    pub const CHAT_SCRIPT: &str = "agent-chat.sh.tera";
    pub const SCAFFOLD_SCRIPT: &str = "scaffold-prs.sh.tera";
    pub const REFERENCE_STUB: &str = "reference-stub.md.tera";
}

/// Per-file payload beyond the shared context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Shared context only.
    Shared,
    /// The role at this index in the brief's declared order.
    Role(usize),
    /// The reference at this index in the brief's declared order.
    Reference(usize),
}

/// What to render into one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Name of the template in the embedded catalog.
    pub template: &'static str,
    /// Output path relative to the target root.
    pub path: PathBuf,
    /// Whether the written file gets the executable bit.
    pub executable: bool,
    pub payload: Payload,
}

impl PlannedFile {
    fn shared(template: &'static str, path: PathBuf) -> PlannedFile {
        PlannedFile {
            template,
            path,
            executable: false,
            payload: Payload::Shared,
        }
    }

    fn script(template: &'static str, path: &str) -> PlannedFile {
        PlannedFile {
            template,
            path: PathBuf::from(path),
            executable: true,
            payload: Payload::Shared,
        }
    }
}

/// The ordered emission plan for one brief.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmissionPlan {
    pub(crate) files: Vec<PlannedFile>,
}

impl EmissionPlan {
    /// Decide every output file for `brief`, in emission order: documents,
    /// templates, scripts, role skills, reference stubs.
    pub fn for_brief(brief: &Brief) -> EmissionPlan {
        let mut files = Vec::new();

        files.push(PlannedFile::shared(
            template::AGENTS,
            PathBuf::from("AGENTS.md"),
        ));
        files.push(PlannedFile::shared(
            template::SKILLS,
            PathBuf::from("SKILLS.md"),
        ));
        files.push(PlannedFile::shared(
            template::PROCESS_CONTRACT,
            PathBuf::from(&brief.workflow.pr_process_contract),
        ));
        files.push(PlannedFile::shared(
            template::PR_BODY,
            brief.templates.pr_body.clone(),
        ));
        files.push(PlannedFile::shared(
            template::ACCEPTANCE_CHECKLIST,
            brief.templates.acceptance_checklist.clone(),
        ));

        files.push(PlannedFile::script(
            template::WORKTREE_SCRIPT,
            "scripts/agent-worktree.sh",
        ));
        files.push(PlannedFile::script(
            template::CHAT_SCRIPT,
            "scripts/agent-chat.sh",
        ));
        if brief.workflow.create_draft_prs {
            files.push(PlannedFile::script(
                template::SCAFFOLD_SCRIPT,
                "scripts/scaffold_prs.sh",
            ));
        }

        for (idx, role) in brief.roles.iter().enumerate() {
            files.push(PlannedFile {
                template: template::ROLE_SKILL,
                path: PathBuf::from(role.name.0.as_str()).join("SKILL.md"),
                executable: false,
                payload: Payload::Role(idx),
            });
        }

        for (idx, reference) in brief.references.iter().enumerate() {
            files.push(PlannedFile {
                template: template::REFERENCE_STUB,
                path: reference.path.clone(),
                executable: false,
                payload: Payload::Reference(idx),
            });
        }

        EmissionPlan { files }
    }

    /// Planned files in emission order.
    pub fn files(&self) -> &[PlannedFile] {
        &self.files
    }
}
