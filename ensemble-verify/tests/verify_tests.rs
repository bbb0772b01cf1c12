//! Seeded-defect scenarios: generate a valid tree, break one thing, and
//! check the scan reports exactly that defect.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use ensemble_build::generate;
use ensemble_core::{ParseStrategy, PolicyCatalog};
use ensemble_verify::{verify_tree, ViolationKind};

const BRIEF: &str = "\
system:
  name: content-studio
  description: Editorial pipeline
  version: 2
workflow:
  use_worktrees: true
  create_draft_prs: true
roles:
  - name: writer
    description: Drafts articles
  - name: editor
    description: Reviews drafts
policies:
  - plagiarism-check
references:
  - path: references/style-guide.md
    purpose: House style rules
";

fn generate_tree() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let brief_path = tmp.path().join("brief.yaml");
    std::fs::write(&brief_path, BRIEF).unwrap();
    let target = tmp.path().join("out");
    generate(
        &brief_path,
        &target,
        ParseStrategy::Yaml,
        &PolicyCatalog::builtin(),
        false,
    )
    .unwrap();
    (tmp, target)
}

fn kinds(target: &Path) -> Vec<ViolationKind> {
    verify_tree(target)
        .unwrap()
        .violations
        .iter()
        .map(|v| v.kind)
        .collect()
}

fn edit(path: &Path, from: &str, to: &str) {
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.contains(from), "fixture drift: {from:?} not in {}", path.display());
    std::fs::write(path, text.replace(from, to)).unwrap();
}

#[test]
fn missing_skill_document_is_reported() {
    let (_tmp, target) = generate_tree();
    std::fs::remove_file(target.join("writer/SKILL.md")).unwrap();

    let report = verify_tree(&target).unwrap();
    assert_eq!(kinds(&target), vec![ViolationKind::MissingFile]);
    assert_eq!(report.violations[0].path, "writer/SKILL.md");
}

#[test]
fn missing_acceptance_criteria_section_is_reported() {
    let (_tmp, target) = generate_tree();
    edit(
        &target.join("editor/SKILL.md"),
        "## Acceptance Criteria",
        "## Criteria",
    );
    assert_eq!(kinds(&target), vec![ViolationKind::MissingSection]);
}

#[test]
fn policy_dropped_from_one_skill_document_is_reported() {
    let (_tmp, target) = generate_tree();
    edit(&target.join("writer/SKILL.md"), "plagiarism-check", "redacted");

    let report = verify_tree(&target).unwrap();
    assert_eq!(kinds(&target), vec![ViolationKind::PolicyOmitted]);
    assert!(report.violations[0].message.contains("plagiarism-check"));
    assert_eq!(report.violations[0].path, "writer/SKILL.md");
}

#[test]
fn undocumented_role_directory_is_reported() {
    let (_tmp, target) = generate_tree();
    std::fs::create_dir(target.join("impostor")).unwrap();
    std::fs::write(target.join("impostor/SKILL.md"), "# impostor Skill\n").unwrap();

    let report = verify_tree(&target).unwrap();
    assert_eq!(kinds(&target), vec![ViolationKind::RoleMismatch]);
    assert_eq!(report.violations[0].path, "impostor");
}

#[test]
fn skills_index_out_of_step_with_agents_is_reported() {
    let (_tmp, target) = generate_tree();
    edit(&target.join("SKILLS.md"), "- writer: writer/SKILL.md\n", "");

    let report = verify_tree(&target).unwrap();
    assert_eq!(kinds(&target), vec![ViolationKind::RoleMismatch]);
    assert_eq!(report.violations[0].path, "SKILLS.md");
}

#[test]
fn deleted_scaffold_with_flag_enabled_is_reported() {
    let (_tmp, target) = generate_tree();
    std::fs::remove_file(target.join("scripts/scaffold_prs.sh")).unwrap();
    assert_eq!(kinds(&target), vec![ViolationKind::ScaffoldMismatch]);
}

#[test]
fn stray_scaffold_with_flag_disabled_is_reported() {
    let (_tmp, target) = generate_tree();
    std::fs::remove_file(target.join("scripts/scaffold_prs.sh")).unwrap();
    edit(&target.join("AGENTS.md"), "- Draft PRs: yes", "- Draft PRs: no");
    assert!(kinds(&target).is_empty(), "flag off + no scaffold must pass");

    std::fs::write(target.join("scripts/scaffold_prs.sh"), "#!/usr/bin/env bash\n").unwrap();
    make_executable(&target.join("scripts/scaffold_prs.sh"));
    assert_eq!(kinds(&target), vec![ViolationKind::ScaffoldMismatch]);
}

#[test]
fn deleted_reference_file_is_reported() {
    let (_tmp, target) = generate_tree();
    std::fs::remove_file(target.join("references/style-guide.md")).unwrap();

    let report = verify_tree(&target).unwrap();
    assert_eq!(kinds(&target), vec![ViolationKind::UnresolvedReference]);
    assert_eq!(report.violations[0].path, "references/style-guide.md");
}

#[test]
fn missing_agents_document_skips_derived_checks_but_reports_it() {
    let (_tmp, target) = generate_tree();
    std::fs::remove_file(target.join("AGENTS.md")).unwrap();

    let report = verify_tree(&target).unwrap();
    assert_eq!(report.len(), 1, "only the missing file itself: {:?}", report.violations);
    assert_eq!(report.violations[0].kind, ViolationKind::MissingFile);
    assert_eq!(report.violations[0].path, "AGENTS.md");
}

#[test]
fn pr_body_without_status_marker_is_reported() {
    let (_tmp, target) = generate_tree();
    edit(
        &target.join("templates/pr-body.md"),
        "Agent-Status: Draft",
        "Status: Draft",
    );
    assert_eq!(kinds(&target), vec![ViolationKind::MissingMarker]);
}

#[cfg(unix)]
#[test]
fn helper_script_without_executable_bit_is_reported() {
    use std::os::unix::fs::PermissionsExt;

    let (_tmp, target) = generate_tree();
    let script = target.join("scripts/agent-chat.sh");
    let mut perms = std::fs::metadata(&script).unwrap().permissions();
    perms.set_mode(0o644);
    std::fs::set_permissions(&script, perms).unwrap();

    let report = verify_tree(&target).unwrap();
    assert_eq!(kinds(&target), vec![ViolationKind::NotExecutable]);
    assert_eq!(report.violations[0].path, "scripts/agent-chat.sh");
}

#[test]
fn several_defects_are_reported_together() {
    let (_tmp, target) = generate_tree();
    std::fs::remove_file(target.join("writer/SKILL.md")).unwrap();
    std::fs::remove_file(target.join("scripts/scaffold_prs.sh")).unwrap();
    std::fs::remove_file(target.join("references/style-guide.md")).unwrap();

    let found = kinds(&target);
    assert_eq!(found.len(), 3, "{found:?}");
    assert!(found.contains(&ViolationKind::MissingFile));
    assert!(found.contains(&ViolationKind::ScaffoldMismatch));
    assert!(found.contains(&ViolationKind::UnresolvedReference));
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_mode(perms.mode() | 0o755);
    std::fs::set_permissions(path, perms).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
