//! The verification scan — every check the report aggregates.
//!
//! The scan works from the materialized tree alone. Role names, policy
//! names, flags, and bound paths are re-derived from AGENTS.md and
//! SKILLS.md, then checked against what is actually on disk, so divergence
//! between the documents and the tree surfaces no matter which side is
//! wrong. Checks never stop at the first problem; the report collects all
//! of them in scan order.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::docscan::{flag_line, header_line, item_name, list_block};
use crate::error::{io_err, VerifyError};
use crate::report::{ValidationReport, ViolationKind};

/// Directories in the generated tree that are never role directories.
pub const FIXED_DIRS: &[&str] = &["scripts", "templates", "references", "assets", "logs"];

/// Helper scripts every generated tree carries.
pub const HELPER_SCRIPTS: &[&str] = &["scripts/agent-worktree.sh", "scripts/agent-chat.sh"];

const SCAFFOLD_SCRIPT: &str = "scripts/scaffold_prs.sh";

/// Scan the tree at `root` and report every violation found.
///
/// An empty report is the sole success condition. Only I/O failures other
/// than a missing file abort the scan; everything else becomes a violation.
pub fn verify_tree(root: &Path) -> Result<ValidationReport, VerifyError> {
    tracing::debug!("verifying tree at {}", root.display());
    let mut report = ValidationReport::new();

    let agents = read_document(root, "AGENTS.md", &mut report)?;
    let skills = read_document(root, "SKILLS.md", &mut report)?;

    for script in HELPER_SCRIPTS {
        if !root.join(script).is_file() {
            report.push(ViolationKind::MissingFile, *script, "required file is missing");
        }
    }

    if let Some(agents) = agents.as_deref() {
        check_process_contract(root, agents, &mut report);
        check_templates(root, agents, &mut report)?;
        check_roles(root, agents, skills.as_deref(), &mut report)?;
        check_scaffold_flag(root, agents, &mut report);
    }
    if let Some(skills) = skills.as_deref() {
        check_references(root, skills, &mut report);
    }
    check_script_permissions(root, &mut report)?;

    tracing::debug!("scan found {} violation(s)", report.len());
    Ok(report)
}

// ---------------------------------------------------------------------------
// Individual checks
// ---------------------------------------------------------------------------

fn check_process_contract(root: &Path, agents: &str, report: &mut ValidationReport) {
    let Some(contract) = header_line(agents, "Process Contract") else {
        report.push(
            ViolationKind::MissingMarker,
            "AGENTS.md",
            "no 'Process Contract:' line",
        );
        return;
    };
    match resolve(root, contract) {
        Some(path) if path.is_file() => {}
        Some(_) => report.push(
            ViolationKind::MissingFile,
            contract,
            "documented process contract does not exist",
        ),
        None => report.push(
            ViolationKind::UnresolvedReference,
            contract,
            "documented path escapes the tree",
        ),
    }
}

fn check_templates(
    root: &Path,
    agents: &str,
    report: &mut ValidationReport,
) -> Result<(), VerifyError> {
    match flag_line(agents, "PR body") {
        Some(rel) => match resolve(root, rel) {
            Some(path) => match read_optional(&path)? {
                Some(text) => {
                    if !text.contains("Agent-Status:") {
                        report.push(
                            ViolationKind::MissingMarker,
                            rel,
                            "PR body template lacks an 'Agent-Status:' line",
                        );
                    }
                }
                None => report.push(
                    ViolationKind::MissingFile,
                    rel,
                    "documented PR body template does not exist",
                ),
            },
            None => report.push(
                ViolationKind::UnresolvedReference,
                rel,
                "documented path escapes the tree",
            ),
        },
        None => report.push(ViolationKind::MissingMarker, "AGENTS.md", "no '- PR body:' line"),
    }

    match flag_line(agents, "Acceptance checklist") {
        Some(rel) => match resolve(root, rel) {
            Some(path) if path.is_file() => {}
            Some(_) => report.push(
                ViolationKind::MissingFile,
                rel,
                "documented acceptance checklist does not exist",
            ),
            None => report.push(
                ViolationKind::UnresolvedReference,
                rel,
                "documented path escapes the tree",
            ),
        },
        None => report.push(
            ViolationKind::MissingMarker,
            "AGENTS.md",
            "no '- Acceptance checklist:' line",
        ),
    }
    Ok(())
}

fn check_roles(
    root: &Path,
    agents: &str,
    skills: Option<&str>,
    report: &mut ValidationReport,
) -> Result<(), VerifyError> {
    let roles: Vec<&str> = list_block(agents, "Roles:").into_iter().map(item_name).collect();
    if roles.is_empty() {
        report.push(ViolationKind::MissingSection, "AGENTS.md", "no 'Roles:' list");
    }
    let policies: Vec<&str> = list_block(agents, "Policy Modules:")
        .into_iter()
        .map(item_name)
        .collect();

    if let Some(skills) = skills {
        let listed: Vec<&str> = list_block(skills, "Roles:").into_iter().map(item_name).collect();
        if listed != roles {
            report.push(
                ViolationKind::RoleMismatch,
                "SKILLS.md",
                "role list does not match AGENTS.md",
            );
        }
    }

    for role in &roles {
        let rel = format!("{role}/SKILL.md");
        let Some(skill_path) = resolve(root, &rel) else {
            report.push(
                ViolationKind::RoleMismatch,
                *role,
                "documented role name escapes the tree",
            );
            continue;
        };
        let Some(text) = read_optional(&skill_path)? else {
            report.push(
                ViolationKind::MissingFile,
                rel.as_str(),
                format!("skill document for role '{role}' is missing"),
            );
            continue;
        };
        if !text.contains("## Acceptance Criteria") {
            report.push(
                ViolationKind::MissingSection,
                rel.as_str(),
                "missing '## Acceptance Criteria' section",
            );
        }
        if !text.contains("## Workflow") {
            report.push(
                ViolationKind::MissingSection,
                rel.as_str(),
                "missing '## Workflow' section",
            );
        }
        for policy in &policies {
            if !text.contains(policy) {
                report.push(
                    ViolationKind::PolicyOmitted,
                    rel.as_str(),
                    format!("policy '{policy}' is not mentioned"),
                );
            }
        }
    }

    // Back-check: a directory with a SKILL.md that AGENTS.md never lists is
    // a role the documents know nothing about.
    for entry in sorted_entries(root)? {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if FIXED_DIRS.contains(&name.as_str()) {
            continue;
        }
        if !path.join("SKILL.md").is_file() {
            continue;
        }
        if !roles.contains(&name.as_str()) {
            report.push(
                ViolationKind::RoleMismatch,
                name.as_str(),
                format!("directory '{name}' has a SKILL.md but is not listed in AGENTS.md"),
            );
        }
    }
    Ok(())
}

fn check_scaffold_flag(root: &Path, agents: &str, report: &mut ValidationReport) {
    let present = root.join(SCAFFOLD_SCRIPT).is_file();
    match flag_line(agents, "Draft PRs") {
        Some("yes") if !present => report.push(
            ViolationKind::ScaffoldMismatch,
            SCAFFOLD_SCRIPT,
            "AGENTS.md enables draft PRs but the scaffold script is missing",
        ),
        Some("no") if present => report.push(
            ViolationKind::ScaffoldMismatch,
            SCAFFOLD_SCRIPT,
            "AGENTS.md disables draft PRs but the scaffold script is present",
        ),
        Some("yes") | Some("no") => {}
        Some(other) => report.push(
            ViolationKind::MissingMarker,
            "AGENTS.md",
            format!("unrecognized '- Draft PRs:' value '{other}'"),
        ),
        None => report.push(ViolationKind::MissingMarker, "AGENTS.md", "no '- Draft PRs:' line"),
    }
}

fn check_references(root: &Path, skills: &str, report: &mut ValidationReport) {
    for item in list_block(skills, "References:") {
        let rel = item_name(item);
        match resolve(root, rel) {
            Some(path) if path.is_file() => {}
            Some(_) => report.push(
                ViolationKind::UnresolvedReference,
                rel,
                "referenced file does not exist",
            ),
            None => report.push(
                ViolationKind::UnresolvedReference,
                rel,
                "reference path escapes the tree",
            ),
        }
    }
}

fn check_script_permissions(root: &Path, report: &mut ValidationReport) -> Result<(), VerifyError> {
    let scripts_dir = root.join("scripts");
    if !scripts_dir.is_dir() {
        return Ok(());
    }
    for entry in sorted_entries(&scripts_dir)? {
        let path = entry.path();
        if path.extension().map_or(true, |ext| ext != "sh") {
            continue;
        }
        if !is_executable(&path)? {
            let rel = format!("scripts/{}", entry.file_name().to_string_lossy());
            report.push(ViolationKind::NotExecutable, rel, "helper script is not executable");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Filesystem helpers
// ---------------------------------------------------------------------------

/// Join `rel` onto `root`, refusing absolute paths and parent-directory
/// segments so the scan never reads outside the tree.
fn resolve(root: &Path, rel: &str) -> Option<PathBuf> {
    let path = Path::new(rel);
    if rel.is_empty() || path.is_absolute() {
        return None;
    }
    if path.components().any(|c| !matches!(c, Component::Normal(_))) {
        return None;
    }
    Some(root.join(path))
}

/// Directory entries sorted by name, so violation order is stable across
/// platforms and filesystems.
fn sorted_entries(dir: &Path) -> Result<Vec<std::fs::DirEntry>, VerifyError> {
    let mut entries = std::fs::read_dir(dir)
        .map_err(|e| io_err(dir, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| io_err(dir, e))?;
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}

fn read_document(
    root: &Path,
    rel: &str,
    report: &mut ValidationReport,
) -> Result<Option<String>, VerifyError> {
    match std::fs::read_to_string(root.join(rel)) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            report.push(ViolationKind::MissingFile, rel, "required file is missing");
            Ok(None)
        }
        Err(err) => Err(io_err(root.join(rel), err)),
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, VerifyError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> Result<bool, VerifyError> {
    use std::os::unix::fs::PermissionsExt;
    let meta = std::fs::metadata(path).map_err(|e| io_err(path, e))?;
    Ok(meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> Result<bool, VerifyError> {
    Ok(true)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn resolve_rejects_escaping_paths() {
        let root = Path::new("/tree");
        assert!(resolve(root, "references/guide.md").is_some());
        assert!(resolve(root, "../outside.md").is_none());
        assert!(resolve(root, "/etc/passwd").is_none());
        assert!(resolve(root, "a/../b.md").is_none());
        assert!(resolve(root, "./a.md").is_none());
        assert!(resolve(root, "").is_none());
        // Interior '.' segments normalize away and cannot leave the tree.
        assert!(resolve(root, "a/./b.md").is_some());
    }

    #[test]
    fn empty_directory_reports_every_missing_piece() {
        let tmp = tempfile::TempDir::new().unwrap();
        let report = verify_tree(tmp.path()).unwrap();
        let paths: Vec<&str> = report.violations.iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&"AGENTS.md"));
        assert!(paths.contains(&"SKILLS.md"));
        assert!(paths.contains(&"scripts/agent-worktree.sh"));
        assert!(paths.contains(&"scripts/agent-chat.sh"));
    }
}
