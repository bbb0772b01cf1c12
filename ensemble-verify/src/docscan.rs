//! Line-level scanning of the generated documents.
//!
//! The verifier re-derives the role list, policy list, flags, and bound
//! paths from the rendered text itself, never from the brief that produced
//! it. These helpers understand the three line shapes the documents use:
//!
//! ```text
//! Process Contract: agent-process-contract.md      header_line
//! - Draft PRs: yes                                 flag_line
//! Roles:                                           list_block label
//! - writer: Drafts articles (writer/SKILL.md)      list_block item
//! ```

/// Items of the `- ` list directly under the line exactly equal to `label`,
/// with the bullet stripped. The block ends at the first non-item line.
pub(crate) fn list_block<'a>(text: &'a str, label: &str) -> Vec<&'a str> {
    let mut items = Vec::new();
    let mut in_block = false;
    for line in text.lines() {
        if in_block {
            match line.strip_prefix("- ") {
                Some(item) => items.push(item),
                None => break,
            }
        } else if line == label {
            in_block = true;
        }
    }
    items
}

/// The name part of a list item, everything before the first `:`.
pub(crate) fn item_name(item: &str) -> &str {
    match item.split_once(':') {
        Some((name, _)) => name.trim(),
        None => item.trim(),
    }
}

/// Value of the first `- {label}: value` line.
pub(crate) fn flag_line<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let prefix = format!("- {label}: ");
    text.lines()
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .map(str::trim)
}

/// Value of the first `{label}: value` line at the start of a line.
pub(crate) fn header_line<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let prefix = format!("{label}: ");
    text.lines()
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
# AGENTS

Process Contract: agent-process-contract.md

Roles:
- writer: Drafts articles (writer/SKILL.md)
- editor: Reviews drafts (editor/SKILL.md)

Workflow:
- Worktrees required: yes
- Draft PRs: no
";

    #[test]
    fn list_block_collects_until_the_first_non_item_line() {
        let items = list_block(DOC, "Roles:");
        assert_eq!(items.len(), 2);
        assert_eq!(item_name(items[0]), "writer");
        assert_eq!(item_name(items[1]), "editor");
    }

    #[test]
    fn absent_label_yields_no_items() {
        assert!(list_block(DOC, "Policy Modules:").is_empty());
    }

    #[test]
    fn flag_and_header_lines_extract_values() {
        assert_eq!(flag_line(DOC, "Draft PRs"), Some("no"));
        assert_eq!(flag_line(DOC, "Worktrees required"), Some("yes"));
        assert_eq!(
            header_line(DOC, "Process Contract"),
            Some("agent-process-contract.md")
        );
        assert_eq!(flag_line(DOC, "Nonexistent"), None);
    }
}
