//! Conformance suite for the two parse strategies.
//!
//! Any document in the supported brief subset must lower to field-for-field
//! identical raw briefs through both strategies, and malformed documents
//! must be rejected by both. New subset features belong here first.

use ensemble_core::{parse_brief, ParseStrategy, RawBrief, Scalar};
use rstest::rstest;

fn both(text: &str) -> (RawBrief, RawBrief) {
    let yaml = parse_brief(text, ParseStrategy::Yaml).expect("yaml strategy should accept");
    let minimal = parse_brief(text, ParseStrategy::Minimal).expect("minimal strategy should accept");
    (yaml, minimal)
}

const FULL_BRIEF: &str = "\
# Editorial system brief
system:
  name: content-studio
  description: Editorial pipeline for long-form articles
  version: 2

workflow:
  pr_process_contract: agent-process-contract.md
  use_worktrees: true
  create_draft_prs: false

roles:
  - name: writer
    description: Drafts articles from approved outlines
  - name: researcher
    description: Gathers and verifies sources
  - name: editor

policies:
  - plagiarism-check
  - citations-required

templates:
  pr_body: templates/pr-body.md
  acceptance_checklist: templates/acceptance-checklist.md

references:
  - path: references/style-guide.md
    purpose: House style rules
  - path: references/sources.md
";

#[rstest]
#[case::full(FULL_BRIEF)]
#[case::bare_minimum("system:\n  name: x\n  version: 1\nroles:\n  - name: owner\n")]
#[case::empty_document("")]
#[case::comment_only("# nothing to see\n")]
#[case::null_sections("system:\n  name: x\n  version: 1\nreferences:\npolicies:\n")]
#[case::trailing_comments("system:\n  name: demo # the demo system\n  version: 1 # first cut\n")]
#[case::hash_inside_quotes("system:\n  name: \"a # b\"\n  version: '1'\n")]
#[case::hash_without_space("system:\n  name: issue#42\n  version: 1\n")]
#[case::uppercase_booleans("workflow:\n  use_worktrees: True\n  create_draft_prs: FALSE\n")]
#[case::null_flag_value("workflow:\n  use_worktrees: ~\n")]
#[case::negative_version("system:\n  name: x\n  version: -3\n")]
#[case::float_degrades("system:\n  name: x\n  version: 1.5\n")]
fn strategies_agree(#[case] text: &str) {
    let (yaml, minimal) = both(text);
    assert_eq!(yaml, minimal);
}

#[rstest]
#[case::duplicate_top_level_keys("system:\n  name: a\nsystem:\n  name: b\n")]
#[case::duplicate_nested_keys("system:\n  name: a\n  name: b\n")]
#[case::tab_indentation("system:\n\tname: x\n")]
#[case::top_level_sequence("- a\n- b\n")]
#[case::scalar_role_entries("roles:\n  - writer\n")]
#[case::mapping_policy_entries("policies:\n  - name: plagiarism-check\n")]
#[case::scalar_system_section("system: just-a-name\n")]
#[case::sequence_templates_section("templates:\n  - pr_body\n")]
fn both_strategies_reject(#[case] text: &str) {
    assert!(parse_brief(text, ParseStrategy::Yaml).is_err(), "yaml should reject");
    assert!(
        parse_brief(text, ParseStrategy::Minimal).is_err(),
        "minimal should reject"
    );
}

#[test]
fn full_brief_lowers_with_expected_fields() {
    let (brief, _) = both(FULL_BRIEF);

    assert_eq!(brief.system.name, Some(Scalar::Str("content-studio".to_string())));
    assert_eq!(brief.system.version, Some(Scalar::Int(2)));
    assert_eq!(brief.workflow.use_worktrees, Some(Scalar::Bool(true)));
    assert_eq!(brief.workflow.create_draft_prs, Some(Scalar::Bool(false)));

    let role_names: Vec<Option<&str>> = brief
        .roles
        .iter()
        .map(|r| r.name.as_ref().and_then(Scalar::as_str))
        .collect();
    assert_eq!(
        role_names,
        vec![Some("writer"), Some("researcher"), Some("editor")]
    );
    assert_eq!(brief.roles[2].description, None);

    assert_eq!(
        brief.policies,
        vec![
            Scalar::Str("plagiarism-check".to_string()),
            Scalar::Str("citations-required".to_string()),
        ]
    );
    assert_eq!(brief.references.len(), 2);
    assert_eq!(brief.references[1].purpose, None);
}

#[test]
fn declared_order_survives_both_strategies() {
    let text = "system:\n  name: x\n  version: 1\nroles:\n  - name: zeta\n  - name: alpha\n  - name: mid\n";
    for strategy in [ParseStrategy::Yaml, ParseStrategy::Minimal] {
        let brief = parse_brief(text, strategy).unwrap();
        let names: Vec<Option<&str>> = brief
            .roles
            .iter()
            .map(|r| r.name.as_ref().and_then(Scalar::as_str))
            .collect();
        assert_eq!(names, vec![Some("zeta"), Some("alpha"), Some("mid")]);
    }
}

#[test]
fn quoted_scalars_keep_their_string_type() {
    let (brief, _) = both("system:\n  name: demo\n  version: '7'\n");
    assert_eq!(brief.system.version, Some(Scalar::Str("7".to_string())));
}
