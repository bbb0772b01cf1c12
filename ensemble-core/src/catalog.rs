//! Policy catalog.
//!
//! The catalog of known policy modules is explicit configuration: the schema
//! validator resolves policy names against it and the renderer injects its
//! descriptions into every document that mentions a policy. It is passed by
//! reference, never process-global, so test runs with fixture catalogs never
//! interfere with each other.

/// One catalog entry: a policy module name and its canonical one-line
/// description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyEntry {
    pub name: String,
    pub summary: String,
}

/// An immutable lookup table of known policy modules, in a fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyCatalog {
    entries: Vec<PolicyEntry>,
}

const BUILTIN: &[(&str, &str)] = &[
    (
        "plagiarism-check",
        "Scan drafts for originality with approved tooling and record the results in the PR body.",
    ),
    (
        "copyright-compliance",
        "Use only in-house or licensed content and document licenses and attributions in the PR body.",
    ),
    (
        "citations-required",
        "Support every factual claim with a citation, preferring primary sources.",
    ),
    (
        "ai-assisted-disclosure",
        "Disclose AI assistance, prompts, and tools used in the PR body for human verification.",
    ),
];

impl PolicyCatalog {
    /// The built-in catalog shipped with the tool.
    pub fn builtin() -> PolicyCatalog {
        PolicyCatalog {
            entries: BUILTIN
                .iter()
                .map(|(name, summary)| PolicyEntry {
                    name: (*name).to_string(),
                    summary: (*summary).to_string(),
                })
                .collect(),
        }
    }

    /// A catalog from arbitrary entries, mainly for tests.
    pub fn new(entries: Vec<PolicyEntry>) -> PolicyCatalog {
        PolicyCatalog { entries }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Canonical description for `name`, when the catalog knows it.
    pub fn summary(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.summary.as_str())
    }

    /// Entries in catalog order.
    pub fn entries(&self) -> &[PolicyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_knows_the_shipped_policies() {
        let catalog = PolicyCatalog::builtin();
        assert_eq!(catalog.len(), 4);
        assert!(catalog.contains("plagiarism-check"));
        assert!(catalog.contains("ai-assisted-disclosure"));
        assert!(!catalog.contains("unapproved-policy"));
    }

    #[test]
    fn summaries_resolve_by_name() {
        let catalog = PolicyCatalog::builtin();
        let summary = catalog.summary("citations-required").unwrap();
        assert!(summary.contains("citation"));
        assert_eq!(catalog.summary("unknown"), None);
    }

    #[test]
    fn custom_catalogs_are_independent() {
        let catalog = PolicyCatalog::new(vec![PolicyEntry {
            name: "house-rule".to_string(),
            summary: "Follow the house rule.".to_string(),
        }]);
        assert!(catalog.contains("house-rule"));
        assert!(!catalog.contains("plagiarism-check"));
    }
}
