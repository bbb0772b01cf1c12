//! Tree digest — one SHA-256 over every path, flag, and content.
//!
//! Reported after generation so two runs can be compared without diffing
//! trees on disk. Paths, lengths, and a separator byte are folded in so
//! file-boundary shifts cannot collide.

use sha2::{Digest, Sha256};

use ensemble_renderer::RenderedTree;

/// Hex-encoded SHA-256 of the complete tree, in emission order.
pub fn tree_digest(tree: &RenderedTree) -> String {
    let mut h = Sha256::new();
    for file in tree.files() {
        h.update(file.path.to_string_lossy().as_bytes());
        h.update([0u8]);
        h.update([file.executable as u8]);
        h.update((file.contents.len() as u64).to_le_bytes());
        h.update(file.contents.as_bytes());
    }
    hex::encode(h.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tree(files: &[(&str, &str, bool)]) -> RenderedTree {
        let mut tree = RenderedTree::new();
        for (path, contents, executable) in files {
            tree.insert(PathBuf::from(path), (*contents).to_string(), *executable)
                .unwrap();
        }
        tree
    }

    #[test]
    fn identical_trees_share_a_digest() {
        let a = tree(&[("a.md", "one\n", false), ("b.sh", "two\n", true)]);
        let b = tree(&[("a.md", "one\n", false), ("b.sh", "two\n", true)]);
        assert_eq!(tree_digest(&a), tree_digest(&b));
    }

    #[test]
    fn content_and_flag_changes_change_the_digest() {
        let base = tree(&[("a.md", "one\n", false)]);
        let edited = tree(&[("a.md", "two\n", false)]);
        let flagged = tree(&[("a.md", "one\n", true)]);
        assert_ne!(tree_digest(&base), tree_digest(&edited));
        assert_ne!(tree_digest(&base), tree_digest(&flagged));
    }

    #[test]
    fn file_boundaries_are_part_of_the_digest() {
        let joined = tree(&[("a.md", "onetwo\n", false)]);
        let split = tree(&[("a.md", "one\n", false), ("b.md", "two\n", false)]);
        assert_ne!(tree_digest(&joined), tree_digest(&split));
    }
}
