//! Rendered tree — the in-memory output of a generation run.

use std::path::{Path, PathBuf};

use crate::error::RenderError;

/// One rendered file: relative path, full contents, executable flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFile {
    pub path: PathBuf,
    pub contents: String,
    pub executable: bool,
}

/// The complete set of files one generation run will write, in emission
/// order.
///
/// Built once by the renderer and handed to the writer unchanged. Duplicate
/// paths are rejected at insertion, and contents are normalized on the way
/// in: CRLF becomes LF and files end with exactly one trailing newline, so
/// what lands on disk is byte-for-byte what the tree holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedTree {
    files: Vec<TreeFile>,
}

impl RenderedTree {
    pub fn new() -> RenderedTree {
        RenderedTree::default()
    }

    /// Append a rendered file. Fails when `path` is already taken.
    pub fn insert(
        &mut self,
        path: PathBuf,
        contents: String,
        executable: bool,
    ) -> Result<(), RenderError> {
        if self.files.iter().any(|f| f.path == path) {
            return Err(RenderError::DuplicatePath { path });
        }
        let mut contents = contents.replace("\r\n", "\n");
        while contents.ends_with("\n\n") {
            contents.pop();
        }
        if !contents.ends_with('\n') {
            contents.push('\n');
        }
        self.files.push(TreeFile {
            path,
            contents,
            executable,
        });
        Ok(())
    }

    /// Files in emission order.
    pub fn files(&self) -> &[TreeFile] {
        &self.files
    }

    /// Look up a file by its relative path.
    pub fn get(&self, path: &Path) -> Option<&TreeFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Relative paths in emission order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|f| f.path.as_path())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
