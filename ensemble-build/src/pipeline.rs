//! Shared generation pipeline entrypoint used by the CLI.
//!
//! The fail-fast chain: read the brief, parse it with the selected strategy,
//! validate against the catalog, render, then write. Any stage error aborts
//! the run before the writer touches disk, and the writer itself rolls back
//! on failure, so an error never leaves partial output behind.

use std::path::{Path, PathBuf};

use ensemble_core::{parse_brief, schema, Brief, ParseStrategy, PolicyCatalog};
use ensemble_renderer::{RenderedTree, Renderer};

use crate::digest::tree_digest;
use crate::error::{io_err, BuildError};
use crate::writer::write_tree;

/// Fate of one planned file in a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File landed on disk.
    Written { path: PathBuf, executable: bool },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf, executable: bool },
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Written { path, .. } => path,
            WriteOutcome::WouldWrite { path, .. } => path,
        }
    }

    pub fn executable(&self) -> bool {
        match self {
            WriteOutcome::Written { executable, .. } => *executable,
            WriteOutcome::WouldWrite { executable, .. } => *executable,
        }
    }
}

/// Summary of a completed generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Per-file outcomes, in emission order.
    pub outcomes: Vec<WriteOutcome>,
    /// Digest of the rendered tree, written or not.
    pub digest: String,
}

/// Run the full generation chain for the brief at `brief_path`.
///
/// With `dry_run` the chain runs through rendering and reports what would
/// be written; the filesystem is untouched and the target precondition is
/// not checked.
pub fn generate(
    brief_path: &Path,
    target: &Path,
    strategy: ParseStrategy,
    catalog: &PolicyCatalog,
    dry_run: bool,
) -> Result<GenerateReport, BuildError> {
    let text = std::fs::read_to_string(brief_path).map_err(|e| io_err(brief_path, e))?;
    let brief = brief_from_text(&text, strategy, catalog)?;
    let tree = render_tree(&brief, catalog)?;
    let digest = tree_digest(&tree);

    if dry_run {
        tracing::info!(
            "[dry-run] would write {} files to {}",
            tree.len(),
            target.display()
        );
        let outcomes = tree
            .files()
            .iter()
            .map(|f| WriteOutcome::WouldWrite {
                path: f.path.clone(),
                executable: f.executable,
            })
            .collect();
        return Ok(GenerateReport { outcomes, digest });
    }

    write_tree(&tree, target)?;
    let outcomes = tree
        .files()
        .iter()
        .map(|f| WriteOutcome::Written {
            path: f.path.clone(),
            executable: f.executable,
        })
        .collect();
    Ok(GenerateReport { outcomes, digest })
}

/// Parse and validate a brief document.
pub fn brief_from_text(
    text: &str,
    strategy: ParseStrategy,
    catalog: &PolicyCatalog,
) -> Result<Brief, BuildError> {
    let raw = parse_brief(text, strategy)?;
    let brief = schema::validate(raw, catalog)?;
    Ok(brief)
}

/// Render the tree for a validated brief.
pub fn render_tree(brief: &Brief, catalog: &PolicyCatalog) -> Result<RenderedTree, BuildError> {
    let renderer = Renderer::new()?;
    Ok(renderer.render(brief, catalog)?)
}
