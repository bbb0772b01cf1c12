//! Tree writer — materializes a [`RenderedTree`] under an empty target.
//!
//! ## Write protocol
//!
//! 1. Check the target precondition: absent, or an existing empty directory.
//! 2. For each file, in emission order: create parent directories, write to
//!    `<path>.ensemble.tmp`, set the executable bit when flagged, rename to
//!    the final path (atomic on POSIX).
//! 3. On any failure, remove everything written so far. The target is left
//!    as it was found: absent if it had to be created, empty otherwise.

use std::path::{Path, PathBuf};

use ensemble_renderer::RenderedTree;

use crate::error::{io_err, BuildError};

/// Materialize `tree` under `target`.
///
/// Fails with [`BuildError::OutputNotEmpty`] before writing anything when
/// the target exists and is not an empty directory. Any later I/O failure
/// rolls the target back, so no partial tree survives an error.
pub fn write_tree(tree: &RenderedTree, target: &Path) -> Result<(), BuildError> {
    let created_target = prepare_target(target)?;
    if let Err(err) = write_files(tree, target) {
        rollback(target, created_target);
        return Err(err);
    }
    tracing::info!("wrote {} files to {}", tree.len(), target.display());
    Ok(())
}

/// Enforce the emptiness precondition. Returns whether the target directory
/// had to be created, so rollback knows whether to remove it entirely.
fn prepare_target(target: &Path) -> Result<bool, BuildError> {
    if !target.exists() {
        std::fs::create_dir_all(target).map_err(|e| io_err(target, e))?;
        return Ok(true);
    }
    if !target.is_dir() {
        return Err(BuildError::OutputNotEmpty {
            path: target.to_path_buf(),
        });
    }
    let mut entries = std::fs::read_dir(target).map_err(|e| io_err(target, e))?;
    if entries.next().is_some() {
        return Err(BuildError::OutputNotEmpty {
            path: target.to_path_buf(),
        });
    }
    Ok(false)
}

fn write_files(tree: &RenderedTree, target: &Path) -> Result<(), BuildError> {
    for file in tree.files() {
        let dest = target.join(&file.path);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }

        let tmp = PathBuf::from(format!("{}.ensemble.tmp", dest.display()));
        std::fs::write(&tmp, &file.contents).map_err(|e| io_err(&tmp, e))?;
        if file.executable {
            if let Err(e) = set_executable(&tmp) {
                let _ = std::fs::remove_file(&tmp);
                return Err(io_err(&tmp, e));
            }
        }
        if let Err(e) = std::fs::rename(&tmp, &dest) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(&dest, e));
        }
        tracing::debug!("wrote: {}", dest.display());
    }
    Ok(())
}

#[cfg(unix)]
fn set_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(perms.mode() | 0o111);
    std::fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Undo a partial write. The precondition guarantees everything under the
/// target is ours, so a pre-existing target is emptied rather than removed.
fn rollback(target: &Path, created_target: bool) {
    if created_target {
        let _ = std::fs::remove_dir_all(target);
        return;
    }
    if let Ok(entries) = std::fs::read_dir(target) {
        for entry in entries.flatten() {
            let path = entry.path();
            let _ = if path.is_dir() {
                std::fs::remove_dir_all(&path)
            } else {
                std::fs::remove_file(&path)
            };
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
