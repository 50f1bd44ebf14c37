use crate::config::RepoConfig;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Relative paths of every regular file below `root`, sorted.
///
/// A missing root yields an empty list. Symlinks are not followed.
pub fn regular_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(relative(root, entry.path())?);
        }
    }
    Ok(files)
}

/// Relative paths of every regular file in the working tree, skipping
/// reserved paths without descending into them.
pub fn working_tree_files(root: &Path, config: &RepoConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| match e.path().strip_prefix(root) {
            Ok(rel) => !config.is_reserved(rel),
            Err(_) => false,
        });

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(relative(root, entry.path())?);
        }
    }
    Ok(files)
}

/// Copies `src` to `dst_root/rel`, creating parent directories.
///
/// Whatever blocks the destination is removed first: a directory at `rel`,
/// or a file sitting where one of `rel`'s parent directories has to go.
pub fn copy_into(src: &Path, dst_root: &Path, rel: &Path) -> Result<()> {
    clear_conflicts(dst_root, rel)?;
    let dst = dst_root.join(rel);
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, &dst)?;
    Ok(())
}

fn clear_conflicts(dst_root: &Path, rel: &Path) -> Result<()> {
    let mut current = dst_root.to_path_buf();
    let mut components = rel.components().peekable();

    while let Some(component) = components.next() {
        current.push(component);
        let meta = match fs::symlink_metadata(&current) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        if components.peek().is_none() {
            if meta.is_dir() {
                debug!("Replacing directory {} with a file", current.display());
                fs::remove_dir_all(&current)?;
            }
        } else if !meta.is_dir() {
            debug!("Replacing file {} with a directory", current.display());
            fs::remove_file(&current)?;
            return Ok(());
        }
    }
    Ok(())
}

/// Removes `path` and any directories above it that become empty, stopping
/// at `stop`.
pub fn remove_file_and_empty_parents(path: &Path, stop: &Path) -> Result<()> {
    fs::remove_file(path)?;
    let mut dir = path.parent();
    while let Some(d) = dir {
        if d == stop || !d.starts_with(stop) {
            break;
        }
        if fs::remove_dir(d).is_err() {
            break;
        }
        dir = d.parent();
    }
    Ok(())
}

fn relative(root: &Path, path: &Path) -> Result<PathBuf> {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .map_err(|_| crate::Error::InvalidPath(path.display().to_string()))
}
