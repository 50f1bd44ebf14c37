use crate::compare::files_identical;
use crate::config::RepoConfig;
use crate::error::Result;
use crate::models::{AddReport, SkipReason};
use crate::walk;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Files queued for the next commit, mirrored by relative path.
pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn contains(&self, rel: &Path) -> bool {
        self.dir.join(rel).is_file()
    }

    pub fn files(&self) -> Result<Vec<PathBuf>> {
        walk::regular_files(&self.dir)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.files()?.is_empty())
    }

    /// Empties the staging area, leaving the directory in place.
    pub fn clear(&self) -> Result<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir)?;
        }
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Stages every working-tree file that differs from `head_data`, and
    /// drops staged copies of files that no longer differ.
    pub fn add_all(
        &self,
        root: &Path,
        config: &RepoConfig,
        head_data: Option<&Path>,
    ) -> Result<AddReport> {
        let mut report = AddReport::default();
        for rel in walk::working_tree_files(root, config)? {
            self.stage_one(root, &rel, head_data, &mut report)?;
        }
        debug!(
            "add all: {} staged, {} pruned",
            report.staged.len(),
            report.pruned.len()
        );
        Ok(report)
    }

    /// Same as [`add_all`](Self::add_all) for an explicit list of paths.
    ///
    /// Paths may be relative to `root` or absolute inside it. Paths that are
    /// missing, not regular files, reserved or outside the tree are reported
    /// as skipped; the rest are still processed.
    pub fn add_paths<P: AsRef<Path>>(
        &self,
        root: &Path,
        config: &RepoConfig,
        head_data: Option<&Path>,
        paths: &[P],
    ) -> Result<AddReport> {
        let mut report = AddReport::default();

        for path in paths {
            let path = path.as_ref();
            let rel = match normalize(root, path) {
                Some(rel) => rel,
                None => {
                    warn!("Skipping {}: outside the working tree", path.display());
                    report
                        .skipped
                        .push((path.to_path_buf(), SkipReason::OutsideWorkingTree));
                    continue;
                }
            };

            if rel.as_os_str().is_empty() {
                report.skipped.push((path.to_path_buf(), SkipReason::NotAFile));
                continue;
            }

            if config.is_reserved(&rel) {
                debug!("Skipping reserved path {}", rel.display());
                report.skipped.push((rel, SkipReason::Reserved));
                continue;
            }

            match fs::symlink_metadata(root.join(&rel)) {
                Ok(meta) if meta.is_file() => {
                    self.stage_one(root, &rel, head_data, &mut report)?;
                }
                Ok(_) => {
                    warn!("{} is not a regular file", rel.display());
                    report.skipped.push((rel, SkipReason::NotAFile));
                }
                Err(_) => {
                    warn!("{} does not exist", rel.display());
                    report.skipped.push((rel, SkipReason::Missing));
                }
            }
        }

        Ok(report)
    }

    fn stage_one(
        &self,
        root: &Path,
        rel: &Path,
        head_data: Option<&Path>,
        report: &mut AddReport,
    ) -> Result<()> {
        let src = root.join(rel);
        let staged = self.dir.join(rel);
        let unchanged = head_data
            .map(|data| files_identical(&src, &data.join(rel)))
            .unwrap_or(false);

        if unchanged {
            if staged.is_file() {
                walk::remove_file_and_empty_parents(&staged, &self.dir)?;
                debug!("Unstaged {} (matches head)", rel.display());
                report.pruned.push(rel.to_path_buf());
            }
            return Ok(());
        }

        walk::copy_into(&src, &self.dir, rel)?;
        debug!("Staged {}", rel.display());
        report.staged.push(rel.to_path_buf());
        Ok(())
    }
}

// Lexically resolves `path` against `root`. None when it escapes the root.
fn normalize(root: &Path, path: &Path) -> Option<PathBuf> {
    let rel = if path.is_absolute() {
        path.strip_prefix(root).ok()?
    } else {
        path
    };

    let mut out = PathBuf::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}
