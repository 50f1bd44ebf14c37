//! Commit snapshot storage.
//!
//! Every commit owns a full copy of the tracked tree:
//! ```text
//! commits/
//!   <commit_id>/
//!     commitInfo.json   # id, parent, message, timestamp
//!     Data/
//!       <relative_path> # file copies
//! ```

use crate::error::{Error, Result};
use crate::models::{Commit, CommitId};
use crate::walk;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const DATA_DIR: &str = "Data";
const INFO_FILE: &str = "commitInfo.json";

pub struct SnapshotStore {
    commits_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(commits_dir: PathBuf) -> Self {
        Self { commits_dir }
    }

    pub fn commits_dir(&self) -> &Path {
        &self.commits_dir
    }

    pub fn commit_dir(&self, id: &CommitId) -> PathBuf {
        self.commits_dir.join(id.as_str())
    }

    /// Root of the commit's snapshot tree.
    pub fn data_dir(&self, id: &CommitId) -> PathBuf {
        self.commit_dir(id).join(DATA_DIR)
    }

    fn info_path(&self, id: &CommitId) -> PathBuf {
        self.commit_dir(id).join(INFO_FILE)
    }

    /// Whether a commit with this id has a metadata record.
    pub fn contains(&self, id: &CommitId) -> bool {
        self.info_path(id).is_file()
    }

    /// Whether a directory for this id exists at all, complete or not.
    pub fn is_taken(&self, id: &CommitId) -> bool {
        self.commit_dir(id).exists()
    }

    /// Materializes the snapshot for `commit`.
    ///
    /// Files from `inherit_from`'s snapshot are copied first, then every file
    /// below `overlay_from` is copied on top. The metadata record is written
    /// last. On failure the partial commit directory is removed.
    pub fn create_snapshot(
        &self,
        commit: &Commit,
        inherit_from: Option<&CommitId>,
        overlay_from: &Path,
    ) -> Result<()> {
        fs::create_dir_all(&self.commits_dir)?;
        let commit_dir = self.commit_dir(&commit.id);
        fs::create_dir(&commit_dir)?;

        let result = self.populate(commit, inherit_from, overlay_from);
        if let Err(e) = &result {
            warn!("Snapshot {} failed, removing partial copy: {}", commit.id, e);
            if let Err(cleanup) = fs::remove_dir_all(&commit_dir) {
                warn!("Failed to remove {}: {}", commit_dir.display(), cleanup);
            }
        }
        result
    }

    fn populate(
        &self,
        commit: &Commit,
        inherit_from: Option<&CommitId>,
        overlay_from: &Path,
    ) -> Result<()> {
        let data_dir = self.data_dir(&commit.id);
        fs::create_dir_all(&data_dir)?;

        let overlay = walk::regular_files(overlay_from)?;

        if let Some(parent) = inherit_from {
            let parent_data = self.data_dir(parent);
            if parent_data.is_dir() {
                let mut inherited = 0;
                for rel in walk::regular_files(&parent_data)? {
                    if shadowed_by_overlay(&rel, &overlay) {
                        continue;
                    }
                    walk::copy_into(&parent_data.join(&rel), &data_dir, &rel)?;
                    inherited += 1;
                }
                debug!("Inherited {} file(s) from {}", inherited, parent);
            } else {
                warn!("Parent snapshot {} has no data directory", parent);
            }
        }

        for rel in &overlay {
            walk::copy_into(&overlay_from.join(rel), &data_dir, rel)?;
        }
        let overlaid = overlay.len();
        debug!("Overlaid {} file(s) from {:?}", overlaid, overlay_from);

        let record = serde_json::to_string_pretty(commit)?;
        fs::write(self.info_path(&commit.id), record)?;

        info!("Created snapshot {} ({} overlaid)", commit.id, overlaid);
        Ok(())
    }

    pub fn read_commit(&self, id: &CommitId) -> Result<Commit> {
        let path = self.info_path(id);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::UnresolvedReference(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&contents)?)
    }

    /// Ids of every stored commit, sorted.
    pub fn list_ids(&self) -> Result<Vec<CommitId>> {
        if !self.commits_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.commits_dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                let id = CommitId::new(name);
                if self.contains(&id) {
                    ids.push(id);
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Relative paths of every file in the commit's snapshot.
    pub fn list_files(&self, id: &CommitId) -> Result<Vec<PathBuf>> {
        if !self.contains(id) {
            return Err(Error::UnresolvedReference(id.to_string()));
        }
        walk::regular_files(&self.data_dir(id))
    }
}

// An inherited file is dropped when the overlay has the same path, a path
// below it (file became a directory) or one of its ancestors (directory
// became a file).
fn shadowed_by_overlay(rel: &Path, overlay: &[PathBuf]) -> bool {
    overlay
        .iter()
        .any(|path| path.starts_with(rel) || rel.starts_with(path))
}
