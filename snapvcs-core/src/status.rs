use crate::compare::files_identical;
use crate::config::RepoConfig;
use crate::error::Result;
use crate::models::Status;
use crate::staging::StagingArea;
use crate::walk;
use std::path::Path;

/// Classifies every path as staged, modified, untracked or unchanged.
///
/// `head_data` is the head commit's snapshot tree, `None` for an empty
/// history. Reads only.
pub fn classify(
    root: &Path,
    config: &RepoConfig,
    staging: &StagingArea,
    head_data: Option<&Path>,
) -> Result<Status> {
    let mut status = Status::default();
    status.staged.extend(staging.files()?);

    for rel in walk::working_tree_files(root, config)? {
        if status.staged.contains(&rel) {
            continue;
        }

        match head_data.map(|data| data.join(&rel)).filter(|p| p.is_file()) {
            Some(committed) => {
                if !files_identical(&root.join(&rel), &committed) {
                    status.modified.insert(rel);
                }
            }
            None => {
                status.untracked.insert(rel);
            }
        }
    }

    Ok(status)
}
