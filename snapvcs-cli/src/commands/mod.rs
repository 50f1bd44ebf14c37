pub mod add;
pub mod commit;
pub mod init;
pub mod log;
pub mod revert;
pub mod status;

use anyhow::{Context, Result};
use snapvcs_core::{Error, Repository};
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn get_root(custom_root: Option<PathBuf>) -> Result<PathBuf> {
    match custom_root {
        Some(root) => Ok(root),
        None => std::env::current_dir().context("Cannot determine current directory"),
    }
}

pub fn open_repo(root: &Path) -> Result<Repository> {
    match Repository::open(root) {
        Ok(repo) => {
            debug!("Opened repository at {}", repo.root().display());
            Ok(repo)
        }
        Err(Error::NotInitialized(path)) => {
            anyhow::bail!(
                "Not a snapvcs repository: {}. Run 'snapvcs init' first.",
                path.display()
            )
        }
        Err(e) => Err(e).with_context(|| format!("Failed to open repository at {}", root.display())),
    }
}
