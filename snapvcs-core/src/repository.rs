use crate::config::RepoConfig;
use crate::error::{Error, Result};
use crate::history::{HistoryChain, SnapshotSource, Traverse};
use crate::models::{AddReport, Commit, CommitId, CommitOutcome, Status};
use crate::snapshot::SnapshotStore;
use crate::staging::StagingArea;
use crate::status;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const HEAD_FILE: &str = "HEAD";
const STAGING_DIR: &str = "staging_area";
const COMMITS_DIR: &str = "commits";

/// A working tree plus its metadata directory.
///
/// Every operation goes through this value; nothing is read from the
/// process's current directory.
pub struct Repository {
    root: PathBuf,
    config: RepoConfig,
    history: HistoryChain,
    staging: StagingArea,
}

impl Repository {
    pub fn init<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::init_with_config(root, RepoConfig::default())
    }

    /// Creates the metadata directory with an empty history.
    pub fn init_with_config<P: AsRef<Path>>(root: P, config: RepoConfig) -> Result<Self> {
        let root = fs::canonicalize(root.as_ref())?;
        let repo = Self::assemble(root, config);
        let head_path = repo.metadata_dir().join(HEAD_FILE);

        if head_path.exists() {
            return Err(Error::AlreadyInitialized(repo.root.clone()));
        }

        fs::create_dir_all(repo.staging.dir())?;
        fs::create_dir_all(repo.history.store().commits_dir())?;
        repo.history.init()?;

        info!("Initialized empty repository in {}", repo.metadata_dir().display());
        Ok(repo)
    }

    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::open_with_config(root, RepoConfig::default())
    }

    pub fn open_with_config<P: AsRef<Path>>(root: P, config: RepoConfig) -> Result<Self> {
        let root = fs::canonicalize(root.as_ref())?;
        let repo = Self::assemble(root, config);

        if !repo.metadata_dir().join(HEAD_FILE).is_file() {
            return Err(Error::NotInitialized(repo.root.clone()));
        }

        Ok(repo)
    }

    fn assemble(root: PathBuf, config: RepoConfig) -> Self {
        let meta = root.join(&config.metadata_dir);
        let store = SnapshotStore::new(meta.join(COMMITS_DIR));
        Self {
            history: HistoryChain::new(meta.join(HEAD_FILE), store),
            staging: StagingArea::new(meta.join(STAGING_DIR)),
            root,
            config,
        }
    }

    /// Replaces how new commit ids are generated.
    pub fn with_id_generator(mut self, generate_id: fn() -> CommitId) -> Self {
        self.history = self.history.with_id_generator(generate_id);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn metadata_dir(&self) -> PathBuf {
        self.root.join(&self.config.metadata_dir)
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    pub fn head(&self) -> Result<Option<CommitId>> {
        self.history.resolve_head()
    }

    /// Snapshot tree of the head commit, `None` for an empty history.
    pub fn head_data(&self) -> Result<Option<PathBuf>> {
        match self.head()? {
            Some(id) => {
                if !self.history.store().contains(&id) {
                    return Err(Error::UnresolvedReference(id.to_string()));
                }
                Ok(Some(self.history.store().data_dir(&id)))
            }
            None => Ok(None),
        }
    }

    pub fn add_all(&self) -> Result<AddReport> {
        let head_data = self.head_data()?;
        self.staging
            .add_all(&self.root, &self.config, head_data.as_deref())
    }

    pub fn add_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<AddReport> {
        let head_data = self.head_data()?;
        self.staging
            .add_paths(&self.root, &self.config, head_data.as_deref(), paths)
    }

    /// Records the staged files as a new commit and empties the staging area.
    pub fn commit(&self, message: &str) -> Result<CommitOutcome> {
        if self.staging.is_empty()? {
            info!("Nothing to commit, staging area is empty");
            return Ok(CommitOutcome::NothingToCommit);
        }

        let id = self.history.append(
            message.to_string(),
            SnapshotSource::Staging(self.staging.dir()),
        )?;

        if let Err(e) = self.staging.clear() {
            warn!("Commit {} recorded but staging area was not cleared", id);
            return Err(e);
        }

        Ok(CommitOutcome::Created(id))
    }

    /// Records a new commit restoring `reference`'s snapshot. The working
    /// tree and staging area are left as they are.
    pub fn revert(&self, reference: &str) -> Result<CommitId> {
        self.history.revert(reference)
    }

    pub fn resolve(&self, reference: &str) -> Result<CommitId> {
        self.history.resolve(reference)
    }

    /// Commits from head back to the root.
    pub fn log(&self) -> Result<Traverse<'_>> {
        self.history.traverse()
    }

    pub fn read_commit(&self, id: &CommitId) -> Result<Commit> {
        self.history.store().read_commit(id)
    }

    pub fn snapshot_dir(&self, id: &CommitId) -> PathBuf {
        self.history.store().data_dir(id)
    }

    pub fn snapshot_files(&self, id: &CommitId) -> Result<Vec<PathBuf>> {
        self.history.store().list_files(id)
    }

    pub fn staged_files(&self) -> Result<Vec<PathBuf>> {
        self.staging.files()
    }

    pub fn status(&self) -> Result<Status> {
        let head_data = self.head_data()?;
        status::classify(&self.root, &self.config, &self.staging, head_data.as_deref())
    }
}
