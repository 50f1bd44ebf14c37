use crate::error::{Error, Result};
use crate::models::{Commit, CommitId};
use crate::snapshot::SnapshotStore;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Contents of the head slot when there are no commits.
pub const NULL_SENTINEL: &str = "NULL";

/// Symbolic reference to the current head.
pub const HEAD_REF: &str = "HEAD";

/// Shortest id prefix accepted as a reference.
pub const MIN_PREFIX_LEN: usize = 4;

const MAX_ID_ATTEMPTS: usize = 8;

/// Where a new commit's content comes from.
#[derive(Debug, Clone, Copy)]
pub enum SnapshotSource<'a> {
    /// Inherit the parent snapshot, then overlay this staging directory.
    Staging(&'a Path),
    /// Copy another commit's snapshot verbatim.
    Restore(&'a CommitId),
}

/// The linear commit chain and its head pointer.
pub struct HistoryChain {
    head_path: PathBuf,
    store: SnapshotStore,
    generate_id: fn() -> CommitId,
}

impl HistoryChain {
    pub fn new(head_path: PathBuf, store: SnapshotStore) -> Self {
        Self {
            head_path,
            store,
            generate_id: CommitId::generate,
        }
    }

    /// Replaces the id generator used by [`append`](Self::append).
    pub fn with_id_generator(mut self, generate_id: fn() -> CommitId) -> Self {
        self.generate_id = generate_id;
        self
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Writes an empty head slot.
    pub fn init(&self) -> Result<()> {
        self.write_head(NULL_SENTINEL)
    }

    /// Current head id, or `None` while history is empty.
    pub fn resolve_head(&self) -> Result<Option<CommitId>> {
        let raw = fs::read_to_string(&self.head_path)?;
        let token = raw.trim();
        if token.is_empty() || token == NULL_SENTINEL {
            Ok(None)
        } else {
            Ok(Some(CommitId::new(token)))
        }
    }

    /// Creates a commit on top of the current head and moves the head to it.
    ///
    /// The head is only rewritten once the snapshot is complete.
    pub fn append(&self, message: String, source: SnapshotSource<'_>) -> Result<CommitId> {
        let parent = self.resolve_head()?;
        let id = self.fresh_id()?;
        let commit = Commit::new(id.clone(), message).with_parent(parent.clone());

        match source {
            SnapshotSource::Staging(staging) => {
                self.store
                    .create_snapshot(&commit, parent.as_ref(), staging)?;
            }
            SnapshotSource::Restore(target) => {
                let target_data = self.store.data_dir(target);
                self.store.create_snapshot(&commit, None, &target_data)?;
            }
        }

        self.write_head(id.as_str())?;
        info!("Head moved to {}", id);
        Ok(id)
    }

    /// Resolves `HEAD`, a full id, or a unique id prefix to a stored commit.
    pub fn resolve(&self, reference: &str) -> Result<CommitId> {
        let reference = reference.trim();

        if reference == HEAD_REF {
            let head = self.resolve_head()?.ok_or(Error::EmptyHistory)?;
            if !self.store.contains(&head) {
                return Err(Error::CorruptHistory(format!(
                    "head points to missing commit {}",
                    head
                )));
            }
            return Ok(head);
        }

        if reference.is_empty() || !reference.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::UnresolvedReference(reference.to_string()));
        }

        let exact = CommitId::new(reference);
        if self.store.contains(&exact) {
            return Ok(exact);
        }

        if reference.len() < MIN_PREFIX_LEN {
            return Err(Error::UnresolvedReference(reference.to_string()));
        }

        let mut matches = self
            .store
            .list_ids()?
            .into_iter()
            .filter(|id| id.as_str().starts_with(reference));

        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(id),
            (Some(_), Some(_)) => Err(Error::AmbiguousReference(reference.to_string())),
            (None, _) => Err(Error::UnresolvedReference(reference.to_string())),
        }
    }

    /// Appends a commit whose snapshot is an exact copy of `reference`'s.
    ///
    /// Nothing is written when the reference does not resolve.
    pub fn revert(&self, reference: &str) -> Result<CommitId> {
        let target = self.resolve(reference)?;
        let commit = self.store.read_commit(&target)?;
        debug!("Reverting to {} ({})", target, commit.message);
        self.append(commit.revert_message(), SnapshotSource::Restore(&target))
    }

    /// Walks from the head back to the root commit.
    pub fn traverse(&self) -> Result<Traverse<'_>> {
        Ok(Traverse {
            store: &self.store,
            next: self.resolve_head()?,
            seen: HashSet::new(),
        })
    }

    fn fresh_id(&self) -> Result<CommitId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = (self.generate_id)();
            if !self.store.is_taken(&id) {
                return Ok(id);
            }
            debug!("Generated id {} already exists, retrying", id);
        }
        Err(Error::IdCollision(MAX_ID_ATTEMPTS))
    }

    fn write_head(&self, token: &str) -> Result<()> {
        let tmp = self.head_path.with_extension("tmp");
        fs::write(&tmp, token)?;
        fs::rename(&tmp, &self.head_path)?;
        Ok(())
    }
}

/// Lazy walk over parent links. Yields `CorruptHistory` once and stops when
/// a parent is missing or a commit is visited twice.
pub struct Traverse<'a> {
    store: &'a SnapshotStore,
    next: Option<CommitId>,
    seen: HashSet<CommitId>,
}

impl Iterator for Traverse<'_> {
    type Item = Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;

        if !self.seen.insert(id.clone()) {
            return Some(Err(Error::CorruptHistory(format!(
                "cycle detected at commit {}",
                id
            ))));
        }

        match self.store.read_commit(&id) {
            Ok(commit) => {
                if commit.id != id {
                    return Some(Err(Error::CorruptHistory(format!(
                        "record in {} names commit {}",
                        id, commit.id
                    ))));
                }
                self.next = commit.parent.clone();
                Some(Ok(commit))
            }
            Err(Error::UnresolvedReference(_)) => Some(Err(Error::CorruptHistory(format!(
                "commit {} is referenced but missing",
                id
            )))),
            Err(e) => Some(Err(e)),
        }
    }
}
