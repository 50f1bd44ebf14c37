use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// Opaque commit identifier (32 lowercase hex characters when generated).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, for display.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata record stored next to every snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: CommitId,
    pub parent: Option<CommitId>,
    pub message: String,
    #[serde(with = "minute_timestamp")]
    pub timestamp: NaiveDateTime,
}

impl Commit {
    pub fn new(id: CommitId, message: String) -> Self {
        Self {
            id,
            parent: None,
            message,
            timestamp: now_to_minute(),
        }
    }

    pub fn with_parent(mut self, parent: Option<CommitId>) -> Self {
        self.parent = parent;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn display_timestamp(&self) -> String {
        self.timestamp.format(minute_timestamp::FORMAT).to_string()
    }

    /// Message used for a commit that restores `self`.
    pub fn revert_message(&self) -> String {
        format!("{} (Revert of {})", self.message, self.id)
    }
}

fn now_to_minute() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

mod minute_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y/%m/%d %H:%M";

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&timestamp.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Result of a commit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Created(CommitId),
    NothingToCommit,
}

/// Working-tree classification. The three sets never share a path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub staged: BTreeSet<PathBuf>,
    pub modified: BTreeSet<PathBuf>,
    pub untracked: BTreeSet<PathBuf>,
}

impl Status {
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty() && self.modified.is_empty() && self.untracked.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Missing,
    NotAFile,
    Reserved,
    OutsideWorkingTree,
}

impl SkipReason {
    pub fn as_str(&self) -> &str {
        match self {
            SkipReason::Missing => "does not exist",
            SkipReason::NotAFile => "is not a regular file",
            SkipReason::Reserved => "is a reserved path",
            SkipReason::OutsideWorkingTree => "is outside the working tree",
        }
    }
}

/// What an add pass did to the staging area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddReport {
    pub staged: Vec<PathBuf>,
    pub pruned: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, SkipReason)>,
}
