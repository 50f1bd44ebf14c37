//! # snapvcs-core
//!
//! Core library for snapvcs - a minimal snapshot-based version control engine.
//!
//! Every commit stores a full copy of the tracked tree, inherited from its
//! parent and overlaid with the staging area. History is a linear chain of
//! parent links starting at `HEAD`.

pub mod compare;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod repository;
pub mod snapshot;
pub mod staging;
pub mod status;
pub mod walk;

pub use compare::files_identical;
pub use config::RepoConfig;
pub use error::{Error, Result};
pub use history::{HistoryChain, SnapshotSource, Traverse, HEAD_REF};
pub use models::{AddReport, Commit, CommitId, CommitOutcome, SkipReason, Status};
pub use repository::Repository;
pub use snapshot::SnapshotStore;
pub use staging::StagingArea;
