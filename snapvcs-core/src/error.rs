use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Not a snapvcs repository: {0}")]
    NotInitialized(PathBuf),

    #[error("Repository already initialized at: {0}")]
    AlreadyInitialized(PathBuf),

    #[error("No commits exist yet")]
    EmptyHistory,

    #[error("Invalid commit reference: {0}")]
    UnresolvedReference(String),

    #[error("Ambiguous commit reference: {0}")]
    AmbiguousReference(String),

    #[error("Corrupt history: {0}")]
    CorruptHistory(String),

    #[error("Could not generate an unused commit id after {0} attempts")]
    IdCollision(usize),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}
