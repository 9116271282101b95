use std::io;
use std::path::PathBuf;

use boxc_indexing::IndexingError;
use boxc_store::StoreError;

/// Errors produced by event handling and reindex jobs.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// The repository or search index failed outside any single object's run.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Indexing could not be set up.
    #[error(transparent)]
    Indexing(#[from] IndexingError),

    /// I/O error while recording progress.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// A progress file holds a line that is not an object id.
    #[error("corrupt progress file {path} at line {line}: {reason}")]
    CorruptProgress {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A worker task panicked or was aborted.
    #[error("worker task failed: {0}")]
    Worker(String),

    /// The event stream was closed by its sender.
    #[error("event stream closed")]
    StreamClosed,
}

impl From<tokio::task::JoinError> for EventError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Worker(e.to_string())
    }
}

/// Convenience alias used throughout the events crate.
pub type EventResult<T> = std::result::Result<T, EventError>;
