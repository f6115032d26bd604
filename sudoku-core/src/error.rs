use std::path::PathBuf;

use crate::id::PuzzleId;

/// Errors produced while resolving a puzzle request into raw text.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The storage root could not be listed, or a puzzle file could not be read.
    #[error("puzzle storage unavailable at {path}: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No `<id>.txt` exists under the storage root.
    #[error("puzzle not found: {0}")]
    PuzzleNotFound(PuzzleId),

    /// A random puzzle was requested but nothing is enumerable.
    #[error("no puzzles available")]
    NoPuzzlesAvailable,

    /// The caller supplied an id that cannot name a file under the storage root.
    #[error("invalid puzzle id '{id}': {reason}")]
    InvalidId { id: String, reason: &'static str },
}
