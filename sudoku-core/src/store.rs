//! Read-only puzzle storage backed by a directory of `<id>.txt` files.
//!
//! Nothing is cached: every call hits the filesystem so that puzzles added or
//! removed while the server runs are picked up on the next request.

use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::error::StoreError;
use crate::id::{PuzzleId, PUZZLE_SUFFIX};

/// File names starting with this character are hidden from enumeration.
pub const HIDDEN_MARKER: char = '.';

/// Handle on the directory that holds the puzzle files.
#[derive(Debug, Clone)]
pub struct PuzzleStore {
    root: PathBuf,
}

impl PuzzleStore {
    /// Create a store rooted at `root`. The directory is not touched until the
    /// first request.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Enumerate the ids of every visible puzzle file under the root.
    ///
    /// Entries are skipped when their name starts with [`HIDDEN_MARKER`], does
    /// not end in `.txt`, is not valid UTF-8, or does not resolve to a regular
    /// file.
    ///
    /// # Errors
    /// Returns [`StoreError::StorageUnavailable`] if the root cannot be listed.
    pub async fn list_available(&self) -> Result<BTreeSet<PuzzleId>, StoreError> {
        let unavailable = |source: io::Error| StoreError::StorageUnavailable {
            path: self.root.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&self.root).await.map_err(unavailable)?;
        let mut ids = BTreeSet::new();

        while let Some(entry) = entries.next_entry().await.map_err(unavailable)? {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                tracing::debug!(file = ?file_name, "skipping non UTF-8 file name");
                continue;
            };
            if name.starts_with(HIDDEN_MARKER) {
                continue;
            }
            let Some(stem) = name.strip_suffix(PUZZLE_SUFFIX) else {
                continue;
            };
            if !is_regular_file(&entry).await {
                continue;
            }
            match PuzzleId::parse(stem) {
                Ok(id) => {
                    ids.insert(id);
                }
                Err(e) => tracing::debug!(file = name, error = %e, "skipping unusable puzzle file"),
            }
        }

        tracing::debug!(root = %self.root.display(), count = ids.len(), "listed puzzles");
        Ok(ids)
    }

    /// Read the raw text of the puzzle named `id`.
    ///
    /// Bytes that are not valid UTF-8 are replaced with `U+FFFD`, which the
    /// decoder then reports as anomalies.
    ///
    /// # Errors
    /// Returns [`StoreError::PuzzleNotFound`] if `<root>/<id>.txt` does not exist,
    /// or [`StoreError::StorageUnavailable`] on any other I/O failure.
    pub async fn fetch_by_id(&self, id: &PuzzleId) -> Result<String, StoreError> {
        let path = self.root.join(id.file_name());
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(into_text(id, bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::PuzzleNotFound(id.clone()))
            }
            Err(source) => Err(StoreError::StorageUnavailable { path, source }),
        }
    }

    /// Enumerate, pick one id uniformly at random, and read it.
    ///
    /// # Errors
    /// Returns [`StoreError::NoPuzzlesAvailable`] if nothing is enumerable, and
    /// [`StoreError::StorageUnavailable`] if listing fails or the chosen file
    /// cannot be read, including when it vanished after being listed.
    pub async fn fetch_random(&self) -> Result<(PuzzleId, String), StoreError> {
        let ids = self.list_available().await?;
        let id = {
            let mut rng = rand::thread_rng();
            pick_random(&ids, &mut rng)?
        };
        let text = self.fetch_listed(&id).await?;
        Ok((id, text))
    }

    /// Read a puzzle that was just enumerated. A missing file here means the
    /// directory changed after listing and is reported as a storage fault.
    async fn fetch_listed(&self, id: &PuzzleId) -> Result<String, StoreError> {
        match self.fetch_by_id(id).await {
            Err(StoreError::PuzzleNotFound(_)) => {
                tracing::warn!(%id, "listed puzzle disappeared before it was read");
                Err(StoreError::StorageUnavailable {
                    path: self.root.join(id.file_name()),
                    source: io::Error::new(
                        io::ErrorKind::NotFound,
                        "puzzle removed after listing",
                    ),
                })
            }
            other => other,
        }
    }
}

/// `true` for regular files, following symlinks. Only symlinks cost an extra
/// `stat`; everything else is answered from the directory entry.
async fn is_regular_file(entry: &tokio::fs::DirEntry) -> bool {
    match entry.file_type().await {
        Ok(kind) if kind.is_file() => true,
        Ok(kind) if kind.is_symlink() => tokio::fs::metadata(entry.path())
            .await
            .is_ok_and(|meta| meta.is_file()),
        _ => false,
    }
}

/// Choose one id uniformly at random.
///
/// # Errors
/// Returns [`StoreError::NoPuzzlesAvailable`] if `ids` is empty.
pub fn pick_random<R: Rng + ?Sized>(
    ids: &BTreeSet<PuzzleId>,
    rng: &mut R,
) -> Result<PuzzleId, StoreError> {
    ids.iter().choose(rng).cloned().ok_or(StoreError::NoPuzzlesAvailable)
}

fn into_text(id: &PuzzleId, bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| {
        tracing::warn!(%id, error = %e.utf8_error(), "puzzle file is not valid UTF-8");
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    })
}
