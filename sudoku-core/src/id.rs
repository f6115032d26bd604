use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::StoreError;

/// File suffix appended to a [`PuzzleId`] to locate its text file.
pub const PUZZLE_SUFFIX: &str = ".txt";

/// Name of a stored puzzle: the file name of `<id>.txt` without the suffix.
///
/// Comparison is case-sensitive. Construction goes through [`PuzzleId::parse`],
/// which refuses anything that could resolve outside the storage root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PuzzleId(String);

impl PuzzleId {
    /// Validates `raw` and wraps it as a `PuzzleId`.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidId`] if `raw` is empty, contains a path
    /// separator or NUL byte, or contains a `..` sequence.
    pub fn parse(raw: impl Into<String>) -> Result<Self, StoreError> {
        let raw = raw.into();
        match rejection_reason(&raw) {
            Some(reason) => Err(StoreError::InvalidId { id: raw, reason }),
            None => Ok(Self(raw)),
        }
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the file name backing this id, e.g. `"easy-1.txt"`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}{PUZZLE_SUFFIX}", self.0)
    }
}

fn rejection_reason(raw: &str) -> Option<&'static str> {
    if raw.is_empty() {
        Some("must not be empty")
    } else if raw.contains(['/', '\\']) {
        Some("must not contain path separators")
    } else if raw.contains('\0') {
        Some("must not contain NUL bytes")
    } else if raw.contains("..") {
        Some("must not contain '..'")
    } else {
        None
    }
}

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PuzzleId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
