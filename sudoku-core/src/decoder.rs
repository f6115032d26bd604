//! Raw puzzle text to [`Board`] decoding.
//!
//! Each line of the text is a row and each character a column, both 1-based.
//! Decoding never fails: characters that are not ASCII digits become
//! [`CellValue::Invalid`] and are reported as [`DecodeAnomaly`] entries so the
//! caller can log them.

use std::fmt;
use std::str::FromStr;

use crate::cell::{Board, Cell, CellValue};

/// How raw text is split into rows before decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowPolicy {
    /// Split on `\n` only. A trailing `\r` stays in the row as a non-digit
    /// and a trailing newline yields a final empty row.
    #[default]
    Verbatim,
    /// Strip one trailing `\r` per line and drop trailing empty lines.
    /// Interior empty lines still occupy a row number.
    Normalized,
}

/// Error returned when a [`RowPolicy`] name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown row policy '{0}'; expected 'verbatim' or 'normalized'")]
pub struct ParseRowPolicyError(pub String);

impl FromStr for RowPolicy {
    type Err = ParseRowPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "verbatim" => Ok(Self::Verbatim),
            "normalized" => Ok(Self::Normalized),
            _ => Err(ParseRowPolicyError(s.to_owned())),
        }
    }
}

impl fmt::Display for RowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verbatim => f.write_str("verbatim"),
            Self::Normalized => f.write_str("normalized"),
        }
    }
}

/// A character that could not be decoded as a digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeAnomaly {
    pub row: usize,
    pub column: usize,
    pub found: char,
}

impl fmt::Display for DecodeAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "non-digit {:?} at row {}, column {}", self.found, self.row, self.column)
    }
}

/// Result of decoding: the board plus every anomaly found along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBoard {
    pub board: Board,
    pub anomalies: Vec<DecodeAnomaly>,
}

impl DecodedBoard {
    /// `true` if every character decoded to a digit.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }
}

/// Decodes raw puzzle text into a row-major board of locked cells.
///
/// Ragged rows are kept as-is. The cell count equals the number of characters
/// left after row splitting under `policy`.
///
/// # Complexity
/// O(n) in the length of `text`.
#[must_use]
pub fn decode_board(text: &str, policy: RowPolicy) -> DecodedBoard {
    let mut cells = Vec::with_capacity(cell_capacity(text));
    let mut anomalies = Vec::new();

    for (row_index, line) in split_rows(text, policy).into_iter().enumerate() {
        let row = row_index + 1;
        for (column_index, ch) in line.chars().enumerate() {
            let column = column_index + 1;
            let value = CellValue::from_char(ch);
            if let CellValue::Invalid(found) = value {
                anomalies.push(DecodeAnomaly { row, column, found });
            }
            cells.push(Cell::locked(value, row, column));
        }
    }

    DecodedBoard { board: Board::from(cells), anomalies }
}

/// Upper bound on the number of cells `text` can decode to.
fn cell_capacity(text: &str) -> usize {
    text.chars().filter(|&c| c != '\n').count()
}

fn split_rows(text: &str, policy: RowPolicy) -> Vec<&str> {
    let rows = text.split('\n');
    match policy {
        RowPolicy::Verbatim => rows.collect(),
        RowPolicy::Normalized => {
            let mut rows: Vec<&str> =
                rows.map(|row| row.strip_suffix('\r').unwrap_or(row)).collect();
            while rows.last().is_some_and(|row| row.is_empty()) {
                rows.pop();
            }
            rows
        }
    }
}
