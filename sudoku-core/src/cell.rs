//! Cells and boards as they appear on the wire.

use serde::{Serialize, Serializer};

/// Number written to the wire for [`CellValue::Invalid`].
const INVALID_WIRE_VALUE: i8 = -1;

/// Value held by a decoded cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellValue {
    /// An ASCII decimal digit. `0` marks an empty cell.
    Digit(u8),
    /// A character that is not an ASCII decimal digit.
    Invalid(char),
}

impl CellValue {
    /// Classifies a single character from a puzzle row.
    #[must_use]
    pub fn from_char(c: char) -> Self {
        match c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
            Some(digit) => Self::Digit(digit),
            None => Self::Invalid(c),
        }
    }

    /// Integer emitted in the JSON `value` field.
    #[must_use]
    pub fn wire_value(self) -> i8 {
        match self {
            // Digits are 0..=9 so the conversion cannot fail.
            Self::Digit(d) => i8::try_from(d).unwrap_or(INVALID_WIRE_VALUE),
            Self::Invalid(_) => INVALID_WIRE_VALUE,
        }
    }

    /// `true` for the digit `0`.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Self::Digit(0)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.wire_value())
    }
}

/// One grid position with its value, 1-based coordinates, and lock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Cell {
    pub value: CellValue,
    pub row: usize,
    pub column: usize,
    pub locked: bool,
}

impl Cell {
    /// Creates a pre-filled cell. Every cell served by this system is locked.
    #[must_use]
    pub fn locked(value: CellValue, row: usize, column: usize) -> Self {
        Self { value, row, column, locked: true }
    }
}

/// Row-major sequence of cells, serialized as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Board(Vec<Cell>);

impl Board {
    /// Returns the cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.0.iter()
    }
}

impl From<Vec<Cell>> for Board {
    fn from(cells: Vec<Cell>) -> Self {
        Self(cells)
    }
}
