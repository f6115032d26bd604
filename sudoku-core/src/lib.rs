//! Core of the Sudoku puzzle server.
//!
//! Resolves puzzle requests against a directory of pre-authored puzzle files
//! ([`PuzzleStore`]) and decodes their text into boards of locked cells
//! ([`decode_board`]). No generation, solving or validation happens here.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod cell;
pub mod decoder;
pub mod error;
pub mod id;
pub mod store;

pub use cell::{Board, Cell, CellValue};
pub use decoder::{decode_board, DecodeAnomaly, DecodedBoard, ParseRowPolicyError, RowPolicy};
pub use error::StoreError;
pub use id::{PuzzleId, PUZZLE_SUFFIX};
pub use store::{pick_random, PuzzleStore, HIDDEN_MARKER};

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC: &str = "\
530070000
600195000
098000060
800060003
400803001
700020006
060000280
000419005
000080079";

    #[tokio::test]
    async fn stored_puzzle_decodes_to_full_grid() {
        let dir = match tempfile::tempdir() {
            Ok(d) => d,
            Err(e) => panic!("failed to create tempdir: {e}"),
        };
        if let Err(e) = std::fs::write(dir.path().join("classic.txt"), CLASSIC) {
            panic!("failed to write puzzle: {e}");
        }

        let store = PuzzleStore::new(dir.path());
        let id = match PuzzleId::parse("classic") {
            Ok(id) => id,
            Err(e) => panic!("unexpected error: {e}"),
        };
        let text = match store.fetch_by_id(&id).await {
            Ok(t) => t,
            Err(e) => panic!("fetch failed: {e}"),
        };

        let decoded = decode_board(&text, RowPolicy::Verbatim);
        assert!(decoded.is_clean(), "classic puzzle has only digits");
        assert_eq!(decoded.board.len(), 81);

        let empty = decoded.board.iter().filter(|c| c.value.is_empty()).count();
        assert_eq!(empty, 51, "classic puzzle has 30 givens");

        let last = decoded.board.cells()[80];
        assert_eq!((last.row, last.column, last.value), (9, 9, CellValue::Digit(9)));
    }

    #[test]
    fn decoded_board_json_is_stable_across_runs() {
        let first = serde_json::to_vec(&decode_board(CLASSIC, RowPolicy::Verbatim).board);
        let second = serde_json::to_vec(&decode_board(CLASSIC, RowPolicy::Verbatim).board);
        match (first, second) {
            (Ok(a), Ok(b)) => assert_eq!(a, b, "identical text must serialize identically"),
            other => panic!("serialization failed: {other:?}"),
        }
    }

    #[test]
    fn store_error_display_includes_context() {
        let err = StoreError::InvalidId { id: "../x".to_owned(), reason: "must not contain '..'" };
        assert_eq!(err.to_string(), "invalid puzzle id '../x': must not contain '..'");
        assert_eq!(StoreError::NoPuzzlesAvailable.to_string(), "no puzzles available");
    }
}
