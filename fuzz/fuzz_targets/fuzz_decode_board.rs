//! Fuzz target: puzzle text decoding.
//!
//! Arbitrary bytes, decoded lossily the same way the store does, must always
//! produce a locked row-major board that serializes to JSON.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sudoku_core::{decode_board, RowPolicy};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    for policy in [RowPolicy::Verbatim, RowPolicy::Normalized] {
        let decoded = decode_board(&text, policy);
        let cells = decoded.board.cells();
        assert!(cells.iter().all(|c| c.locked));
        assert!(cells.windows(2).all(|w| (w[0].row, w[0].column) < (w[1].row, w[1].column)));
        assert!(serde_json::to_vec(&decoded.board).is_ok());
    }
});
