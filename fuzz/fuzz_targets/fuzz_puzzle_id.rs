//! Fuzz target: puzzle id validation.
//!
//! Any id accepted by the parser must stay a single path component.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sudoku_core::PuzzleId;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(id) = PuzzleId::parse(raw) {
        let path = std::path::Path::new(id.as_str());
        assert_eq!(path.components().count(), 1);
        assert!(!id.as_str().contains(".."));
    }
});
