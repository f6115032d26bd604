//! HTTP API gateway for the Sudoku puzzle server.
//!
//! Serves pre-authored puzzles from a directory of text files as JSON arrays
//! of locked cells, either picked at random or looked up by id.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod routes;
