//! The Sudoku frontend: a validated board model and its compilation into a
//! binary CSP for the generic engine.

pub mod board;
pub mod cell;

pub use board::{BoardSize, SudokuBoard};
pub use cell::CellId;
