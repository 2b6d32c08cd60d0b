use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The identity of one Sudoku cell, named by 1-based row and column.
///
/// Cells are the CSP variables of a compiled board. The `Display`/`FromStr`
/// pair gives the compact two-digit name ("11" through "99") used when a
/// presentation layer needs a textual variable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId {
    row: u8,
    col: u8,
}

impl CellId {
    /// Creates a cell identity from 1-based coordinates.
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!((1..=9).contains(&row) && (1..=9).contains(&col));
        Self { row, col }
    }

    /// 1-based row.
    pub fn row(&self) -> u8 {
        self.row
    }

    /// 1-based column.
    pub fn col(&self) -> u8 {
        self.col
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.col)
    }
}

impl FromStr for CellId {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let mut digits = name.chars();
        let (row, col) = match (digits.next(), digits.next(), digits.next()) {
            (Some(row), Some(col), None) => (row, col),
            _ => {
                return Err(Error::Configuration(format!(
                    "cell name must be two digits, got {name:?}"
                )))
            }
        };
        let parse = |digit: char| {
            digit
                .to_digit(10)
                .filter(|d| (1..=9).contains(d))
                .map(|d| d as u8)
                .ok_or_else(|| {
                    Error::Configuration(format!("cell name digits must be 1-9, got {name:?}"))
                })
        };
        Ok(Self::new(parse(row)?, parse(col)?))
    }
}
