use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    solver::{
        constraint::{BinaryConstraint, NotEqualConstraint},
        csp::{Assignment, Csp},
        domain::Domain,
    },
    sudoku::cell::CellId,
};

/// The supported Sudoku grid sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardSize {
    FourByFour,
    NineByNine,
}

impl BoardSize {
    /// Cells per side.
    pub fn side(self) -> usize {
        match self {
            BoardSize::FourByFour => 4,
            BoardSize::NineByNine => 9,
        }
    }

    /// Cells per side of one box (the square root of the side length).
    pub fn box_side(self) -> usize {
        match self {
            BoardSize::FourByFour => 2,
            BoardSize::NineByNine => 3,
        }
    }

    /// Total cell count.
    pub fn cell_count(self) -> usize {
        self.side() * self.side()
    }
}

/// An N×N Sudoku grid, with 0 denoting an empty cell.
///
/// A board is never observable in an invalid state: construction with
/// initial values fails outright on a rule violation, and [`set_cells`]
/// restores the previous grid before surfacing the error.
///
/// [`set_cells`]: SudokuBoard::set_cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SudokuBoard {
    size: BoardSize,
    cells: Vec<u8>,
}

impl SudokuBoard {
    /// Creates an empty board.
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            cells: vec![0; size.cell_count()],
        }
    }

    /// Creates a board from a flat row-major value sequence.
    ///
    /// Fails without constructing anything if the sequence has the wrong
    /// length or already violates the Sudoku rules.
    pub fn with_values(size: BoardSize, values: &[u8]) -> Result<Self> {
        let mut board = Self::new(size);
        board.set_cells(values)?;
        Ok(board)
    }

    /// Replaces the whole grid transactionally.
    ///
    /// On any failure the previous grid is restored exactly and the error is
    /// surfaced; the board is never left in an intermediate state.
    pub fn set_cells(&mut self, values: &[u8]) -> Result<()> {
        if values.len() != self.size.cell_count() {
            return Err(Error::InvalidPuzzle(format!(
                "grid must contain {} cells, got {}",
                self.size.cell_count(),
                values.len()
            )));
        }
        let previous = std::mem::replace(&mut self.cells, values.to_vec());
        if !self.is_valid() {
            self.cells = previous;
            return Err(Error::InvalidPuzzle(
                "duplicate value in a row, column, or box".to_string(),
            ));
        }
        Ok(())
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// The value of a cell by 0-based coordinates, or `None` if empty.
    pub fn value(&self, row: usize, col: usize) -> Option<u8> {
        match self.cells[row * self.size.side() + col] {
            0 => None,
            digit => Some(digit),
        }
    }

    /// The grid as a flat row-major sequence, 0 for empty cells.
    pub fn values(&self) -> Vec<u8> {
        self.cells.clone()
    }

    /// Checks every nonzero cell against the later cells of its row and
    /// column and against the box cells differing in both coordinates, so
    /// each conflicting pair is found exactly once.
    fn is_valid(&self) -> bool {
        let side = self.size.side();
        let box_side = self.size.box_side();
        for row in 0..side {
            let row_band = row / box_side;
            for col in 0..side {
                let Some(value) = self.value(row, col) else {
                    continue;
                };
                if value as usize > side {
                    return false;
                }
                for later in (col + 1)..side {
                    if self.value(row, later) == Some(value) {
                        return false;
                    }
                }
                for later in (row + 1)..side {
                    if self.value(later, col) == Some(value) {
                        return false;
                    }
                }
                let col_band = col / box_side;
                for box_row in (row_band * box_side)..((row_band + 1) * box_side) {
                    for box_col in (col_band * box_side)..((col_band + 1) * box_side) {
                        if box_row != row
                            && box_col != col
                            && self.value(box_row, box_col) == Some(value)
                        {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }

    /// Compiles the board into a binary CSP: one variable per cell in
    /// row-major order, a singleton domain for each filled cell, and
    /// pairwise not-equal constraints over the row, column and box families.
    ///
    /// The families overlap; the CSP's symmetric insert-once indexing
    /// deduplicates the repeated registrations of the shared predicate.
    pub fn generate_csp(&self) -> Result<Csp<CellId, u8>> {
        let side = self.size.side() as u8;
        let box_side = self.size.box_side() as u8;

        let mut variables = Vec::with_capacity(self.size.cell_count());
        let mut domains = Vec::with_capacity(self.size.cell_count());
        for row in 1..=side {
            for col in 1..=side {
                variables.push(CellId::new(row, col));
                domains.push(match self.value(row as usize - 1, col as usize - 1) {
                    Some(value) => Domain::singleton(value),
                    None => Domain::new(1..=side),
                });
            }
        }

        let not_equal: Arc<dyn BinaryConstraint<u8>> = Arc::new(NotEqualConstraint::new());
        let mut constraints = Vec::new();
        for row in 1..=side {
            let row_band = (row - 1) / box_side;
            for col in 1..=side {
                let first = CellId::new(row, col);
                for later in (col + 1)..=side {
                    constraints.push((first, CellId::new(row, later), not_equal.clone()));
                }
                for later in (row + 1)..=side {
                    constraints.push((first, CellId::new(later, col), not_equal.clone()));
                }
                let col_band = (col - 1) / box_side;
                for box_row in (row_band * box_side + 1)..=((row_band + 1) * box_side) {
                    for box_col in (col_band * box_side + 1)..=((col_band + 1) * box_side) {
                        if box_row != row && box_col != col {
                            constraints.push((
                                first,
                                CellId::new(box_row, box_col),
                                not_equal.clone(),
                            ));
                        }
                    }
                }
            }
        }

        debug!(
            size = side,
            constraints = constraints.len(),
            "compiled board into a CSP"
        );
        Csp::new(variables, domains, constraints)
    }

    /// Produces a new board with the assignment's values written over this
    /// board's cells. The result is validated like any other grid, so a
    /// complete solver assignment for this board can never yield an error.
    pub fn apply_assignment(&self, assignment: &Assignment<CellId, u8>) -> Result<SudokuBoard> {
        let side = self.size.side() as u8;
        let mut values = self.values();
        for row in 1..=side {
            for col in 1..=side {
                if let Some(value) = assignment.get(&CellId::new(row, col)) {
                    values[(row as usize - 1) * side as usize + (col as usize - 1)] = *value;
                }
            }
        }
        Self::with_values(self.size, &values)
    }
}
