//! A binary constraint satisfaction problem (CSP) solver with two engines —
//! AC-3 constraint propagation and heuristic backtracking search — applied to
//! Sudoku.
//!
//! The crate is split into a problem-agnostic backend and a Sudoku frontend:
//!
//! - **[`Csp`]**: variables, per-variable domains, and a symmetric index of
//!   binary constraints. Variable declaration order is preserved and drives
//!   every heuristic tie-break, so runs are fully deterministic.
//! - **[`Ac3Engine`]**: shrinks domains to arc consistency. May decide the
//!   whole problem, report a contradiction, or leave some domains ambiguous.
//! - **[`BacktrackingSearch`]**: depth-first search over partial assignments,
//!   configured with a variable-selection strategy (first-unassigned, MRV, or
//!   Degree), a value-ordering strategy (domain order or least-constraining
//!   value), and an inference strategy (none or forward checking).
//! - **[`SudokuBoard`]**: a validated 4×4 or 9×9 grid that compiles into a
//!   CSP with one variable per cell and three families of not-equal
//!   constraints.
//!
//! Both engines can record an append-only history of immutable snapshots, one
//! per decision point, so an external observer can replay every decision a
//! run made.
//!
//! # Example: solving a 4×4 puzzle
//!
//! ```
//! use sudoku_csp::solver::heuristics::{Inference, ValueOrdering, VariableSelection};
//! use sudoku_csp::solver::search::BacktrackingSearch;
//! use sudoku_csp::sudoku::{BoardSize, SudokuBoard};
//!
//! let board = SudokuBoard::with_values(
//!     BoardSize::FourByFour,
//!     &[
//!         1, 0, 3, 0, //
//!         3, 0, 1, 2, //
//!         0, 3, 4, 1, //
//!         4, 0, 2, 3,
//!     ],
//! )?;
//! let csp = board.generate_csp()?;
//!
//! let mut search = BacktrackingSearch::new(
//!     VariableSelection::MinimumRemainingValues,
//!     ValueOrdering::LeastConstraining,
//!     Inference::ForwardChecking,
//! )?;
//! let assignment = search.run(&csp).expect("this puzzle has a solution");
//!
//! let solved = board.apply_assignment(&assignment)?;
//! assert_eq!(
//!     solved.values(),
//!     vec![
//!         1, 2, 3, 4, //
//!         3, 4, 1, 2, //
//!         2, 3, 4, 1, //
//!         4, 1, 2, 3,
//!     ],
//! );
//! # Ok::<(), sudoku_csp::error::Error>(())
//! ```
//!
//! [`Csp`]: solver::csp::Csp
//! [`Ac3Engine`]: solver::ac3::Ac3Engine
//! [`BacktrackingSearch`]: solver::search::BacktrackingSearch
//! [`SudokuBoard`]: sudoku::SudokuBoard

pub mod error;
pub mod solver;
pub mod sudoku;
