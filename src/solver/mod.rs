//! The generic binary-CSP engine: problem model, AC-3 propagation,
//! backtracking search, heuristics and history recording.

pub mod ac3;
pub mod constraint;
pub mod csp;
pub mod domain;
pub mod heuristics;
pub mod history;
pub mod search;
pub mod value;
