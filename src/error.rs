pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors surfaced by solver construction and board editing.
///
/// "No solution exists" is deliberately not represented here: both engines
/// report that outcome as `None` from their `run` methods, and callers must
/// treat it as a normal result rather than a fault.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The solver or CSP was assembled from inconsistent parts, e.g. a
    /// variable list and domain list of different lengths, a constraint over
    /// an undeclared variable, or a heuristic combination that cannot work.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A grid violated the Sudoku rules (or had the wrong number of cells).
    /// The board that rejected it is left exactly as it was.
    #[error("invalid puzzle: {0}")]
    InvalidPuzzle(String),
}
