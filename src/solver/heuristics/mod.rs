//! Named strategies for the backtracking search engine.
//!
//! Each strategy is a small pure function over the CSP and the current
//! partial state; the engine dispatches on the configured tag. This keeps
//! every strategy unit-testable on its own and keeps the search loop free of
//! duplicated branching.

pub mod inference;
pub mod value;
pub mod variable;

/// How the search picks the next unassigned variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariableSelection {
    /// First unassigned variable in CSP declaration order.
    #[default]
    FirstUnassigned,
    /// Minimum-remaining-values: fewest candidates under the current
    /// inference state. Requires a non-trivial inference strategy.
    MinimumRemainingValues,
    /// The MRV scan with size-ties re-examined by constraint degree to
    /// still-unassigned neighbors. Requires a non-trivial inference strategy.
    Degree,
}

/// How the search orders a variable's candidate values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueOrdering {
    /// Current inference order, or raw domain order before any inference.
    #[default]
    DomainOrder,
    /// Least-constraining-value: prefer the value whose forward-checking
    /// outcome leaves neighbors with the most remaining candidates.
    LeastConstraining,
}

/// How the search derives a fresh inference state after each tentative
/// assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Inference {
    /// Identity: the domain map passes through unchanged.
    #[default]
    None,
    /// Forward checking: collapse the assigned variable to its value and
    /// prune incompatible values from every neighbor.
    ForwardChecking,
}
