//! Variable-selection strategies.

use crate::solver::{
    csp::{Assignment, Csp},
    domain::DomainMap,
    value::{ValueEquality, VariableKey},
};

/// Selects the first variable, in CSP declaration order, that has no
/// assignment yet. The deterministic baseline strategy.
pub fn first_unassigned<V: VariableKey, T: ValueEquality>(
    csp: &Csp<V, T>,
    assignment: &Assignment<V, T>,
) -> Option<V> {
    csp.variables()
        .iter()
        .find(|variable| !assignment.contains_key(variable))
        .cloned()
}

/// Selects the unassigned variable with the fewest remaining candidates
/// under `domains` (the current inference state, or the full domain map when
/// no inference has run yet).
///
/// With `degree_tie_break` unset, ties keep the earliest-found candidate.
/// With it set, *every* size-tie is re-examined by [`constraint_degree`], and
/// the newcomer replaces the incumbent only when it strictly improves the
/// degree; the tracked size and degree stay in sync with whichever candidate
/// currently leads.
pub fn minimum_remaining_values<V: VariableKey, T: ValueEquality>(
    csp: &Csp<V, T>,
    assignment: &Assignment<V, T>,
    domains: &DomainMap<V, T>,
    degree_tie_break: bool,
) -> Option<V> {
    let mut best: Option<(V, usize, usize)> = None;
    for variable in csp.variables() {
        if assignment.contains_key(variable) {
            continue;
        }
        let size = domains
            .get(variable)
            .map(|domain| domain.len())
            .unwrap_or_else(|| csp.domain(variable).len());

        match best.as_mut() {
            None => {
                let degree = if degree_tie_break {
                    constraint_degree(csp, assignment, variable)
                } else {
                    0
                };
                best = Some((variable.clone(), size, degree));
            }
            Some((leader, leader_size, leader_degree)) => {
                if size < *leader_size {
                    *leader = variable.clone();
                    *leader_size = size;
                    if degree_tie_break {
                        *leader_degree = constraint_degree(csp, assignment, variable);
                    }
                } else if degree_tie_break && size == *leader_size {
                    let degree = constraint_degree(csp, assignment, variable);
                    if degree > *leader_degree {
                        *leader = variable.clone();
                        *leader_size = size;
                        *leader_degree = degree;
                    }
                }
            }
        }
    }
    best.map(|(variable, _, _)| variable)
}

/// Number of constraints `variable` has to still-unassigned neighbors.
pub fn constraint_degree<V: VariableKey, T: ValueEquality>(
    csp: &Csp<V, T>,
    assignment: &Assignment<V, T>,
    variable: &V,
) -> usize {
    csp.neighbors(variable)
        .iter()
        .filter(|neighbor| !assignment.contains_key(neighbor))
        .map(|neighbor| csp.constraints_between(variable, neighbor).len())
        .sum()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::{
        constraint::{BinaryConstraint, NotEqualConstraint},
        domain::Domain,
    };

    fn chain_csp() -> Csp<&'static str, i64> {
        // a - b - c - d: "b" and "c" have two unassigned neighbors each.
        let not_equal: Arc<dyn BinaryConstraint<i64>> = Arc::new(NotEqualConstraint::new());
        Csp::new(
            vec!["a", "b", "c", "d"],
            vec![
                Domain::new([1, 2, 3]),
                Domain::new([1, 2, 3]),
                Domain::new([1, 2, 3]),
                Domain::new([1, 2, 3]),
            ],
            vec![
                ("a", "b", not_equal.clone()),
                ("b", "c", not_equal.clone()),
                ("c", "d", not_equal),
            ],
        )
        .unwrap()
    }

    #[test]
    fn first_unassigned_follows_declaration_order() {
        let csp = chain_csp();
        let mut assignment = Assignment::new();
        assert_eq!(first_unassigned(&csp, &assignment), Some("a"));

        assignment.insert("a", 1);
        assignment.insert("b", 2);
        assert_eq!(first_unassigned(&csp, &assignment), Some("c"));
    }

    #[test]
    fn first_unassigned_is_none_when_complete() {
        let csp = chain_csp();
        let assignment: Assignment<&str, i64> =
            [("a", 1), ("b", 2), ("c", 1), ("d", 2)].into_iter().collect();
        assert_eq!(first_unassigned(&csp, &assignment), None);
    }

    #[test]
    fn mrv_picks_smallest_domain() {
        let csp = chain_csp();
        let assignment = Assignment::new();
        let mut domains = csp.all_domains();
        domains.insert("c", Domain::new([1, 2]));

        assert_eq!(
            minimum_remaining_values(&csp, &assignment, &domains, false),
            Some("c")
        );
    }

    #[test]
    fn mrv_ties_keep_the_earliest_candidate() {
        let csp = chain_csp();
        let assignment = Assignment::new();
        let domains = csp.all_domains();

        assert_eq!(
            minimum_remaining_values(&csp, &assignment, &domains, false),
            Some("a")
        );
    }

    #[test]
    fn degree_breaks_size_ties() {
        let csp = chain_csp();
        let assignment = Assignment::new();
        let domains = csp.all_domains();

        // All sizes tie at 3; "b" is the first variable with two unassigned
        // neighbors, and "c" does not strictly improve on it.
        assert_eq!(
            minimum_remaining_values(&csp, &assignment, &domains, true),
            Some("b")
        );
    }

    #[test]
    fn degree_counts_only_unassigned_neighbors() {
        let csp = chain_csp();
        let mut assignment = Assignment::new();
        assert_eq!(constraint_degree(&csp, &assignment, &"b"), 2);

        assignment.insert("a", 1);
        assert_eq!(constraint_degree(&csp, &assignment, &"b"), 1);
    }

    #[test]
    fn mrv_skips_assigned_variables() {
        let csp = chain_csp();
        let mut assignment = Assignment::new();
        assignment.insert("a", 1);
        let mut domains = csp.all_domains();
        domains.insert("a", Domain::singleton(1));

        let selected = minimum_remaining_values(&csp, &assignment, &domains, false);
        assert_eq!(selected, Some("b"));
    }
}
