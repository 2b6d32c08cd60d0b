//! Inference strategies.

use crate::solver::{
    csp::Csp,
    domain::{Domain, DomainMap},
    value::{ValueEquality, VariableKey},
};

/// Forward checking for a tentative assignment of `value` to `variable`.
///
/// Produces an independent copy of `domains` in which the assigned variable
/// collapses to the single value and every neighbor loses the values
/// incompatible with it under *all* predicates registered for the pair. The
/// input map is never touched, so a parent branch can keep using it after a
/// child branch is abandoned.
///
/// An empty domain in the result signals that the branch must be abandoned;
/// detecting that is the caller's job, so that the outcome can also be used
/// for least-constraining-value scoring.
pub fn forward_check<V: VariableKey, T: ValueEquality>(
    csp: &Csp<V, T>,
    variable: &V,
    value: &T,
    domains: &DomainMap<V, T>,
) -> DomainMap<V, T> {
    let mut inferred = domains.clone();
    inferred.insert(variable.clone(), Domain::singleton(value.clone()));

    for neighbor in csp.neighbors(variable) {
        let Some(neighbor_domain) = domains.get(neighbor) else {
            continue;
        };
        let predicates = csp.constraints_between(neighbor, variable);
        let pruned = neighbor_domain.retain(|candidate| {
            predicates
                .iter()
                .all(|predicate| predicate.is_satisfied(candidate, value))
        });
        inferred.insert(neighbor.clone(), pruned);
    }
    inferred
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::constraint::{BinaryConstraint, NotEqualConstraint};

    fn triangle_csp() -> Csp<&'static str, i64> {
        let not_equal: Arc<dyn BinaryConstraint<i64>> = Arc::new(NotEqualConstraint::new());
        Csp::new(
            vec!["a", "b", "c"],
            vec![
                Domain::new([1, 2]),
                Domain::new([1, 2]),
                Domain::new([1, 2]),
            ],
            vec![
                ("a", "b", not_equal.clone()),
                ("a", "c", not_equal.clone()),
                ("b", "c", not_equal),
            ],
        )
        .unwrap()
    }

    #[test]
    fn forward_check_collapses_and_prunes() {
        let csp = triangle_csp();
        let domains = csp.all_domains();

        let inferred = forward_check(&csp, &"a", &1, &domains);
        assert_eq!(inferred.get(&"a").unwrap().to_vec(), vec![1]);
        assert_eq!(inferred.get(&"b").unwrap().to_vec(), vec![2]);
        assert_eq!(inferred.get(&"c").unwrap().to_vec(), vec![2]);
    }

    #[test]
    fn forward_check_leaves_the_input_untouched() {
        let csp = triangle_csp();
        let domains = csp.all_domains();

        let _ = forward_check(&csp, &"a", &1, &domains);
        assert_eq!(domains.get(&"a").unwrap().len(), 2);
        assert_eq!(domains.get(&"b").unwrap().len(), 2);
    }

    #[test]
    fn forward_check_can_produce_an_empty_domain() {
        let csp = triangle_csp();
        let mut domains = csp.all_domains();
        domains.insert("b", Domain::singleton(1));

        let inferred = forward_check(&csp, &"a", &1, &domains);
        assert!(inferred.get(&"b").unwrap().is_empty());
    }

    #[test]
    fn forward_check_chains_through_prior_inference() {
        let csp = triangle_csp();
        let domains = csp.all_domains();

        let after_a = forward_check(&csp, &"a", &1, &domains);
        let after_b = forward_check(&csp, &"b", &2, &after_a);
        // "c" must differ from both 1 and 2, so its domain empties.
        assert!(after_b.get(&"c").unwrap().is_empty());
        // The intermediate state is still intact.
        assert_eq!(after_a.get(&"c").unwrap().to_vec(), vec![2]);
    }
}
