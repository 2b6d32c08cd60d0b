//! Value-ordering strategies.

use crate::solver::{
    csp::Csp,
    domain::DomainMap,
    heuristics::inference::forward_check,
    value::{ValueEquality, VariableKey},
};

/// Candidate values in their current order: the inference-state domain if one
/// exists, otherwise the variable's raw domain.
pub fn domain_order<V: VariableKey, T: ValueEquality>(
    csp: &Csp<V, T>,
    variable: &V,
    domains: Option<&DomainMap<V, T>>,
) -> Vec<T> {
    match domains.and_then(|map| map.get(variable)) {
        Some(domain) => domain.to_vec(),
        None => csp.domain(variable).to_vec(),
    }
}

/// Least-constraining-value ordering.
///
/// Each candidate is scored by forward-checking it against the current
/// domain state and summing the resulting domain sizes across the variable's
/// neighbors. Candidates are sorted by that score in descending order: the
/// value that leaves neighbors with the most remaining options is tried
/// first. The sort is stable, so equal scores keep domain order.
pub fn least_constraining<V: VariableKey, T: ValueEquality>(
    csp: &Csp<V, T>,
    variable: &V,
    domains: Option<&DomainMap<V, T>>,
) -> Vec<T> {
    let baseline = match domains {
        Some(map) => map.clone(),
        None => csp.all_domains(),
    };

    let mut scored: Vec<(T, usize)> = domain_order(csp, variable, domains)
        .into_iter()
        .map(|candidate| {
            let inferred = forward_check(csp, variable, &candidate, &baseline);
            let score: usize = csp
                .neighbors(variable)
                .iter()
                .filter_map(|neighbor| inferred.get(neighbor))
                .map(|domain| domain.len())
                .sum();
            (candidate, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(candidate, _)| candidate).collect()
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

    fn star_csp() -> Csp<&'static str, i64> {
        // "hub" constrained against two leaves whose domains overlap it
        // asymmetrically.
        let not_equal: Arc<dyn BinaryConstraint<i64>> = Arc::new(NotEqualConstraint::new());
        Csp::new(
            vec!["hub", "left", "right"],
            vec![
                Domain::new([1, 2, 3]),
                Domain::new([1, 2]),
                Domain::new([1]),
            ],
            vec![
                ("hub", "left", not_equal.clone()),
                ("hub", "right", not_equal),
            ],
        )
        .unwrap()
    }

    #[test]
    fn domain_order_prefers_inference_state() {
        let csp = star_csp();
        let mut domains = csp.all_domains();
        domains.insert("hub", Domain::new([3, 1]));

        assert_eq!(domain_order(&csp, &"hub", Some(&domains)), vec![3, 1]);
        assert_eq!(domain_order(&csp, &"hub", None), vec![1, 2, 3]);
    }

    #[test]
    fn least_constraining_prefers_the_most_permissive_value() {
        let csp = star_csp();

        // hub=1 eliminates a candidate from both leaves (score 1+0=1);
        // hub=2 only prunes "left" (score 1+1=2); hub=3 prunes nothing
        // (score 2+1=3). Descending order: 3, 2, 1.
        let ordered = least_constraining(&csp, &"hub", None);
        assert_eq!(ordered, vec![3, 2, 1]);
    }

    #[test]
    fn least_constraining_is_stable_on_ties() {
        let not_equal: Arc<dyn BinaryConstraint<i64>> = Arc::new(NotEqualConstraint::new());
        let csp = Csp::new(
            vec!["a", "b"],
            vec![Domain::new([1, 2]), Domain::new([3, 4])],
            vec![("a", "b", not_equal)],
        )
        .unwrap();

        // Neither value of "a" prunes anything, so domain order survives.
        assert_eq!(least_constraining(&csp, &"a", None), vec![1, 2]);
    }
}
