use std::collections::VecDeque;

use tracing::debug;

use crate::solver::{
    csp::Csp,
    domain::DomainMap,
    history::{HistoryRecorder, PropagationStep},
    value::{ValueEquality, VariableKey},
};

/// Counters describing one propagation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Number of arcs popped and revised.
    pub revisions: usize,
    /// Number of individual values deleted from domains.
    pub prunings: usize,
}

/// The AC-3 arc-consistency engine.
///
/// Given a CSP, repeatedly revises domains against a FIFO worklist of arcs
/// until no domain can shrink further or some domain empties. The engine
/// mutates the CSP's domains in place and must be the sole owner of the CSP
/// for the duration of a run.
pub struct Ac3Engine<V: VariableKey, T: ValueEquality> {
    recorder: HistoryRecorder<PropagationStep<V, T>>,
    stats: PropagationStats,
}

impl<V: VariableKey, T: ValueEquality> Ac3Engine<V, T> {
    pub fn new() -> Self {
        Self {
            recorder: HistoryRecorder::new(false),
            stats: PropagationStats::default(),
        }
    }

    /// Creates an engine that records a [`PropagationStep`] snapshot at every
    /// decision point of the next run.
    pub fn with_history() -> Self {
        Self {
            recorder: HistoryRecorder::new(true),
            ..Self::new()
        }
    }

    /// Runs AC-3 to a fixed point.
    ///
    /// Returns a map from every variable to its remaining domain, or `None`
    /// the instant any domain empties. A returned map may still hold domains
    /// with more than one value; that means propagation alone did not decide
    /// the problem, and is a normal outcome, not a failure.
    pub fn run(&mut self, csp: &mut Csp<V, T>) -> Option<DomainMap<V, T>> {
        self.recorder.clear();
        self.stats = PropagationStats::default();
        debug!(variables = csp.variables().len(), "starting AC-3 propagation");

        // Seed with every ordered arc, in declared variable order and then
        // neighbor-registration order. Determinism of this enumeration is
        // part of the history contract.
        let mut queue: VecDeque<(V, V)> = VecDeque::new();
        for first in csp.variables() {
            for second in csp.neighbors(first) {
                queue.push_back((first.clone(), second.clone()));
            }
        }

        while let Some((first, second)) = queue.pop_front() {
            self.record_snapshot(csp, &queue, Some((first.clone(), second.clone())), || {
                format!("Selected arc ({first:?}, {second:?}) from the queue.")
            });

            if self.revise(csp, &first, &second) {
                if csp.domain(&first).is_empty() {
                    debug!(variable = ?first, "domain emptied, CSP is inconsistent");
                    self.record_snapshot(
                        csp,
                        &queue,
                        Some((first.clone(), second.clone())),
                        || {
                            format!(
                                "Domain of {first:?} became empty while revising against \
                                 {second:?}; no consistent assignment exists."
                            )
                        },
                    );
                    self.mark_complete();
                    return None;
                }
                for neighbor in csp.neighbors(&first) {
                    if neighbor != &second {
                        queue.push_back((neighbor.clone(), first.clone()));
                    }
                }
                self.record_snapshot(csp, &queue, Some((first.clone(), second.clone())), || {
                    format!(
                        "Revised domain of {first:?}; re-enqueued arcs from its other neighbors."
                    )
                });
            }
        }

        debug!(
            revisions = self.stats.revisions,
            prunings = self.stats.prunings,
            "AC-3 reached a fixed point"
        );
        self.mark_complete();
        Some(csp.all_domains())
    }

    /// Revises `first`'s domain against `second`'s: a value survives only if
    /// some value of `second` satisfies at least one of the predicates
    /// registered for the arc. Returns whether anything was deleted.
    ///
    /// Note the "any predicate supplies support" rule. The search engine's
    /// consistency check is deliberately stricter (all predicates must hold);
    /// the two must not be unified.
    fn revise(&mut self, csp: &mut Csp<V, T>, first: &V, second: &V) -> bool {
        self.stats.revisions += 1;
        let first_values = csp.domain(first).to_vec();
        let second_values = csp.domain(second).to_vec();
        let predicates = csp.constraints_between(first, second).to_vec();

        let mut revised = false;
        for value in &first_values {
            let supported = second_values.iter().any(|other| {
                predicates
                    .iter()
                    .any(|predicate| predicate.is_satisfied(value, other))
            });
            if !supported {
                csp.delete_from_domain(first, value);
                self.stats.prunings += 1;
                revised = true;
            }
        }
        revised
    }

    fn record_snapshot(
        &mut self,
        csp: &Csp<V, T>,
        queue: &VecDeque<(V, V)>,
        current_arc: Option<(V, V)>,
        message: impl FnOnce() -> String,
    ) {
        self.recorder.record_with(|| PropagationStep {
            current_arc,
            domains: csp.all_domains(),
            queue: queue.iter().cloned().collect(),
            message: message(),
        });
    }

    fn mark_complete(&mut self) {
        self.recorder
            .annotate_last(|step| step.message.push_str(" [run complete]"));
    }

    /// The snapshots recorded by the most recent run. Empty unless the
    /// engine was built with [`Ac3Engine::with_history`].
    pub fn history(&self) -> &[PropagationStep<V, T>] {
        self.recorder.steps()
    }

    pub fn stats(&self) -> PropagationStats {
        self.stats
    }
}

impl<V: VariableKey, T: ValueEquality> Default for Ac3Engine<V, T> {
    fn default() -> Self {
        Self::new()
    }
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

    fn pairwise_not_equal_csp(
        variables: Vec<&'static str>,
        domains: Vec<Domain<i64>>,
    ) -> Csp<&'static str, i64> {
        let not_equal: Arc<dyn BinaryConstraint<i64>> = Arc::new(NotEqualConstraint::new());
        let mut constraints = Vec::new();
        for i in 0..variables.len() {
            for j in (i + 1)..variables.len() {
                constraints.push((variables[i], variables[j], not_equal.clone()));
            }
        }
        Csp::new(variables, domains, constraints).unwrap()
    }

    #[test]
    fn trivial_all_different_csp_is_fully_determined() {
        let _ = tracing_subscriber::fmt::try_init();

        let mut csp = pairwise_not_equal_csp(
            vec!["11", "12", "21", "22"],
            vec![
                Domain::new([1, 2, 3, 4]),
                Domain::new([2]),
                Domain::new([3]),
                Domain::new([4]),
            ],
        );

        let mut engine = Ac3Engine::new();
        let result = engine.run(&mut csp).expect("CSP is consistent");

        let expected = [("11", 1), ("12", 2), ("21", 3), ("22", 4)];
        for (variable, value) in expected {
            assert_eq!(result.get(&variable).unwrap().to_vec(), vec![value]);
        }
    }

    #[test]
    fn empty_domain_yields_failure() {
        let mut csp = pairwise_not_equal_csp(
            vec!["a", "b"],
            vec![Domain::new([1]), Domain::new([1])],
        );

        let mut engine = Ac3Engine::new();
        assert!(engine.run(&mut csp).is_none());
    }

    #[test]
    fn underconstrained_csp_keeps_wide_domains() {
        let mut csp = pairwise_not_equal_csp(
            vec!["a", "b"],
            vec![Domain::new([1, 2, 3]), Domain::new([1, 2, 3])],
        );

        let mut engine = Ac3Engine::new();
        let result = engine.run(&mut csp).expect("CSP is consistent");
        assert!(result.values().any(|domain| domain.len() > 1));
    }

    #[test]
    fn any_predicate_may_supply_support() {
        // Two contradictory predicates on one pair: "equal" and "not equal".
        // Under AC-3's existential rule every value keeps support through one
        // of them, so nothing is pruned.
        #[derive(Debug)]
        struct EqualConstraint;
        impl BinaryConstraint<i32> for EqualConstraint {
            fn is_satisfied(&self, first: &i32, second: &i32) -> bool {
                first == second
            }
            fn descriptor(&self) -> crate::solver::constraint::ConstraintDescriptor {
                crate::solver::constraint::ConstraintDescriptor {
                    name: "EqualConstraint".to_string(),
                    description: "first == second".to_string(),
                }
            }
        }

        let mut csp = Csp::new(
            vec!["a", "b"],
            vec![Domain::new([1, 2]), Domain::new([1, 2])],
            vec![
                ("a", "b", Arc::new(NotEqualConstraint::new()) as _),
                ("a", "b", Arc::new(EqualConstraint) as _),
            ],
        )
        .unwrap();

        let mut engine = Ac3Engine::new();
        let result = engine.run(&mut csp).expect("CSP is consistent");
        assert_eq!(result.get(&"a").unwrap().len(), 2);
        assert_eq!(result.get(&"b").unwrap().len(), 2);
    }

    #[test]
    fn history_records_monotone_domain_sizes() {
        let mut csp = pairwise_not_equal_csp(
            vec!["11", "12", "21", "22"],
            vec![
                Domain::new([1, 2, 3, 4]),
                Domain::new([2]),
                Domain::new([3]),
                Domain::new([4]),
            ],
        );

        let mut engine = Ac3Engine::with_history();
        engine.run(&mut csp).expect("CSP is consistent");

        let steps = engine.history();
        assert!(!steps.is_empty());
        for pair in steps.windows(2) {
            assert!(pair[1].no_domain_grew_since(&pair[0]));
        }
        assert!(steps.last().unwrap().message.ends_with("[run complete]"));
    }

    #[test]
    fn history_is_disabled_by_default() {
        let mut csp = pairwise_not_equal_csp(
            vec!["a", "b"],
            vec![Domain::new([1, 2]), Domain::new([1])],
        );

        let mut engine = Ac3Engine::new();
        engine.run(&mut csp);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn failure_history_ends_with_a_failure_message() {
        let mut csp = pairwise_not_equal_csp(
            vec!["a", "b"],
            vec![Domain::new([1]), Domain::new([1])],
        );

        let mut engine = Ac3Engine::with_history();
        assert!(engine.run(&mut csp).is_none());
        let last = engine.history().last().unwrap();
        assert!(last.message.contains("empty"));
        assert!(last.message.ends_with("[run complete]"));
    }
}
