use tracing::debug;

use crate::{
    error::{Error, Result},
    solver::{
        csp::{Assignment, Csp},
        domain::{any_domain_empty, DomainMap},
        heuristics::{
            inference::forward_check, value as value_strategy, variable as variable_strategy,
            Inference, ValueOrdering, VariableSelection,
        },
        history::{HistoryRecorder, SearchStep},
        value::{ValueEquality, VariableKey},
    },
};

/// Counters describing one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes_visited: usize,
    pub backtracks: usize,
}

/// Depth-first backtracking search over partial assignments.
///
/// Configured at construction with one choice from each of the three named
/// strategy sets. Heuristic choice changes performance and the recorded
/// trace, never which solution a uniquely-solvable problem yields.
///
/// Every recursive branch extends its own copy of the assignment and derives
/// a fresh inference map, so abandoning a branch cannot leak state into its
/// siblings; the persistent maps make those copies cheap.
pub struct BacktrackingSearch<V: VariableKey, T: ValueEquality> {
    variable_selection: VariableSelection,
    value_ordering: ValueOrdering,
    inference: Inference,
    recorder: HistoryRecorder<SearchStep<V, T>>,
    stats: SearchStats,
}

impl<V: VariableKey, T: ValueEquality> BacktrackingSearch<V, T> {
    /// Creates a search engine with the given strategies.
    ///
    /// Fails with a configuration error if a strategy combination cannot
    /// work: minimum-remaining-values (and its Degree refinement, which runs
    /// the same scan) reads inference-derived domains, so both require an
    /// inference strategy other than [`Inference::None`].
    pub fn new(
        variable_selection: VariableSelection,
        value_ordering: ValueOrdering,
        inference: Inference,
    ) -> Result<Self> {
        Self::build(variable_selection, value_ordering, inference, false)
    }

    /// Like [`BacktrackingSearch::new`], but records a [`SearchStep`]
    /// snapshot at every decision point of the next run.
    pub fn with_history(
        variable_selection: VariableSelection,
        value_ordering: ValueOrdering,
        inference: Inference,
    ) -> Result<Self> {
        Self::build(variable_selection, value_ordering, inference, true)
    }

    fn build(
        variable_selection: VariableSelection,
        value_ordering: ValueOrdering,
        inference: Inference,
        record_history: bool,
    ) -> Result<Self> {
        let needs_inference = matches!(
            variable_selection,
            VariableSelection::MinimumRemainingValues | VariableSelection::Degree
        );
        if needs_inference && inference == Inference::None {
            return Err(Error::Configuration(format!(
                "{variable_selection:?} variable selection requires an inference strategy"
            )));
        }
        Ok(Self {
            variable_selection,
            value_ordering,
            inference,
            recorder: HistoryRecorder::new(record_history),
            stats: SearchStats::default(),
        })
    }

    /// Runs the search from an empty assignment.
    ///
    /// Returns a complete assignment covering every CSP variable, or `None`
    /// when no consistent assignment exists. `None` is a first-class result,
    /// not an error.
    pub fn run(&mut self, csp: &Csp<V, T>) -> Option<Assignment<V, T>> {
        self.recorder.clear();
        self.stats = SearchStats::default();
        debug!(
            variables = csp.variables().len(),
            strategy = ?(self.variable_selection, self.value_ordering, self.inference),
            "starting backtracking search"
        );

        let result = self.search(csp, Assignment::new(), None);
        match &result {
            Some(assignment) => {
                debug!(stats = ?self.stats, "search found a complete assignment");
                let snapshot = assignment.clone();
                self.recorder.record_with(|| SearchStep {
                    variable: None,
                    value: None,
                    ordered_values: Vec::new(),
                    assignment: snapshot,
                    inferences: None,
                    message: "Search complete: found a consistent assignment.".to_string(),
                });
            }
            None => {
                debug!(stats = ?self.stats, "search exhausted without a solution");
                self.recorder.record_with(|| SearchStep {
                    variable: None,
                    value: None,
                    ordered_values: Vec::new(),
                    assignment: Assignment::new(),
                    inferences: None,
                    message: "No consistent assignment found.".to_string(),
                });
            }
        }
        result
    }

    fn search(
        &mut self,
        csp: &Csp<V, T>,
        assignment: Assignment<V, T>,
        inferences: Option<DomainMap<V, T>>,
    ) -> Option<Assignment<V, T>> {
        self.stats.nodes_visited += 1;

        if csp
            .variables()
            .iter()
            .all(|variable| assignment.contains_key(variable))
        {
            return Some(assignment);
        }

        let variable = self.select_variable(csp, &assignment, inferences.as_ref())?;
        let ordered_values = self.order_values(csp, &variable, inferences.as_ref());

        for value in &ordered_values {
            self.record_step(
                Some(&variable),
                Some(value),
                &ordered_values,
                &assignment,
                inferences.as_ref(),
                "Selected variable and value.",
            );

            if !self.is_consistent(csp, &variable, value, &assignment) {
                self.record_step(
                    Some(&variable),
                    Some(value),
                    &ordered_values,
                    &assignment,
                    inferences.as_ref(),
                    "Value conflicts with an assigned neighbor; trying the next value.",
                );
                continue;
            }

            let child_assignment = assignment.update(variable.clone(), value.clone());
            let baseline = match inferences.clone() {
                Some(map) => map,
                None => csp.all_domains(),
            };
            let child_inferences = match self.inference {
                Inference::None => baseline,
                Inference::ForwardChecking => forward_check(csp, &variable, value, &baseline),
            };

            if any_domain_empty(&child_inferences) {
                self.record_step(
                    Some(&variable),
                    Some(value),
                    &ordered_values,
                    &assignment,
                    Some(&child_inferences),
                    "Inference emptied a domain; abandoning this value.",
                );
                continue;
            }

            self.record_step(
                Some(&variable),
                Some(value),
                &ordered_values,
                &child_assignment,
                Some(&child_inferences),
                "Updated assignment and inferences.",
            );

            if let Some(solution) = self.search(csp, child_assignment, Some(child_inferences)) {
                return Some(solution);
            }
            self.stats.backtracks += 1;
        }

        self.record_step(
            Some(&variable),
            None,
            &ordered_values,
            &assignment,
            inferences.as_ref(),
            "Backtracking: no remaining value for this variable leads to a solution.",
        );
        None
    }

    fn select_variable(
        &self,
        csp: &Csp<V, T>,
        assignment: &Assignment<V, T>,
        inferences: Option<&DomainMap<V, T>>,
    ) -> Option<V> {
        match self.variable_selection {
            VariableSelection::FirstUnassigned => {
                variable_strategy::first_unassigned(csp, assignment)
            }
            VariableSelection::MinimumRemainingValues | VariableSelection::Degree => {
                // Fall back to the full domain map before any inference.
                let domains = match inferences {
                    Some(map) => map.clone(),
                    None => csp.all_domains(),
                };
                variable_strategy::minimum_remaining_values(
                    csp,
                    assignment,
                    &domains,
                    self.variable_selection == VariableSelection::Degree,
                )
            }
        }
    }

    fn order_values(
        &self,
        csp: &Csp<V, T>,
        variable: &V,
        inferences: Option<&DomainMap<V, T>>,
    ) -> Vec<T> {
        match self.value_ordering {
            ValueOrdering::DomainOrder => value_strategy::domain_order(csp, variable, inferences),
            ValueOrdering::LeastConstraining => {
                value_strategy::least_constraining(csp, variable, inferences)
            }
        }
    }

    /// A candidate value is consistent only if every predicate registered
    /// against every already-assigned neighbor holds. Stricter than AC-3's
    /// "any predicate supplies support" rule, and intentionally so.
    fn is_consistent(
        &self,
        csp: &Csp<V, T>,
        variable: &V,
        value: &T,
        assignment: &Assignment<V, T>,
    ) -> bool {
        csp.neighbors(variable).iter().all(|neighbor| {
            match assignment.get(neighbor) {
                Some(assigned) => csp
                    .constraints_between(variable, neighbor)
                    .iter()
                    .all(|predicate| predicate.is_satisfied(value, assigned)),
                None => true,
            }
        })
    }

    fn record_step(
        &mut self,
        variable: Option<&V>,
        value: Option<&T>,
        ordered_values: &[T],
        assignment: &Assignment<V, T>,
        inferences: Option<&DomainMap<V, T>>,
        message: &str,
    ) {
        self.recorder.record_with(|| SearchStep {
            variable: variable.cloned(),
            value: value.cloned(),
            ordered_values: ordered_values.to_vec(),
            assignment: assignment.clone(),
            inferences: inferences.cloned(),
            message: message.to_string(),
        });
    }

    /// The snapshots recorded by the most recent run. Empty unless the
    /// engine was built with [`BacktrackingSearch::with_history`].
    pub fn history(&self) -> &[SearchStep<V, T>] {
        self.recorder.steps()
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}
