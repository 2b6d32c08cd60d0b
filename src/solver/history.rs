use crate::solver::{
    csp::Assignment,
    domain::DomainMap,
    value::{ValueEquality, VariableKey},
};

/// An append-only log of solver snapshots.
///
/// When disabled, recording is a no-op and the snapshot closures are never
/// evaluated, so a history-free run pays nothing for copies. Steps are only
/// ever pushed or annotated in place; they are never removed or reordered,
/// and every snapshot is taken by value, so later mutation of live solver
/// state cannot retroactively change a recorded step.
#[derive(Debug)]
pub struct HistoryRecorder<S> {
    enabled: bool,
    steps: Vec<S>,
}

impl<S> HistoryRecorder<S> {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            steps: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Appends the step produced by `snapshot`, if recording is enabled.
    pub fn record_with(&mut self, snapshot: impl FnOnce() -> S) {
        if self.enabled {
            self.steps.push(snapshot());
        }
    }

    /// Amends the most recent step, if any. Used to mark run completion on
    /// the final snapshot of a run.
    pub fn annotate_last(&mut self, annotate: impl FnOnce(&mut S)) {
        if let Some(last) = self.steps.last_mut() {
            annotate(last);
        }
    }

    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }
}

/// One recorded AC-3 decision point: the arc under consideration, full
/// copies of the domain state and remaining worklist at that instant, and a
/// human-readable account of what happened.
#[derive(Debug, Clone)]
pub struct PropagationStep<V: VariableKey, T: ValueEquality> {
    pub current_arc: Option<(V, V)>,
    pub domains: DomainMap<V, T>,
    pub queue: Vec<(V, V)>,
    pub message: String,
}

/// One recorded backtracking-search decision point.
///
/// `inferences` is `None` until the search has produced an inference state,
/// mirroring the engine's own view: a reader should fall back to the CSP's
/// full domains in that case.
#[derive(Debug, Clone)]
pub struct SearchStep<V: VariableKey, T: ValueEquality> {
    pub variable: Option<V>,
    pub value: Option<T>,
    pub ordered_values: Vec<T>,
    pub assignment: Assignment<V, T>,
    pub inferences: Option<DomainMap<V, T>>,
    pub message: String,
}

impl<V: VariableKey, T: ValueEquality> PropagationStep<V, T> {
    /// Domain sizes never grow across consecutive AC-3 steps; this helper
    /// lets tests and replay tools assert that invariant.
    pub fn no_domain_grew_since(&self, earlier: &Self) -> bool {
        self.domains.iter().all(|(variable, domain)| {
            earlier
                .domains
                .get(variable)
                .is_some_and(|previous| domain.len() <= previous.len())
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn disabled_recorder_never_evaluates_snapshots() {
        let mut recorder: HistoryRecorder<String> = HistoryRecorder::new(false);
        recorder.record_with(|| panic!("snapshot should not be taken"));
        assert!(recorder.is_empty());
    }

    #[test]
    fn steps_append_in_order() {
        let mut recorder = HistoryRecorder::new(true);
        recorder.record_with(|| "first".to_string());
        recorder.record_with(|| "second".to_string());
        recorder.annotate_last(|step| step.push_str(" (done)"));
        assert_eq!(recorder.steps(), &["first".to_string(), "second (done)".to_string()]);
    }
}
