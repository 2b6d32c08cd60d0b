use im::Vector;
use serde::Serialize;

use crate::solver::value::{ValueEquality, VariableKey};

/// The set of candidate values for every variable at some point in time.
///
/// Maps are only ever iterated through the CSP's declared variable order, so
/// the hash-based storage here never leaks nondeterminism into the solver.
pub type DomainMap<V, T> = im::HashMap<V, Domain<T>>;

/// An ordered, duplicate-free collection of candidate values for one variable.
///
/// Order is insertion order and is load-bearing: value-ordering heuristics
/// fall back to it, so it must survive cloning and pruning unchanged. The
/// persistent backing vector makes clones cheap, which is what lets the
/// search engine hand every branch its own independent snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Domain<T: ValueEquality> {
    values: Vector<T>,
}

impl<T: ValueEquality> Domain<T> {
    /// Builds a domain from candidate values, dropping duplicates while
    /// preserving first-seen order.
    pub fn new(values: impl IntoIterator<Item = T>) -> Self {
        let mut deduped = Vector::new();
        for value in values {
            if !deduped.contains(&value) {
                deduped.push_back(value);
            }
        }
        Self { values: deduped }
    }

    pub fn singleton(value: T) -> Self {
        let mut values = Vector::new();
        values.push_back(value);
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.values.len() == 1
    }

    /// If the domain holds exactly one value, returns it.
    pub fn singleton_value(&self) -> Option<&T> {
        if self.is_singleton() {
            self.values.front()
        } else {
            None
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.values.contains(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }

    /// Removes one value in place. Used by AC-3, which owns its CSP for the
    /// duration of a run; the search engine never mutates a shared domain.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.values.index_of(value) {
            Some(index) => {
                self.values.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns a new domain containing only the values that satisfy the
    /// predicate, in the same relative order.
    pub fn retain(&self, keep: impl Fn(&T) -> bool) -> Self {
        Self {
            values: self.values.iter().filter(|v| keep(v)).cloned().collect(),
        }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.values.iter().cloned().collect()
    }
}

impl<T: ValueEquality> FromIterator<T> for Domain<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// True if any variable in the map has run out of candidates.
pub fn any_domain_empty<V: VariableKey, T: ValueEquality>(domains: &DomainMap<V, T>) -> bool {
    domains.values().any(|domain| domain.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn new_deduplicates_preserving_order() {
        let domain = Domain::new([3, 1, 3, 2, 1]);
        assert_eq!(domain.to_vec(), vec![3, 1, 2]);
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut domain = Domain::new([1, 2, 3, 4]);
        assert!(domain.remove(&2));
        assert!(!domain.remove(&2));
        assert_eq!(domain.to_vec(), vec![1, 3, 4]);
    }

    #[test]
    fn retain_does_not_touch_the_original() {
        let domain = Domain::new([1, 2, 3, 4]);
        let odd = domain.retain(|v| v % 2 == 1);
        assert_eq!(odd.to_vec(), vec![1, 3]);
        assert_eq!(domain.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn singleton_value_only_for_singletons() {
        assert_eq!(Domain::singleton(7).singleton_value(), Some(&7));
        assert_eq!(Domain::new([1, 2]).singleton_value(), None);
    }
}
