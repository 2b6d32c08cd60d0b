use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    error::{Error, Result},
    solver::{
        constraint::BinaryConstraint,
        domain::{Domain, DomainMap},
        value::{ValueEquality, VariableKey},
    },
};

/// A partial-to-complete mapping from variables to single values, built up
/// incrementally by the search engine. Backed by a persistent map so each
/// branch of the search can extend its own copy without disturbing siblings.
pub type Assignment<V, T> = im::HashMap<V, T>;

/// A binary constraint satisfaction problem: variables, their current
/// domains, and a symmetric index of binary constraints.
///
/// The declared variable order is part of the contract, not an accident of
/// storage: it is the tie-break and fallback order for every heuristic and
/// the enumeration order for AC-3's initial worklist. The same goes for each
/// variable's neighbor list, which is kept in constraint-registration order.
pub struct Csp<V: VariableKey, T: ValueEquality> {
    variables: Vec<V>,
    domains: DomainMap<V, T>,
    constraints: HashMap<(V, V), Vec<Arc<dyn BinaryConstraint<T>>>>,
    neighbors: HashMap<V, Vec<V>>,
}

impl<V: VariableKey, T: ValueEquality> Csp<V, T> {
    /// Builds a CSP from a variable list, an equal-length domain list, and a
    /// list of `(first, second, predicate)` constraint triples.
    ///
    /// Every triple is indexed under both `(first, second)` and
    /// `(second, first)`. Registering the same predicate object for the same
    /// ordered pair twice is a no-op, which is what lets a generator emit
    /// overlapping constraint families (Sudoku rows/columns/boxes) without
    /// deduplicating them itself. Distinct predicate objects accumulate.
    pub fn new(
        variables: Vec<V>,
        domains: Vec<Domain<T>>,
        constraints: Vec<(V, V, Arc<dyn BinaryConstraint<T>>)>,
    ) -> Result<Self> {
        if variables.len() != domains.len() {
            return Err(Error::Configuration(format!(
                "number of domains ({}) must match number of variables ({})",
                domains.len(),
                variables.len()
            )));
        }

        let domain_map: DomainMap<V, T> = variables
            .iter()
            .cloned()
            .zip(domains.into_iter())
            .collect();

        let mut csp = Self {
            variables,
            domains: domain_map,
            constraints: HashMap::new(),
            neighbors: HashMap::new(),
        };

        for (first, second, predicate) in constraints {
            for var in [&first, &second] {
                if !csp.domains.contains_key(var) {
                    return Err(Error::Configuration(format!(
                        "constraint references undeclared variable {var:?}"
                    )));
                }
            }
            csp.insert_directed(first.clone(), second.clone(), predicate.clone());
            csp.insert_directed(second, first, predicate);
        }

        Ok(csp)
    }

    fn insert_directed(&mut self, from: V, to: V, predicate: Arc<dyn BinaryConstraint<T>>) {
        let entry = self.constraints.entry((from.clone(), to.clone()));
        let registered = match entry {
            std::collections::hash_map::Entry::Occupied(slot) => {
                let predicates = slot.into_mut();
                // A predicate already present for this ordered pair (from the
                // symmetric insert of an earlier triple) is not added again.
                if !predicates.iter().any(|p| Arc::ptr_eq(p, &predicate)) {
                    predicates.push(predicate);
                }
                false
            }
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(vec![predicate]);
                true
            }
        };
        if registered {
            self.neighbors.entry(from).or_default().push(to);
        }
    }

    /// The variables of this CSP, in declaration order.
    pub fn variables(&self) -> &[V] {
        &self.variables
    }

    /// The neighbors of `variable`, in the order their constraints were
    /// first registered. Empty for a variable with no constraints.
    pub fn neighbors(&self, variable: &V) -> &[V] {
        self.neighbors
            .get(variable)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The current domain of a declared variable.
    pub fn domain(&self, variable: &V) -> &Domain<T> {
        self.domains
            .get(variable)
            .expect("variable is declared in this CSP")
    }

    /// A snapshot of every variable's current domain. Cheap to take thanks to
    /// the persistent backing map; used as the inference baseline when the
    /// search has not yet produced one.
    pub fn all_domains(&self) -> DomainMap<V, T> {
        self.domains.clone()
    }

    /// The predicates registered for the ordered pair `(first, second)`.
    pub fn constraints_between(&self, first: &V, second: &V) -> &[Arc<dyn BinaryConstraint<T>>] {
        self.constraints
            .get(&(first.clone(), second.clone()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of directed predicate registrations in the symmetric
    /// index. Mostly useful for sanity checks on generated problems.
    pub fn constraint_count(&self) -> usize {
        self.constraints.values().map(Vec::len).sum()
    }

    /// Removes a value from a variable's domain in place.
    ///
    /// This is AC-3's mutation primitive. The search engine never calls it;
    /// it works on domain snapshots instead.
    pub fn delete_from_domain(&mut self, variable: &V, value: &T) {
        if let Some(domain) = self.domains.get_mut(variable) {
            domain.remove(value);
        }
    }
}

impl<V: VariableKey, T: ValueEquality> std::fmt::Debug for Csp<V, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Csp")
            .field("variables", &self.variables.len())
            .field("constraints", &self.constraint_count())
            .finish()
    }
}
