/// The base trait for any value that can appear in a variable's domain.
///
/// This is a marker trait: any type that is cloneable, debuggable, equatable
/// and hashable qualifies automatically.
pub trait ValueEquality: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static {}
impl<T> ValueEquality for T where T: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static {}

/// The trait bound for variable identifiers.
///
/// Variables additionally need a total order so that arcs and history traces
/// can be compared and displayed deterministically. Note that the CSP never
/// *sorts* variables by this order; enumeration order is always the order in
/// which variables were declared.
pub trait VariableKey: ValueEquality + Ord {}
impl<T> VariableKey for T where T: ValueEquality + Ord {}
