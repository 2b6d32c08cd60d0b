use crate::solver::value::ValueEquality;

/// A human-readable summary of a constraint, used for logging and traces.
#[derive(Debug, Clone)]
pub struct ConstraintDescriptor {
    pub name: String,
    pub description: String,
}

/// A binary predicate over the values of two variables.
///
/// A constraint is registered on an ordered pair `(A, B)` and evaluated as
/// `is_satisfied(value_of_a, value_of_b)`. The CSP stores every constraint
/// symmetrically, so the same predicate object answers for both `(A, B)` and
/// `(B, A)`; predicates whose meaning is not symmetric should be registered
/// once per direction.
pub trait BinaryConstraint<T: ValueEquality>: std::fmt::Debug + Send + Sync {
    fn is_satisfied(&self, first: &T, second: &T) -> bool;

    fn descriptor(&self) -> ConstraintDescriptor;
}

/// The standard "values must differ" constraint, the building block of the
/// Sudoku all-different families.
#[derive(Debug, Clone, Default)]
pub struct NotEqualConstraint;

impl NotEqualConstraint {
    pub fn new() -> Self {
        Self
    }
}

impl<T: ValueEquality> BinaryConstraint<T> for NotEqualConstraint {
    fn is_satisfied(&self, first: &T, second: &T) -> bool {
        first != second
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "NotEqualConstraint".to_string(),
            description: "first != second".to_string(),
        }
    }
}
