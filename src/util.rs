//! Defines the `Error` type for the sumproduct library

use crate::variable::Variable;

use thiserror::Error;

use std::result;

pub type Result<T> = result::Result<T, InferenceError>;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum InferenceError {

    /// The number of variables in a scope did not match the rank of the table, or two `Factor`s
    /// disagree on the cardinality of a shared `Variable`
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Represents a variable that was present multiple times in a scope
    #[error("variable {0} appears more than once in the scope")]
    DuplicateVariable(Variable),

    /// Potentials must be non-negative real numbers
    #[error("table contains a negative or NaN entry")]
    NegativeValue,

    /// The requested `Variable` is not in the scope of the `Factor`
    #[error("variable {0} is not in the scope of the factor")]
    VariableNotFound(Variable),

    /// A value index was outside the cardinality of its `Variable`
    #[error("index {index} is out of range for variable {var} with cardinality {cardinality}")]
    IndexOutOfRange {
        var: Variable,
        index: usize,
        cardinality: usize
    },

    /// Represents an incomplete assignment where a complete assignment was required.
    #[error("missing an assignment to variable {0}")]
    IncompleteAssignment(Variable),

    /// Evidence variables and values were not paired one to one
    #[error("got {vars} evidence variables but {values} values")]
    InvalidEvidence {
        vars: usize,
        values: usize
    },

    /// No `Factor` in the model mentions the `Variable` to eliminate
    #[error("variable {0} does not appear in any factor")]
    VariableNotEliminable(Variable),

    /// Elimination left no `Factor`s to combine into a result
    #[error("no factors remain in the model")]
    EmptyModel,

    /// The total mass of a `Factor` was zero or not finite
    #[error("cannot normalize a factor with total mass {0}")]
    InvalidDistribution(f64)

}
