//! Defines the interface to the inference engine

mod variable_elimination;

pub use self::variable_elimination::VariableEliminationEngine;
