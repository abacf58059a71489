//! Exact inference over discrete graphical models by sum-product variable elimination.
//!
//! A model is a `FactorCollection`: the conditional probability tables of a Bayesian network or
//! the clique potentials of a Markov network, each held as a dense `Factor`. Evidence is applied
//! with `FactorCollection::condition` and nuisance variables are summed out, in an order the
//! caller chooses, with `FactorCollection::eliminate`. Both operations consume the collection, so
//! clone the model before each query or let a `VariableEliminationEngine` do it.

pub mod variable;
pub mod factor;
pub mod model;
pub mod inference;
pub mod util;

pub use factor::{Factor, Table};
pub use inference::VariableEliminationEngine;
pub use model::FactorCollection;
pub use util::{InferenceError, Result};
pub use variable::{Assignment, Variable};
