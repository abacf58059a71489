//! Defines an engine that answers conditional probability queries by exact inference with
//! variable elimination.

use crate::factor::Factor;
use crate::model::FactorCollection;
use crate::util::Result;
use crate::variable::{Assignment, Variable};

use itertools::Itertools;
use log::info;


/// Answers queries of the form ```P(Y | E = e)``` over a fixed model and fixed evidence.
///
/// The engine keeps its own copy of the model, conditioned on the evidence once at construction.
/// Every query runs on a fresh clone of that copy, so queries are repeatable and leave both the
/// engine and the caller's model untouched.
pub struct VariableEliminationEngine {

    /// the model (a 'bag of factors'), conditioned on the provided evidence
    model: FactorCollection,

    /// the evidence the model was conditioned on
    evidence: Assignment

}


impl VariableEliminationEngine {

    /// Build an engine for `model` conditioned on `evidence`.
    ///
    /// # Errors
    /// * `InferenceError::IndexOutOfRange` if an observed value exceeds its `Variable`'s
    ///   cardinality
    pub fn new(model: &FactorCollection, evidence: &Assignment) -> Result<Self> {
        // reduce a copy of the provided model with the evidence - this is the model we will use
        // for variable elimination
        let mut reduced = model.clone();
        reduced.condition_on(evidence)?;

        Ok(VariableEliminationEngine {
            model: reduced,
            evidence: evidence.clone()
        })
    }


    /// The conditioned model that every query starts from
    pub fn model(&self) -> &FactorCollection {
        &self.model
    }


    pub fn evidence(&self) -> &Assignment {
        &self.evidence
    }


    /// Infer the distribution of the `Variable`s left after eliminating `ordering`.
    ///
    /// # Args
    /// * `ordering`: the `Variable`s to eliminate, in order. Every unobserved `Variable` of the
    ///   model that is not in `ordering` is part of the query.
    ///
    /// # Returns
    /// the normalized `Factor` ```P(remaining | evidence)```
    ///
    /// # Errors
    /// * any error of `FactorCollection::eliminate`
    /// * `InferenceError::InvalidDistribution` if the evidence has zero probability
    pub fn infer(&self, ordering: &[Variable]) -> Result<Factor> {
        let mut phis = self.model.clone();
        let mut phi_star = phis.eliminate(ordering)?;

        info!(
            "eliminated [{}] with induced width {}, result over [{}]",
            ordering.iter().join(", "),
            phis.induced_width(),
            phi_star.scope().iter().join(", ")
        );

        // now we have an unnormalized distribution. We need the partition function to return a
        // conditional probability.
        phi_star.normalize()?;
        Ok(phi_star)
    }

}
