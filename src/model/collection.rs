//! Defines the `FactorCollection` and the sum-product variable elimination it performs.
//!
//! Implementation of Koller & Friedman Algorithm 9.1 - Sum-Product-VE, with the elimination
//! order supplied by the caller.

use crate::factor::Factor;
use crate::util::{InferenceError, Result};
use crate::variable::{Assignment, Variable};

use itertools::Itertools;
use log::debug;

use std::collections::BTreeSet;


/// A set of `Factor`s whose product represents a (possibly conditioned, possibly partially
/// eliminated) distribution.
///
/// # Ownership
/// Conditioning and elimination mutate the collection in place. Treat a freshly built collection
/// as a template and `clone` it before every query; the clone owns deep copies of every `Factor`.
#[derive(Clone, Debug, Default)]
pub struct FactorCollection {

    /// The `Factor`s that comprise the model. Every one of them is valid.
    factors: Vec<Factor>,

    /// The largest scope of any `Factor` produced by a join in this collection
    induced_width: usize

}


impl FactorCollection {

    /// Construct a `FactorCollection` from the `Factor`s of a model. Invalid (scope-less)
    /// `Factor`s are discarded.
    pub fn new(factors: Vec<Factor>) -> Self {
        let factors = factors.into_iter().filter(Factor::is_valid).collect();
        FactorCollection { factors, induced_width: 0 }
    }


    /// The `Factor`s currently in the collection
    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }


    /// The number of `Factor`s in the collection
    pub fn len(&self) -> usize {
        self.factors.len()
    }


    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }


    /// All `Variable`s mentioned by some `Factor` of the collection
    pub fn variables(&self) -> BTreeSet<Variable> {
        self.factors.iter().flat_map(|f| f.scope()).collect()
    }


    /// Check whether any `Factor` of the collection mentions `var`
    pub fn contains_var(&self, var: &Variable) -> bool {
        self.factors.iter().any(|f| f.has_var(var))
    }


    /// The largest number of `Variable`s held by any `Factor` that a join in this collection has
    /// produced so far. This is the cost the elimination order controls; it is `0` until the
    /// first elimination.
    pub fn induced_width(&self) -> usize {
        self.induced_width
    }


    /// Condition the collection on evidence.
    ///
    /// Every `Factor` mentioning `vars[i]` is reduced to `values[i]`. `Factor`s whose whole scope
    /// was observed are removed from the collection.
    ///
    /// # Errors
    /// * `InferenceError::InvalidEvidence` if `vars` and `values` differ in length
    /// * `InferenceError::IndexOutOfRange` if a value exceeds the cardinality of its `Variable`
    ///
    /// The collection is left untouched on error.
    pub fn condition(&mut self, vars: &[Variable], values: &[usize]) -> Result<()> {
        if vars.len() != values.len() {
            return Err(InferenceError::InvalidEvidence { vars: vars.len(), values: values.len() });
        }

        // check all of the evidence before reducing anything
        for (var, &value) in vars.iter().zip(values.iter()) {
            for factor in self.factors.iter() {
                match factor.cardinality(var) {
                    Some(cardinality) if value >= cardinality => {
                        return Err(InferenceError::IndexOutOfRange {
                            var: var.clone(),
                            index: value,
                            cardinality
                        });
                    },
                    _ => ()
                }
            }
        }

        for factor in self.factors.iter_mut() {
            for (var, &value) in vars.iter().zip(values.iter()) {
                // axis positions shift as the scope shrinks, so every lookup goes by Variable
                if factor.has_var(var) {
                    factor.reduce(var, value)?;
                }
            }
        }

        let before = self.factors.len();
        self.factors.retain(Factor::is_valid);
        debug!(
            "conditioned on {} variables, dropped {} fully observed factors",
            vars.len(),
            before - self.factors.len()
        );

        Ok(())
    }


    /// Condition the collection on the evidence in `evidence`. See `condition`.
    pub fn condition_on(&mut self, evidence: &Assignment) -> Result<()> {
        let (vars, values): (Vec<Variable>, Vec<usize>) = evidence
            .iter()
            .map(|(v, &value)| (v.clone(), value))
            .unzip();

        self.condition(&vars, &values)
    }


    /// Eliminate a single `Variable` from the collection.
    ///
    /// The `Factor`s that mention `var` are multiplied together, `var` is summed out of the
    /// product, and the result replaces them. If summing out `var` leaves no scope, the resulting
    /// scalar is discarded.
    ///
    /// # Errors
    /// * `InferenceError::VariableNotEliminable` if no `Factor` mentions `var`
    /// * `InferenceError::ShapeMismatch` if the `Factor`s disagree on a cardinality
    ///
    /// The collection is left untouched on error.
    pub fn eliminate_variable(&mut self, var: &Variable) -> Result<()> {
        let relevant: Vec<&Factor> = self.factors.iter().filter(|f| f.has_var(var)).collect();
        if relevant.is_empty() {
            return Err(InferenceError::VariableNotEliminable(var.clone()));
        }

        let count = relevant.len();

        // product step - multiply factors with var
        let mut tau = product(relevant.into_iter())?;
        self.record_width(&tau);
        debug!("eliminating {}: joined {} factors over [{}]", var, count, tau.scope().iter().join(", "));

        // sum step - marginalize tau over var
        tau.sum_over(var)?;

        self.factors.retain(|f| !f.has_var(var));
        if tau.is_valid() {
            self.factors.push(tau);
        } else {
            debug!("{} was the last variable of its component, dropping mass {}", var, tau.sum());
        }

        Ok(())
    }


    /// Eliminate every `Variable` of `ordering`, in order, and multiply the remaining `Factor`s
    /// into a single result.
    ///
    /// The result is unnormalized. Its numeric content does not depend on the order of
    /// `ordering`, only the size of the intermediate `Factor`s does.
    ///
    /// # Errors
    /// * any error of `eliminate_variable`, at the first `Variable` that fails
    /// * `InferenceError::EmptyModel` if no `Factor`s remain once `ordering` is exhausted
    pub fn eliminate(&mut self, ordering: &[Variable]) -> Result<Factor> {
        for var in ordering.iter() {
            self.eliminate_variable(var)?;
        }

        // multiply together remaining factors
        let phi_star = product(self.factors.iter())?;
        self.record_width(&phi_star);

        Ok(phi_star)
    }


    fn record_width(&mut self, factor: &Factor) {
        self.induced_width = self.induced_width.max(factor.num_vars());
    }

}


/// Multiply a non-empty sequence of `Factor`s together
fn product<'a, I>(mut factors: I) -> Result<Factor>
    where I: Iterator<Item = &'a Factor>
{
    let first = factors.next().ok_or(InferenceError::EmptyModel)?;
    factors.try_fold(first.clone(), |acc, phi| acc.multiply(phi))
}


#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn var(name: &str) -> Variable {
        Variable::new(name)
    }

    /// a -> b -> c -> d, every link with the same transition table
    fn chain() -> FactorCollection {
        let transition = array![[0.7, 0.3], [0.1, 0.9]].into_dyn();

        FactorCollection::new(vec![
            Factor::new(vec![var("a")], array![0.8, 0.2].into_dyn()).unwrap(),
            Factor::new(vec![var("a"), var("b")], transition.clone()).unwrap(),
            Factor::new(vec![var("b"), var("c")], transition.clone()).unwrap(),
            Factor::new(vec![var("c"), var("d")], transition).unwrap(),
        ])
    }

    fn assert_close(expected: &[f64], actual: &Factor) {
        assert_eq!(expected.len(), actual.table().len());
        for (e, a) in expected.iter().zip(actual.table().iter()) {
            assert!((e - a).abs() < 1e-9, "expected {:?}, got {}", expected, actual);
        }
    }

    #[test]
    fn new_drops_invalid_factors() {
        let scalar = Factor::new(vec![], ndarray::ArrayD::from_elem(ndarray::IxDyn(&[]), 1.0)).unwrap();
        let model = FactorCollection::new(vec![
            scalar,
            Factor::new(vec![var("a")], array![0.5, 0.5].into_dyn()).unwrap(),
        ]);

        assert_eq!(1, model.len());
        assert!(!model.is_empty());
        assert!(model.contains_var(&var("a")));
        assert_eq!(0, model.induced_width());
    }

    #[test]
    fn variables() {
        let model = chain();
        let vars: Vec<Variable> = model.variables().into_iter().collect();
        assert_eq!(vec![var("a"), var("b"), var("c"), var("d")], vars);
    }

    #[test]
    fn condition() {
        let mut model = chain();
        model.condition(&[var("a")], &[1]).unwrap();

        // P(a) was fully observed and is gone; P(b | a) is now P(b | a = 1)
        assert_eq!(3, model.len());
        assert!(!model.contains_var(&var("a")));

        let phi = model.factors().iter().find(|f| f.has_var(&var("b")) && f.num_vars() == 1).unwrap();
        assert_close(&[0.1, 0.9], phi);
    }

    #[test]
    fn condition_several_variables_of_one_factor() {
        let grade = Factor::new(
            vec![var("d"), var("i"), var("g")],
            array![[[0.3, 0.4, 0.3], [0.05, 0.25, 0.7]],
                   [[0.9, 0.08, 0.02], [0.5, 0.3, 0.2]]].into_dyn()
        ).unwrap();
        let mut model = FactorCollection::new(vec![grade]);

        // reducing d moves g from axis 2 to axis 1
        model.condition(&[var("d"), var("g")], &[1, 2]).unwrap();

        assert_eq!(1, model.len());
        assert_eq!(vec![var("i")], model.factors()[0].scope());
        assert_close(&[0.02, 0.2], &model.factors()[0]);
    }

    #[test]
    fn condition_on_assignment() {
        let mut by_pairs = chain();
        by_pairs.condition(&[var("b"), var("d")], &[0, 1]).unwrap();

        let mut evidence = Assignment::new();
        evidence.set(&var("b"), 0);
        evidence.set(&var("d"), 1);
        let mut by_assignment = chain();
        by_assignment.condition_on(&evidence).unwrap();

        assert_eq!(by_pairs.factors(), by_assignment.factors());
    }

    #[test]
    fn condition_errs() {
        let mut model = chain();

        assert_eq!(
            Err(InferenceError::InvalidEvidence { vars: 2, values: 1 }),
            model.condition(&[var("a"), var("b")], &[0])
        );

        // the first pair is fine, the second is not; nothing may be applied
        assert_eq!(
            Err(InferenceError::IndexOutOfRange { var: var("c"), index: 2, cardinality: 2 }),
            model.condition(&[var("a"), var("c")], &[0, 2])
        );

        assert_eq!(chain().factors(), model.factors());
    }

    #[test]
    fn eliminate_variable() {
        let mut model = chain();
        model.eliminate_variable(&var("a")).unwrap();

        assert_eq!(3, model.len());
        assert!(!model.contains_var(&var("a")));
        assert_eq!(2, model.induced_width());

        // P(b) = sum_a P(a) P(b | a)
        let phi = model.factors().iter().find(|f| f.scope() == vec![var("b")]).unwrap();
        assert_close(&[0.58, 0.42], phi);
    }

    #[test]
    fn eliminate_absent_variable() {
        let mut model = chain();

        assert_eq!(
            Err(InferenceError::VariableNotEliminable(var("z"))),
            model.eliminate_variable(&var("z"))
        );
        assert_eq!(chain().factors(), model.factors());

        // eliminating a variable twice fails the second time
        model.eliminate_variable(&var("a")).unwrap();
        assert_eq!(
            Err(InferenceError::VariableNotEliminable(var("a"))),
            model.eliminate_variable(&var("a"))
        );
    }

    #[test]
    fn eliminate() {
        let mut model = chain();
        let mut phi = model.eliminate(&[var("a"), var("b"), var("c")]).unwrap();

        assert_eq!(vec![var("d")], phi.scope());
        assert!((phi.sum() - 1.0).abs() < 1e-9);
        assert_close(&[0.3688, 0.6312], &phi);

        phi.normalize().unwrap();
        assert_close(&[0.3688, 0.6312], &phi);
    }

    #[test]
    fn eliminate_order_independent() {
        let orderings = vec![
            vec![var("a"), var("b"), var("c")],
            vec![var("c"), var("b"), var("a")],
            vec![var("b"), var("a"), var("c")],
            vec![var("b"), var("c"), var("a")],
        ];

        let reference = chain().eliminate(&orderings[0]).unwrap();
        for ordering in orderings.iter().skip(1) {
            let phi = chain().eliminate(ordering).unwrap();
            assert_eq!(reference.scope(), phi.scope());
            for (x, y) in reference.table().iter().zip(phi.table().iter()) {
                assert!((x - y).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn induced_width_depends_on_order() {
        let mut forward = chain();
        forward.eliminate(&[var("a"), var("b"), var("c")]).unwrap();
        assert_eq!(2, forward.induced_width());

        // eliminating b first joins P(b | a) with P(c | b)
        let mut middle = chain();
        middle.eliminate(&[var("b"), var("a"), var("c")]).unwrap();
        assert_eq!(3, middle.induced_width());
    }

    #[test]
    fn eliminate_everything() {
        let mut model = chain();
        let res = model.eliminate(&[var("a"), var("b"), var("c"), var("d")]);

        assert_eq!(Err(InferenceError::EmptyModel), res);
        assert!(model.is_empty());
    }

    #[test]
    fn eliminate_nothing_joins_everything() {
        let mut model = chain();
        let phi = model.eliminate(&[]).unwrap();

        assert_eq!(vec![var("a"), var("b"), var("c"), var("d")], phi.scope());
        assert!((phi.sum() - 1.0).abs() < 1e-9);
        assert_eq!(4, model.induced_width());
    }

    #[test]
    fn clone_is_independent() {
        let base = chain();
        let mut query = base.clone();

        query.condition(&[var("a")], &[0]).unwrap();
        query.eliminate(&[var("b"), var("c")]).unwrap();

        assert_eq!(4, base.len());
        assert_eq!(chain().factors(), base.factors());
        assert_eq!(0, base.induced_width());
    }
}
