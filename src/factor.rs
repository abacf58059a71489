//! Definition of the factor module
//!
//! A `Factor` represents a relationship between some set of `Variable`s, stored as a dense table
//! with one axis per `Variable`.

use crate::util::{InferenceError, Result};
use crate::variable::{Assignment, Variable};

use indexmap::IndexSet;
use itertools::Itertools;
use log::trace;
use ndarray::prelude as nd;

use std::fmt;

/// Alias f64 ndarray::ArrayD as Table
pub type Table = nd::ArrayD<f64>;


/// A discrete potential over an ordered scope of `Variable`s. Represented as a table-factor as
/// described in Koller & Friedman.
///
/// Axis `i` of the table belongs to the `i`th `Variable` of the scope. The length of that axis is
/// the cardinality of the `Variable`.
///
/// A `Factor` whose scope has been emptied by `reduce` or `sum_over` holds a single scalar and is
/// no longer valid. See `is_valid`.
#[derive(Clone, Debug)]
pub struct Factor {
    /// The scope of the `Factor`. The position of a `Variable` in the set is its axis.
    scope: IndexSet<Variable>,

    /// The values of the `Factor` table.
    table: Table
}


impl Factor {

    /// Create a new `Factor`
    ///
    /// # Args
    /// * `scope`: the distinct `Variable`s of the `Factor`, in axis order
    /// * `table`: the values, with one axis per `Variable`
    ///
    /// # Errors
    /// * `InferenceError::ShapeMismatch` if the rank of `table` differs from the size of `scope`
    /// * `InferenceError::DuplicateVariable` if a `Variable` appears twice in `scope`
    /// * `InferenceError::NegativeValue` if any entry of `table` is negative or NaN
    pub fn new(scope: Vec<Variable>, table: Table) -> Result<Self> {
        if scope.len() != table.ndim() {
            return Err(InferenceError::ShapeMismatch(format!(
                "{} variables in the scope but the table has rank {}",
                scope.len(),
                table.ndim()
            )));
        }

        let mut vars = IndexSet::with_capacity(scope.len());
        for v in scope {
            if vars.contains(&v) {
                return Err(InferenceError::DuplicateVariable(v));
            }
            vars.insert(v);
        }

        // potentials are non-negative; the negated comparison also rejects NaN
        if table.iter().any(|&v| !(v >= 0.0)) {
            return Err(InferenceError::NegativeValue);
        }

        Ok(Factor { scope: vars, table })
    }


    /// Retrieve the scope of the `Factor`, in axis order.
    pub fn scope(&self) -> Vec<Variable> {
        self.scope.iter().cloned().collect()
    }


    /// The number of `Variable`s in the scope
    pub fn num_vars(&self) -> usize {
        self.scope.len()
    }


    /// The values of the `Factor`
    pub fn table(&self) -> &Table {
        &self.table
    }


    /// Check whether `var` is in the scope of this `Factor`
    pub fn has_var(&self, var: &Variable) -> bool {
        self.scope.contains(var)
    }


    /// Get the axis of the table that belongs to `var`
    ///
    /// # Errors
    /// * `InferenceError::VariableNotFound` if `var` is not in the scope
    pub fn var_index(&self, var: &Variable) -> Result<usize> {
        self.scope
            .get_index_of(var)
            .ok_or_else(|| InferenceError::VariableNotFound(var.clone()))
    }


    /// The number of values `var` takes in this `Factor`, or `None` if it is not in the scope
    pub fn cardinality(&self, var: &Variable) -> Option<usize> {
        self.scope
            .get_index_of(var)
            .map(|i| self.table.len_of(nd::Axis(i)))
    }


    /// A `Factor` is valid as long as it has at least one `Variable` in its scope
    pub fn is_valid(&self) -> bool {
        !self.scope.is_empty()
    }


    /// The total mass of the table
    pub fn sum(&self) -> f64 {
        self.table.sum()
    }


    /// Retrieve the value for a complete assignment over the scope of this `Factor`
    ///
    /// # Args
    /// assignment: a full assignment to the scope of a `Factor`. The assignment's scope may be a
    ///             superset of the `Factor`s scope.
    ///
    /// # Errors
    /// * `InferenceError::IncompleteAssignment` if a `Variable` of the scope is not assigned
    /// * `InferenceError::IndexOutOfRange` if an assigned value exceeds its `Variable`'s
    ///   cardinality
    pub fn value(&self, assignment: &Assignment) -> Result<f64> {
        let mut idx = Vec::with_capacity(self.scope.len());

        for (axis, v) in self.scope.iter().enumerate() {
            let &value = assignment
                .get(v)
                .ok_or_else(|| InferenceError::IncompleteAssignment(v.clone()))?;

            let cardinality = self.table.len_of(nd::Axis(axis));
            if value >= cardinality {
                return Err(InferenceError::IndexOutOfRange { var: v.clone(), index: value, cardinality });
            }

            idx.push(value);
        }

        Ok(self.table[nd::IxDyn(&idx)])
    }


    /// Reduce the `Factor` in place by fixing `var` to the value with index `value`.
    ///
    /// Defined in Koller & Friedman 4.2.3
    ///
    /// The table is sliced along the axis of `var` and `var` leaves the scope. Reducing the last
    /// `Variable` of the scope leaves an invalid `Factor`.
    ///
    /// # Errors
    /// * `InferenceError::VariableNotFound` if `var` is not in the scope
    /// * `InferenceError::IndexOutOfRange` if `value` is not less than the cardinality of `var`
    pub fn reduce(&mut self, var: &Variable, value: usize) -> Result<()> {
        let axis = self.var_index(var)?;

        let cardinality = self.table.len_of(nd::Axis(axis));
        if value >= cardinality {
            return Err(InferenceError::IndexOutOfRange { var: var.clone(), index: value, cardinality });
        }

        self.table = self.table.index_axis(nd::Axis(axis), value).to_owned();
        self.scope.shift_remove(var);

        trace!("reduced {} = {}, remaining scope [{}]", var, value, self.scope.iter().join(", "));
        Ok(())
    }


    /// Marginalize `var` out of the `Factor` in place.
    ///
    /// Defined in Koller & Friedman 9.3.1
    ///
    /// # Errors
    /// * `InferenceError::VariableNotFound` if `var` is not in the scope
    pub fn sum_over(&mut self, var: &Variable) -> Result<()> {
        let axis = self.var_index(var)?;

        self.table = self.table.sum_axis(nd::Axis(axis));
        self.scope.shift_remove(var);

        Ok(())
    }


    /// Divide every entry by the total mass, turning the `Factor` into a distribution.
    ///
    /// # Errors
    /// * `InferenceError::InvalidDistribution` if the total mass is zero or not finite. The
    ///   `Factor` is left unchanged.
    pub fn normalize(&mut self) -> Result<()> {
        let total = self.table.sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(InferenceError::InvalidDistribution(total));
        }

        self.table.mapv_inplace(|v| v / total);
        Ok(())
    }


    /// Product of this `Factor` and another `Factor`.
    ///
    /// Defined in Koller & Friedman Section 4.2.1
    ///
    /// The scope of the result is the union of both scopes, sorted by `Variable`, so `a * b` and
    /// `b * a` have the same layout. A `Variable` found in only one operand is broadcast over by
    /// the other. Every joint assignment of the union is visited, so the cost is the product of
    /// all the cardinalities in the union.
    ///
    /// # Returns
    /// A new `Factor` of scope union(self.scope(), other.scope())
    ///
    /// # Errors
    /// * `InferenceError::ShapeMismatch` if the operands disagree on the cardinality of a shared
    ///   `Variable`
    pub fn multiply(&self, other: &Factor) -> Result<Factor> {
        let scope: Vec<Variable> = self.scope
                                       .iter()
                                       .chain(other.scope.iter())
                                       .sorted()
                                       .dedup()
                                       .cloned()
                                       .collect();

        let mut shape = Vec::with_capacity(scope.len());
        for v in scope.iter() {
            let cardinality = match (self.cardinality(v), other.cardinality(v)) {
                (Some(a), Some(b)) if a != b => {
                    return Err(InferenceError::ShapeMismatch(format!(
                        "variable {} has cardinality {} in one factor and {} in the other",
                        v, a, b
                    )));
                },
                (Some(a), _) => a,
                (None, Some(b)) => b,
                (None, None) => unreachable!("{} came from one of the operands", v)
            };
            shape.push(cardinality);
        }

        // (axis in the product, axis in the operand) for each axis of each operand
        let lhs_axes: Vec<(usize, usize)> = project(&scope, self);
        let rhs_axes: Vec<(usize, usize)> = project(&scope, other);

        let mut lhs_idx = vec![0; self.scope.len()];
        let mut rhs_idx = vec![0; other.scope.len()];

        let mut tbl = Table::zeros(nd::IxDyn(&shape));
        for (assn, entry) in tbl.indexed_iter_mut() {
            for &(joint, own) in lhs_axes.iter() {
                lhs_idx[own] = assn[joint];
            }
            for &(joint, own) in rhs_axes.iter() {
                rhs_idx[own] = assn[joint];
            }

            *entry = self.table[nd::IxDyn(&lhs_idx)] * other.table[nd::IxDyn(&rhs_idx)];
        }

        Ok(Factor { scope: scope.into_iter().collect(), table: tbl })
    }

}


/// Map the axes of `factor` onto positions in the joint `scope`
fn project(scope: &[Variable], factor: &Factor) -> Vec<(usize, usize)> {
    scope.iter()
         .enumerate()
         .filter_map(|(joint, v)| factor.scope.get_index_of(v).map(|own| (joint, own)))
         .collect()
}


impl PartialEq for Factor {

    /// Two `Factor`s are equal if they have the same scope in the same axis order and equal tables
    fn eq(&self, other: &Factor) -> bool {
        self.scope.iter().eq(other.scope.iter()) && self.table == other.table
    }

}


impl fmt::Display for Factor {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "variables: [{}]", self.scope.iter().join(", "))?;
        writeln!(f, "table:")?;
        writeln!(f, "{}", self.table)?;
        write!(f, "sum: {:.8}", self.table.sum())
    }

}
