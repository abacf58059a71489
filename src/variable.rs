//! Definition of the variable module
//!
//! A `Variable` names a discrete random variable in a Probabilistic Graphical Model. The number
//! of values a `Variable` takes is not stored here; it is the length of the `Variable`'s axis in
//! every `Factor` that mentions it.

use indexmap::IndexMap;

use std::fmt;
use std::sync::Arc;

/// An opaque, totally ordered identifier for a random variable.
///
/// `Variable`s compare by name. This order is the canonical axis order of every `Factor` product,
/// so the result of a join does not depend on the order of its operands.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    /// The name of the `Variable`
    name: Arc<str>
}

impl Variable {

    /// Construct a new `Variable` with the given name
    pub fn new(name: &str) -> Variable {
        Variable { name: Arc::from(name) }
    }

    /// Get the name of the `Variable`
    pub fn name(&self) -> &str {
        &self.name
    }

}

impl<'a> From<&'a str> for Variable {
    fn from(name: &'a str) -> Self {
        Variable::new(name)
    }
}

impl From<String> for Variable {
    fn from(name: String) -> Self {
        Variable { name: Arc::from(name) }
    }
}

impl fmt::Display for Variable {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }

}


/// A (possibly partial) assignment of value indices to `Variable`s.
///
/// Used both as evidence when conditioning a model and to look up individual entries of a
/// `Factor`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    values: IndexMap<Variable, usize>
}

impl Assignment {

    /// Construct an empty `Assignment`
    pub fn new() -> Self {
        Assignment { values: IndexMap::new() }
    }

    /// Assign `value` to `var`, replacing any previous value
    pub fn set(&mut self, var: &Variable, value: usize) {
        self.values.insert(var.clone(), value);
    }

    /// Get the value assigned to `var`, if any
    pub fn get(&self, var: &Variable) -> Option<&usize> {
        self.values.get(var)
    }

    /// The number of assigned `Variable`s
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the `(Variable, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &usize)> {
        self.values.iter()
    }

}

impl FromIterator<(Variable, usize)> for Assignment {

    fn from_iter<I: IntoIterator<Item = (Variable, usize)>>(iter: I) -> Self {
        Assignment { values: iter.into_iter().collect() }
    }

}
