//! Defines the `FactorCollection`, a Markovian view of a graphical model as a bag of `Factor`s.
//!
//! A Bayesian network enters as one `Factor` per conditional probability distribution; a Markov
//! network enters as one `Factor` per clique potential. Either way, the collection is the unit
//! that evidence is applied to and that variable elimination consumes.

mod collection;

pub use self::collection::FactorCollection;
