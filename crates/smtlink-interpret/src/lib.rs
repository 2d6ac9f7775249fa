//! smtlink Interpret - Turning solver output into typed results
//!
//! Reads what a solver printed back into the value types of `smtlink-core`:
//! - [`Interpreter`] classifies a response by its status line
//! - [`extract_bindings`] and [`extract_objectives`] read models and bounds
//! - [`extended_value`] handles infinities, epsilons and intervals
//! - [`split_models`] cuts a multi-model response at its sentinel lines
//!
//! Trees are passed through a dialect [`Normalizer`] before extraction.

pub mod classify;
pub mod decode;
pub mod ext;
pub mod model;
pub mod multi;
pub mod normalize;
pub mod objectives;
pub mod result;

#[cfg(test)]
mod tests;

pub use classify::{classify, Interpreter};
pub use decode::decode_value;
pub use ext::extended_value;
pub use model::{extract_bindings, Strictness};
pub use multi::split_models;
pub use normalize::{Normalizer, Smtlib2Normalizer};
pub use objectives::extract_objectives;
pub use result::{Binding, Model, SolverResult};
