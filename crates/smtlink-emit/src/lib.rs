//! smtlink Emit - Capability gate and query-text emitter
//!
//! Turns a fully elaborated [`SymProgram`] into text a solver can run:
//! - [`gate`] refuses programs needing features the solver lacks
//! - [`Emitter`] writes one-shot programs and complete queries
//! - [`IncrementalSession`] writes declarations as they appear
//! - [`commands`] covers individual interactive commands

pub mod commands;
pub mod gate;
pub mod incremental;
pub mod literal;
pub mod program;

mod emit;
mod ops;
mod smtlib2;


pub use emit::Emitter;
pub use gate::ProgramFeatures;
pub use incremental::{IncrementalDelta, IncrementalSession};
pub use literal::cw_literal;
pub use program::{
    ArrayDecl, Assignment, Axiom, Input, Objective, OptimizeStyle, Polarity, Quantifier,
    SortDecl, SymOp, SymProgram, Table, UninterpretedFn,
};
