//! smtlink Core - Value, kind and token-tree types for talking to SMT solvers
//!
//! This crate provides the fundamental types shared by the emitter and the
//! response interpreter:
//! - [`Kind`] tags and concrete words ([`CW`]) paired with them
//! - Extended values ([`ExtCW`]) for optimization bounds
//! - The per-session symbol table ([`SymbolTable`])
//! - Token trees ([`SExpr`]) and a reader producing them from solver text
//! - The error taxonomy shared by every crate in the workspace

pub mod dialect;
pub mod error;
pub mod kind;
pub mod sexpr;
pub mod symbol;
pub mod value;

#[cfg(test)]
mod kind_tests;

pub use dialect::Dialect;
pub use error::{Feature, ParseContext, ParseFailure, Result, SmtError};
pub use kind::Kind;
pub use sexpr::{parse_sexpr, Literal, SExpr};
pub use symbol::{NamedSymVar, SymId, SymbolTable};
pub use value::{AlgReal, CwValue, ExtCW, CW};
