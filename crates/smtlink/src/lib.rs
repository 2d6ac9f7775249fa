//! smtlink - Talking to SMT solvers in their own language
//!
//! Build a [`SymProgram`], turn it into query text for the configured
//! solver, hand the text to the solver process, and read its output back
//! into typed [`SolverResult`]s.
//!
//! # Example
//!
//! ```rust
//! use smtlink::prelude::*;
//!
//! let session = SolverSession::new(InterfaceConfig::default()).unwrap();
//! let program = SymProgram::new(SymId(2))
//!     .exists(NamedSymVar::new(0, "x", Kind::word(8)))
//!     .constant(SymId(1), CW::integer(Kind::word(8), 3))
//!     .assign(SymId(2), Kind::Bool, SymOp::LessThan, [SymId(0), SymId(1)]);
//!
//! let query = session.prepare(&program).unwrap();
//! assert!(query.text.ends_with("(get-value (s0))\n"));
//!
//! // What z3 prints for that query.
//! let result = session.interpret_one(&query, &["sat", "((s0 #x02))"]).unwrap();
//! let model = result.model().unwrap();
//! assert_eq!(model.value_of("x"), Some(&CW::integer(Kind::word(8), 2)));
//! ```

// Value and kind types
pub use smtlink_core::{
    AlgReal, CwValue, Dialect, ExtCW, Feature, Kind, NamedSymVar, ParseFailure, SmtError, SymId,
    SymbolTable, CW,
};

// Configuration
pub use smtlink_config::{
    ConfigError, InterfaceConfig, SolverCapabilities, SolverPreset, SolverSpec, DEFAULT_SENTINEL,
};

// Program model and emission
pub use smtlink_emit::{
    ArrayDecl, Emitter, IncrementalDelta, IncrementalSession, Objective, OptimizeStyle, Polarity,
    SymOp, SymProgram, Table,
};

// Interpretation
pub use smtlink_interpret::{Interpreter, Model, SolverResult, Strictness};

mod session;

#[cfg(test)]
mod tests;

pub use session::{PreparedQuery, SolverSession};

pub mod prelude {
    pub use super::{
        ExtCW, InterfaceConfig, Kind, Model, NamedSymVar, OptimizeStyle, SolverPreset,
        SolverResult, SolverSession, SymId, SymOp, SymProgram, CW,
    };
}
