//! Error types for smtlink

use std::fmt;

use thiserror::Error;

use crate::sexpr::SExpr;

/// Main error type for smtlink operations.
///
/// Every variant is terminal for the query that produced it; nothing in this
/// workspace retries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SmtError {
    /// The program needs a feature the chosen solver does not declare.
    #[error("Given problem needs {feature}, which is not supported by the chosen solver: {solver}")]
    Capability { feature: Feature, solver: String },

    /// Objectives that quantify universally over their own inputs.
    #[error(
        "Objective(s) {} depend on universally quantified inputs, which {solver} cannot optimize directly",
        .objectives.join(", ")
    )]
    UniversalObjectives {
        objectives: Vec<String>,
        solver: String,
    },

    /// Solver output could not be decoded.
    #[error("Cannot decode solver output: {reason}\n  line:   {line}\n  parsed: {tree}")]
    Parse {
        line: String,
        tree: String,
        reason: ParseFailure,
    },

    /// More than one symbol table entry claims the same solver symbol.
    #[error("Solver symbol {symbol} is ambiguous, it matches: {}", .matches.join(", "))]
    Ambiguity {
        symbol: String,
        matches: Vec<String>,
    },

    /// A multi-model response did not contain the expected number of models.
    #[error("Expected {expected} models, received {actual}. Solver output:\n{raw}")]
    CountMismatch {
        expected: usize,
        actual: usize,
        raw: String,
    },

    /// Solver text is not a well-formed token tree.
    #[error("Malformed solver text at offset {offset}: {message}\n  text: {text}")]
    Reader {
        offset: usize,
        message: String,
        text: String,
    },

    /// A value was paired with a kind it cannot inhabit.
    #[error("Value {value} does not inhabit kind {kind}")]
    KindMismatch { kind: String, value: String },

    /// The emitter has no rendering for an operation at this kind.
    #[error("Operation {op} is not supported at kind {kind}")]
    UnsupportedOp { op: String, kind: String },

    /// A program refers to a symbol it never declared.
    #[error("Symbol {0} is used but never declared")]
    UndeclaredSymbol(String),
}

/// Solver features checked by the capability gate, in gate order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    /// Mathematical (unbounded) integers.
    UnboundedIntegers,
    /// Algebraic reals.
    Reals,
    /// IEEE-754 single or double precision floats.
    FloatingPoint,
    /// Quantified formulas.
    Quantifiers,
    /// Uninterpreted (user declared) sorts.
    UninterpretedSorts,
    /// Optimization directives.
    Optimization,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Feature::UnboundedIntegers => "unbounded integers",
            Feature::Reals => "algebraic reals",
            Feature::FloatingPoint => "floating-point numbers",
            Feature::Quantifiers => "quantifiers",
            Feature::UninterpretedSorts => "uninterpreted sorts",
            Feature::Optimization => "optimization routines",
        };
        f.write_str(text)
    }
}

/// Why a token tree could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// The root of the tree is not the expected application.
    UnexpectedRoot { expected: &'static str },
    /// A binding or item has a shape the grammar does not know.
    UnrecognizedShape { item: String },
    /// A literal does not fit the kind of the variable it is bound to.
    KindMismatch { kind: String, item: String },
    /// A rational was supplied for an integer-kinded variable but is not whole.
    NotIntegral { item: String },
    /// A symbol is not one of the literals of an enumerated sort.
    UnknownSortLiteral { sort: String, literal: String },
    /// An extended (optimization bound) value has an unknown shape.
    UnrecognizedExtended { item: String },
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::UnexpectedRoot { expected } => {
                write!(f, "expected an application headed by `{expected}`")
            }
            ParseFailure::UnrecognizedShape { item } => {
                write!(f, "unrecognized binding shape: {item}")
            }
            ParseFailure::KindMismatch { kind, item } => {
                write!(f, "value {item} does not fit kind {kind}")
            }
            ParseFailure::NotIntegral { item } => {
                write!(f, "non-integral value {item} for an integer variable")
            }
            ParseFailure::UnknownSortLiteral { sort, literal } => {
                write!(f, "{literal} is not a literal of sort {sort}")
            }
            ParseFailure::UnrecognizedExtended { item } => {
                write!(f, "unrecognized extended value: {item}")
            }
        }
    }
}

/// The raw line and parsed tree an extraction is working on, carried so
/// failures can report both.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    pub line: &'a str,
    pub tree: &'a SExpr,
}

impl<'a> ParseContext<'a> {
    pub fn new(line: &'a str, tree: &'a SExpr) -> Self {
        Self { line, tree }
    }

    /// Builds the fatal error for this line.
    pub fn fail(&self, reason: ParseFailure) -> SmtError {
        SmtError::Parse {
            line: self.line.to_string(),
            tree: self.tree.to_string(),
            reason,
        }
    }
}

/// Result type alias for smtlink operations
pub type Result<T> = std::result::Result<T, SmtError>;
