//! Token trees for solver output
//!
//! Solver responses are S-expressions. The reader in this module turns one
//! complete response into an [`SExpr`] whose atoms are already classified:
//! numerals, bit-vector literals, rationals, floating-point bit patterns and
//! `root-obj` numbers are folded into [`Literal`]s so the interpreters only
//! ever match on typed values.

mod reader;


use std::fmt;

use num_bigint::BigInt;
use num_traits::Signed;

use crate::value::AlgReal;

pub use reader::{parse_sexpr, parse_sexprs};

/// A classified atom.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A simple or `|quoted|` symbol (bars removed).
    Symbol(String),
    /// A `:keyword`, colon included.
    Keyword(String),
    /// An integer. `width` is present for bit-vector literals.
    Int { value: BigInt, width: Option<u32> },
    /// A real number.
    Real(AlgReal),
    /// A single precision float given as an `fp` bit pattern or special value.
    Float(f32),
    /// A double precision float given as an `fp` bit pattern or special value.
    Double(f64),
    /// A string literal, unescaped.
    Str(String),
}

/// A token tree: an atom or an application of an ordered node sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum SExpr {
    Atom(Literal),
    App(Vec<SExpr>),
}

impl SExpr {
    pub fn symbol(name: impl Into<String>) -> Self {
        SExpr::Atom(Literal::Symbol(name.into()))
    }

    /// An integer atom without a width.
    pub fn int(value: impl Into<BigInt>) -> Self {
        SExpr::Atom(Literal::Int {
            value: value.into(),
            width: None,
        })
    }

    pub fn app(items: Vec<SExpr>) -> Self {
        SExpr::App(items)
    }

    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            SExpr::Atom(Literal::Symbol(s)) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_symbol(&self, name: &str) -> bool {
        self.as_symbol() == Some(name)
    }

    #[must_use]
    pub fn as_app(&self) -> Option<&[SExpr]> {
        match self {
            SExpr::App(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            SExpr::Atom(lit) => Some(lit),
            _ => None,
        }
    }

    /// The head symbol of an application, e.g. `model` for `(model ...)`.
    #[must_use]
    pub fn head(&self) -> Option<&str> {
        self.as_app()
            .and_then(|items| items.first())
            .and_then(SExpr::as_symbol)
    }

    /// Folds an application into a literal atom the way the reader does,
    /// e.g. `(- 3)` into `-3`. Rewrites that replace children call this to
    /// expose forms the reader could not fold.
    #[must_use]
    pub fn refold(self) -> Self {
        match self {
            SExpr::App(items) => reader::fold(items),
            atom => atom,
        }
    }
}

fn write_integer(f: &mut fmt::Formatter<'_>, value: &BigInt) -> fmt::Result {
    if value.is_negative() {
        write!(f, "(- {})", value.abs())
    } else {
        write!(f, "{value}")
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Symbol(s) | Literal::Keyword(s) => write!(f, "{s}"),
            Literal::Int { value, width: None } => write_integer(f, value),
            Literal::Int {
                value,
                width: Some(w),
            } => write!(f, "(_ bv{value} {w})"),
            Literal::Real(r) => write!(f, "{}", r.to_smtlib()),
            Literal::Float(x) => write!(f, "{x:?}f"),
            Literal::Double(x) => write!(f, "{x:?}"),
            Literal::Str(s) => write!(f, "\"{}\"", s.replace('"', "\"\"")),
        }
    }
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SExpr::Atom(lit) => write!(f, "{lit}"),
            SExpr::App(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}
