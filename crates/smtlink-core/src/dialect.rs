//! Query-language dialects

use std::fmt;

/// A textual query-language variant targeted by the emitter and expected
/// back from the solver.
///
/// Only SMT-LIB 2 exists today. Emission and output normalization both
/// dispatch on this tag, so a new dialect is added here and then handled at
/// those two dispatch points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Dialect {
    /// SMT-LIB version 2.
    #[default]
    Smtlib2,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Smtlib2 => write!(f, "SMT-LIB2"),
        }
    }
}
