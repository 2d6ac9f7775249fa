//! Per-dialect normalization of solver output.
//!
//! Solvers decorate values with wrappers that carry no meaning for the
//! grammar in [`crate::model`] and [`crate::ext`]. A [`Normalizer`] removes
//! them before extraction, so new solver quirks are handled here without
//! touching the grammar.

use smtlink_core::{Dialect, SExpr};

/// Rewrites a token tree into the shape the extraction grammar expects.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, expr: SExpr) -> SExpr;
}

/// Normalizer for SMT-LIB 2 solvers.
///
/// - `(to_real n)` becomes `n`
/// - `(lambda (binders) body)`, as printed for array-valued bindings,
///   becomes its last argument
///
/// Applications whose children changed are folded again, so
/// `(- (to_real 3))` reads as the atom `-3`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Smtlib2Normalizer;

impl Normalizer for Smtlib2Normalizer {
    fn normalize(&self, expr: SExpr) -> SExpr {
        let mut items = match expr {
            SExpr::App(items) => items,
            atom => return atom,
        };
        // Position of the argument that replaces the whole application.
        let unwrap = match items.first().and_then(SExpr::as_symbol) {
            Some("to_real") if items.len() == 2 => Some(1),
            Some("lambda" | "LAMBDA") if items.len() >= 2 => Some(items.len() - 1),
            _ => None,
        };
        match unwrap {
            Some(at) => self.normalize(items.swap_remove(at)),
            None => SExpr::App(items.into_iter().map(|e| self.normalize(e)).collect()).refold(),
        }
    }
}

/// The normalizer for `dialect`.
pub fn for_dialect(dialect: Dialect) -> Box<dyn Normalizer> {
    match dialect {
        Dialect::Smtlib2 => Box::new(Smtlib2Normalizer),
    }
}
