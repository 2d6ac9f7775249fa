//! Response classifier
//!
//! Looks only at the leading status token of a response; everything after
//! it is handed to the model and objective extractors.

use std::fmt;

use smtlink_core::{parse_sexpr, Dialect, ParseContext, Result, SymbolTable};
use tracing::debug;

use crate::model::{extract_bindings, Strictness};
use crate::normalize::{self, Normalizer};
use crate::objectives::extract_objectives;
use crate::result::{Model, SolverResult};

/// Interprets solver responses for one dialect.
pub struct Interpreter {
    normalizer: Box<dyn Normalizer>,
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter").finish_non_exhaustive()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl Interpreter {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            normalizer: normalize::for_dialect(dialect),
        }
    }

    /// Uses a custom normalization pass, e.g. for a solver with output
    /// quirks of its own.
    pub fn with_normalizer(normalizer: impl Normalizer + 'static) -> Self {
        Self {
            normalizer: Box::new(normalizer),
        }
    }

    /// Classifies one complete response.
    ///
    /// # Errors
    ///
    /// Returns a parse error for a `sat` model the grammar does not accept,
    /// an unreadable objective, or an ambiguous symbol.
    pub fn classify<S: AsRef<str>>(&self, table: &SymbolTable, lines: &[S]) -> Result<SolverResult> {
        let status = lines.first().map(|l| l.as_ref().trim());
        debug!(event = "classify", status = status.unwrap_or(""), lines = lines.len());
        let result = match status {
            Some("unsat") => SolverResult::Unsatisfiable,
            Some("timeout") => SolverResult::TimeOut,
            Some("unknown") => {
                SolverResult::Unknown(self.model(table, &lines[1..], Strictness::Lenient)?)
            }
            Some("sat") => {
                let model = self.model(table, &lines[1..], Strictness::Strict)?;
                if model.objectives_bounded() {
                    SolverResult::Satisfiable(model)
                } else {
                    SolverResult::SatExtField(model)
                }
            }
            _ => SolverResult::ProofError(lines.iter().map(|l| l.as_ref().to_string()).collect()),
        };
        Ok(result)
    }

    /// Reads every expression in `lines` into one model.
    fn model<S: AsRef<str>>(
        &self,
        table: &SymbolTable,
        lines: &[S],
        strictness: Strictness,
    ) -> Result<Model> {
        let mut model = Model::new();
        for text in group_expressions(lines) {
            let tree = match parse_sexpr(&text) {
                Ok(tree) => self.normalizer.normalize(tree),
                Err(e) if strictness == Strictness::Lenient => {
                    debug!(event = "unreadable_output", error = %e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            let ctx = ParseContext::new(&text, &tree);
            if tree.head() == Some("objectives") {
                for (name, value) in extract_objectives(table, ctx)? {
                    model.push_objective(name, value);
                }
            } else {
                for binding in extract_bindings(table, ctx, strictness)? {
                    model.bind(binding);
                }
            }
        }
        Ok(model)
    }
}

/// Classifies a response with the default SMT-LIB 2 interpreter.
///
/// ```
/// use smtlink_core::{Kind, NamedSymVar, SymbolTable, CW};
/// use smtlink_interpret::{classify, SolverResult};
///
/// let table = SymbolTable::new(vec![NamedSymVar::new(0, "x", Kind::Unbounded)]);
/// let result = classify(&table, &["sat", "(model (define-fun s0 () Int 0))"]).unwrap();
/// let SolverResult::Satisfiable(model) = result else { panic!() };
/// assert_eq!(model.value_of("x"), Some(&CW::unbounded(0)));
/// ```
pub fn classify<S: AsRef<str>>(table: &SymbolTable, lines: &[S]) -> Result<SolverResult> {
    Interpreter::default().classify(table, lines)
}

/// Joins output lines into the texts of complete S-expressions.
///
/// A model may span many lines; parentheses inside string literals,
/// `|quoted|` symbols and comments do not count.
pub(crate) fn group_expressions<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut groups = Vec::new();
    let mut current = String::new();
    let mut depth: i64 = 0;
    let mut in_string = false;
    let mut in_quoted = false;

    for line in lines {
        let line = line.as_ref();
        for c in line.chars() {
            match c {
                '"' if !in_quoted => in_string = !in_string,
                '|' if !in_string => in_quoted = !in_quoted,
                ';' if !in_string && !in_quoted => break,
                '(' if !in_string && !in_quoted => depth += 1,
                ')' if !in_string && !in_quoted => depth -= 1,
                _ => {}
            }
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
        if depth <= 0 && !in_string && !in_quoted {
            if !current.trim().is_empty() {
                groups.push(std::mem::take(&mut current));
            }
            current.clear();
            depth = 0;
        }
    }
    if !current.trim().is_empty() {
        groups.push(current);
    }
    groups
}
