//! Multi-model splitter
//!
//! Queries that read back several models (independent objectives, Pareto
//! fronts) print a sentinel line between them. The first chunk starts with
//! the status of the run; later chunks that carry no status of their own
//! inherit it.

use smtlink_core::{Result, SmtError, SymbolTable};
use tracing::debug;

use crate::classify::Interpreter;
use crate::result::SolverResult;

const STATUS_TOKENS: [&str; 4] = ["sat", "unsat", "unknown", "timeout"];

fn has_status(chunk: &[&str]) -> bool {
    chunk
        .first()
        .is_some_and(|line| STATUS_TOKENS.contains(&line.trim()))
}

impl Interpreter {
    /// Splits a response into `expected` results on lines equal to
    /// `sentinel`.
    ///
    /// A response that does not start with `sat` or `unknown` is classified
    /// once and repeated `expected` times.
    ///
    /// # Errors
    ///
    /// [`SmtError::CountMismatch`] when the number of chunks differs from
    /// `expected` or the sentinel consumed the status line, or the first
    /// error of classifying any chunk.
    pub fn split_models<S: AsRef<str>>(
        &self,
        table: &SymbolTable,
        expected: usize,
        lines: &[S],
        sentinel: &str,
    ) -> Result<Vec<SolverResult>> {
        let status = lines.first().map(|l| l.as_ref().trim());
        if !matches!(status, Some("sat" | "unknown")) {
            let result = self.classify(table, lines)?;
            debug!(event = "split_degenerate", expected, %result);
            return Ok(vec![result; expected]);
        }

        let mut chunks: Vec<Vec<&str>> = vec![Vec::new()];
        for line in lines {
            let line = line.as_ref();
            if line == sentinel {
                chunks.push(Vec::new());
            } else if let Some(chunk) = chunks.last_mut() {
                chunk.push(line);
            }
        }
        let mismatch = |actual| SmtError::CountMismatch {
            expected,
            actual,
            raw: lines
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join("\n"),
        };
        if chunks.len() != expected {
            return Err(mismatch(chunks.len()));
        }
        // A sentinel equal to the status line leaves no model with a status.
        let Some(&preamble) = chunks.first().and_then(|chunk| chunk.first()) else {
            return Err(mismatch(0));
        };
        debug!(event = "split_models", models = expected);

        chunks
            .into_iter()
            .map(|mut chunk| {
                if !has_status(&chunk) {
                    chunk.insert(0, preamble);
                }
                self.classify(table, &chunk)
            })
            .collect()
    }
}

/// Splits a multi-model response with the default SMT-LIB 2 interpreter.
pub fn split_models<S: AsRef<str>>(
    table: &SymbolTable,
    expected: usize,
    lines: &[S],
    sentinel: &str,
) -> Result<Vec<SolverResult>> {
    Interpreter::default().split_models(table, expected, lines, sentinel)
}
