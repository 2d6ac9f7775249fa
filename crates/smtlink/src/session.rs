//! Session entry point that ties emission and interpretation together.

use std::path::Path;

use smtlink_config::{ConfigError, InterfaceConfig};
use smtlink_core::{SmtError, SymbolTable};
use smtlink_emit::{Emitter, IncrementalSession, SymProgram};
use smtlink_interpret::{Interpreter, SolverResult};
use tracing::{debug, info};

/// Query text for one program, with what is needed to read its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedQuery {
    /// Text to feed the solver.
    pub text: String,
    /// Symbols the answer can mention.
    pub table: SymbolTable,
    /// Number of models the answer holds.
    pub expected_models: usize,
}

/// One configured solver: emits queries for it and interprets its output.
///
/// The session does not run the solver; callers own the process and pass
/// its output back line by line.
#[derive(Debug)]
pub struct SolverSession {
    config: InterfaceConfig,
    emitter: Emitter,
    interpreter: Interpreter,
}

impl SolverSession {
    /// Creates a session after validating `config`.
    pub fn new(config: InterfaceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            event = "session_start",
            solver = %config.capabilities().name,
            dialect = %config.dialect,
        );
        Ok(Self {
            emitter: Emitter::new(&config),
            interpreter: Interpreter::new(config.dialect),
            config,
        })
    }

    /// Creates a session from a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::new(InterfaceConfig::load(path)?)
    }

    pub fn config(&self) -> &InterfaceConfig {
        &self.config
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    /// Renders the complete query for `program`.
    pub fn prepare(&self, program: &SymProgram) -> Result<PreparedQuery, SmtError> {
        let text = self.emitter.query(program)?;
        let query = PreparedQuery {
            text,
            table: program.symbol_table(),
            expected_models: program.expected_models(),
        };
        debug!(
            event = "query_prepared",
            symbols = query.table.len(),
            expected_models = query.expected_models,
        );
        Ok(query)
    }

    /// Interprets the complete solver output for `query`, one result per
    /// expected model.
    pub fn interpret<S: AsRef<str>>(
        &self,
        query: &PreparedQuery,
        lines: &[S],
    ) -> Result<Vec<SolverResult>, SmtError> {
        if query.expected_models == 1 {
            return Ok(vec![self.interpreter.classify(&query.table, lines)?]);
        }
        self.interpreter.split_models(
            &query.table,
            query.expected_models,
            lines,
            &self.config.sentinel,
        )
    }

    /// Interprets output expected to hold a single model.
    pub fn interpret_one<S: AsRef<str>>(
        &self,
        query: &PreparedQuery,
        lines: &[S],
    ) -> Result<SolverResult, SmtError> {
        self.interpreter.classify(&query.table, lines)
    }

    /// Starts an interactive session on the configured solver.
    pub fn incremental(&self) -> IncrementalSession<'_> {
        self.emitter.incremental()
    }
}
