//! The emitter: programs to solver text, dispatched on the dialect.

use std::collections::BTreeMap;

use smtlink_config::{InterfaceConfig, SolverCapabilities};
use smtlink_core::{Dialect, Result};
use tracing::debug;

use crate::commands;
use crate::gate::{self, ProgramFeatures};
use crate::incremental::IncrementalSession;
use crate::program::{OptimizeStyle, SymProgram};
use crate::smtlib2;

/// Turns symbolic programs into query text for one configured solver.
///
/// Output is a pure function of the program and the configuration: the same
/// inputs always produce byte-identical text.
///
/// # Examples
///
/// ```
/// use smtlink_config::InterfaceConfig;
/// use smtlink_core::{Kind, NamedSymVar, SymId, CW};
/// use smtlink_emit::{Emitter, SymOp, SymProgram};
///
/// let program = SymProgram::new(SymId(2))
///     .exists(NamedSymVar::new(0, "x", Kind::word(8)))
///     .constant(SymId(1), CW::integer(Kind::word(8), 3))
///     .assign(SymId(2), Kind::Bool, SymOp::LessThan, [SymId(0), SymId(1)]);
///
/// let text = Emitter::new(&InterfaceConfig::default()).program(&program).unwrap();
/// assert!(text.contains("(declare-fun s0 () (_ BitVec 8))"));
/// assert!(text.contains("(define-fun s2 () Bool (bvult s0 s1))"));
/// assert!(text.ends_with("(assert s2)\n"));
/// ```
#[derive(Debug, Clone)]
pub struct Emitter {
    pub(crate) dialect: Dialect,
    pub(crate) capabilities: SolverCapabilities,
    pub(crate) logic: Option<String>,
    pub(crate) produce_models: bool,
    pub(crate) timeout_ms: Option<u64>,
    pub(crate) options: BTreeMap<String, String>,
    pub(crate) sentinel: String,
}

fn join(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

impl Emitter {
    pub fn new(config: &InterfaceConfig) -> Self {
        Self {
            dialect: config.dialect,
            capabilities: config.capabilities(),
            logic: config.logic.clone(),
            produce_models: config.produce_models,
            timeout_ms: config.timeout_ms,
            options: config.options.clone(),
            sentinel: config.sentinel.clone(),
        }
    }

    pub fn capabilities(&self) -> &SolverCapabilities {
        &self.capabilities
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Renders `program` after checking it against the solver.
    ///
    /// The text declares and asserts everything but does not run
    /// `check-sat`; see [`Emitter::query`] for a complete query.
    ///
    /// # Errors
    ///
    /// Returns a capability error from the gate, or an error for operations
    /// with no rendering at their kind and for undeclared words.
    pub fn program(&self, program: &SymProgram) -> Result<String> {
        let features = ProgramFeatures::of(program);
        gate::check(&features, &self.capabilities)?;
        let lines = match self.dialect {
            Dialect::Smtlib2 => smtlib2::program(self, program, &features)?,
        };
        debug!(
            event = "emit_program",
            dialect = %self.dialect,
            inputs = program.inputs.len(),
            assignments = program.assignments.len(),
            lines = lines.len(),
        );
        Ok(join(lines))
    }

    /// A complete one-shot query: the program followed by `check-sat` and
    /// the commands that print the model and objective values.
    ///
    /// Independent objectives get one `push`/`pop` block each and Pareto
    /// optimization one block per front, with blocks separated by an echo
    /// of the sentinel. The response then holds
    /// [`SymProgram::expected_models`] models.
    pub fn query(&self, program: &SymProgram) -> Result<String> {
        let mut text = self.program(program)?;
        let mut tail = Vec::new();
        let objectives = !program.objectives.is_empty();
        let readback = |tail: &mut Vec<String>| {
            tail.push(commands::check_sat());
            if objectives {
                tail.push(commands::get_objectives());
            }
            let inputs = smtlib2::model_inputs(program);
            if !inputs.is_empty() {
                tail.push(commands::get_value(&inputs));
            }
        };

        match program.optimize_style {
            OptimizeStyle::Independent if objectives => {
                for (i, objective) in program.objectives.iter().enumerate() {
                    if i > 0 {
                        tail.push(commands::echo(&self.sentinel));
                    }
                    tail.push(commands::push(1));
                    tail.extend(smtlib2::objective_directives(std::slice::from_ref(
                        objective,
                    )));
                    readback(&mut tail);
                    tail.push(commands::pop(1));
                }
            }
            OptimizeStyle::Pareto { .. } if objectives => {
                for i in 0..program.expected_models() {
                    if i > 0 {
                        tail.push(commands::echo(&self.sentinel));
                    }
                    readback(&mut tail);
                }
            }
            _ => readback(&mut tail),
        }
        text.push_str(&join(tail));
        Ok(text)
    }

    /// Starts an interactive session that declares words as they appear.
    pub fn incremental(&self) -> IncrementalSession<'_> {
        IncrementalSession::new(self)
    }
}
