//! Typed solver results.

use std::fmt;

use smtlink_core::{ExtCW, SymId, CW};

/// A model value bound to a table variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub id: SymId,
    pub name: String,
    pub value: CW,
}

/// Variable bindings and objective values of one model.
///
/// Bindings are kept sorted by id with at most one binding per id;
/// objectives stay in the order the solver reported them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    bindings: Vec<Binding>,
    objectives: Vec<(String, ExtCW)>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding, replacing an earlier one for the same id.
    pub fn bind(&mut self, binding: Binding) {
        match self.bindings.binary_search_by_key(&binding.id, |b| b.id) {
            Ok(at) => self.bindings[at] = binding,
            Err(at) => self.bindings.insert(at, binding),
        }
    }

    pub fn push_objective(&mut self, name: impl Into<String>, value: ExtCW) {
        self.objectives.push((name.into(), value));
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn objectives(&self) -> &[(String, ExtCW)] {
        &self.objectives
    }

    pub fn get(&self, id: SymId) -> Option<&CW> {
        self.bindings
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|at| &self.bindings[at].value)
    }

    /// Value of the variable with display name `name`.
    pub fn value_of(&self, name: &str) -> Option<&CW> {
        self.bindings
            .iter()
            .find(|b| b.name == name)
            .map(|b| &b.value)
    }

    pub fn objective(&self, name: &str) -> Option<&ExtCW> {
        self.objectives
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty() && self.objectives.is_empty()
    }

    /// True when every objective value is an ordinary number.
    pub fn objectives_bounded(&self) -> bool {
        self.objectives.iter().all(|(_, v)| v.is_bounded())
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.bindings {
            writeln!(f, "  {} = {} :: {}", b.name, b.value, b.value.kind())?;
        }
        for (name, value) in &self.objectives {
            writeln!(f, "  {name} -> {value}")?;
        }
        Ok(())
    }
}

/// The outcome of one query.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverResult {
    Unsatisfiable,
    /// The solver gave up; the model holds whatever it printed.
    Unknown(Model),
    Satisfiable(Model),
    /// Satisfiable, with at least one objective at an extended value such
    /// as an infinity or an epsilon-offset bound.
    SatExtField(Model),
    TimeOut,
    /// Output this layer does not interpret, verbatim.
    ProofError(Vec<String>),
}

impl SolverResult {
    pub fn model(&self) -> Option<&Model> {
        match self {
            SolverResult::Unknown(m) | SolverResult::Satisfiable(m) | SolverResult::SatExtField(m) => {
                Some(m)
            }
            _ => None,
        }
    }

    pub fn is_sat(&self) -> bool {
        matches!(
            self,
            SolverResult::Satisfiable(_) | SolverResult::SatExtField(_)
        )
    }
}

impl fmt::Display for SolverResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverResult::Unsatisfiable => writeln!(f, "Unsatisfiable"),
            SolverResult::Unknown(m) => write!(f, "Unknown\n{m}"),
            SolverResult::Satisfiable(m) => write!(f, "Satisfiable. Model:\n{m}"),
            SolverResult::SatExtField(m) => {
                write!(f, "Satisfiable in an extension field. Model:\n{m}")
            }
            SolverResult::TimeOut => writeln!(f, "Timeout"),
            SolverResult::ProofError(lines) => {
                writeln!(f, "Unexpected solver output:")?;
                for line in lines {
                    writeln!(f, "  {line}")?;
                }
                Ok(())
            }
        }
    }
}
