//! Incremental emission for push/assert/pop style interaction.

use std::collections::BTreeSet;

use smtlink_core::{Dialect, NamedSymVar, Result, SymId, CW};
use tracing::{debug, trace};

use crate::commands;
use crate::emit::Emitter;
use crate::gate::{self, ProgramFeatures};
use crate::program::{ArrayDecl, Assignment, SortDecl, Table, UninterpretedFn};
use crate::smtlib2::{self, Scope};

/// Everything introduced since the previous fragment.
///
/// Inputs of an incremental session are always existential.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncrementalDelta {
    pub sorts: Vec<SortDecl>,
    pub inputs: Vec<NamedSymVar>,
    pub constants: Vec<(SymId, CW)>,
    pub tables: Vec<Table>,
    pub arrays: Vec<ArrayDecl>,
    pub functions: Vec<UninterpretedFn>,
    pub assignments: Vec<Assignment>,
    pub assertions: Vec<SymId>,
}

impl IncrementalDelta {
    fn features(&self) -> ProgramFeatures {
        let mut kinds = BTreeSet::new();
        kinds.extend(self.sorts.iter().map(SortDecl::kind));
        kinds.extend(self.inputs.iter().map(|v| v.kind.clone()));
        kinds.extend(self.constants.iter().map(|(_, cw)| cw.kind().clone()));
        kinds.extend(self.assignments.iter().map(|a| a.kind.clone()));
        for table in &self.tables {
            kinds.insert(table.index_kind.clone());
            kinds.insert(table.elem_kind.clone());
        }
        for array in &self.arrays {
            kinds.insert(array.index_kind.clone());
            kinds.insert(array.elem_kind.clone());
        }
        for function in &self.functions {
            kinds.extend(function.args.iter().cloned());
            kinds.insert(function.result.clone());
        }
        let uninterpreted_sorts =
            !self.sorts.is_empty() || kinds.iter().any(|k| k.is_uninterpreted());
        ProgramFeatures {
            kinds,
            uninterpreted_sorts,
            ..ProgramFeatures::default()
        }
    }

    fn declared_ids(&self) -> impl Iterator<Item = SymId> + '_ {
        self.inputs
            .iter()
            .map(|v| v.id)
            .chain(self.constants.iter().map(|(id, _)| *id))
            .chain(self.assignments.iter().map(|a| a.id))
    }
}

/// A solver conversation in which words are declared as they are created.
///
/// Words declared after a [`push`](Self::push) are forgotten again by the
/// matching [`pop`](Self::pop), mirroring the solver's assertion stack.
#[derive(Debug)]
pub struct IncrementalSession<'e> {
    emitter: &'e Emitter,
    scope: Scope,
    // Ids declared at each assertion level; the base level is never popped.
    levels: Vec<Vec<SymId>>,
}

impl<'e> IncrementalSession<'e> {
    pub(crate) fn new(emitter: &'e Emitter) -> Self {
        Self {
            emitter,
            scope: Scope::default(),
            levels: vec![Vec::new()],
        }
    }

    /// Number of open `push` levels.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Renders `delta`, gated against the solver's capabilities.
    ///
    /// On error nothing is declared, so the session can continue with a
    /// corrected delta.
    pub fn fragment(&mut self, delta: &IncrementalDelta) -> Result<String> {
        gate::check(&delta.features(), &self.emitter.capabilities)?;
        let mut scope = self.scope.clone();
        let lines = match self.emitter.dialect {
            Dialect::Smtlib2 => smtlib2::fragment(delta, &mut scope)?,
        };
        self.scope = scope;
        if let Some(level) = self.levels.last_mut() {
            level.extend(delta.declared_ids());
        }
        trace!(event = "emit_fragment", depth = self.depth(), lines = lines.len());
        let mut text = lines.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        Ok(text)
    }

    pub fn push(&mut self) -> String {
        self.levels.push(Vec::new());
        debug!(event = "push", depth = self.depth());
        commands::push(1)
    }

    /// Closes the innermost level; `None` at the base level.
    pub fn pop(&mut self) -> Option<String> {
        if self.levels.len() == 1 {
            return None;
        }
        for id in self.levels.pop().into_iter().flatten() {
            self.scope.forget(id);
        }
        debug!(event = "pop", depth = self.depth());
        Some(commands::pop(1))
    }
}
