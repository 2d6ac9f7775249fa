//! SMT-LIB 2 rendering of programs and incremental fragments.

use std::collections::{BTreeMap, BTreeSet};

use smtlink_core::{CwValue, Kind, NamedSymVar, Result, SmtError, SymId, CW};

use crate::commands;
use crate::emit::Emitter;
use crate::gate::ProgramFeatures;
use crate::incremental::IncrementalDelta;
use crate::literal::{cw_literal, string_literal, symbol};
use crate::ops;
use crate::program::{
    ArrayDecl, Assignment, Objective, OptimizeStyle, Polarity, Quantifier, SortDecl, SymProgram, Table,
    UninterpretedFn,
};

/// Words visible to the text being written.
#[derive(Debug, Clone, Default)]
pub(crate) struct Scope {
    pub(crate) kinds: BTreeMap<SymId, Kind>,
    /// Words defined outside any quantifier.
    pub(crate) top: BTreeSet<SymId>,
}

impl Scope {
    pub(crate) fn declare(&mut self, id: SymId, kind: Kind, top: bool) {
        self.kinds.insert(id, kind);
        if top {
            self.top.insert(id);
        }
    }

    pub(crate) fn forget(&mut self, id: SymId) {
        self.kinds.remove(&id);
        self.top.remove(&id);
    }

    fn kind(&self, id: SymId) -> Result<&Kind> {
        self.kinds
            .get(&id)
            .ok_or_else(|| SmtError::UndeclaredSymbol(id.to_string()))
    }

    fn require_top(&self, id: SymId) -> Result<()> {
        if self.top.contains(&id) {
            Ok(())
        } else {
            Err(SmtError::UndeclaredSymbol(id.to_string()))
        }
    }
}

fn array_sort(index: &Kind, elem: &Kind) -> String {
    format!("(Array {} {})", index.smt_sort(), elem.smt_sort())
}

pub(crate) fn declare_sort(sort: &SortDecl) -> String {
    match &sort.literals {
        None => format!("(declare-sort {} 0)", sort.name),
        Some(literals) => {
            let constructors: Vec<String> =
                literals.iter().map(|l| format!("({})", symbol(l))).collect();
            format!(
                "(declare-datatypes (({} 0)) (({})))",
                sort.name,
                constructors.join(" ")
            )
        }
    }
}

pub(crate) fn declare_input(var: &NamedSymVar) -> String {
    format!(
        "(declare-fun {} () {}) ; tracks user variable {}",
        var.id,
        var.kind.smt_sort(),
        string_literal(&var.name)
    )
}

pub(crate) fn define_constant(id: SymId, value: &CW) -> String {
    format!(
        "(define-fun {id} () {} {})",
        value.kind().smt_sort(),
        cw_literal(value)
    )
}

pub(crate) fn declare_function(function: &UninterpretedFn) -> String {
    let args: Vec<String> = function.args.iter().map(Kind::smt_sort).collect();
    format!(
        "(declare-fun {} ({}) {})",
        function.name,
        args.join(" "),
        function.result.smt_sort()
    )
}

pub(crate) fn declare_table(table: &Table) -> String {
    format!(
        "(declare-fun table{} () {})",
        table.id,
        array_sort(&table.index_kind, &table.elem_kind)
    )
}

/// One `assert` per table element, pinning `table[i]` to its word.
pub(crate) fn table_initializers(table: &Table, scope: &Scope) -> Result<Vec<String>> {
    let mut out = Vec::with_capacity(table.elements.len());
    for (i, element) in table.elements.iter().enumerate() {
        scope.require_top(*element)?;
        let index = CW::try_new(table.index_kind.clone(), CwValue::Integer(i.into())).map_err(
            |_| SmtError::UnsupportedOp {
                op: format!("TableLookup({})", table.id),
                kind: table.index_kind.to_string(),
            },
        )?;
        out.push(format!(
            "(assert (= (select table{} {}) {element}))",
            table.id,
            cw_literal(&index)
        ));
    }
    Ok(out)
}

pub(crate) fn declare_array(array: &ArrayDecl, scope: &Scope) -> Result<String> {
    let sort = array_sort(&array.index_kind, &array.elem_kind);
    let line = match array.default {
        None => format!("(declare-fun array_{} () {sort})", array.id),
        Some(default) => {
            scope.require_top(default)?;
            format!(
                "(define-fun array_{} () {sort} ((as const {sort}) {default}))",
                array.id
            )
        }
    };
    Ok(format!("{line} ; array {}", string_literal(&array.name)))
}

/// The right-hand side of an assignment.
pub(crate) fn assignment_expr(assignment: &Assignment, scope: &Scope) -> Result<String> {
    let operands = assignment
        .args
        .iter()
        .map(|id| scope.kind(*id).cloned())
        .collect::<Result<Vec<Kind>>>()?;
    let args: Vec<String> = assignment.args.iter().map(SymId::to_string).collect();
    ops::render(&assignment.op, &assignment.kind, &operands, &args)
}

pub(crate) fn define_assignment(assignment: &Assignment, scope: &Scope) -> Result<String> {
    Ok(format!(
        "(define-fun {} () {} {})",
        assignment.id,
        assignment.kind.smt_sort(),
        assignment_expr(assignment, scope)?
    ))
}

fn objective_directive(objective: &Objective) -> String {
    match objective {
        Objective::Minimize { id, .. } => format!("(minimize {id})"),
        Objective::Maximize { id, .. } => format!("(maximize {id})"),
        Objective::AssertSoft {
            id, weight, group, ..
        } => match group {
            Some(group) => format!("(assert-soft {id} :weight {weight} :id {})", symbol(group)),
            None => format!("(assert-soft {id} :weight {weight})"),
        },
    }
}

/// Directives for `objectives`, in order.
pub(crate) fn objective_directives(objectives: &[Objective]) -> Vec<String> {
    objectives.iter().map(objective_directive).collect()
}

fn infer_logic(program: &SymProgram, features: &ProgramFeatures) -> &'static str {
    let bitvectors_only = features
        .kinds
        .iter()
        .all(|k| matches!(k, Kind::Bool | Kind::Bounded { .. }))
        && program.tables.is_empty()
        && program.arrays.is_empty()
        && program.functions.is_empty()
        && program.axioms.is_empty();
    match (bitvectors_only, features.quantified) {
        (true, false) => "QF_BV",
        (true, true) => "BV",
        _ => "ALL",
    }
}

fn priority(style: OptimizeStyle) -> &'static str {
    match style {
        OptimizeStyle::Lexicographic => "lex",
        OptimizeStyle::Independent => "box",
        OptimizeStyle::Pareto { .. } => "pareto",
    }
}

fn section(out: &mut Vec<String>, title: &str) {
    out.push(format!("; --- {title} ---"));
}

pub(crate) fn header(
    emitter: &Emitter,
    program: &SymProgram,
    features: &ProgramFeatures,
) -> Vec<String> {
    let mut out = vec!["; Automatically generated by smtlink. Do not edit.".to_string()];
    if emitter.produce_models {
        out.push(commands::set_option("produce-models", "true"));
    }
    if let Some(timeout) = emitter.timeout_ms {
        out.push(commands::set_option("timeout", &timeout.to_string()));
    }
    for (name, value) in &emitter.options {
        out.push(commands::set_option(name, value));
    }
    if !program.objectives.is_empty() {
        out.push(commands::set_option(
            "opt.priority",
            priority(program.optimize_style),
        ));
    }
    let logic = emitter
        .logic
        .as_deref()
        .unwrap_or_else(|| infer_logic(program, features));
    out.push(format!("(set-logic {logic})"));
    out
}

/// Renders a one-shot program, without the trailing `check-sat`.
///
/// Existential inputs declared before every universal become top level
/// constants; later ones become skolem functions of the universals before
/// them. When the program has universals the formula is one `forall`
/// assertion whose body binds the quantifier-dependent words with `let`.
pub(crate) fn program(
    emitter: &Emitter,
    program: &SymProgram,
    features: &ProgramFeatures,
) -> Result<Vec<String>> {
    let mut out = header(emitter, program, features);
    let mut scope = Scope::default();

    if !program.sorts.is_empty() {
        section(&mut out, "uninterpreted sorts");
        out.extend(program.sorts.iter().map(declare_sort));
    }

    section(&mut out, "top level inputs");
    let mut universals: Vec<&NamedSymVar> = Vec::new();
    let mut skolems: Vec<(SymId, Vec<SymId>)> = Vec::new();
    for input in &program.inputs {
        let var = &input.var;
        match program.effective_quantifier(input) {
            Quantifier::Forall => {
                universals.push(var);
                scope.declare(var.id, var.kind.clone(), false);
            }
            Quantifier::Exists if universals.is_empty() => {
                out.push(declare_input(var));
                scope.declare(var.id, var.kind.clone(), true);
            }
            Quantifier::Exists => {
                let args: Vec<String> = universals.iter().map(|u| u.kind.smt_sort()).collect();
                out.push(format!(
                    "(declare-fun {} ({}) {}) ; skolemized {}",
                    var.id,
                    args.join(" "),
                    var.kind.smt_sort(),
                    string_literal(&var.name)
                ));
                skolems.push((var.id, universals.iter().map(|u| u.id).collect()));
                scope.declare(var.id, var.kind.clone(), false);
            }
        }
    }

    if !program.constants.is_empty() {
        section(&mut out, "constants");
        for (id, value) in &program.constants {
            out.push(define_constant(*id, value));
            scope.declare(*id, value.kind().clone(), true);
        }
    }

    if !program.tables.is_empty() || !program.arrays.is_empty() {
        section(&mut out, "tables and arrays");
        out.extend(program.tables.iter().map(declare_table));
        for array in &program.arrays {
            out.push(declare_array(array, &scope)?);
        }
    }

    if !program.functions.is_empty() {
        section(&mut out, "uninterpreted functions");
        out.extend(program.functions.iter().map(declare_function));
    }

    if !program.axioms.is_empty() {
        section(&mut out, "user given axioms");
        for axiom in &program.axioms {
            out.push(format!("; -- axiom {}", string_literal(&axiom.name)));
            out.extend(axiom.lines.iter().cloned());
        }
    }

    // Words that do not depend on a universal are defined at top level,
    // everything else is bound inside the quantifier.
    let mut inner: Vec<(SymId, String)> = Vec::new();
    if !program.assignments.is_empty() {
        section(&mut out, "formula");
    }
    for assignment in &program.assignments {
        let expr = assignment_expr(assignment, &scope)?;
        let closed = assignment.args.iter().all(|a| scope.top.contains(a));
        if closed {
            out.push(format!(
                "(define-fun {} () {} {expr})",
                assignment.id,
                assignment.kind.smt_sort()
            ));
        } else {
            inner.push((assignment.id, expr));
        }
        scope.declare(assignment.id, assignment.kind.clone(), closed);
    }

    for table in &program.tables {
        out.extend(table_initializers(table, &scope)?);
    }

    let negate = program.polarity == Polarity::Prove;
    let output = if negate {
        format!("(not {})", program.output)
    } else {
        program.output.to_string()
    };
    for id in program.constraints.iter().chain([&program.output]) {
        scope.kind(*id)?;
    }

    if universals.is_empty() {
        for id in &program.constraints {
            out.push(format!("(assert {id})"));
        }
        out.push(format!("(assert {output})"));
    } else {
        let binders: Vec<String> = universals
            .iter()
            .map(|u| format!("({} {})", u.id, u.kind.smt_sort()))
            .collect();
        out.push(format!("(assert (forall ({})", binders.join(" ")));
        let mut lets = 0;
        for (id, args) in &skolems {
            let args: Vec<String> = args.iter().map(SymId::to_string).collect();
            out.push(format!("  (let (({id} ({id} {})))", args.join(" ")));
            lets += 1;
        }
        for (id, expr) in inner {
            out.push(format!("  (let (({id} {expr}))"));
            lets += 1;
        }
        let body = if program.constraints.is_empty() {
            output
        } else {
            let mut conjuncts: Vec<String> =
                program.constraints.iter().map(SymId::to_string).collect();
            conjuncts.push(output);
            format!("(and {})", conjuncts.join(" "))
        };
        out.push(format!("  {body}{}))", ")".repeat(lets)));
    }

    let directives_in_body = program.optimize_style != OptimizeStyle::Independent;
    if !program.objectives.is_empty() {
        for objective in &program.objectives {
            scope.require_top(objective.id())?;
        }
        if directives_in_body {
            section(&mut out, "optimization");
            out.extend(objective_directives(&program.objectives));
        }
    }

    Ok(out)
}

/// Top level existential inputs, the words a model is read back for.
pub(crate) fn model_inputs(program: &SymProgram) -> Vec<SymId> {
    program
        .inputs
        .iter()
        .take_while(|i| program.effective_quantifier(i) == Quantifier::Exists)
        .map(|i| i.var.id)
        .collect()
}

/// Renders an incremental delta against the words already in `scope`,
/// declaring the new ones in it.
pub(crate) fn fragment(delta: &IncrementalDelta, scope: &mut Scope) -> Result<Vec<String>> {
    let mut out = Vec::new();
    out.extend(delta.sorts.iter().map(declare_sort));
    for var in &delta.inputs {
        out.push(declare_input(var));
        scope.declare(var.id, var.kind.clone(), true);
    }
    for (id, value) in &delta.constants {
        out.push(define_constant(*id, value));
        scope.declare(*id, value.kind().clone(), true);
    }
    out.extend(delta.tables.iter().map(declare_table));
    for array in &delta.arrays {
        out.push(declare_array(array, scope)?);
    }
    out.extend(delta.functions.iter().map(declare_function));
    for assignment in &delta.assignments {
        out.push(define_assignment(assignment, scope)?);
        scope.declare(assignment.id, assignment.kind.clone(), true);
    }
    for table in &delta.tables {
        out.extend(table_initializers(table, scope)?);
    }
    for id in &delta.assertions {
        scope.kind(*id)?;
        out.push(format!("(assert {id})"));
    }
    Ok(out)
}
