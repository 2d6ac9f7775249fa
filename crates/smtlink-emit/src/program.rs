//! The symbolic program handed to the emitter.
//!
//! A [`SymProgram`] is the fully elaborated result of symbolic execution:
//! every intermediate word has an id, a kind and a defining operation, and
//! ids only refer to words defined before them.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use smtlink_core::{Kind, NamedSymVar, SymId, SymbolTable, CW};

/// How an input is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    Exists,
    Forall,
}

impl Quantifier {
    pub fn flip(self) -> Self {
        match self {
            Quantifier::Exists => Quantifier::Forall,
            Quantifier::Forall => Quantifier::Exists,
        }
    }
}

/// Whether the output is checked for satisfiability or proved valid.
///
/// Proving asserts the negated output, which flips every quantifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Polarity {
    #[default]
    Sat,
    Prove,
}

/// A program input with its quantifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub quantifier: Quantifier,
    pub var: NamedSymVar,
}

/// A user declared sort; enumerated when `literals` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDecl {
    pub name: String,
    pub literals: Option<Vec<String>>,
}

impl SortDecl {
    pub fn kind(&self) -> Kind {
        Kind::UninterpretedSort {
            name: self.name.clone(),
            literals: self.literals.clone(),
        }
    }
}

/// Operations an assignment can apply to earlier words.
///
/// The concrete SMT-LIB operator is chosen from the kind of the operands,
/// so one `Plus` covers `bvadd`, `+`, `fp.add` and `str.++`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymOp {
    Plus,
    Times,
    Minus,
    Negate,
    Abs,
    Quot,
    Rem,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessEq,
    GreaterEq,
    Ite,
    And,
    Or,
    XOr,
    Not,
    /// Shift left by a constant amount.
    Shl(u32),
    /// Shift right by a constant amount; arithmetic for signed kinds.
    Shr(u32),
    /// Bits `hi` down to `lo`, inclusive.
    Extract { hi: u32, lo: u32 },
    /// Bit-vector concatenation or string append.
    Join,
    /// Index into table `n`.
    TableLookup(u32),
    /// Read from array `n`.
    ArrayRead(u32),
    /// Application of a declared uninterpreted function.
    Uninterpreted(String),
}

impl SymOp {
    /// Number of arguments, `None` when variadic.
    pub fn arity(&self) -> Option<usize> {
        match self {
            SymOp::Negate | SymOp::Abs | SymOp::Not => Some(1),
            SymOp::Shl(_) | SymOp::Shr(_) | SymOp::Extract { .. } => Some(1),
            SymOp::TableLookup(_) | SymOp::ArrayRead(_) => Some(1),
            SymOp::Ite => Some(3),
            SymOp::Uninterpreted(_) => None,
            _ => Some(2),
        }
    }
}

impl fmt::Display for SymOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymOp::Shl(n) => write!(f, "Shl({n})"),
            SymOp::Shr(n) => write!(f, "Shr({n})"),
            SymOp::Extract { hi, lo } => write!(f, "Extract({hi}, {lo})"),
            SymOp::TableLookup(n) => write!(f, "TableLookup({n})"),
            SymOp::ArrayRead(n) => write!(f, "ArrayRead({n})"),
            SymOp::Uninterpreted(name) => write!(f, "{name}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// `id := op(args)` at kind `kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub id: SymId,
    pub kind: Kind,
    pub op: SymOp,
    pub args: Vec<SymId>,
}

/// A constant lookup table; element `i` is the word at `elements[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub id: u32,
    pub index_kind: Kind,
    pub elem_kind: Kind,
    pub elements: Vec<SymId>,
}

/// A solver array, optionally initialized to a constant default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayDecl {
    pub id: u32,
    pub name: String,
    pub index_kind: Kind,
    pub elem_kind: Kind,
    pub default: Option<SymId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UninterpretedFn {
    pub name: String,
    pub args: Vec<Kind>,
    pub result: Kind,
}

/// Raw SMT-LIB lines supplied by the user, emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axiom {
    pub name: String,
    pub lines: Vec<String>,
}

/// An optimization goal over an existing word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Objective {
    Minimize {
        name: String,
        id: SymId,
    },
    Maximize {
        name: String,
        id: SymId,
    },
    AssertSoft {
        name: String,
        id: SymId,
        weight: u64,
        group: Option<String>,
    },
}

impl Objective {
    pub fn name(&self) -> &str {
        match self {
            Objective::Minimize { name, .. }
            | Objective::Maximize { name, .. }
            | Objective::AssertSoft { name, .. } => name,
        }
    }

    pub fn id(&self) -> SymId {
        match self {
            Objective::Minimize { id, .. }
            | Objective::Maximize { id, .. }
            | Objective::AssertSoft { id, .. } => *id,
        }
    }
}

/// How several objectives are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OptimizeStyle {
    /// In declaration order, each optimized subject to the previous ones.
    #[default]
    Lexicographic,
    /// Each objective optimized on its own; one model per objective.
    Independent,
    /// Pareto fronts, up to `max_fronts` models.
    Pareto { max_fronts: usize },
}

/// A complete symbolic program.
///
/// # Examples
///
/// ```
/// use smtlink_core::{Kind, NamedSymVar, SymId, CW};
/// use smtlink_emit::{SymOp, SymProgram};
///
/// let program = SymProgram::new(SymId(2))
///     .exists(NamedSymVar::new(0, "x", Kind::word(8)))
///     .constant(SymId(1), CW::integer(Kind::word(8), 3))
///     .assign(SymId(2), Kind::Bool, SymOp::LessThan, [SymId(0), SymId(1)]);
///
/// assert_eq!(program.symbol_table().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SymProgram {
    pub polarity: Polarity,
    pub sorts: Vec<SortDecl>,
    pub inputs: Vec<Input>,
    pub constants: Vec<(SymId, CW)>,
    pub tables: Vec<Table>,
    pub arrays: Vec<ArrayDecl>,
    pub functions: Vec<UninterpretedFn>,
    pub axioms: Vec<Axiom>,
    pub assignments: Vec<Assignment>,
    pub constraints: Vec<SymId>,
    pub output: SymId,
    pub objectives: Vec<Objective>,
    pub optimize_style: OptimizeStyle,
}

impl SymProgram {
    /// An empty program whose output is the boolean word `output`.
    pub fn new(output: SymId) -> Self {
        Self {
            polarity: Polarity::Sat,
            sorts: Vec::new(),
            inputs: Vec::new(),
            constants: Vec::new(),
            tables: Vec::new(),
            arrays: Vec::new(),
            functions: Vec::new(),
            axioms: Vec::new(),
            assignments: Vec::new(),
            constraints: Vec::new(),
            output,
            objectives: Vec::new(),
            optimize_style: OptimizeStyle::default(),
        }
    }

    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    pub fn with_optimize_style(mut self, style: OptimizeStyle) -> Self {
        self.optimize_style = style;
        self
    }

    pub fn sort(mut self, name: impl Into<String>) -> Self {
        self.sorts.push(SortDecl {
            name: name.into(),
            literals: None,
        });
        self
    }

    pub fn enumerated_sort<I, S>(mut self, name: impl Into<String>, literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sorts.push(SortDecl {
            name: name.into(),
            literals: Some(literals.into_iter().map(Into::into).collect()),
        });
        self
    }

    pub fn exists(mut self, var: NamedSymVar) -> Self {
        self.inputs.push(Input {
            quantifier: Quantifier::Exists,
            var,
        });
        self
    }

    pub fn forall(mut self, var: NamedSymVar) -> Self {
        self.inputs.push(Input {
            quantifier: Quantifier::Forall,
            var,
        });
        self
    }

    pub fn constant(mut self, id: SymId, value: CW) -> Self {
        self.constants.push((id, value));
        self
    }

    pub fn assign(
        mut self,
        id: SymId,
        kind: Kind,
        op: SymOp,
        args: impl IntoIterator<Item = SymId>,
    ) -> Self {
        self.assignments.push(Assignment {
            id,
            kind,
            op,
            args: args.into_iter().collect(),
        });
        self
    }

    pub fn table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    pub fn array(mut self, array: ArrayDecl) -> Self {
        self.arrays.push(array);
        self
    }

    pub fn function(mut self, name: impl Into<String>, args: Vec<Kind>, result: Kind) -> Self {
        self.functions.push(UninterpretedFn {
            name: name.into(),
            args,
            result,
        });
        self
    }

    pub fn axiom(mut self, name: impl Into<String>, lines: Vec<String>) -> Self {
        self.axioms.push(Axiom {
            name: name.into(),
            lines,
        });
        self
    }

    pub fn constrain(mut self, id: SymId) -> Self {
        self.constraints.push(id);
        self
    }

    pub fn minimize(mut self, name: impl Into<String>, id: SymId) -> Self {
        self.objectives.push(Objective::Minimize {
            name: name.into(),
            id,
        });
        self
    }

    pub fn maximize(mut self, name: impl Into<String>, id: SymId) -> Self {
        self.objectives.push(Objective::Maximize {
            name: name.into(),
            id,
        });
        self
    }

    pub fn assert_soft(
        mut self,
        name: impl Into<String>,
        id: SymId,
        weight: u64,
        group: Option<String>,
    ) -> Self {
        self.objectives.push(Objective::AssertSoft {
            name: name.into(),
            id,
            weight,
            group,
        });
        self
    }

    /// Quantifier of an input after accounting for the polarity.
    pub fn effective_quantifier(&self, input: &Input) -> Quantifier {
        match self.polarity {
            Polarity::Sat => input.quantifier,
            Polarity::Prove => input.quantifier.flip(),
        }
    }

    /// Kinds of every word the program declares or defines, by id.
    pub fn word_kinds(&self) -> BTreeMap<SymId, Kind> {
        let inputs = self.inputs.iter().map(|i| (i.var.id, i.var.kind.clone()));
        let constants = self.constants.iter().map(|(id, cw)| (*id, cw.kind().clone()));
        let assigned = self.assignments.iter().map(|a| (a.id, a.kind.clone()));
        inputs.chain(constants).chain(assigned).collect()
    }

    /// Ids of the inputs that `id` transitively depends on.
    pub fn input_dependencies(&self, id: SymId) -> BTreeSet<SymId> {
        let defs: BTreeMap<SymId, &[SymId]> = self
            .assignments
            .iter()
            .map(|a| (a.id, a.args.as_slice()))
            .collect();
        let inputs: BTreeSet<SymId> = self.inputs.iter().map(|i| i.var.id).collect();

        let mut seen = BTreeSet::new();
        let mut stack = vec![id];
        let mut found = BTreeSet::new();
        while let Some(next) = stack.pop() {
            if !seen.insert(next) {
                continue;
            }
            if inputs.contains(&next) {
                found.insert(next);
            }
            if let Some(args) = defs.get(&next) {
                stack.extend(args.iter().copied());
            }
        }
        found
    }

    /// The symbols solver output for this program can mention.
    ///
    /// Inputs keep their own names; objectives over intermediate words are
    /// added under the objective name.
    pub fn symbol_table(&self) -> SymbolTable {
        let kinds = self.word_kinds();
        let mut seen: BTreeSet<SymId> = BTreeSet::new();
        let mut vars = Vec::new();
        for input in &self.inputs {
            if seen.insert(input.var.id) {
                vars.push(input.var.clone());
            }
        }
        for objective in &self.objectives {
            let id = objective.id();
            if let Some(kind) = kinds.get(&id) {
                if seen.insert(id) {
                    vars.push(NamedSymVar {
                        id,
                        name: objective.name().to_string(),
                        kind: kind.clone(),
                    });
                }
            }
        }
        SymbolTable::new(vars)
    }

    /// How many models a full query for this program produces.
    pub fn expected_models(&self) -> usize {
        match self.optimize_style {
            OptimizeStyle::Independent if !self.objectives.is_empty() => self.objectives.len(),
            OptimizeStyle::Pareto { max_fronts } if !self.objectives.is_empty() => {
                max_fronts.max(1)
            }
            _ => 1,
        }
    }
}
