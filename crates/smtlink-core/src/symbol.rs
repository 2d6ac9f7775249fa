//! Symbols: internal ids, named variables and the per-session symbol table

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SmtError};
use crate::kind::Kind;

/// Internal id of a symbolic word.
///
/// Ids are rendered as `s<N>` in emitted text; solvers echo that name back
/// in models, which is how output is tied to variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymId(pub u64);

impl fmt::Display for SymId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

impl FromStr for SymId {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let digits = s.strip_prefix('s').ok_or(())?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(());
        }
        digits.parse().map(SymId).map_err(|_| ())
    }
}

/// A variable the solver may mention: internal id, display name and kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedSymVar {
    pub id: SymId,
    pub name: String,
    pub kind: Kind,
}

impl NamedSymVar {
    pub fn new(id: u64, name: impl Into<String>, kind: Kind) -> Self {
        Self {
            id: SymId(id),
            name: name.into(),
            kind,
        }
    }
}

/// The universe of symbols solver output may reference.
///
/// Built once per solving session and only read afterwards.
///
/// # Examples
///
/// ```
/// use smtlink_core::{Kind, NamedSymVar, SymbolTable};
///
/// let table = SymbolTable::new(vec![NamedSymVar::new(0, "x", Kind::Unbounded)]);
/// assert_eq!(table.resolve("s0").unwrap().unwrap().name, "x");
/// assert!(table.resolve("k!0").unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    vars: Vec<NamedSymVar>,
}

impl SymbolTable {
    pub fn new(vars: Vec<NamedSymVar>) -> Self {
        Self { vars }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedSymVar> {
        self.vars.iter()
    }

    /// Resolves a solver symbol to its table entry.
    ///
    /// Symbols that do not carry an internal id, or whose id has no entry,
    /// resolve to `None`. More than one entry for the id is an
    /// [`SmtError::Ambiguity`].
    pub fn resolve(&self, symbol: &str) -> Result<Option<&NamedSymVar>> {
        let Ok(id) = symbol.parse::<SymId>() else {
            return Ok(None);
        };
        let matches: Vec<&NamedSymVar> = self.vars.iter().filter(|v| v.id == id).collect();
        match matches.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(*only)),
            many => Err(SmtError::Ambiguity {
                symbol: symbol.to_string(),
                matches: many.iter().map(|v| v.name.clone()).collect(),
            }),
        }
    }
}

impl FromIterator<NamedSymVar> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = NamedSymVar>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
