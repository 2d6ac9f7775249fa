//! Symbol table fixtures.
//!
//! # Example
//!
//! ```
//! use smtlink_test::tables::mixed_table;
//!
//! let table = mixed_table();
//! assert_eq!(table.resolve("s8").unwrap().unwrap().name, "color");
//! ```

use smtlink_core::{Kind, NamedSymVar, SymbolTable};

/// The enumerated sort used by [`mixed_table`].
pub fn color() -> Kind {
    Kind::enumerated("Color", ["Red", "Green", "Blue"])
}

/// `x` and `y`, both `Word8`, at `s0` and `s1`.
pub fn bitvector_table() -> SymbolTable {
    SymbolTable::new(vec![
        NamedSymVar::new(0, "x", Kind::word(8)),
        NamedSymVar::new(1, "y", Kind::word(8)),
    ])
}

/// One variable of every kind, at `s0` through `s9`.
///
/// | id | name    | kind             |
/// |----|---------|------------------|
/// | s0 | `b`     | Bool             |
/// | s1 | `n`     | Integer          |
/// | s2 | `r`     | Real             |
/// | s3 | `i`     | Int8             |
/// | s4 | `f`     | Float            |
/// | s5 | `d`     | Double           |
/// | s6 | `text`  | String           |
/// | s7 | `c`     | Char             |
/// | s8 | `color` | [`color`]        |
/// | s9 | `t`     | uninterpreted T  |
pub fn mixed_table() -> SymbolTable {
    SymbolTable::new(vec![
        NamedSymVar::new(0, "b", Kind::Bool),
        NamedSymVar::new(1, "n", Kind::Unbounded),
        NamedSymVar::new(2, "r", Kind::Real),
        NamedSymVar::new(3, "i", Kind::int(8)),
        NamedSymVar::new(4, "f", Kind::Float),
        NamedSymVar::new(5, "d", Kind::Double),
        NamedSymVar::new(6, "text", Kind::String),
        NamedSymVar::new(7, "c", Kind::Char),
        NamedSymVar::new(8, "color", color()),
        NamedSymVar::new(9, "t", Kind::sort("T")),
    ])
}

/// Integer inputs `x` and `y` plus the objective `goal` at `s2`.
pub fn objective_table() -> SymbolTable {
    SymbolTable::new(vec![
        NamedSymVar::new(0, "x", Kind::Unbounded),
        NamedSymVar::new(1, "y", Kind::Unbounded),
        NamedSymVar::new(2, "goal", Kind::Unbounded),
    ])
}

/// Two entries claiming `s0`.
pub fn ambiguous_table() -> SymbolTable {
    SymbolTable::new(vec![
        NamedSymVar::new(0, "x", Kind::Unbounded),
        NamedSymVar::new(0, "x'", Kind::Unbounded),
    ])
}
