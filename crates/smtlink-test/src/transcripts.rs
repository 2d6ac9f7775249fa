//! Canned solver output, line for line as z3 prints it.
//!
//! Every transcript is written against one of the [`crate::tables`]
//! fixtures; the doc of each constant names it.

/// Matches the default multi-model sentinel of `smtlink-config`.
pub const SENTINEL: &str = "smtlink-multi-model-separator";

pub const UNSAT: &str = "unsat";

pub const TIMEOUT: &str = "timeout";

/// `x = 3`, `y = 5` over [`crate::tables::bitvector_table`], in get-value
/// form.
pub const BITVECTOR_MODEL: &str = "sat
((s0 #x03)
 (s1 #x05))";

/// A get-model response over [`crate::tables::mixed_table`], including a
/// solver-internal function that must be ignored.
pub const MIXED_MODEL: &str = r#"sat
(
  (define-fun s0 () Bool true)
  (define-fun s1 () Int (- 42))
  (define-fun s2 () Real (/ 1.0 3.0))
  (define-fun s3 () (_ BitVec 8) #xff)
  (define-fun s4 () (_ FloatingPoint 8 24) (fp #b0 #x7f #b00000000000000000000000))
  (define-fun s5 () (_ FloatingPoint 11 53) (_ +zero 11 53))
  (define-fun s6 () String "a""b\u{e9}")
  (define-fun s7 () String "z")
  (define-fun s8 () Color Green)
  (define-fun s9 () T T!val!0)
  (define-fun k!0 ((x!0 Int)) Int
    (ite (= x!0 1) 2 0))
)"#;

/// A real printed through `to_real` over [`crate::tables::mixed_table`].
pub const CAST_MODEL: &str = "sat
((s2 (to_real 3)))";

/// Objective `goal` bounded at 7 over [`crate::tables::objective_table`].
pub const BOUNDED_OBJECTIVES: &str = "sat
(objectives
 (s2 7)
)
((s0 3)
 (s1 4))";

/// Objective `goal` unbounded above over
/// [`crate::tables::objective_table`].
pub const UNBOUNDED_OBJECTIVES: &str = "sat
(objectives
 (s2 oo)
)
((s0 0)
 (s1 0))";

/// Three independent models of `x` over
/// [`crate::tables::objective_table`], separated by [`SENTINEL`].
pub const THREE_MODELS: &str = "sat
((s0 1))
smtlink-multi-model-separator
sat
((s0 2))
smtlink-multi-model-separator
sat
((s0 3))";

/// Two models where only the first carries a status line.
pub const PREAMBLE_MODELS: &str = "sat
((s0 1))
smtlink-multi-model-separator
((s0 2))";

/// Splits a transcript into the lines a solver process would yield.
pub fn lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}
