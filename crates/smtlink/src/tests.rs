//! End-to-end tests: programs to query text, canned solver output back to
//! results.

use super::*;
use smtlink_test::transcripts::{lines, SENTINEL};

fn session() -> SolverSession {
    SolverSession::new(InterfaceConfig::default()).unwrap()
}

/// Minimize x + y and maximize x over integers with x >= 1.
fn optimization_program(style: OptimizeStyle) -> SymProgram {
    SymProgram::new(SymId(4))
        .exists(NamedSymVar::new(0, "x", Kind::Unbounded))
        .exists(NamedSymVar::new(1, "y", Kind::Unbounded))
        .constant(SymId(2), CW::unbounded(1))
        .assign(SymId(3), Kind::Unbounded, SymOp::Plus, [SymId(0), SymId(1)])
        .assign(SymId(4), Kind::Bool, SymOp::GreaterEq, [SymId(0), SymId(2)])
        .minimize("cost", SymId(3))
        .maximize("x", SymId(0))
        .with_optimize_style(style)
}

const INDEPENDENT_ANSWER: &str = "sat
(objectives
 (s3 1)
)
((s0 1)
 (s1 0))
smtlink-multi-model-separator
sat
(objectives
 (s0 oo)
)
((s0 0)
 (s1 0))";

#[test]
fn test_default_sentinel_matches_fixtures() {
    assert_eq!(DEFAULT_SENTINEL, SENTINEL);
}

#[test]
fn test_session_rejects_bad_sentinel() {
    let config = InterfaceConfig::default().with_sentinel("two words\n");
    assert!(matches!(
        SolverSession::new(config),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_session_rejects_status_line_sentinel() {
    let config = InterfaceConfig::default().with_sentinel("sat");
    assert!(matches!(
        SolverSession::new(config),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_session_from_toml() {
    let config = InterfaceConfig::from_toml_str(
        r#"
        solver = "cvc5"
        timeout_ms = 250
        "#,
    )
    .unwrap();
    let session = SolverSession::new(config).unwrap();
    assert_eq!(session.config().timeout_ms, Some(250));
    assert!(!session.emitter().capabilities().supports_optimization);
}

#[test]
fn test_single_model_round_trip() {
    let session = session();
    let program = optimization_program(OptimizeStyle::Lexicographic);
    let query = session.prepare(&program).unwrap();

    assert_eq!(query.expected_models, 1);
    assert!(query.text.contains("(minimize s3)"));
    assert!(query.text.ends_with("(check-sat)\n(get-objectives)\n(get-value (s0 s1))\n"));

    let answer = ["sat", "(objectives (s3 1) (s0 oo))", "((s0 1) (s1 0))"];
    let results = session.interpret(&query, &answer).unwrap();
    assert_eq!(results.len(), 1);
    let SolverResult::SatExtField(model) = &results[0] else {
        panic!("expected an extension-field result, got {:?}", results[0]);
    };
    assert_eq!(model.objective("cost"), Some(&ExtCW::Bounded(CW::unbounded(1))));
    assert_eq!(model.objective("x"), Some(&ExtCW::PosInfinity(Kind::Unbounded)));
    assert_eq!(model.value_of("y"), Some(&CW::unbounded(0)));
}

#[test]
fn test_independent_objectives_round_trip() {
    let session = session();
    let query = session
        .prepare(&optimization_program(OptimizeStyle::Independent))
        .unwrap();

    assert_eq!(query.expected_models, 2);
    assert_eq!(
        query
            .text
            .matches("(echo \"smtlink-multi-model-separator\")")
            .count(),
        1
    );

    let results = session.interpret(&query, &lines(INDEPENDENT_ANSWER)).unwrap();
    assert_eq!(results.len(), 2);
    assert!(matches!(results[0], SolverResult::Satisfiable(_)));
    assert!(matches!(results[1], SolverResult::SatExtField(_)));
    assert_eq!(
        results[0].model().and_then(|m| m.objective("cost")),
        Some(&ExtCW::Bounded(CW::unbounded(1)))
    );
}

#[test]
fn test_unsat_fills_every_model() {
    let session = session();
    let query = session
        .prepare(&optimization_program(OptimizeStyle::Independent))
        .unwrap();
    let results = session.interpret(&query, &["unsat"]).unwrap();
    assert_eq!(results, vec![SolverResult::Unsatisfiable; 2]);
}

#[test]
fn test_missing_model_is_reported() {
    let session = session();
    let query = session
        .prepare(&optimization_program(OptimizeStyle::Independent))
        .unwrap();
    let err = session
        .interpret(&query, &["sat", "((s0 1) (s1 0))"])
        .unwrap_err();
    assert!(matches!(
        err,
        SmtError::CountMismatch {
            expected: 2,
            actual: 1,
            ..
        }
    ));
}

#[test]
fn test_capability_refusal() {
    let session =
        SolverSession::new(InterfaceConfig::default().with_preset(SolverPreset::Boolector))
            .unwrap();
    let err = session
        .prepare(&optimization_program(OptimizeStyle::Lexicographic))
        .unwrap_err();
    assert_eq!(
        err,
        SmtError::Capability {
            feature: Feature::UnboundedIntegers,
            solver: "Boolector".to_string(),
        }
    );
}

#[test]
fn test_incremental_through_session() {
    let session = session();
    let mut incremental = session.incremental();
    let delta = IncrementalDelta {
        inputs: vec![NamedSymVar::new(0, "x", Kind::word(8))],
        ..IncrementalDelta::default()
    };
    let text = incremental.fragment(&delta).unwrap();
    assert!(text.contains("(declare-fun s0 () (_ BitVec 8))"));
    assert_eq!(incremental.push(), "(push 1)");
    assert_eq!(incremental.depth(), 1);
}
