//! Tests for response classification and extraction.

use super::*;
use crate::classify::group_expressions;
use smtlink_core::{parse_sexpr, AlgReal, ExtCW, Kind, ParseFailure, SmtError, CW};
use smtlink_test::tables::{
    ambiguous_table, bitvector_table, color, mixed_table, objective_table,
};
use smtlink_test::transcripts::{self, lines, SENTINEL};

fn sat_model(result: SolverResult) -> Model {
    match result {
        SolverResult::Satisfiable(model) => model,
        other => panic!("expected a satisfiable result, got {other:?}"),
    }
}

fn parse_reason(err: SmtError) -> ParseFailure {
    match err {
        SmtError::Parse { reason, .. } => reason,
        other => panic!("expected a parse error, got {other:?}"),
    }
}

mod classification {
    use super::*;

    #[test]
    fn test_unsat() {
        let result = classify(&objective_table(), &lines(transcripts::UNSAT)).unwrap();
        assert_eq!(result, SolverResult::Unsatisfiable);
    }

    #[test]
    fn test_timeout() {
        let result = classify(&objective_table(), &lines(transcripts::TIMEOUT)).unwrap();
        assert_eq!(result, SolverResult::TimeOut);
    }

    #[test]
    fn test_status_line_is_trimmed() {
        let result = classify(&objective_table(), &["  unsat\r"]).unwrap();
        assert_eq!(result, SolverResult::Unsatisfiable);
    }

    #[test]
    fn test_sat_single_binding() {
        let table = objective_table();
        let model = sat_model(classify(&table, &["sat", "(model (define-fun s0 () Int 0))"]).unwrap());
        assert_eq!(model.value_of("x"), Some(&CW::unbounded(0)));
        assert_eq!(model.bindings().len(), 1);
    }

    #[test]
    fn test_bitvector_get_value() {
        let model =
            sat_model(classify(&bitvector_table(), &lines(transcripts::BITVECTOR_MODEL)).unwrap());
        assert_eq!(model.value_of("x"), Some(&CW::integer(Kind::word(8), 3)));
        assert_eq!(model.value_of("y"), Some(&CW::integer(Kind::word(8), 5)));
    }

    #[test]
    fn test_mixed_model_decodes_every_kind() {
        let model = sat_model(classify(&mixed_table(), &lines(transcripts::MIXED_MODEL)).unwrap());

        assert_eq!(model.bindings().len(), 10);
        assert_eq!(model.value_of("b"), Some(&CW::bool(true)));
        assert_eq!(model.value_of("n"), Some(&CW::unbounded(-42)));
        assert_eq!(model.value_of("r"), Some(&CW::real(AlgReal::from_ratio(1, 3))));
        assert_eq!(model.value_of("i"), Some(&CW::integer(Kind::int(8), -1)));
        assert_eq!(model.value_of("f"), Some(&CW::float(1.0)));
        assert_eq!(model.value_of("d"), Some(&CW::double(0.0)));
        assert_eq!(model.value_of("text"), Some(&CW::string("a\"b\u{e9}")));
        assert_eq!(model.value_of("c"), Some(&CW::char('z')));
        assert_eq!(
            model.value_of("color"),
            Some(&CW::uninterpreted(color(), "Green").unwrap())
        );
        assert_eq!(
            model.value_of("t"),
            Some(&CW::uninterpreted(Kind::sort("T"), "T!val!0").unwrap())
        );
    }

    #[test]
    fn test_bindings_sorted_by_id() {
        let model = sat_model(
            classify(&objective_table(), &["sat", "((s1 2)", " (s0 1))"]).unwrap(),
        );
        let ids: Vec<u64> = model.bindings().iter().map(|b| b.id.0).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_unknown_without_model() {
        let result = classify(&objective_table(), &["unknown"]).unwrap();
        assert_eq!(result, SolverResult::Unknown(Model::new()));
    }

    #[test]
    fn test_unrecognized_output_is_kept_verbatim() {
        let output = ["(error \"line 3: unknown constant\")", "  more"];
        let result = classify(&objective_table(), &output).unwrap();
        assert_eq!(
            result,
            SolverResult::ProofError(vec![
                "(error \"line 3: unknown constant\")".to_string(),
                "  more".to_string(),
            ])
        );
    }

    #[test]
    fn test_empty_output_is_proof_error() {
        let empty: [&str; 0] = [];
        let result = classify(&objective_table(), &empty).unwrap();
        assert_eq!(result, SolverResult::ProofError(Vec::new()));
    }
}

mod strictness {
    use super::*;

    #[test]
    fn test_sat_rejects_unknown_shape() {
        let err = classify(&objective_table(), &["sat", "((s0 1 2))"]).unwrap_err();
        assert_eq!(
            parse_reason(err),
            ParseFailure::UnrecognizedShape {
                item: "(s0 1 2)".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_drops_unknown_shape() {
        let result = classify(&objective_table(), &["unknown", "((s0 1 2)", " (s1 5))"]).unwrap();
        let SolverResult::Unknown(model) = result else {
            panic!("expected unknown, got {result:?}");
        };
        assert_eq!(model.value_of("x"), None);
        assert_eq!(model.value_of("y"), Some(&CW::unbounded(5)));
    }

    #[test]
    fn test_unknown_drops_unreadable_text() {
        let result = classify(&objective_table(), &["unknown", "((s0 #q1))"]).unwrap();
        assert_eq!(result, SolverResult::Unknown(Model::new()));
    }

    #[test]
    fn test_sat_rejects_unexpected_root() {
        let err = classify(&objective_table(), &["sat", "(s0 1)"]).unwrap_err();
        assert_eq!(
            parse_reason(err),
            ParseFailure::UnexpectedRoot { expected: "model" }
        );
    }

    #[test]
    fn test_parse_error_carries_line_and_tree() {
        let err = classify(&objective_table(), &["sat", "((s0 true))"]).unwrap_err();
        let SmtError::Parse { line, tree, reason } = err else {
            panic!("expected a parse error");
        };
        assert_eq!(line, "((s0 true))");
        assert_eq!(tree, "((s0 true))");
        assert_eq!(
            reason,
            ParseFailure::KindMismatch {
                kind: "Integer".to_string(),
                item: "true".to_string(),
            }
        );
    }

    #[test]
    fn test_ambiguity_is_fatal_even_when_lenient() {
        let err = classify(&ambiguous_table(), &["unknown", "((s0 1))"]).unwrap_err();
        assert_eq!(
            err,
            SmtError::Ambiguity {
                symbol: "s0".to_string(),
                matches: vec!["x".to_string(), "x'".to_string()],
            }
        );
    }

    #[test]
    fn test_ignores_symbols_missing_from_table() {
        let model = sat_model(classify(&objective_table(), &["sat", "((s7 1) (s0 2))"]).unwrap());
        assert_eq!(model.bindings().len(), 1);
        assert_eq!(model.value_of("x"), Some(&CW::unbounded(2)));
    }
}

mod decoding {
    use super::*;

    #[test]
    fn test_to_real_is_unwrapped() {
        let model = sat_model(classify(&mixed_table(), &lines(transcripts::CAST_MODEL)).unwrap());
        assert_eq!(model.value_of("r"), Some(&CW::real(AlgReal::from_integer(3))));
    }

    #[test]
    fn test_to_real_under_negation() {
        let bare = sat_model(classify(&mixed_table(), &["sat", "((s2 (- 3)))"]).unwrap());
        let cast =
            sat_model(classify(&mixed_table(), &["sat", "((s2 (- (to_real 3))))"]).unwrap());
        assert_eq!(cast.value_of("r"), Some(&CW::real(AlgReal::from_integer(-3))));
        assert_eq!(cast.value_of("r"), bare.value_of("r"));
    }

    #[test]
    fn test_to_real_under_division() {
        let model =
            sat_model(classify(&mixed_table(), &["sat", "((s2 (/ (to_real 7) 2)))"]).unwrap());
        assert_eq!(model.value_of("r"), Some(&CW::real(AlgReal::from_ratio(7, 2))));
    }

    #[test]
    fn test_lambda_is_unwrapped() {
        let model = sat_model(
            classify(&objective_table(), &["sat", "((s0 (lambda ((x!1 Int)) 7)))"]).unwrap(),
        );
        assert_eq!(model.value_of("x"), Some(&CW::unbounded(7)));
    }

    #[test]
    fn test_integral_real_for_integer() {
        let model = sat_model(classify(&objective_table(), &["sat", "((s0 5.0))"]).unwrap());
        assert_eq!(model.value_of("x"), Some(&CW::unbounded(5)));
    }

    #[test]
    fn test_fractional_real_for_integer() {
        let err = classify(&objective_table(), &["sat", "((s0 2.5))"]).unwrap_err();
        assert_eq!(
            parse_reason(err),
            ParseFailure::NotIntegral {
                item: "(/ 5.0 2.0)".to_string()
            }
        );
    }

    #[test]
    fn test_approximate_real() {
        let model = sat_model(classify(&mixed_table(), &["sat", "((s2 1.4142?))"]).unwrap());
        let value = model.value_of("r").and_then(CW::as_real).unwrap();
        assert!(!value.is_exact());
    }

    #[test]
    fn test_bitvector_width_must_match() {
        let err = classify(&bitvector_table(), &["sat", "((s0 #x003))"]).unwrap_err();
        assert!(matches!(parse_reason(err), ParseFailure::KindMismatch { .. }));
    }

    #[test]
    fn test_indexed_bitvector_literal() {
        let model = sat_model(classify(&bitvector_table(), &["sat", "((s1 (_ bv200 8)))"]).unwrap());
        assert_eq!(model.value_of("y"), Some(&CW::integer(Kind::word(8), 200)));
    }

    #[test]
    fn test_unknown_enumerated_literal() {
        let err = classify(&mixed_table(), &["sat", "((s8 Purple))"]).unwrap_err();
        assert_eq!(
            parse_reason(err),
            ParseFailure::UnknownSortLiteral {
                sort: "Color".to_string(),
                literal: "Purple".to_string(),
            }
        );
    }

    #[test]
    fn test_float_precision_must_match() {
        let err = classify(&mixed_table(), &["sat", "((s5 (_ +zero 8 24)))"]).unwrap_err();
        assert!(matches!(parse_reason(err), ParseFailure::KindMismatch { .. }));
    }

    #[test]
    fn test_char_needs_single_character() {
        let err = classify(&mixed_table(), &["sat", "((s7 \"ab\"))"]).unwrap_err();
        assert!(matches!(parse_reason(err), ParseFailure::KindMismatch { .. }));
    }
}

mod objective_values {
    use super::*;

    fn goal(result: &SolverResult) -> &ExtCW {
        result.model().and_then(|m| m.objective("goal")).unwrap()
    }

    #[test]
    fn test_bounded_objective_is_satisfiable() {
        let result = classify(&objective_table(), &lines(transcripts::BOUNDED_OBJECTIVES)).unwrap();
        assert!(matches!(result, SolverResult::Satisfiable(_)));
        assert_eq!(goal(&result), &ExtCW::Bounded(CW::unbounded(7)));
        assert_eq!(result.model().unwrap().value_of("y"), Some(&CW::unbounded(4)));
    }

    #[test]
    fn test_unbounded_objective_is_ext_field() {
        let result =
            classify(&objective_table(), &lines(transcripts::UNBOUNDED_OBJECTIVES)).unwrap();
        assert!(matches!(result, SolverResult::SatExtField(_)));
        assert_eq!(goal(&result), &ExtCW::PosInfinity(Kind::Unbounded));
    }

    #[test]
    fn test_interval_objective() {
        let result = classify(
            &objective_table(),
            &["sat", "(objectives", " (s2 (interval (- oo) 5))", ")"],
        )
        .unwrap();
        assert!(matches!(result, SolverResult::SatExtField(_)));
        assert_eq!(
            goal(&result),
            &ExtCW::interval(
                ExtCW::NegInfinity(Kind::Unbounded),
                ExtCW::Bounded(CW::unbounded(5)),
            )
        );
    }

    #[test]
    fn test_scaled_infinity_simplifies() {
        let result =
            classify(&objective_table(), &["sat", "(objectives (s2 (* (- 2) oo)))"]).unwrap();
        assert_eq!(goal(&result), &ExtCW::NegInfinity(Kind::Unbounded));
    }

    #[test]
    fn test_epsilon_offset() {
        let result =
            classify(&objective_table(), &["sat", "(objectives (s2 (+ 5 epsilon)))"]).unwrap();
        assert_eq!(
            goal(&result),
            &ExtCW::sum(
                ExtCW::Bounded(CW::unbounded(5)),
                ExtCW::Epsilon(Kind::Unbounded),
            )
        );
    }

    #[test]
    fn test_objectives_keep_solver_order() {
        let result = classify(
            &objective_table(),
            &["sat", "(objectives (s2 1) (s0 2) (s1 3))"],
        )
        .unwrap();
        let names: Vec<&str> = result
            .model()
            .unwrap()
            .objectives()
            .iter()
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(names, vec!["goal", "x", "y"]);
    }

    #[test]
    fn test_unresolved_objective_keeps_solver_name() {
        let result =
            classify(&objective_table(), &["sat", "(objectives (|total cost| 3.5))"]).unwrap();
        let model = result.model().unwrap();
        assert_eq!(
            model.objective("total cost"),
            Some(&ExtCW::Bounded(CW::real(AlgReal::from_ratio(7, 2))))
        );
    }

    #[test]
    fn test_to_real_inside_objective() {
        let result = classify(
            &mixed_table(),
            &["sat", "(objectives (s2 (/ (to_real 7) 2)) (s1 (- (to_real 4))))"],
        )
        .unwrap();
        assert!(matches!(result, SolverResult::Satisfiable(_)));
        let model = result.model().unwrap();
        assert_eq!(
            model.objective("r"),
            Some(&ExtCW::Bounded(CW::real(AlgReal::from_ratio(7, 2))))
        );
        assert_eq!(model.objective("n"), Some(&ExtCW::Bounded(CW::unbounded(-4))));
    }

    #[test]
    fn test_unreadable_objective_aborts() {
        let err = classify(&objective_table(), &["sat", "(objectives (s2 1) (s0 foo))"])
            .unwrap_err();
        assert_eq!(
            parse_reason(err),
            ParseFailure::UnrecognizedExtended {
                item: "foo".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_objective_item() {
        let err =
            classify(&objective_table(), &["sat", "(objectives (s2 1 2))"]).unwrap_err();
        assert_eq!(
            parse_reason(err),
            ParseFailure::UnrecognizedShape {
                item: "(s2 1 2)".to_string()
            }
        );
    }
}

mod extended_values {
    use super::*;

    fn ext(text: &str) -> Result<ExtCW, ParseFailure> {
        extended_value(&Kind::Unbounded, &parse_sexpr(text).unwrap())
    }

    #[test]
    fn test_infinities() {
        assert_eq!(ext("oo").unwrap(), ExtCW::PosInfinity(Kind::Unbounded));
        assert_eq!(ext("-oo").unwrap(), ExtCW::NegInfinity(Kind::Unbounded));
        assert_eq!(ext("(- oo)").unwrap(), ExtCW::NegInfinity(Kind::Unbounded));
    }

    #[test]
    fn test_binary_minus_is_sum_with_negation() {
        let value = ext("(- oo 3)").unwrap();
        assert_eq!(value.clone().simplify(), ExtCW::PosInfinity(Kind::Unbounded));
        assert!(matches!(value, ExtCW::Sum(..)));
    }

    #[test]
    fn test_nary_sum_folds_left() {
        let value = ext("(+ 1 2 3)").unwrap().simplify();
        assert_eq!(value, ExtCW::Bounded(CW::unbounded(6)));
    }

    #[test]
    fn test_single_argument_sum_is_rejected() {
        assert_eq!(
            ext("(+ 1)").unwrap_err(),
            ParseFailure::UnrecognizedExtended {
                item: "(+ 1)".to_string()
            }
        );
    }

    #[test]
    fn test_error_names_innermost_item() {
        assert_eq!(
            ext("(interval bar 5)").unwrap_err(),
            ParseFailure::UnrecognizedExtended {
                item: "bar".to_string()
            }
        );
        assert_eq!(
            ext("(foo 1)").unwrap_err(),
            ParseFailure::UnrecognizedExtended {
                item: "(foo 1)".to_string()
            }
        );
    }

    #[test]
    fn test_real_extended_value() {
        let value = extended_value(&Kind::Real, &parse_sexpr("(+ (/ 1 2) epsilon)").unwrap())
            .unwrap();
        assert_eq!(value.kind(), &Kind::Real);
        assert!(!value.is_bounded());
    }
}

mod splitting {
    use super::*;

    #[test]
    fn test_three_models() {
        let results = split_models(
            &objective_table(),
            3,
            &lines(transcripts::THREE_MODELS),
            SENTINEL,
        )
        .unwrap();
        let xs: Vec<CW> = results
            .into_iter()
            .map(|r| sat_model(r).value_of("x").cloned().unwrap())
            .collect();
        assert_eq!(
            xs,
            vec![CW::unbounded(1), CW::unbounded(2), CW::unbounded(3)]
        );
    }

    #[test]
    fn test_chunks_inherit_status() {
        let results = split_models(
            &objective_table(),
            2,
            &lines(transcripts::PREAMBLE_MODELS),
            SENTINEL,
        )
        .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(
            sat_model(results[1].clone()).value_of("x"),
            Some(&CW::unbounded(2))
        );
    }

    #[test]
    fn test_unsat_is_repeated() {
        let results = split_models(&objective_table(), 3, &["unsat"], SENTINEL).unwrap();
        assert_eq!(results, vec![SolverResult::Unsatisfiable; 3]);
    }

    #[test]
    fn test_timeout_is_repeated() {
        let results = split_models(&objective_table(), 2, &["timeout"], SENTINEL).unwrap();
        assert_eq!(results, vec![SolverResult::TimeOut; 2]);
    }

    #[test]
    fn test_count_mismatch() {
        let err = split_models(
            &objective_table(),
            2,
            &lines(transcripts::THREE_MODELS),
            SENTINEL,
        )
        .unwrap_err();
        assert_eq!(
            err,
            SmtError::CountMismatch {
                expected: 2,
                actual: 3,
                raw: transcripts::THREE_MODELS.to_string(),
            }
        );
    }

    #[test]
    fn test_sentinel_must_match_exactly() {
        let output = ["sat", "((s0 1))", " smtlink-multi-model-separator"];
        let err = split_models(&objective_table(), 2, &output, SENTINEL).unwrap_err();
        assert!(matches!(err, SmtError::CountMismatch { actual: 1, .. }));
    }

    #[test]
    fn test_sentinel_consuming_status_is_reported() {
        let err = split_models(&mixed_table(), 2, &["sat", "x"], "sat").unwrap_err();
        assert_eq!(
            err,
            SmtError::CountMismatch {
                expected: 2,
                actual: 0,
                raw: "sat\nx".to_string(),
            }
        );
    }

    #[test]
    fn test_bad_chunk_fails_the_split() {
        let output = ["sat", "((s0 1))", SENTINEL, "sat", "((s0 1 2))"];
        let err = split_models(&objective_table(), 2, &output, SENTINEL).unwrap_err();
        assert!(matches!(err, SmtError::Parse { .. }));
    }
}

mod grouping {
    use super::*;

    #[test]
    fn test_one_expression_per_line() {
        assert_eq!(group_expressions(&["(a)", "(b)"]), vec!["(a)", "(b)"]);
    }

    #[test]
    fn test_expression_spanning_lines() {
        assert_eq!(
            group_expressions(&["(", "  (a 1)", ")"]),
            vec!["(\n  (a 1)\n)"]
        );
    }

    #[test]
    fn test_parens_in_strings_and_symbols_do_not_count() {
        assert_eq!(
            group_expressions(&["((s6 \"(\")", " (|x)| 1))"]),
            vec!["((s6 \"(\")\n (|x)| 1))"]
        );
    }

    #[test]
    fn test_parens_in_comments_do_not_count() {
        assert_eq!(group_expressions(&["(a ; )", " b)"]), vec!["(a ; )\n b)"]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        assert_eq!(group_expressions(&["", "(a)", "  "]), vec!["(a)"]);
    }
}

mod round_trip {
    use super::*;
    use proptest::prelude::*;
    use smtlink_emit::cw_literal;

    fn any_cw() -> impl Strategy<Value = CW> {
        prop_oneof![
            any::<bool>().prop_map(CW::bool),
            (1u32..=64, any::<bool>(), any::<i64>())
                .prop_map(|(width, signed, v)| CW::integer(Kind::Bounded { signed, width }, v)),
            any::<i64>().prop_map(CW::unbounded),
            (any::<i32>(), 1i32..1000)
                .prop_map(|(n, d)| CW::real(AlgReal::from_ratio(n, d))),
            any::<f32>().prop_map(CW::float),
            any::<f64>().prop_map(CW::double),
            "\\PC{0,12}".prop_map(CW::string),
            any::<char>().prop_map(CW::char),
            (0usize..3).prop_map(|i| {
                let label = ["Red", "Green", "Blue"][i];
                CW::uninterpreted(color(), label).unwrap()
            }),
            (0u32..100).prop_map(|n| {
                CW::uninterpreted(Kind::sort("T"), format!("T!val!{n}")).unwrap()
            }),
        ]
    }

    proptest! {
        #[test]
        fn test_literal_decodes_to_same_value(cw in any_cw()) {
            let text = cw_literal(&cw);
            let tree = parse_sexpr(&text).unwrap();
            prop_assert_eq!(decode_value(cw.kind(), &tree).unwrap(), cw);
        }
    }
}
