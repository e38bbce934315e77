use std::{
    collections::HashMap,
    fs,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

use ruleval::{
    EvalOptions, Expression, ExpressionError, RuntimeError, Value, Variables, callable, compile,
    evaluate,
};
use walkdir::WalkDir;

fn vars(pairs: &[(&str, Value)]) -> Variables {
    pairs.iter()
         .map(|(name, value)| ((*name).to_owned(), value.clone()))
         .collect()
}

fn assert_value(src: &str, expected: impl Into<Value>) {
    match evaluate(src, &Variables::new()) {
        Ok(value) => assert_eq!(value, expected.into(), "expression: {src}"),
        Err(e) => panic!("Expression failed: {e}"),
    }
}

fn assert_failure(src: &str) -> RuntimeError {
    match evaluate(src, &Variables::new()) {
        Ok(value) => panic!("Expression {src:?} succeeded with {value} but was expected to fail"),
        Err(e) => e.into_kind(),
    }
}

/// Values match when they are equal, or both are `NaN` numbers.
fn same_value(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) if a.is_nan() && b.is_nan() => true,
        _ => left == right,
    }
}

#[test]
fn case_files_evaluate_as_written() {
    let engine = Expression::with_standard_functions();
    let mut count = 0;

    for entry in
        WalkDir::new("tests/cases").into_iter()
                                   .filter_map(Result::ok)
                                   .filter(|e| e.path().extension().is_some_and(|ext| ext == "cases"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (line_number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (source, expected) =
                line.rsplit_once(" => ")
                    .unwrap_or_else(|| panic!("{path:?}:{}: missing ' => '", line_number + 1));
            count += 1;

            let actual = engine.evaluate(source, &Variables::new());

            if expected == "error" {
                assert!(actual.is_err(),
                        "{path:?}:{}: {source:?} should fail, got {actual:?}",
                        line_number + 1);
                continue;
            }

            let expected = engine.evaluate(expected, &Variables::new())
                                 .unwrap_or_else(|e| {
                                     panic!("{path:?}:{}: bad expectation: {e}", line_number + 1)
                                 });
            match actual {
                Ok(value) => assert!(same_value(&value, &expected),
                                     "{path:?}:{}: {source:?} gave {value:?}, expected {expected:?}",
                                     line_number + 1),
                Err(e) => panic!("{path:?}:{}: {e}", line_number + 1),
            }
        }
    }

    assert!(count > 0, "No cases found in tests/cases");
}

#[test]
fn precedence_and_associativity() {
    assert_value("2 + 3 * 4", 14);
    assert_value("(2 + 3) * 4", 20);
    assert_value("100 - 50 - 25", 25);
    assert_value("100 / 10 / 2", 5);
}

#[test]
fn minus_is_context_sensitive() {
    assert_value("5-3", 2);
    assert_value("(-3) + 5", 2);

    let bound = vars(&[("x", Value::Number(10.0))]);
    assert_eq!(evaluate("x-3", &bound), Ok(Value::Number(7.0)));
    assert_eq!(evaluate("(x)-3", &bound), Ok(Value::Number(7.0)));
}

#[test]
fn both_sides_of_or_run_by_default() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mut engine = Expression::new();
    engine.add_function("audit",
                        callable(move |_| {
                            counter.fetch_add(1, Ordering::SeqCst);
                            Value::Boolean(false)
                        }));

    assert_eq!(engine.evaluate("true or audit()", &Variables::new()),
               Ok(Value::Boolean(true)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let engine = engine.with_options(EvalOptions::default().with_short_circuit(true));
    assert_eq!(engine.evaluate("true or audit()", &Variables::new()),
               Ok(Value::Boolean(true)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn comparisons_do_not_chain() {
    assert_value("1 < 2 < 3", true);

    let strict = Expression::new().with_options(EvalOptions::default().with_strict(true));
    let err = strict.evaluate("1 < 2 < 3", &Variables::new()).unwrap_err();
    assert_eq!(err.kind(),
               &RuntimeError::TrailingTokens { token:  "operator '<'".to_owned(),
                                               offset: 6, });
}

#[test]
fn loose_equality_and_numeric_ordering() {
    assert_value("true == 1", true);
    assert_value(r#""10" > "9""#, true);
    assert_value(r#""b" > "a""#, false);
    assert_value(r#""" == 0"#, true);
}

#[test]
fn compiled_expressions_do_not_share_state() {
    let rule = compile("a * 2 + b");
    let first = vars(&[("a", Value::Number(1.0)), ("b", Value::Number(1.0))]);
    let second = vars(&[("a", Value::Number(10.0)), ("b", Value::Number(5.0))]);

    assert_eq!(rule.evaluate(&first), evaluate("a * 2 + b", &first));
    assert_eq!(rule.evaluate(&second), evaluate("a * 2 + b", &second));
    assert_eq!(rule.evaluate(&first), Ok(Value::Number(3.0)));

    let err = rule.evaluate(&vars(&[("a", Value::Number(1.0))])).unwrap_err();
    assert!(matches!(err.kind(), RuntimeError::UndefinedVariable { name, offset: 8 } if name == "b"));
    assert_eq!(rule.evaluate(&second), Ok(Value::Number(25.0)));
}

#[test]
fn compiled_expressions_are_shareable_across_threads() {
    let rule = Arc::new(compile("n * n"));

    let handles: Vec<_> = (0..4_i32).map(|n| {
                                    let rule = Arc::clone(&rule);
                                    thread::spawn(move || {
                                        rule.evaluate(&vars(&[("n", Value::from(n))]))
                                    })
                                })
                                .collect();

    for (n, handle) in (0..4_i32).zip(handles) {
        assert_eq!(handle.join().unwrap(), Ok(Value::Number(f64::from(n * n))));
    }
}

#[test]
fn unresolved_names_are_errors() {
    assert!(matches!(assert_failure("x + y"),
                     RuntimeError::UndefinedVariable { name, offset: 0 } if name == "x"));
    assert!(matches!(assert_failure("unknown(5)"),
                     RuntimeError::UndefinedFunction { name, offset: 0 } if name == "unknown"));
}

#[test]
fn lenient_inputs() {
    assert_value("", true);
    assert_value("(((5)", 5);
    assert_value("1 + 2)", 3);
    assert_value("3 # 4", 3);
}

#[test]
fn errors_report_the_expression_and_offset() {
    let err: ExpressionError = evaluate("1 + * 2", &Variables::new()).unwrap_err();
    assert_eq!(err.to_string(),
               "Failed to evaluate expression \"1 + * 2\": Error at offset 4: Unexpected token: \
                operator '*'.");
    assert_eq!(err.kind().offset(), 4);
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn base_rate_with_registered_max() {
    let mut engine = Expression::new();
    engine.add_constant("BASE_RATE", 5.0)
          .add_function("max",
                        callable(|args| {
                            let a = args.first().map_or(f64::NAN, Value::to_number);
                            let b = args.get(1).map_or(f64::NAN, Value::to_number);
                            Value::Number(a.max(b))
                        }));

    let rule = engine.parse("BASE_RATE + max(0, weight - 1) * 2");

    assert_eq!(rule.evaluate(&vars(&[("weight", Value::Number(0.5))])),
               Ok(Value::Number(5.0)));
    assert_eq!(rule.evaluate(&vars(&[("weight", Value::Number(3.0))])),
               Ok(Value::Number(9.0)));
}

#[test]
fn registry_edits_apply_to_later_parses() {
    let mut engine = Expression::new();
    engine.add_constant("LIMIT", 10);
    assert_eq!(engine.parse("LIMIT").evaluate(&Variables::new()),
               Ok(Value::Number(10.0)));

    engine.constants_mut().insert("LIMIT".to_owned(), Value::Number(20.0));
    assert_eq!(engine.parse("LIMIT").evaluate(&Variables::new()),
               Ok(Value::Number(20.0)));

    let overridden = HashMap::from([("LIMIT".to_owned(), Value::Number(1.0))]);
    assert_eq!(engine.parse("LIMIT").evaluate(&overridden), Ok(Value::Number(1.0)));
}

#[test]
fn depth_limit_is_configurable() {
    let deep = format!("{}1{}", "(".repeat(40), ")".repeat(40));
    assert_value(&deep, 1);

    let shallow = Expression::new().with_options(EvalOptions::default().with_max_depth(10));
    let err = shallow.evaluate(&deep, &Variables::new()).unwrap_err();
    assert_eq!(err.kind(),
               &RuntimeError::DepthExceeded { limit:  10,
                                              offset: 10, });

    assert!(matches!(assert_failure(&"(".repeat(50_000)),
                     RuntimeError::DepthExceeded { limit: 128, .. }));
}

#[test]
fn raised_depth_limits_run_on_a_large_enough_stack() {
    let source = format!("{}1{}", "(".repeat(2_000), ")".repeat(2_000));
    let engine = Expression::new().with_options(EvalOptions::default().with_max_depth(5_000));

    let result = thread::Builder::new().stack_size(256 * 1024 * 1024)
                                       .spawn(move || engine.evaluate(&source, &Variables::new()))
                                       .unwrap()
                                       .join()
                                       .unwrap();
    assert_eq!(result, Ok(Value::Number(1.0)));
}
