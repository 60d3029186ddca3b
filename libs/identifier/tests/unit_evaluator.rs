//! Unit tests for index argument evaluation

use pathkey_identifier::{
    to_identifier_string_bound, to_identifier_string_with, BinaryOperator, Bindings, Error, Expr,
    Interpreter, Result, SubexpressionEvaluator, TypeName, Value,
};
use std::sync::atomic::{AtomicUsize, Ordering};

mod test_support;

use test_support::path;

#[test]
fn test_literal_index_skips_evaluator() {
    let calls = AtomicUsize::new(0);
    let evaluator = |_: &Expr| -> Result<Value> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Integer(0))
    };

    let expr = Expr::indexer(path(&["Items"]), Expr::constant(5));
    assert_eq!(
        to_identifier_string_with(&expr, None, &evaluator).unwrap(),
        "Items[5]"
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_custom_evaluator_receives_argument() {
    let evaluator = |expr: &Expr| -> Result<Value> {
        match expr {
            Expr::Variable { name } if name == "key" => Ok(Value::string("k-1")),
            other => Err(Error::IndexEvaluationFailure {
                expression: other.to_string(),
                reason: "unknown".to_string(),
            }),
        }
    };

    let expr = Expr::indexer(path(&["Cache"]), Expr::variable("key"));
    assert_eq!(
        to_identifier_string_with(&expr, None, &evaluator).unwrap(),
        "Cache[\"k-1\"]"
    );
}

#[test]
fn test_evaluator_error_propagates_unchanged() {
    let failure = Error::IndexEvaluationFailure {
        expression: "i".to_string(),
        reason: "closure no longer alive".to_string(),
    };
    let expected = failure.clone();
    let evaluator = move |_: &Expr| -> Result<Value> { Err(failure.clone()) };

    let expr = Expr::member(
        Expr::indexer(path(&["Items"]), Expr::variable("i")),
        "Name",
    );
    assert_eq!(
        to_identifier_string_with(&expr, None, &evaluator),
        Err(expected)
    );
}

#[test]
fn test_values_are_not_cached_between_calls() {
    let expr = Expr::indexer(path(&["Items"]), Expr::variable("i"));

    let first = to_identifier_string_bound(&expr, None, &Bindings::new().bind("i", 1)).unwrap();
    let second = to_identifier_string_bound(&expr, None, &Bindings::new().bind("i", 2)).unwrap();

    assert_eq!(first, "Items[1]");
    assert_eq!(second, "Items[2]");
}

#[test]
fn test_interpreter_rejects_lambda_parameter() {
    let interpreter = Interpreter::default();
    let err = interpreter.evaluate(&Expr::parameter("x")).unwrap_err();
    assert!(matches!(err, Error::IndexEvaluationFailure { .. }));
}

#[test]
fn test_index_depending_on_parameter_fails() {
    // x => x.Items[x.Count - 1]
    let expr = Expr::indexer(
        path(&["Items"]),
        Expr::binary(BinaryOperator::Subtract, path(&["Count"]), Expr::constant(1)),
    );
    match to_identifier_string_bound(&expr, None, &Bindings::new()) {
        Err(Error::IndexEvaluationFailure { expression, .. }) => {
            assert_eq!(expression, "x.Count");
        }
        other => panic!("expected evaluation failure, got {:?}", other),
    }
}

#[test]
fn test_division_by_zero_fails() {
    let expr = Expr::indexer(
        path(&["Items"]),
        Expr::binary(BinaryOperator::Divide, Expr::variable("n"), Expr::constant(0)),
    );
    let bindings = Bindings::new().bind("n", 10);
    match to_identifier_string_bound(&expr, None, &bindings) {
        Err(Error::IndexEvaluationFailure { reason, .. }) => {
            assert_eq!(reason, "division by zero");
        }
        other => panic!("expected evaluation failure, got {:?}", other),
    }
}

#[test]
fn test_type_mismatch_fails() {
    let interpreter = Interpreter::new(Bindings::new().bind("flag", true));
    let expr = Expr::binary(BinaryOperator::Multiply, Expr::variable("flag"), Expr::constant(2));
    match interpreter.evaluate(&expr) {
        Err(Error::IndexEvaluationFailure { reason, .. }) => {
            assert_eq!(reason, "operator '*' is not defined for boolean and integer");
        }
        other => panic!("expected evaluation failure, got {:?}", other),
    }
}

#[test]
fn test_cast_index_argument() {
    let expr = Expr::indexer(
        path(&["Slots"]),
        Expr::convert(Expr::variable("ratio"), TypeName::from_full_name("System.Int64")),
    );
    let bindings: Bindings = [("ratio", Value::Decimal("7.8".parse().unwrap()))]
        .into_iter()
        .collect();
    assert_eq!(
        to_identifier_string_bound(&expr, None, &bindings).unwrap(),
        "Slots[7]"
    );
}

#[test]
fn test_bindings_from_iterator() {
    let bindings: Bindings = vec![("a", 1), ("b", 2)].into_iter().collect();
    assert_eq!(bindings.len(), 2);
    assert_eq!(bindings.get("b"), Some(&Value::Integer(2)));
    assert!(bindings.get("c").is_none());
}
