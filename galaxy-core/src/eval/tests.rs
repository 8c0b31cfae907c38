use std::{error::Error, rc::Rc};

use crate::{
    environment::prelude::SymbolTable,
    parser::prelude::{parse_expression, Expr, Memo}
};

use super::prelude::{eval, Combinator, EvalError, Evaluator};

const PWR2: &str = "ap ap s ap ap c ap eq 0 1 ap ap b ap mul 2 ap ap b pwr2 ap add -1";

type TestResult = Result<(), Box<dyn Error>>;

fn pwr2_table() -> SymbolTable {
    let mut table = SymbolTable::new();
    table.define("pwr2", parse_expression(PWR2).unwrap());

    table
}

fn eval_str(src: &str) -> Result<Rc<Expr>, Box<dyn Error>> {
    let expr = parse_expression(src)?;

    Ok(eval(&expr, &SymbolTable::new())?)
}

fn assert_evals_to(src: &str, expected: &str) {
    let value = eval_str(src).unwrap();
    let expected = parse_expression(expected).unwrap();

    assert_eq!(value, expected, "evaluating `{src}`");
}

#[test]
fn test_arithmetic() {
    assert_evals_to("ap neg 5", "-5");
    assert_evals_to("ap neg -5", "5");
    assert_evals_to("ap ap add 1 2", "3");
    assert_evals_to("ap ap add -4 1", "-3");
    assert_evals_to("ap ap mul 4 -2", "-8");
    assert_evals_to("ap ap div 4 2", "2");
    assert_evals_to("ap ap div 5 -3", "-1");
    assert_evals_to("ap ap div -5 3", "-1");
    assert_evals_to("ap ap div -5 -3", "1");
}

#[test]
fn test_arithmetic_wraps() {
    assert_evals_to("ap ap add 9223372036854775807 1", "-9223372036854775808");
    assert_evals_to("ap neg -9223372036854775808", "-9223372036854775808");
    assert_evals_to("ap ap div -9223372036854775808 -1", "-9223372036854775808");
}

#[test]
fn test_comparisons() {
    assert_evals_to("ap ap lt 0 -1", "f");
    assert_evals_to("ap ap lt 0 0", "f");
    assert_evals_to("ap ap lt -1 0", "t");
    assert_evals_to("ap ap eq 3 3", "t");
    assert_evals_to("ap ap eq 3 -3", "f");
}

#[test]
fn test_arguments_are_reduced_before_arithmetic() {
    assert_evals_to("ap ap add ap ap mul 2 3 ap neg 1", "5");
    assert_evals_to("ap neg ap ap t 4 5", "-4");
}

#[test]
fn test_combinator_laws() {
    assert_evals_to("ap i x0", "x0");
    assert_evals_to("ap ap t x0 x1", "x0");
    assert_evals_to("ap ap f x0 x1", "x1");
    assert_evals_to("ap ap ap s x0 x1 x2", "ap ap x0 x2 ap x1 x2");
    assert_evals_to("ap ap ap s mul ap add 1 6", "42");
    assert_evals_to("ap ap ap c add 1 2", "3");
    assert_evals_to("ap ap ap c x0 x1 x2", "ap ap x0 x2 x1");
    assert_evals_to("ap ap ap b x0 x1 x2", "ap x0 ap x1 x2");
    assert_evals_to("ap ap ap b neg neg 7", "7");
    assert_evals_to("ap ap ap c add 3 5", "8");
    assert_evals_to("ap ap t 1 2", "1");
    assert_evals_to("ap ap f 1 2", "2");
    assert_evals_to("ap ap add 3 4", "7");
    assert_evals_to("ap ap mul -2 5", "-10");
    assert_evals_to("ap ap div 7 3", "2");
    assert_evals_to("ap ap lt 3 5", "t");
}

#[test]
fn test_self_application_of_a_number() {
    // s i i x = (i x) (i x) = x x
    let err = eval_str("ap ap ap s i i 42").unwrap_err();

    assert_eq!(
        err.downcast_ref::<EvalError>(),
        Some(&EvalError::NotAFunction { value: 42, arguments: 1 })
    );

    assert_evals_to("ap ap ap s i i i", "i");
}

#[test]
fn test_lists() {
    assert_evals_to("ap car ap ap cons x0 x1", "x0");
    assert_evals_to("ap cdr ap ap cons x0 x1", "x1");
    assert_evals_to("ap ap ap cons x0 x1 x2", "ap ap x2 x0 x1");
    assert_evals_to("ap nil x0", "t");
    assert_evals_to("ap isnil nil", "t");
    assert_evals_to("ap isnil ap ap cons 1 nil", "f");
    assert_evals_to("ap isnil 0", "f");
    assert_evals_to("ap car ap cdr ap ap cons 1 ap ap cons 2 nil", "2");
}

#[test]
fn test_cons_reduces_components() -> TestResult {
    let cases = [
        ("ap ap cons 1 nil", "ap ap cons 1 nil"),
        ("ap ap cons 1 ap ap cons 2 nil", "ap ap cons 1 ap ap cons 2 nil"),
        ("ap ap cons ap ap cons 1 2 ap ap cons 3 4", "ap ap cons ap ap cons 1 2 ap ap cons 3 4"),
        ("ap ap cons ap ap add 1 2 ap i nil", "ap ap cons 3 nil"),
    ];

    for (input, expected) in cases {
        let value = eval_str(input)?;

        assert_eq!(value, parse_expression(expected)?, "evaluating `{input}`");

        let (head, _) = value.as_pair().expect("a pair");

        assert!(head.as_ap().map_or(true, |ap| ap.is_memoized()));
    }

    Ok(())
}

#[test]
fn test_pwr2() -> TestResult {
    let table = pwr2_table();

    for (n, expected) in [(0, 1), (1, 2), (3, 8), (4, 16), (5, 32), (8, 256)] {
        let expr = parse_expression(&format!("ap pwr2 {n}"))?;

        assert_eq!(eval(&expr, &table)?, Expr::number(expected), "pwr2 {n}");
    }

    Ok(())
}

#[test]
fn test_second_reduction_is_free() -> TestResult {
    let table = pwr2_table();
    let evaluator = Evaluator::new(&table);
    let expr = parse_expression("ap pwr2 8")?;

    let first = evaluator.reduce(&expr)?;
    let steps = evaluator.steps();

    assert!(steps > 0);

    let second = evaluator.reduce(&expr)?;

    assert_eq!(evaluator.steps(), steps);
    assert!(Rc::ptr_eq(&first, &second));

    Ok(())
}

#[test]
fn test_shared_argument_is_reduced_once() -> TestResult {
    let table = pwr2_table();

    let alone = Evaluator::new(&table);
    alone.reduce(&parse_expression("ap pwr2 8")?)?;

    let argument = parse_expression("ap pwr2 8")?;
    let expr = Expr::ap(
        Expr::ap(Expr::ap(Expr::symbol("s"), Expr::symbol("add")), Expr::symbol("i")),
        argument
    );

    let evaluator = Evaluator::new(&table);

    assert_eq!(evaluator.reduce(&expr)?, Expr::number(512));
    assert!(evaluator.steps() < 2 * alone.steps());

    Ok(())
}

#[test]
fn test_memo_marks() -> TestResult {
    let table = SymbolTable::new();
    let evaluator = Evaluator::new(&table);

    let reducible = parse_expression("ap ap add 1 2")?;
    evaluator.reduce(&reducible)?;

    match reducible.as_ap().and_then(|ap| ap.memo()) {
        Some(Memo::Reduced(value)) => assert_eq!(*value, Expr::number(3)),
        memo => panic!("unexpected memo: {memo:?}"),
    }

    let partial = parse_expression("ap add 5")?;
    let value = evaluator.reduce(&partial)?;

    assert!(Rc::ptr_eq(&value, &partial));
    assert!(matches!(partial.as_ap().and_then(|ap| ap.memo()), Some(Memo::Normal)));

    Ok(())
}

#[test]
fn test_reducing_a_value_changes_nothing() -> TestResult {
    let table = pwr2_table();
    let evaluator = Evaluator::new(&table);

    for src in ["42", "nil", "ap ap cons 1 ap ap cons 2 nil", "ap add 5", "ap pwr2 3"] {
        let value = evaluator.reduce(&parse_expression(src)?)?;
        let steps = evaluator.steps();
        let again = evaluator.reduce(&value)?;

        assert_eq!(again, value, "reducing `{src}` twice");
        assert_eq!(evaluator.steps(), steps);
    }

    Ok(())
}

#[test]
fn test_values_are_returned_unchanged() {
    assert_evals_to("s", "s");
    assert_evals_to("ap add 5", "ap add 5");
    assert_evals_to("ap ap s x0 x1", "ap ap s x0 x1");
    assert_evals_to("ap ap unknown 1 2", "ap ap unknown 1 2");
    assert_evals_to("-3", "-3");
}

#[test]
fn test_laziness() {
    assert_evals_to("ap ap t 1 ap 1 2", "1");
    assert_evals_to("ap ap f ap ap div 1 0 7", "7");
    assert_evals_to("ap car ap ap cons 1 ap undefined 2", "1");
}

#[test]
fn test_definitions_take_precedence() -> TestResult {
    let mut table = SymbolTable::new();
    table.define("add", parse_expression("mul")?);
    table.define("two", parse_expression("ap ap add 1 1")?);

    assert_eq!(eval(&parse_expression("two")?, &table)?, Expr::number(1));
    assert_eq!(eval(&parse_expression("ap ap add 3 4")?, &table)?, Expr::number(12));

    Ok(())
}

#[test]
fn test_definition_is_reduced_once() -> TestResult {
    let mut table = SymbolTable::new();
    table.define("x", parse_expression("ap pwr2 8")?);
    table.define("pwr2", parse_expression(PWR2)?);

    let evaluator = Evaluator::new(&table);

    evaluator.reduce(&parse_expression("x")?)?;
    let steps = evaluator.steps();

    assert_eq!(evaluator.reduce(&parse_expression("ap ap add x x")?)?, Expr::number(512));
    // Two unfoldings of `x` plus the addition.
    assert_eq!(evaluator.steps(), steps + 3);

    Ok(())
}

#[test]
fn test_not_a_function() {
    let err = eval_str("ap 1 2").unwrap_err();

    assert_eq!(
        err.downcast_ref::<EvalError>(),
        Some(&EvalError::NotAFunction { value: 1, arguments: 1 })
    );
}

#[test]
fn test_division_by_zero() {
    let err = eval_str("ap ap div 5 0").unwrap_err();

    assert_eq!(
        err.downcast_ref::<EvalError>(),
        Some(&EvalError::DivisionByZero { numerator: 5 })
    );
}

#[test]
fn test_partial_application_as_number() {
    let err = eval_str("ap neg ap add 1").unwrap_err();

    assert_eq!(
        err.downcast_ref::<EvalError>(),
        Some(&EvalError::Arity { combinator: Combinator::Add, expected: 2, given: 1 })
    );
}

#[test]
fn test_not_a_number() {
    let err = eval_str("ap ap add nil 1").unwrap_err();

    assert_eq!(
        err.downcast_ref::<EvalError>(),
        Some(&EvalError::NotANumber { combinator: Combinator::Add, found: "nil".to_string() })
    );

    let err = eval_str("ap neg ap ap cons 1 2").unwrap_err();

    assert!(matches!(
        err.downcast_ref::<EvalError>(),
        Some(EvalError::NotANumber { combinator: Combinator::Neg, .. })
    ));
}

#[test]
fn test_long_recursion() -> TestResult {
    let mut table = SymbolTable::new();
    // count n = if n == 0 then 0 else count (n - 1)
    table.define("count", parse_expression(
        "ap ap s ap ap c ap eq 0 0 ap ap b count ap add -1"
    )?);

    let expr = parse_expression("ap count 20000")?;

    assert_eq!(eval(&expr, &table)?, Expr::number(0));

    Ok(())
}

#[test]
fn test_combinator_names() {
    for combinator in Combinator::ALL {
        assert_eq!(Combinator::from_name(combinator.name()), Some(combinator));
        assert_eq!(combinator.consumes(combinator.arity()), Some(combinator.arity()));
        assert_eq!(combinator.consumes(combinator.arity() - 1), None);
    }

    assert_eq!(Combinator::Cons.consumes(3), Some(3));
    assert_eq!(Combinator::T.consumes(5), Some(2));
    assert_eq!(Combinator::from_name("inc"), None);
}
