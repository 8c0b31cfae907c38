use std::rc::Rc;

use crate::parser::prelude::{
    parse_definition, parse_expression, parse_tokens, Expr, ParseError, ParseErrorType
};
use crate::utils::prelude::SrcSpan;

#[test]
fn test_atoms() -> Result<(), ParseError> {
    assert_eq!(parse_expression("42")?, Expr::number(42));
    assert_eq!(parse_expression("-7")?, Expr::number(-7));
    assert_eq!(parse_expression("nil")?, Expr::symbol("nil"));
    assert_eq!(parse_expression(":1029")?, Expr::symbol(":1029"));

    Ok(())
}

#[test]
fn test_applications() -> Result<(), ParseError> {
    let parsed = parse_expression("ap ap add 1 ap neg 2")?;

    let expected = Expr::ap(
        Expr::ap(Expr::symbol("add"), Expr::number(1)),
        Expr::ap(Expr::symbol("neg"), Expr::number(2)),
    );

    assert_eq!(parsed, expected);

    Ok(())
}

#[test]
fn test_round_trip() -> Result<(), ParseError> {
    let inputs = [
        "ap ap ap s i i 42",
        "ap ap s ap ap c ap eq 0 1 ap ap b ap mul 2 ap ap b pwr2 ap add -1",
        "ap ap cons ap ap cons 1 2 ap ap cons 3 4",
        "galaxy",
        "-9223372036854775808",
    ];

    for input in inputs {
        let parsed = parse_expression(input)?;

        assert_eq!(parsed.to_string(), input);
    }

    Ok(())
}

#[test]
fn test_number_spellings_are_canonicalized() -> Result<(), ParseError> {
    let parsed = parse_expression("ap ap add +5 007")?;

    assert_eq!(parsed, parse_expression("ap ap add 5 7")?);
    assert_eq!(parsed.to_string(), "ap ap add 5 7");
    assert_eq!(parse_expression("-0")?.to_string(), "0");

    Ok(())
}

#[test]
fn test_round_trip_normalizes_whitespace() -> Result<(), ParseError> {
    let parsed = parse_expression("  ap\tap add   1\n 2 ")?;

    assert_eq!(parsed.to_string(), "ap ap add 1 2");

    Ok(())
}

#[test]
fn test_deep_nesting() -> Result<(), ParseError> {
    let depth = 2_000;
    let input = format!("{}x{}", "ap ".repeat(depth), " 1".repeat(depth));

    let parsed = parse_expression(&input)?;

    let mut spine = 0;
    let mut current: &Expr = &parsed;
    while let Some(ap) = current.as_ap() {
        spine += 1;
        current = &*ap.left;
    }

    assert_eq!(spine, depth);
    assert_eq!(current, &*Expr::symbol("x"));

    Ok(())
}

#[test]
fn test_unexpected_eof() {
    let err = parse_expression("ap ap add 1").unwrap_err();

    assert_eq!(err.error, ParseErrorType::UnexpectedEof { open_applications: 1 });
    assert_eq!(err.span, SrcSpan::point(11));

    let err = parse_expression("").unwrap_err();

    assert_eq!(err.error, ParseErrorType::UnexpectedEof { open_applications: 0 });
}

#[test]
fn test_trailing_tokens() {
    let err = parse_expression("invalid syntax here").unwrap_err();

    assert_eq!(
        err.error,
        ParseErrorType::TrailingTokens { token: crate::lexer::prelude::Token::Symbol("syntax".into()) }
    );
    assert_eq!(err.span, SrcSpan { start: 8, end: 19 });
}

#[test]
fn test_parse_tokens_leaves_rest() -> Result<(), ParseError> {
    let tokens = ["ap", "inc", "1", "ap", "dec", "2"];

    let (first, rest) = parse_tokens(&tokens)?;
    assert_eq!(first.to_string(), "ap inc 1");
    assert_eq!(rest, &["ap", "dec", "2"]);

    let (second, rest) = parse_tokens(rest)?;
    assert_eq!(second.to_string(), "ap dec 2");
    assert!(rest.is_empty());

    Ok(())
}

#[test]
fn test_parse_tokens_exhausted() {
    let tokens = vec!["ap".to_string(), "ap".to_string(), "cons".to_string()];

    let err = parse_tokens(&tokens).unwrap_err();

    assert_eq!(err.error, ParseErrorType::UnexpectedEof { open_applications: 2 });
    assert_eq!(err.span, SrcSpan::point(3));
}

#[test]
fn test_definition() -> Result<(), ParseError> {
    let definition = parse_definition(":1029 = ap ap cons 7 nil", 10)?;

    assert_eq!(definition.name, ":1029");
    assert_eq!(definition.location, SrcSpan { start: 10, end: 15 });
    assert_eq!(definition.line, SrcSpan { start: 10, end: 34 });
    assert_eq!(
        definition.expr,
        Expr::cons(Expr::number(7), Expr::symbol("nil"))
    );
    assert_eq!(definition.to_string(), ":1029 = ap ap cons 7 nil");

    Ok(())
}

#[test]
fn test_invalid_definitions() {
    let cases = [
        ("", ParseErrorType::InvalidDefinition { pieces: 1 }),
        ("galaxy", ParseErrorType::InvalidDefinition { pieces: 1 }),
        ("a = b = c", ParseErrorType::InvalidDefinition { pieces: 3 }),
        ("a=1", ParseErrorType::InvalidDefinition { pieces: 1 }),
        (" = 1", ParseErrorType::InvalidName { name: "".into() }),
        ("two words = 1", ParseErrorType::InvalidName { name: "two words".into() }),
        ("a = ", ParseErrorType::UnexpectedEof { open_applications: 0 }),
        ("a = ap 1", ParseErrorType::UnexpectedEof { open_applications: 1 }),
    ];

    for (line, expected) in cases {
        let err = parse_definition(line, 0).unwrap_err();

        assert_eq!(err.error, expected, "line `{line}`");
    }
}

#[test]
fn test_definition_eof_points_at_line_end() {
    let err = parse_definition("a = ap 1", 100).unwrap_err();

    assert_eq!(err.span, SrcSpan::point(108));
}

#[test]
fn test_shared_nodes_print_twice() {
    let shared = Expr::ap(Expr::symbol("inc"), Expr::number(1));
    let expr = Expr::ap(Rc::clone(&shared), shared);

    assert_eq!(expr.to_string(), "ap ap inc 1 ap inc 1");
}
