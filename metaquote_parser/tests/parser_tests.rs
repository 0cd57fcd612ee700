//! Parser tests
//!
//! Plain-mode parsing: literals, calls, operator precedence, and the
//! native low-precedence reading of `!`.

use metaquote_parser::{parse, Arg, Expr, Literal, ParseError};
use pretty_assertions::assert_eq;

fn sym(name: &str) -> Expr {
    Expr::symbol(name)
}

fn int(value: i64) -> Expr {
    Expr::Constant(Literal::Int(value))
}

fn binop(op: &str, left: Expr, right: Expr) -> Expr {
    Expr::call_symbol(op, vec![Arg::positional(left), Arg::positional(right)])
}

fn not(operand: Expr) -> Expr {
    Expr::call_symbol("!", vec![Arg::positional(operand)])
}

// ==================== Literals ====================

#[test]
fn test_integer_literals() {
    assert_eq!(parse("42").unwrap(), int(42));
    assert_eq!(parse("1_000_000").unwrap(), int(1_000_000));
}

#[test]
fn test_float_literals() {
    assert_eq!(parse("3.14").unwrap(), Expr::Constant(Literal::Float(3.14)));
    assert_eq!(parse("1e-5").unwrap(), Expr::Constant(Literal::Float(1e-5)));
}

#[test]
fn test_string_literals() {
    assert_eq!(
        parse(r#""hi there""#).unwrap(),
        Expr::Constant(Literal::Str("hi there".to_string()))
    );
    assert_eq!(
        parse(r#""line\nbreak""#).unwrap(),
        Expr::Constant(Literal::Str("line\nbreak".to_string()))
    );
}

#[test]
fn test_keyword_literals() {
    assert_eq!(parse("true").unwrap(), Expr::Constant(Literal::Bool(true)));
    assert_eq!(parse("false").unwrap(), Expr::Constant(Literal::Bool(false)));
    assert_eq!(parse("null").unwrap(), Expr::Constant(Literal::Null));
}

#[test]
fn test_invalid_escape_is_an_error() {
    assert!(matches!(
        parse(r#""bad\q""#),
        Err(ParseError::InvalidEscape { .. })
    ));
}

// ==================== Operator Precedence ====================

#[test]
fn test_product_binds_tighter_than_sum() {
    assert_eq!(
        parse("1 + 2 * 3").unwrap(),
        binop("+", int(1), binop("*", int(2), int(3)))
    );
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(
        parse("(1 + 2) * 3").unwrap(),
        binop("*", binop("+", int(1), int(2)), int(3))
    );
}

#[test]
fn test_sum_is_left_associative() {
    assert_eq!(
        parse("1 - 2 - 3").unwrap(),
        binop("-", binop("-", int(1), int(2)), int(3))
    );
}

#[test]
fn test_power_is_right_associative() {
    assert_eq!(
        parse("2 ^ 3 ^ 4").unwrap(),
        binop("^", int(2), binop("^", int(3), int(4)))
    );
}

#[test]
fn test_comparison_above_logical() {
    // a == b && c < d  →  (a == b) && (c < d)
    assert_eq!(
        parse("a == b && c < d").unwrap(),
        binop(
            "&&",
            binop("==", sym("a"), sym("b")),
            binop("<", sym("c"), sym("d"))
        )
    );
}

#[test]
fn test_unary_minus_binds_tight() {
    assert_eq!(
        parse("-a + b").unwrap(),
        binop("+", Expr::call_symbol("-", vec![Arg::positional(sym("a"))]), sym("b"))
    );
}

// ==================== Negation (plain mode) ====================

#[test]
fn test_negation_is_low_precedence() {
    // !a + b  →  !(a + b)
    assert_eq!(parse("!a + b").unwrap(), not(binop("+", sym("a"), sym("b"))));
    // !a == b  →  !(a == b)
    assert_eq!(parse("!a == b").unwrap(), not(binop("==", sym("a"), sym("b"))));
}

#[test]
fn test_negation_stays_above_lazy_and() {
    // !a && b  →  (!a) && b
    assert_eq!(parse("!a && b").unwrap(), binop("&&", not(sym("a")), sym("b")));
}

#[test]
fn test_double_negation_in_plain_mode_is_literal() {
    // No quoting context: !!x + y is !(!(x + y))
    assert_eq!(
        parse("!!x + y").unwrap(),
        not(not(binop("+", sym("x"), sym("y"))))
    );
}

#[test]
fn test_quad_negation_in_plain_mode_is_literal() {
    assert_eq!(parse("!!!!x").unwrap(), not(not(not(not(sym("x"))))));
}

// ==================== Calls ====================

#[test]
fn test_call_with_positional_args() {
    assert_eq!(
        parse("f(x, 1)").unwrap(),
        Expr::call_symbol("f", vec![Arg::positional(sym("x")), Arg::positional(int(1))])
    );
}

#[test]
fn test_call_with_named_args() {
    assert_eq!(
        parse("f(x, y = 1)").unwrap(),
        Expr::call_symbol("f", vec![Arg::positional(sym("x")), Arg::named("y", int(1))])
    );
}

#[test]
fn test_named_arg_is_not_comparison() {
    // y == 1 stays a positional comparison argument
    assert_eq!(
        parse("f(y == 1)").unwrap(),
        Expr::call_symbol("f", vec![Arg::positional(binop("==", sym("y"), int(1)))])
    );
}

#[test]
fn test_empty_call() {
    assert_eq!(parse("f()").unwrap(), Expr::call_symbol("f", vec![]));
}

#[test]
fn test_missing_argument_slots() {
    // An empty slot is a preserved missing-argument placeholder
    assert_eq!(
        parse("f(a, , b)").unwrap(),
        Expr::call_symbol(
            "f",
            vec![
                Arg::positional(sym("a")),
                Arg::positional(Expr::Missing),
                Arg::positional(sym("b")),
            ]
        )
    );
}

#[test]
fn test_trailing_separator_produces_trailing_missing() {
    // The parser keeps the slot; dropping it is the collector's trim rule
    assert_eq!(
        parse("f(a, )").unwrap(),
        Expr::call_symbol(
            "f",
            vec![Arg::positional(sym("a")), Arg::positional(Expr::Missing)]
        )
    );
}

#[test]
fn test_curried_call_head() {
    // The head of a call may be any postfix expression
    assert_eq!(
        parse("f(x)(y)").unwrap(),
        Expr::call(
            Expr::call_symbol("f", vec![Arg::positional(sym("x"))]),
            vec![Arg::positional(sym("y"))]
        )
    );
}

#[test]
fn test_walrus_argument() {
    // lhs := rhs parses as a `:=` call for the collector to resolve
    assert_eq!(
        parse("f(nm := 2)").unwrap(),
        Expr::call_symbol(
            "f",
            vec![Arg::positional(Expr::call_symbol(
                ":=",
                vec![Arg::positional(sym("nm")), Arg::positional(int(2))]
            ))]
        )
    );
}

#[test]
fn test_newlines_inside_call() {
    assert_eq!(
        parse("f(\n  x,\n  y\n)").unwrap(),
        Expr::call_symbol("f", vec![Arg::positional(sym("x")), Arg::positional(sym("y"))])
    );
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        parse("f(x) # applies f\n").unwrap(),
        Expr::call_symbol("f", vec![Arg::positional(sym("x"))])
    );
}

// ==================== Errors ====================

#[test]
fn test_trailing_input_is_an_error() {
    assert!(matches!(
        parse("f(x) g"),
        Err(ParseError::TrailingInput { .. })
    ));
}

#[test]
fn test_unterminated_string_is_surfaced() {
    assert!(matches!(
        parse(r#"f("abc"#),
        Err(ParseError::UnterminatedString { .. })
    ));
}

#[test]
fn test_unexpected_eof() {
    assert!(matches!(parse("f(x, "), Err(ParseError::UnexpectedEof { .. })));
}

#[test]
fn test_integer_overflow_is_invalid_number() {
    assert!(matches!(
        parse("99999999999999999999"),
        Err(ParseError::InvalidNumber { .. })
    ));
}
