//! Quoting-mode parser tests
//!
//! The precedence reassignment for `!` runs: exactly two bind as
//! `UnquoteOne`, exactly three as `UnquoteSplice`, both with prefix
//! strength; anything else keeps literal negation semantics or is
//! rejected as ambiguous.

use metaquote_parser::{parse_quoted, Arg, Expr, ParseError};
use pretty_assertions::assert_eq;

fn sym(name: &str) -> Expr {
    Expr::symbol(name)
}

fn int(value: i64) -> Expr {
    Expr::Constant(metaquote_parser::Literal::Int(value))
}

fn binop(op: &str, left: Expr, right: Expr) -> Expr {
    Expr::call_symbol(op, vec![Arg::positional(left), Arg::positional(right)])
}

fn not(operand: Expr) -> Expr {
    Expr::call_symbol("!", vec![Arg::positional(operand)])
}

fn unquote(inner: Expr) -> Expr {
    Expr::UnquoteOne(Box::new(inner))
}

fn splice(inner: Expr) -> Expr {
    Expr::UnquoteSplice(Box::new(inner))
}

// ==================== Marker Recognition ====================

#[test]
fn test_double_bang_is_unquote() {
    assert_eq!(parse_quoted("!!x").unwrap(), unquote(sym("x")));
}

#[test]
fn test_triple_bang_is_unquote_splice() {
    assert_eq!(parse_quoted("!!!xs").unwrap(), splice(sym("xs")));
}

#[test]
fn test_single_bang_keeps_negation_meaning() {
    assert_eq!(
        parse_quoted("!a + b").unwrap(),
        not(binop("+", sym("a"), sym("b")))
    );
}

#[test]
fn test_marker_operand_may_be_a_call() {
    assert_eq!(
        parse_quoted("!!lookup(n)").unwrap(),
        unquote(Expr::call_symbol("lookup", vec![Arg::positional(sym("n"))]))
    );
}

#[test]
fn test_marker_operand_may_be_parenthesized() {
    assert_eq!(
        parse_quoted("!!(a + b)").unwrap(),
        unquote(binop("+", sym("a"), sym("b")))
    );
}

// ==================== Marker Precedence ====================

#[test]
fn test_unquote_binds_tighter_than_binary_operators() {
    // f(!!x + !!y)  →  f((!!x) + (!!y)), not f(!!(x + !!y))
    assert_eq!(
        parse_quoted("f(!!x + !!y)").unwrap(),
        Expr::call_symbol(
            "f",
            vec![Arg::positional(binop("+", unquote(sym("x")), unquote(sym("y"))))]
        )
    );
}

#[test]
fn test_unquote_inside_product() {
    // a + !!x * 2  →  a + ((!!x) * 2)
    assert_eq!(
        parse_quoted("a + !!x * 2").unwrap(),
        binop("+", sym("a"), binop("*", unquote(sym("x")), int(2)))
    );
}

#[test]
fn test_unquote_under_comparison() {
    // !!x == y  →  (!!x) == y
    assert_eq!(
        parse_quoted("!!x == y").unwrap(),
        binop("==", unquote(sym("x")), sym("y"))
    );
}

#[test]
fn test_splice_among_other_args() {
    assert_eq!(
        parse_quoted("f(!!!xs, z = 1)").unwrap(),
        Expr::call_symbol(
            "f",
            vec![Arg::positional(splice(sym("xs"))), Arg::named("z", int(1))]
        )
    );
}

// ==================== Escaping ====================

#[test]
fn test_parenthesized_negation_stays_literal() {
    // Explicit grouping is the escape hatch for literal repeated negation
    assert_eq!(parse_quoted("!(!x)").unwrap(), not(not(sym("x"))));
}

#[test]
fn test_unquote_of_parenthesized_negation() {
    assert_eq!(parse_quoted("!!(!x)").unwrap(), unquote(not(sym("x"))));
}

#[test]
fn test_four_bangs_are_ambiguous() {
    let err = parse_quoted("!!!!x").unwrap_err();
    assert!(matches!(err, ParseError::AmbiguousNegation { count: 4, .. }));
}

#[test]
fn test_five_bangs_are_ambiguous() {
    assert!(matches!(
        parse_quoted("!!!!!x"),
        Err(ParseError::AmbiguousNegation { count: 5, .. })
    ));
}

// ==================== Mode Isolation ====================

#[test]
fn test_plain_mode_never_produces_markers() {
    let expr = metaquote_parser::parse("!!x + !!y").unwrap();
    assert!(!expr.contains_marker());
}

#[test]
fn test_nested_markers_parse_inside_operands() {
    // The parser records nested markers verbatim; which rewrite pass
    // resolves them is decided later, by quoting-context ownership
    let expr = parse_quoted("capture_here(!!inner)").unwrap();
    assert_eq!(
        expr,
        Expr::call_symbol(
            "capture_here",
            vec![Arg::positional(unquote(sym("inner")))]
        )
    );
}

#[test]
fn test_unquote_operand_with_unary_minus() {
    assert_eq!(
        parse_quoted("!!-x").unwrap(),
        unquote(Expr::call_symbol("-", vec![Arg::positional(sym("x"))]))
    );
}
