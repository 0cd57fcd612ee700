//! Call construction from dynamic parts
//!
//! Builds a new call node from a dynamically supplied head and an
//! argument sequence, typically one the variadic collector produced.
//! Construction is pure: nothing here evaluates — dynamic names are
//! computed by the collector before this layer sees them.

use metaquote_parser::{Arg, Expr};

use crate::error::{Error, Result};
use crate::eval::Evaluator;
use crate::quote::dots::{collect_dots, DotsEntry};
use crate::quote::expand::QuoteConfig;

/// Build a call node from a head and a collected argument sequence
///
/// A missing-argument placeholder can never be a call head.
pub fn new_call(head: Expr, args: Vec<Arg>) -> Result<Expr> {
    if head.is_missing() {
        return Err(Error::MissingArgumentMisuse {
            position: "a call head",
        });
    }
    Ok(Expr::call(head, args))
}

/// Collect entries — including splices and walrus dynamic names — and
/// build the call in one step
pub fn build_call(
    head: Expr,
    entries: Vec<DotsEntry>,
    eval: &mut dyn Evaluator,
    config: &QuoteConfig,
) -> Result<Expr> {
    let args = collect_dots(entries, eval, config)?;
    new_call(head, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Environment;
    use crate::eval::Interpreter;
    use crate::value::Value;
    use metaquote_parser::parse_quoted;

    #[test]
    fn test_new_call_rejects_missing_head() {
        assert!(matches!(
            new_call(Expr::Missing, vec![]),
            Err(Error::MissingArgumentMisuse { .. })
        ));
    }

    #[test]
    fn test_new_call_is_pure() {
        // An unbound symbol head is fine: nothing evaluates
        let call = new_call(Expr::symbol("ghost"), vec![Arg::positional(Expr::int(1))]).unwrap();
        assert_eq!(
            call,
            Expr::call_symbol("ghost", vec![Arg::positional(Expr::int(1))])
        );
    }

    #[test]
    fn test_build_call_collects_walrus_names() {
        let env = Environment::root();
        env.borrow_mut()
            .define_value("nm", Value::Str("width".to_string()));

        let entries = vec![
            DotsEntry::positional(parse_quoted("x").unwrap(), &env),
            DotsEntry::positional(parse_quoted("!!nm := 2").unwrap(), &env),
        ];
        let call = build_call(
            Expr::symbol("resize"),
            entries,
            &mut Interpreter::new(),
            &QuoteConfig::default(),
        )
        .unwrap();

        assert_eq!(
            call,
            Expr::call_symbol(
                "resize",
                vec![
                    Arg::positional(Expr::symbol("x")),
                    Arg::named("width", Expr::int(2)),
                ]
            )
        );
    }

    #[test]
    fn test_build_call_head_may_be_dynamic() {
        let env = Environment::root();
        let head = Expr::call_symbol("resolver", vec![Arg::positional(Expr::str("op"))]);
        let entries = vec![DotsEntry::positional(parse_quoted("x").unwrap(), &env)];

        let call = build_call(
            head.clone(),
            entries,
            &mut Interpreter::new(),
            &QuoteConfig::default(),
        )
        .unwrap();
        assert_eq!(
            call,
            Expr::call(head, vec![Arg::positional(Expr::symbol("x"))])
        );
    }
}
