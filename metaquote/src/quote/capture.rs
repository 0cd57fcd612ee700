//! Quoting functions
//!
//! Two axes: whose code is reified (the developer's own, or the code a
//! caller wrote into a lazy argument) × how much of it (one expression,
//! or an ordered, optionally named sequence run through the variadic
//! collector).
//!
//! None of these evaluate the captured expression itself; evaluation only
//! happens inside unquoted fragments, against the environment the code
//! was written in.

use metaquote_parser::{parse_quoted, Arg, Expr};

use crate::env::{Binding, EnvRef};
use crate::error::{Error, Result};
use crate::eval::Evaluator;
use crate::quote::dots::{collect_dots, DotsEntry};
use crate::quote::expand::{expand, QuoteConfig};
use crate::thunk::DotsCapture;

/// Reify code written here, with quasiquotation applied
///
/// Parses `source` in quoting mode and resolves its markers against
/// `env`. The expression as a whole is never evaluated.
pub fn capture_here(
    source: &str,
    env: &EnvRef,
    eval: &mut dyn Evaluator,
    config: &QuoteConfig,
) -> Result<Expr> {
    let expr = parse_quoted(source)?;
    expand(expr, env, eval, config)
}

/// Reify the code a caller wrote into the lazy argument `name`
///
/// Looks the argument up in `frame`; it must still be a thunk. Markers
/// in the captured tree resolve against the *caller's* environment, the
/// one recorded in the thunk.
pub fn capture_caller(
    frame: &EnvRef,
    name: &str,
    eval: &mut dyn Evaluator,
    config: &QuoteConfig,
) -> Result<Expr> {
    let binding = frame.borrow().lookup(name);
    match binding {
        None => Err(Error::capture(name, "no binding with this name")),
        Some(Binding::Value(_)) => Err(Error::capture(
            name,
            "already forced to a value; the expression is gone",
        )),
        Some(Binding::Thunk(thunk)) => {
            expand(thunk.expression(), &thunk.environment(), eval, config)
        }
    }
}

/// Reify a sequence of expressions written here
///
/// Each entry is `(name, source)`; a `None` source is an unsupplied
/// position, preserved as a missing argument (subject to the collector's
/// trailing trim) so callers can inspect "was this supplied". Splice
/// markers expand into multiple entries.
pub fn capture_here_list(
    entries: &[(Option<&str>, Option<&str>)],
    env: &EnvRef,
    eval: &mut dyn Evaluator,
    config: &QuoteConfig,
) -> Result<Vec<Arg>> {
    let mut parsed = Vec::with_capacity(entries.len());
    for (name, source) in entries {
        let value = match source {
            Some(src) => parse_quoted(src)?,
            None => Expr::Missing,
        };
        parsed.push(DotsEntry {
            name: name.map(str::to_string),
            value,
            env: env.clone(),
        });
    }
    collect_dots(parsed, eval, config)
}

/// Reify a call's captured variadic arguments
///
/// Each thunk's markers resolve against that thunk's own environment, so
/// arguments captured from different call sites rewrite correctly in one
/// pass.
pub fn capture_caller_list(
    dots: &DotsCapture,
    eval: &mut dyn Evaluator,
    config: &QuoteConfig,
) -> Result<Vec<Arg>> {
    let entries = dots
        .entries()
        .iter()
        .map(|(name, thunk)| DotsEntry {
            name: name.clone(),
            value: thunk.expression(),
            env: thunk.environment(),
        })
        .collect();
    collect_dots(entries, eval, config)
}
