//! Variadic argument collection
//!
//! Merges an ordered sequence of entries — literal expressions, splice
//! markers, and walrus (`:=`) dynamic-name forms — into one flat ordered
//! argument sequence. Splice children are inserted contiguously at the
//! splice's position; trailing missing entries are trimmed so a listing
//! can end with a separator without growing a phantom element, while
//! non-trailing gaps are preserved for missing-argument introspection.
//!
//! The collector never rejects duplicate names; consumers that need
//! unique names call `require_unique_names` themselves.

use std::collections::HashSet;

use metaquote_parser::{Arg, Expr, Literal};

use crate::env::EnvRef;
use crate::error::{Error, Result};
use crate::eval::Evaluator;
use crate::quote::expand::{expand, splice_into, QuoteConfig};
use crate::render::render;

/// One uncollected entry: an expression with an optional static name and
/// the environment its unquoted fragments resolve against
#[derive(Debug, Clone)]
pub struct DotsEntry {
    pub name: Option<String>,
    pub value: Expr,
    pub env: EnvRef,
}

impl DotsEntry {
    /// Create a positional entry
    pub fn positional(value: Expr, env: &EnvRef) -> Self {
        Self {
            name: None,
            value,
            env: env.clone(),
        }
    }

    /// Create a statically named entry
    pub fn named(name: impl Into<String>, value: Expr, env: &EnvRef) -> Self {
        Self {
            name: Some(name.into()),
            value,
            env: env.clone(),
        }
    }
}

/// Collect entries into one flat ordered argument sequence
pub fn collect_dots(
    entries: Vec<DotsEntry>,
    eval: &mut dyn Evaluator,
    config: &QuoteConfig,
) -> Result<Vec<Arg>> {
    let mut out: Vec<Arg> = Vec::with_capacity(entries.len());

    for entry in entries {
        // Walrus entry: the left side computes the name
        if let Some((lhs, rhs)) = walrus_parts(&entry.value) {
            let name = resolve_dots_name(lhs.clone(), &entry.env, eval, config)?;
            let value = expand(rhs.clone(), &entry.env, eval, config)?;
            out.push(Arg::named(name, value));
            continue;
        }

        match entry.value {
            Expr::UnquoteSplice(inner) => {
                if let Some(name) = entry.name {
                    return Err(Error::NamedSplice { name });
                }
                let value = eval.evaluate(&inner, &entry.env)?;
                splice_into(&mut out, value, &inner)?;
            }
            Expr::Missing => {
                out.push(Arg {
                    name: entry.name,
                    value: Expr::Missing,
                });
            }
            value => {
                let value = expand(value, &entry.env, eval, config)?;
                out.push(Arg {
                    name: entry.name,
                    value,
                });
            }
        }
    }

    // Trailing-missing trim
    while out.last().map(Arg::is_missing).unwrap_or(false) {
        out.pop();
    }

    Ok(out)
}

/// Enforce unique argument names, for consumers that require them
///
/// Positional entries are exempt; only explicit names can collide.
pub fn require_unique_names(args: &[Arg]) -> Result<()> {
    let mut seen = HashSet::new();
    for arg in args {
        if let Some(name) = &arg.name {
            if !seen.insert(name.as_str()) {
                return Err(Error::NameCollision { name: name.clone() });
            }
        }
    }
    Ok(())
}

/// Resolve a walrus left side to a name
///
/// The left side is rewritten first, so `!!nm := value` names the entry
/// after whatever `nm` evaluates to; the result must be a symbol or a
/// string constant.
fn resolve_dots_name(
    lhs: Expr,
    env: &EnvRef,
    eval: &mut dyn Evaluator,
    config: &QuoteConfig,
) -> Result<String> {
    let resolved = expand(lhs, env, eval, config)?;
    match resolved {
        Expr::Symbol(name) => Ok(name),
        Expr::Constant(Literal::Str(name)) => Ok(name),
        other => Err(Error::InvalidDotsName {
            rendered: render(&other),
        }),
    }
}

fn walrus_parts(expr: &Expr) -> Option<(&Expr, &Expr)> {
    match expr {
        Expr::Call { head, args } if head.as_symbol() == Some(":=") => match args.as_slice() {
            [lhs, rhs] if lhs.name.is_none() && rhs.name.is_none() => {
                Some((&lhs.value, &rhs.value))
            }
            _ => None,
        },
        _ => None,
    }
}
