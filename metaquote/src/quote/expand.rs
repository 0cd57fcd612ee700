//! Quasiquotation rewriter
//!
//! Walks a captured tree depth-first, left to right — the written order
//! of arguments, observable when unquoted expressions have side effects —
//! and resolves the transient markers:
//!
//! - `UnquoteOne(inner)`: evaluate `inner`, inline the value's tree form
//!   in place of the marker. Tree values are inlined verbatim, whatever
//!   their shape; plain values wrap as constants.
//! - `UnquoteSplice(inner)`: legal only as a direct element of a call's
//!   argument list. The result must be a list (or null, which splices to
//!   nothing); its elements replace the one slot in order, names carried
//!   through.
//!
//! A call whose head names a quoting function is left untouched, markers
//! and all: only the innermost enclosing quoting context resolves its own
//! markers, so a constructed expression may legitimately carry markers
//! meant for a later pass.

use std::collections::HashSet;

use metaquote_parser::{Arg, Expr};
use once_cell::sync::Lazy;

use crate::env::EnvRef;
use crate::error::{Error, Result};
use crate::eval::Evaluator;
use crate::render::render;
use crate::value::Value;

/// Function names that open a nested quoting context
///
/// Marker resolution stops at calls to these: their arguments belong to
/// the rewrite pass that runs when *they* are invoked.
pub static QUOTING_FUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "capture_here",
        "capture_caller",
        "capture_here_list",
        "capture_caller_list",
    ]
    .into_iter()
    .collect()
});

/// Explicit configuration for capture and expansion
///
/// Passed into every entry point rather than read from ambient state.
/// The depth limit guards against unbounded nesting in caller-supplied
/// trees.
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    /// Maximum tree depth the rewriter will walk
    pub max_depth: usize,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}

/// Resolve all markers in a tree against an environment
///
/// Returns a new tree; the input is never mutated in place. Fails fast:
/// the first error aborts the whole rewrite with no partial tree.
pub fn expand(expr: Expr, env: &EnvRef, eval: &mut dyn Evaluator, config: &QuoteConfig) -> Result<Expr> {
    expand_at_depth(expr, env, eval, config, 0)
}

fn expand_at_depth(
    expr: Expr,
    env: &EnvRef,
    eval: &mut dyn Evaluator,
    config: &QuoteConfig,
    depth: usize,
) -> Result<Expr> {
    if depth > config.max_depth {
        return Err(Error::DepthLimitExceeded {
            limit: config.max_depth,
        });
    }

    match expr {
        Expr::UnquoteOne(inner) => {
            let value = eval.evaluate(&inner, env)?;
            value.into_expr()
        }

        // A splice not consumed by the argument loop below sits outside
        // an argument sequence
        Expr::UnquoteSplice(inner) => Err(Error::SpliceOutsideCall {
            rendered: render(&Expr::UnquoteSplice(inner)),
        }),

        Expr::Call { head, args } => {
            if is_quoting_call(&head) {
                return Ok(Expr::Call { head, args });
            }

            let head = expand_at_depth(*head, env, eval, config, depth + 1)?;

            let mut expanded = Vec::with_capacity(args.len());
            for arg in args {
                match arg.value {
                    Expr::UnquoteSplice(inner) => {
                        if let Some(name) = arg.name {
                            return Err(Error::NamedSplice { name });
                        }
                        let value = eval.evaluate(&inner, env)?;
                        splice_into(&mut expanded, value, &inner)?;
                    }
                    value => {
                        let value = expand_at_depth(value, env, eval, config, depth + 1)?;
                        expanded.push(Arg {
                            name: arg.name,
                            value,
                        });
                    }
                }
            }

            Ok(Expr::Call {
                head: Box::new(head),
                args: expanded,
            })
        }

        // Leaves carry nothing to resolve
        other => Ok(other),
    }
}

/// Append the elements of a splice result as argument slots
///
/// Shared with the variadic collector, which applies the same expansion
/// to its top-level entries.
pub(crate) fn splice_into(out: &mut Vec<Arg>, value: Value, inner: &Expr) -> Result<()> {
    match value {
        Value::List(entries) => {
            for (name, element) in entries {
                out.push(Arg {
                    name,
                    value: element.into_expr()?,
                });
            }
            Ok(())
        }
        // Splicing nothing contributes nothing
        Value::Null => Ok(()),
        other => Err(Error::MissingSpliceTarget {
            kind: other.kind(),
            rendered: render(inner),
        }),
    }
}

/// Whether a call head names a quoting function
fn is_quoting_call(head: &Expr) -> bool {
    head.as_symbol()
        .map(|name| QUOTING_FUNCTIONS.contains(name))
        .unwrap_or(false)
}
