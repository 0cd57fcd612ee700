//! Lazy argument capture
//!
//! An `ArgThunk` pairs the unevaluated expression written at a call site
//! with the environment it was written in. Thunks are materialized at the
//! call boundary, before any evaluation of the argument occurs. Reading
//! the expression is side-effect-free and repeatable; forcing (handing
//! expression + environment to an evaluator) is a separate operation with
//! whatever repeat-evaluation behavior the evaluator has.

use metaquote_parser::{parse_quoted, Expr};

use crate::env::EnvRef;
use crate::error::Result;

/// An unevaluated argument and the environment it was written in
#[derive(Debug, Clone)]
pub struct ArgThunk {
    expr: Expr,
    env: EnvRef,
}

impl ArgThunk {
    /// Capture the literal syntax written at a call site
    ///
    /// The source is parsed in quoting mode, so unquote markers written
    /// by the caller are preserved in the captured tree for a later
    /// rewrite against the caller's environment.
    pub fn capture(source: &str, env: &EnvRef) -> Result<Self> {
        let expr = parse_quoted(source)?;
        Ok(Self {
            expr,
            env: env.clone(),
        })
    }

    /// Wrap an already-built tree as a thunk
    pub fn from_expr(expr: Expr, env: &EnvRef) -> Self {
        Self {
            expr,
            env: env.clone(),
        }
    }

    /// The thunk for an argument position the call left unsupplied
    ///
    /// Reading it yields the missing-argument expression rather than an
    /// error, so missing-argument introspection is possible.
    pub fn missing(env: &EnvRef) -> Self {
        Self {
            expr: Expr::Missing,
            env: env.clone(),
        }
    }

    /// The captured expression
    ///
    /// Idempotent: every read returns a structurally equal tree.
    pub fn expression(&self) -> Expr {
        self.expr.clone()
    }

    /// The environment the expression was written in
    pub fn environment(&self) -> EnvRef {
        self.env.clone()
    }

    /// Whether this thunk records an unsupplied argument
    pub fn is_missing(&self) -> bool {
        self.expr.is_missing()
    }
}

/// An ordered capture of a call's variadic arguments
///
/// Each entry is the literal syntax of one argument (optionally named),
/// captured as a thunk at the call boundary. The variadic collector
/// expands these into a flat argument sequence.
#[derive(Debug, Clone, Default)]
pub struct DotsCapture {
    entries: Vec<(Option<String>, ArgThunk)>,
}

impl DotsCapture {
    /// Create an empty capture
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture a sequence of written arguments in one environment
    ///
    /// Each entry is `(name, source)`; a `None` source records an
    /// unsupplied (missing) position.
    pub fn capture(entries: &[(Option<&str>, Option<&str>)], env: &EnvRef) -> Result<Self> {
        let mut dots = Self::new();
        for (name, source) in entries {
            let thunk = match source {
                Some(src) => ArgThunk::capture(src, env)?,
                None => ArgThunk::missing(env),
            };
            dots.push(name.map(str::to_string), thunk);
        }
        Ok(dots)
    }

    /// Append one captured entry
    pub fn push(&mut self, name: Option<String>, thunk: ArgThunk) {
        self.entries.push((name, thunk));
    }

    /// The captured entries, in written order
    pub fn entries(&self) -> &[(Option<String>, ArgThunk)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Environment;

    #[test]
    fn test_expression_reads_are_idempotent() {
        let env = Environment::root();
        let thunk = ArgThunk::capture("f(x, y)", &env).unwrap();

        let first = thunk.expression();
        let second = thunk.expression();
        assert_eq!(first, second);
    }

    #[test]
    fn test_capture_preserves_markers() {
        let env = Environment::root();
        let thunk = ArgThunk::capture("g(!!x)", &env).unwrap();
        assert!(thunk.expression().contains_marker());
    }

    #[test]
    fn test_missing_thunk_reads_as_missing_expression() {
        let env = Environment::root();
        let thunk = ArgThunk::missing(&env);
        assert!(thunk.is_missing());
        assert_eq!(thunk.expression(), Expr::Missing);
    }

    #[test]
    fn test_dots_capture_keeps_order_and_names() {
        let env = Environment::root();
        let dots = DotsCapture::capture(
            &[(None, Some("a")), (Some("w"), Some("b + 1")), (None, None)],
            &env,
        )
        .unwrap();

        assert_eq!(dots.len(), 3);
        assert_eq!(dots.entries()[1].0.as_deref(), Some("w"));
        assert!(dots.entries()[2].1.is_missing());
    }
}
