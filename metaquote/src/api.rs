//! String-level API for programmatic use
//!
//! Convenience entry points that wire the default interpreter and
//! configuration together, for callers that just want to go from source
//! text to a tree, its rendering, or its JSON form.

use metaquote_parser::Expr;

use crate::env::{EnvRef, Environment};
use crate::error::Result;
use crate::eval::Interpreter;
use crate::quote::{capture_here, QuoteConfig};
use crate::render::render;

/// Capture source text against an empty environment
///
/// Unquote markers that reference bindings will fail; this is the entry
/// point for marker-free quoting.
pub fn capture_str(source: &str) -> Result<Expr> {
    let env = Environment::root();
    capture_in(source, &env)
}

/// Capture source text against a given environment
pub fn capture_in(source: &str, env: &EnvRef) -> Result<Expr> {
    capture_here(source, env, &mut Interpreter::new(), &QuoteConfig::default())
}

/// Capture source text and render the resolved tree back to text
pub fn capture_and_render(source: &str, env: &EnvRef) -> Result<String> {
    Ok(render(&capture_in(source, env)?))
}

/// Capture source text to the tree's JSON form
///
/// Returns `None` on any capture or serialization failure.
pub fn capture_to_json_str(source: &str, env: &EnvRef) -> Option<String> {
    let expr = capture_in(source, env).ok()?;
    serde_json::to_string(&expr).ok()
}

/// Rebuild a tree from its JSON form
pub fn expr_from_json_str(json: &str) -> Option<Expr> {
    serde_json::from_str(json).ok()
}
