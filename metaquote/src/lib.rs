// Library code reports through typed errors, never stray output.
#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]

//! metaquote
//!
//! A quasiquotation engine: capture unevaluated expression trees, resolve
//! unquote (`!!`) and unquote-splice (`!!!`) markers against an
//! environment, collect variadic argument sequences (with dynamic `:=`
//! names), and build new calls from the parts.
//!
//! The tree model and the quoting-mode parser live in
//! [`metaquote_parser`]; this crate adds the runtime half: lazy argument
//! thunks, environments, the rewriter, the collector, and a reference
//! evaluator behind the [`Evaluator`] seam.
//!
//! # Example
//!
//! ```
//! use metaquote::{capture_here, Environment, Interpreter, QuoteConfig, Value};
//! use metaquote_parser::Expr;
//!
//! let env = Environment::root();
//! env.borrow_mut()
//!     .define_value("col", Value::Expr(Expr::symbol("height")));
//!
//! let mut interp = Interpreter::new();
//! let tree = capture_here("mean(!!col)", &env, &mut interp, &QuoteConfig::default()).unwrap();
//! assert_eq!(metaquote::render(&tree), "mean(height)");
//! ```

// Core modules
pub mod api;
pub mod env;
pub mod error;
pub mod eval;
pub mod quote;
pub mod render;
pub mod thunk;
pub mod value;

// Re-exports
pub use api::{capture_and_render, capture_in, capture_str, capture_to_json_str, expr_from_json_str};
pub use env::{Binding, EnvRef, Environment};
pub use error::{Error, Result};
pub use eval::{EvalError, Evaluator, Interpreter};
pub use quote::{
    build_call, capture_caller, capture_caller_list, capture_here, capture_here_list,
    collect_dots, expand, new_call, require_unique_names, DotsEntry, QuoteConfig,
    QUOTING_FUNCTIONS,
};
pub use render::render;
pub use thunk::{ArgThunk, DotsCapture};
pub use value::Value;

// The tree model, re-exported for downstream convenience
pub use metaquote_parser::{Arg, Expr, Literal};
