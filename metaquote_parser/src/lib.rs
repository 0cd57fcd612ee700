//! metaquote_parser
//!
//! Parser for the metaquote surface expression language. Produces the
//! `Expr` trees that the quoting, rewriting, and collection layers in the
//! `metaquote` crate operate on.
//!
//! Parsing runs in one of two modes. `Plain` mode gives `!` its ordinary
//! low-precedence negation meaning everywhere. `Quoting` mode — what a
//! quoting function uses to reify the code written at a call site —
//! reinterprets runs of exactly two or three `!` tokens as unquote /
//! unquote-splice markers with prefix-operator strength.
//!
//! # Example
//!
//! ```
//! use metaquote_parser::{parse, parse_quoted, Expr};
//!
//! let plain = parse("f(x, y = 1)").expect("parse failed");
//! assert!(matches!(plain, Expr::Call { .. }));
//!
//! // In quoting mode `!!x` is an unquote marker, not double negation
//! let quoted = parse_quoted("!!x").expect("parse failed");
//! assert!(matches!(quoted, Expr::UnquoteOne(_)));
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;

// Re-exports
pub use ast::{Arg, Expr, Literal};
pub use error::{ParseError, ParseResult};
pub use lexer::{Lexer, SpannedToken};
pub use parser::{ParseMode, Parser};
pub use span::{SourceMap, Span};
pub use token::{operator_info, Associativity, Precedence, Token};

/// Parse source code as a single expression with `!` as plain negation
pub fn parse(source: &str) -> ParseResult<Expr> {
    parser::parse(source, ParseMode::Plain)
}

/// Parse source code as a quoting function's argument
///
/// Runs of exactly two / three `!` become `UnquoteOne` / `UnquoteSplice`
/// markers. The returned tree may therefore contain markers; resolving
/// them against an environment is the `metaquote` crate's job.
pub fn parse_quoted(source: &str) -> ParseResult<Expr> {
    parser::parse(source, ParseMode::Quoting)
}

/// Tokenize source code
///
/// Returns a vector of tokens with their spans.
pub fn tokenize(source: &str) -> Vec<ParseResult<SpannedToken<'_>>> {
    lexer::tokenize(source)
}

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
