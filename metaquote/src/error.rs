//! Error types for capture, rewriting, and collection
//!
//! Every error aborts the operation that raised it immediately; no
//! partial tree is ever returned and nothing retries. Errors that concern
//! a specific sub-expression carry its rendered text, since these are
//! developer-authored metaprogramming constructs where precise location
//! matters.

use metaquote_parser::ParseError;
use thiserror::Error;

use crate::eval::EvalError;

/// Errors raised by the quasiquotation engine
#[derive(Error, Debug)]
pub enum Error {
    /// Reading a lazy argument that does not exist, was already forced,
    /// or is not a lazy binding at all
    #[error("cannot capture `{name}`: {reason}")]
    Capture { name: String, reason: String },

    /// `!!!` applied to a value that is not an ordered sequence
    #[error("`!!!` target must be a list, got {kind}: {rendered}")]
    MissingSpliceTarget {
        kind: &'static str,
        rendered: String,
    },

    /// `!!!` in a position that is not a call argument slot
    #[error("`!!!` is only allowed inside call arguments: {rendered}")]
    SpliceOutsideCall { rendered: String },

    /// `name = !!!xs` — a splice produces its own names, so an outer
    /// name has nothing to attach to
    #[error("`!!!` cannot itself be given the name `{name}`")]
    NamedSplice { name: String },

    /// Raised by consumers that require unique argument names
    #[error("duplicate argument name `{name}`")]
    NameCollision { name: String },

    /// The left side of `:=` did not resolve to a symbol or string
    #[error("dynamic argument name must be a symbol or string: {rendered}")]
    InvalidDotsName { rendered: String },

    /// A value with no syntactic form was unquoted into a tree
    #[error("value cannot be inlined into syntax: {rendered}")]
    NonInlinable { rendered: String },

    /// A missing-argument placeholder where a concrete node is required
    #[error("missing argument cannot be used as {position}")]
    MissingArgumentMisuse { position: &'static str },

    /// Expansion recursed past the configured depth limit
    #[error("expression nesting exceeds depth limit {limit}")]
    DepthLimitExceeded { limit: usize },

    /// Error from parsing captured source text (including ambiguous
    /// negation runs rejected by the quoting-mode parser)
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Error forwarded from the evaluator while resolving an unquoted
    /// fragment or forcing a lazy argument
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    /// Create a capture error
    pub fn capture(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Capture {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;
