//! Quoting, rewriting, and argument collection
//!
//! This module is the engine's center: it owns the capture-then-rewrite
//! protocol that turns written code into marker-free trees.
//!
//! # Module Organization
//!
//! - `capture.rs`: the quoting functions (`capture_here`,
//!   `capture_caller`, and their list forms)
//! - `expand.rs`: the quasiquotation rewriter and `QuoteConfig`
//! - `dots.rs`: the variadic collector and name-uniqueness check
//! - `call_builder.rs`: call construction from dynamic parts
//!
//! The flow: a quoting function parses or reads captured syntax (markers
//! included), `expand` resolves the markers against the right
//! environment, and the collector / call builder recombine the results
//! into new trees.

mod call_builder;
mod capture;
mod dots;
mod expand;

pub use call_builder::{build_call, new_call};
pub use capture::{capture_caller, capture_caller_list, capture_here, capture_here_list};
pub use dots::{collect_dots, require_unique_names, DotsEntry};
pub use expand::{expand, QuoteConfig, QUOTING_FUNCTIONS};
