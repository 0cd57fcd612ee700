//! Expression tree model
//!
//! Trees are immutable values: every transformation allocates a new tree
//! and never mutates a shared one in place. Subtrees may be shared by
//! cloning; trees are acyclic by construction.
//!
//! `UnquoteOne` / `UnquoteSplice` are transient rewrite markers. They are
//! produced only by the quoting-mode parser and must be resolved by the
//! quasiquotation rewriter before a tree is handed to an evaluator or
//! renderer acting on final output; a marker encountered outside an active
//! rewrite is a construction error on the caller's side.

use serde::{Deserialize, Serialize};

/// An atomic literal value carried by a `Constant` node
///
/// `List` covers values inlined by unquoting that are sequences of
/// literals (possibly named); such constants have no source syntax of
/// their own and render with a visible marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<(Option<String>, Literal)>),
}

/// One argument of a `Call` node
///
/// Names need not be unique in a raw tree; uniqueness is enforced only by
/// consumers that require it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arg {
    pub name: Option<String>,
    pub value: Expr,
}

impl Arg {
    /// Create a positional argument
    pub fn positional(value: Expr) -> Self {
        Self { name: None, value }
    }

    /// Create a named argument
    pub fn named(name: impl Into<String>, value: Expr) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }

    /// Whether this entry is an unnamed missing-argument slot
    pub fn is_missing(&self) -> bool {
        self.name.is_none() && matches!(self.value, Expr::Missing)
    }
}

/// A node in an expression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// An atomic literal
    Constant(Literal),
    /// A bare identifier reference; the name is never empty
    Symbol(String),
    /// A function application; the head may itself be any expression
    Call { head: Box<Expr>, args: Vec<Arg> },
    /// Placeholder for "no value supplied here"; legal only inside an
    /// argument sequence
    Missing,
    /// Transient marker: replace this node with the tree the inner
    /// expression evaluates to
    UnquoteOne(Box<Expr>),
    /// Transient marker: replace this argument slot with zero or more
    /// sibling slots derived from the sequence the inner expression
    /// evaluates to
    UnquoteSplice(Box<Expr>),
}

impl Expr {
    /// Build a constant node
    pub fn constant(literal: Literal) -> Expr {
        Expr::Constant(literal)
    }

    /// Build an integer constant
    pub fn int(value: i64) -> Expr {
        Expr::Constant(Literal::Int(value))
    }

    /// Build a string constant
    pub fn str(value: impl Into<String>) -> Expr {
        Expr::Constant(Literal::Str(value.into()))
    }

    /// Build a symbol node; the name must be non-empty
    pub fn symbol(name: impl Into<String>) -> Expr {
        let name = name.into();
        debug_assert!(!name.is_empty(), "symbol names are non-empty");
        Expr::Symbol(name)
    }

    /// Build a call node
    ///
    /// A `Missing` head is rejected by the fallible constructor
    /// `metaquote::new_call`; this builder is for construction sites that
    /// already hold a well-formed head.
    pub fn call(head: Expr, args: Vec<Arg>) -> Expr {
        debug_assert!(!head.is_missing(), "a missing argument cannot be a call head");
        Expr::Call {
            head: Box::new(head),
            args,
        }
    }

    /// Build a call whose head is a symbol
    pub fn call_symbol(name: impl Into<String>, args: Vec<Arg>) -> Expr {
        Expr::call(Expr::symbol(name), args)
    }

    /// Whether this node is the missing-argument placeholder
    pub fn is_missing(&self) -> bool {
        matches!(self, Expr::Missing)
    }

    /// Whether this node is an unquote or unquote-splice marker
    pub fn is_marker(&self) -> bool {
        matches!(self, Expr::UnquoteOne(_) | Expr::UnquoteSplice(_))
    }

    /// Whether any node in this tree is a rewrite marker
    ///
    /// Calls are scanned in full, including heads. Used by consumers to
    /// enforce the "markers never escape the rewriter" invariant.
    pub fn contains_marker(&self) -> bool {
        match self {
            Expr::Constant(_) | Expr::Symbol(_) | Expr::Missing => false,
            Expr::UnquoteOne(_) | Expr::UnquoteSplice(_) => true,
            Expr::Call { head, args } => {
                head.contains_marker() || args.iter().any(|a| a.value.contains_marker())
            }
        }
    }

    /// The symbol name, if this node is a symbol
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expr::Symbol(name) => Some(name),
            _ => None,
        }
    }
}
