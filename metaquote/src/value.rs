//! Runtime values produced by evaluating unquoted fragments
//!
//! The engine treats values mostly as opaque: the one operation it needs
//! is `into_expr`, the "tree representation of a value" used when an
//! unquote marker inlines an evaluation result.

use metaquote_parser::{Expr, Literal};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::render::render;

/// A runtime value
///
/// `Expr` is a first-class value kind: quoting functions return trees,
/// and unquoting one inlines it verbatim. `List` is the spliceable
/// ordered sequence, with optional per-element names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A captured expression tree, inlined as-is by `!!`
    Expr(Expr),
    /// An ordered sequence with optional names, the `!!!` target
    List(Vec<(Option<String>, Value)>),
}

impl Value {
    /// Build an unnamed list value
    pub fn list(values: Vec<Value>) -> Value {
        Value::List(values.into_iter().map(|v| (None, v)).collect())
    }

    /// The tree representation of this value
    ///
    /// A tree value is inlined verbatim, whatever its shape; the engine
    /// never normalizes an inlined tree. Scalars wrap as constants. A
    /// list of scalars becomes an opaque list constant; a list holding
    /// trees has no constant form and is reported against the rendered
    /// value.
    pub fn into_expr(self) -> Result<Expr, Error> {
        match self {
            Value::Expr(expr) => Ok(expr),
            Value::Null => Ok(Expr::Constant(Literal::Null)),
            Value::Bool(b) => Ok(Expr::Constant(Literal::Bool(b))),
            Value::Int(i) => Ok(Expr::Constant(Literal::Int(i))),
            Value::Float(x) => Ok(Expr::Constant(Literal::Float(x))),
            Value::Str(s) => Ok(Expr::Constant(Literal::Str(s))),
            Value::List(entries) => {
                let mut literals = Vec::with_capacity(entries.len());
                for (name, value) in entries {
                    match value.clone().into_literal() {
                        Some(lit) => literals.push((name, lit)),
                        None => {
                            return Err(Error::NonInlinable {
                                rendered: value.to_string(),
                            })
                        }
                    }
                }
                Ok(Expr::Constant(Literal::List(literals)))
            }
        }
    }

    /// The literal form of this value, if it has one
    fn into_literal(self) -> Option<Literal> {
        match self {
            Value::Null => Some(Literal::Null),
            Value::Bool(b) => Some(Literal::Bool(b)),
            Value::Int(i) => Some(Literal::Int(i)),
            Value::Float(x) => Some(Literal::Float(x)),
            Value::Str(s) => Some(Literal::Str(s)),
            Value::List(entries) => {
                let mut literals = Vec::with_capacity(entries.len());
                for (name, value) in entries {
                    literals.push((name, value.into_literal()?));
                }
                Some(Literal::List(literals))
            }
            Value::Expr(_) => None,
        }
    }

    /// The name of this value's kind, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Expr(_) => "expression",
            Value::List(_) => "list",
        }
    }

    /// Truthiness for `&&`, `||` and `!`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", format_float(*x)),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Expr(expr) => write!(f, "{}", render(expr)),
            Value::List(entries) => {
                write!(f, "list(")?;
                for (i, (name, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if let Some(name) = name {
                        write!(f, "{} = ", name)?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Format a float so whole numbers keep a trailing ".0"
pub(crate) fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Inf" } else { "-Inf" }.to_string();
    }
    if x == x.trunc() && x.abs() < 1e15 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}
