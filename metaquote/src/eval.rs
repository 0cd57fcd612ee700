//! Evaluator seam and reference interpreter
//!
//! The engine consumes evaluation as a black box behind the `Evaluator`
//! trait: forcing argument thunks and resolving unquoted fragments both
//! go through it. `Interpreter` is the reference implementation, just big
//! enough to exercise the engine: constants, symbol lookup with thunk
//! forcing, the surface operators, and `list(...)` for building
//! spliceable sequences.

use metaquote_parser::{Arg, Expr, Literal};
use thiserror::Error;

use crate::env::{EnvRef, Environment};
use crate::render::render;
use crate::value::Value;

/// Evaluation errors
///
/// Opaque to the engine: whatever the evaluator reports is forwarded
/// unchanged to the caller of the capture or rewrite operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("object `{name}` not found")]
    UnboundSymbol { name: String },

    #[error("missing argument where a value is required")]
    MissingArgument,

    /// A rewrite marker reached evaluation; markers must be resolved by
    /// the quasiquotation rewriter first
    #[error("unquote marker outside a quoting context: {rendered}")]
    MarkerOutsideQuote { rendered: String },

    #[error("head of call is not callable: {rendered}")]
    NotCallable { rendered: String },

    #[error("unknown function `{name}`")]
    UnknownFunction { name: String },

    #[error("`{name}` expects {expected} argument(s), got {got}")]
    WrongArity {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("type error: {message}")]
    Type { message: String },

    #[error("division by zero")]
    DivisionByZero,
}

impl EvalError {
    pub(crate) fn type_error(message: impl Into<String>) -> Self {
        EvalError::Type {
            message: message.into(),
        }
    }
}

/// The evaluation contract consumed by the engine
pub trait Evaluator {
    /// Evaluate a marker-free expression in an environment
    fn evaluate(&mut self, expr: &Expr, env: &EnvRef) -> Result<Value, EvalError>;
}

/// Reference interpreter for the surface expression language
#[derive(Debug, Default)]
pub struct Interpreter {}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    fn eval_expr(&mut self, expr: &Expr, env: &EnvRef) -> Result<Value, EvalError> {
        match expr {
            Expr::Constant(literal) => Ok(literal_to_value(literal)),
            Expr::Symbol(name) => Environment::force(env, name, self),
            Expr::Missing => Err(EvalError::MissingArgument),
            Expr::UnquoteOne(_) | Expr::UnquoteSplice(_) => Err(EvalError::MarkerOutsideQuote {
                rendered: render(expr),
            }),
            Expr::Call { head, args } => {
                let name = head.as_symbol().ok_or_else(|| EvalError::NotCallable {
                    rendered: render(head),
                })?;
                self.eval_call(name, args, env)
            }
        }
    }

    fn eval_call(&mut self, name: &str, args: &[Arg], env: &EnvRef) -> Result<Value, EvalError> {
        if name == "list" {
            let mut entries = Vec::with_capacity(args.len());
            for arg in args {
                let value = self.eval_expr(&arg.value, env)?;
                entries.push((arg.name.clone(), value));
            }
            return Ok(Value::List(entries));
        }

        // Operators are ordinary named calls in the tree model
        match (name, args.len()) {
            ("-", 1) => {
                let operand = self.eval_expr(&args[0].value, env)?;
                match operand {
                    Value::Int(i) => Ok(Value::Int(-i)),
                    Value::Float(x) => Ok(Value::Float(-x)),
                    other => Err(EvalError::type_error(format!(
                        "cannot negate a {}",
                        other.kind()
                    ))),
                }
            }
            ("!", 1) => {
                let operand = self.eval_expr(&args[0].value, env)?;
                match operand.as_bool() {
                    Some(b) => Ok(Value::Bool(!b)),
                    None => Err(EvalError::type_error(format!(
                        "`!` expects a bool, got {}",
                        operand.kind()
                    ))),
                }
            }
            ("+" | "-" | "*" | "/" | "%" | "^", 2) => {
                let lhs = self.eval_expr(&args[0].value, env)?;
                let rhs = self.eval_expr(&args[1].value, env)?;
                eval_arithmetic(name, lhs, rhs)
            }
            ("==" | "!=" | "<" | "<=" | ">" | ">=", 2) => {
                let lhs = self.eval_expr(&args[0].value, env)?;
                let rhs = self.eval_expr(&args[1].value, env)?;
                eval_comparison(name, lhs, rhs)
            }
            ("&&", 2) => {
                let lhs = self.eval_expr(&args[0].value, env)?;
                match lhs.as_bool() {
                    Some(false) => Ok(Value::Bool(false)),
                    Some(true) => {
                        let rhs = self.eval_expr(&args[1].value, env)?;
                        expect_bool("&&", rhs)
                    }
                    None => Err(EvalError::type_error("`&&` expects bools")),
                }
            }
            ("||", 2) => {
                let lhs = self.eval_expr(&args[0].value, env)?;
                match lhs.as_bool() {
                    Some(true) => Ok(Value::Bool(true)),
                    Some(false) => {
                        let rhs = self.eval_expr(&args[1].value, env)?;
                        expect_bool("||", rhs)
                    }
                    None => Err(EvalError::type_error("`||` expects bools")),
                }
            }
            ("-" | "!", got) => Err(EvalError::WrongArity {
                name: name.to_string(),
                expected: 1,
                got,
            }),
            ("+" | "*" | "/" | "%" | "^" | "==" | "!=" | "<" | "<=" | ">" | ">=" | "&&" | "||", got) => {
                Err(EvalError::WrongArity {
                    name: name.to_string(),
                    expected: 2,
                    got,
                })
            }
            _ => Err(EvalError::UnknownFunction {
                name: name.to_string(),
            }),
        }
    }
}

impl Evaluator for Interpreter {
    fn evaluate(&mut self, expr: &Expr, env: &EnvRef) -> Result<Value, EvalError> {
        self.eval_expr(expr, env)
    }
}

/// Convert a literal to its value
fn literal_to_value(literal: &Literal) -> Value {
    match literal {
        Literal::Null => Value::Null,
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Int(i) => Value::Int(*i),
        Literal::Float(x) => Value::Float(*x),
        Literal::Str(s) => Value::Str(s.clone()),
        Literal::List(entries) => Value::List(
            entries
                .iter()
                .map(|(name, lit)| (name.clone(), literal_to_value(lit)))
                .collect(),
        ),
    }
}

fn expect_bool(op: &str, value: Value) -> Result<Value, EvalError> {
    match value.as_bool() {
        Some(b) => Ok(Value::Bool(b)),
        None => Err(EvalError::type_error(format!("`{}` expects bools", op))),
    }
}

fn eval_arithmetic(op: &str, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => match op {
            "+" => Ok(Value::Int(a.wrapping_add(b))),
            "-" => Ok(Value::Int(a.wrapping_sub(b))),
            "*" => Ok(Value::Int(a.wrapping_mul(b))),
            "/" => {
                if b == 0 {
                    Err(EvalError::DivisionByZero)
                } else {
                    // Division is always exact, like the float tower
                    Ok(Value::Float(a as f64 / b as f64))
                }
            }
            "%" => {
                if b == 0 {
                    Err(EvalError::DivisionByZero)
                } else {
                    Ok(Value::Int(a.rem_euclid(b)))
                }
            }
            "^" => Ok(Value::Float((a as f64).powf(b as f64))),
            _ => unreachable!("checked by caller"),
        },
        (lhs, rhs) => {
            let a = as_float(&lhs, op)?;
            let b = as_float(&rhs, op)?;
            match op {
                "+" => Ok(Value::Float(a + b)),
                "-" => Ok(Value::Float(a - b)),
                "*" => Ok(Value::Float(a * b)),
                "/" => Ok(Value::Float(a / b)),
                "%" => Ok(Value::Float(a.rem_euclid(b))),
                "^" => Ok(Value::Float(a.powf(b))),
                _ => unreachable!("checked by caller"),
            }
        }
    }
}

fn eval_comparison(op: &str, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    // Equality is structural over all value kinds
    if op == "==" {
        return Ok(Value::Bool(lhs == rhs));
    }
    if op == "!=" {
        return Ok(Value::Bool(lhs != rhs));
    }

    let ordering = match (&lhs, &rhs) {
        (Value::Str(a), Value::Str(b)) => a.partial_cmp(b),
        _ => {
            let a = as_float(&lhs, op)?;
            let b = as_float(&rhs, op)?;
            a.partial_cmp(&b)
        }
    };
    let Some(ordering) = ordering else {
        return Ok(Value::Bool(false));
    };
    let result = match op {
        "<" => ordering.is_lt(),
        "<=" => ordering.is_le(),
        ">" => ordering.is_gt(),
        ">=" => ordering.is_ge(),
        _ => unreachable!("checked by caller"),
    };
    Ok(Value::Bool(result))
}

fn as_float(value: &Value, op: &str) -> Result<f64, EvalError> {
    match value {
        Value::Int(i) => Ok(*i as f64),
        Value::Float(x) => Ok(*x),
        other => Err(EvalError::type_error(format!(
            "`{}` expects numbers, got {}",
            op,
            other.kind()
        ))),
    }
}
