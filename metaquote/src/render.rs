//! Expression rendering (deparser)
//!
//! Renders trees back to surface syntax with minimal parentheses. Two
//! obligations shape the output:
//!
//! - Rendered text must re-read unambiguously in quoting mode: literal
//!   nested negation prints as `!(!x)`, never as a bare `!!` run, and a
//!   negation directly under an unquote marker is parenthesized so the
//!   marker's own `!` run stays exactly two or three tokens long.
//! - Values inlined by unquoting that have no surface syntax (list
//!   constants) print inside a visible `<...>` marker instead of being
//!   silently dropped or disguised as parseable code.

use metaquote_parser::{operator_info, Arg, Associativity, Expr, Literal, Precedence};

use crate::value::format_float;

/// Render an expression tree to surface syntax
pub fn render(expr: &Expr) -> String {
    match expr {
        Expr::Constant(literal) => render_literal(literal),
        Expr::Symbol(name) => name.clone(),
        Expr::Missing => String::new(),
        Expr::UnquoteOne(inner) => format!("!!{}", render_marker_operand(inner)),
        Expr::UnquoteSplice(inner) => format!("!!!{}", render_marker_operand(inner)),
        Expr::Call { head, args } => render_call(head, args),
    }
}

fn render_literal(literal: &Literal) -> String {
    match literal {
        Literal::Null => "null".to_string(),
        Literal::Bool(b) => b.to_string(),
        Literal::Int(i) => i.to_string(),
        Literal::Float(x) => format_float(*x),
        Literal::Str(s) => format!("{:?}", s),
        Literal::List(entries) => {
            let rendered: Vec<String> = entries
                .iter()
                .map(|(name, lit)| match name {
                    Some(name) => format!("{} = {}", name, render_literal(lit)),
                    None => render_literal(lit),
                })
                .collect();
            format!("<list({})>", rendered.join(", "))
        }
    }
}

fn render_call(head: &Expr, args: &[Arg]) -> String {
    // Walrus: dynamic-name argument form
    if let Some((lhs, rhs)) = walrus_parts_of(head, args) {
        return format!("{} := {}", render(lhs), render(rhs));
    }

    // Infix operators
    if let Some((op, left, right, prec, assoc)) = binary_parts_of(head, args) {
        let left_str = render_infix_child(left, prec, assoc, true);
        let right_str = render_infix_child(right, prec, assoc, false);
        return format!("{} {} {}", left_str, op, right_str);
    }

    // Prefix operators
    if let Some((op, operand)) = unary_parts_of(head, args) {
        let wrapped = match op {
            // `!` grabs everything down to comparison strength; it also
            // must not fuse with a following `!` or marker into a run
            "!" => {
                is_unary_op(operand, "!")
                    || operand.is_marker()
                    || is_walrus(operand)
                    || binary_below(operand, Precedence::Comparison)
            }
            // unary minus is prefix-tight: any infix operand needs parens
            _ => {
                binary_parts(operand).is_some()
                    || is_unary_op(operand, "!")
                    || operand.is_marker()
                    || is_walrus(operand)
            }
        };
        return if wrapped {
            format!("{}({})", op, render(operand))
        } else {
            format!("{}{}", op, render(operand))
        };
    }

    // General call
    let head_str = if head_needs_parens(head) {
        format!("({})", render(head))
    } else {
        render(head)
    };
    let rendered: Vec<String> = args
        .iter()
        .map(|arg| match &arg.name {
            Some(name) => format!("{} = {}", name, render(&arg.value)),
            None => render(&arg.value),
        })
        .collect();
    format!("{}({})", head_str, rendered.join(", "))
}

fn render_marker_operand(inner: &Expr) -> String {
    // Markers bind at prefix strength; anything looser, and anything
    // that would fuse into the `!` run, is parenthesized
    let needs = binary_parts(inner).is_some()
        || is_unary_op(inner, "!")
        || inner.is_marker()
        || is_walrus(inner);
    if needs {
        format!("({})", render(inner))
    } else {
        render(inner)
    }
}

fn render_infix_child(
    child: &Expr,
    parent_prec: Precedence,
    parent_assoc: Associativity,
    is_left: bool,
) -> String {
    let needs = if let Some((_, _, _, child_prec, _)) = binary_parts(child) {
        child_prec < parent_prec
            || (child_prec == parent_prec
                && match parent_assoc {
                    Associativity::Left => !is_left,
                    Associativity::Right => is_left,
                })
    } else if is_unary_op(child, "!") {
        // `!x` reads at its own low strength under tighter operators
        Precedence::Not < parent_prec
    } else {
        is_walrus(child)
    };
    if needs {
        format!("({})", render(child))
    } else {
        render(child)
    }
}

fn head_needs_parens(head: &Expr) -> bool {
    binary_parts(head).is_some()
        || unary_parts(head).is_some()
        || head.is_marker()
        || is_walrus(head)
}

// ==================== Shape Classification ====================

type BinaryParts<'a> = (&'a str, &'a Expr, &'a Expr, Precedence, Associativity);

fn binary_parts(expr: &Expr) -> Option<BinaryParts<'_>> {
    match expr {
        Expr::Call { head, args } => binary_parts_of(head, args),
        _ => None,
    }
}

fn binary_parts_of<'a>(head: &'a Expr, args: &'a [Arg]) -> Option<BinaryParts<'a>> {
    let op = head.as_symbol()?;
    let (prec, assoc) = operator_info(op)?;
    match args {
        [left, right] if left.name.is_none() && right.name.is_none() => {
            Some((op, &left.value, &right.value, prec, assoc))
        }
        _ => None,
    }
}

fn unary_parts(expr: &Expr) -> Option<(&str, &Expr)> {
    match expr {
        Expr::Call { head, args } => unary_parts_of(head, args),
        _ => None,
    }
}

fn unary_parts_of<'a>(head: &'a Expr, args: &'a [Arg]) -> Option<(&'a str, &'a Expr)> {
    let op = head.as_symbol()?;
    if op != "-" && op != "!" {
        return None;
    }
    match args {
        [operand] if operand.name.is_none() => Some((op, &operand.value)),
        _ => None,
    }
}

fn walrus_parts_of<'a>(head: &'a Expr, args: &'a [Arg]) -> Option<(&'a Expr, &'a Expr)> {
    if head.as_symbol()? != ":=" {
        return None;
    }
    match args {
        [lhs, rhs] if lhs.name.is_none() && rhs.name.is_none() => Some((&lhs.value, &rhs.value)),
        _ => None,
    }
}

fn is_walrus(expr: &Expr) -> bool {
    match expr {
        Expr::Call { head, args } => walrus_parts_of(head, args).is_some(),
        _ => false,
    }
}

fn is_unary_op(expr: &Expr, op: &str) -> bool {
    matches!(unary_parts(expr), Some((found, _)) if found == op)
}

fn binary_below(expr: &Expr, prec: Precedence) -> bool {
    matches!(binary_parts(expr), Some((_, _, _, child_prec, _)) if child_prec < prec)
}
