//! Operator precedence and associativity definitions
//!
//! Logical negation sits *below* comparison, like the host language the
//! surface syntax is modelled on: `!a == b` parses as `!(a == b)`. The
//! quoting-mode parser gives `!!` / `!!!` runs `Prefix` strength instead;
//! see `parser::expressions` for that reinterpretation.

use super::Token;

/// Operator precedence levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(i8)]
pub enum Precedence {
    /// Lowest precedence (expression entry)
    Lowest = 0,
    /// Lazy or: ||
    Or = 1,
    /// Lazy and: &&
    And = 2,
    /// Logical negation: !
    Not = 3,
    /// Comparison: <, >, ==, etc.
    Comparison = 4,
    /// Plus: +, -
    Sum = 5,
    /// Times: *, /, %
    Product = 6,
    /// Power: ^
    Power = 7,
    /// Prefix (unary minus, unquote markers)
    Prefix = 8,
}

impl TryFrom<i8> for Precedence {
    type Error = ();

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Precedence::Lowest),
            1 => Ok(Precedence::Or),
            2 => Ok(Precedence::And),
            3 => Ok(Precedence::Not),
            4 => Ok(Precedence::Comparison),
            5 => Ok(Precedence::Sum),
            6 => Ok(Precedence::Product),
            7 => Ok(Precedence::Power),
            8 => Ok(Precedence::Prefix),
            _ => Err(()),
        }
    }
}

/// Operator associativity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

impl Token {
    /// Get the precedence and associativity of a binary operator
    pub fn binary_precedence(&self) -> Option<(Precedence, Associativity)> {
        use Associativity::{Left, Right};
        use Precedence::*;

        Some(match self {
            Token::OrOr => (Or, Left),
            Token::AndAnd => (And, Left),

            Token::Lt
            | Token::Gt
            | Token::LtEq
            | Token::GtEq
            | Token::EqEq
            | Token::NotEq => (Comparison, Left),

            Token::Plus | Token::Minus => (Sum, Left),
            Token::Star | Token::Slash | Token::Percent => (Product, Left),
            Token::Caret => (Power, Right),

            _ => return None,
        })
    }

    /// Get the precedence of a unary operator
    ///
    /// `!` deliberately binds loosely (`!a + b` is `!(a + b)`); unary `-`
    /// binds tightly (`-a + b` is `(-a) + b`).
    pub fn unary_precedence(&self) -> Option<Precedence> {
        match self {
            Token::Bang => Some(Precedence::Not),
            Token::Minus => Some(Precedence::Prefix),
            _ => None,
        }
    }
}

/// Precedence and associativity for an operator's source text
///
/// Used by consumers that see operators as call-head symbols rather than
/// tokens (the deparser renders `Call(Symbol("+"), ..)` infix and needs to
/// decide where parentheses are required).
pub fn operator_info(name: &str) -> Option<(Precedence, Associativity)> {
    use Associativity::{Left, Right};
    use Precedence::*;

    Some(match name {
        "||" => (Or, Left),
        "&&" => (And, Left),
        "==" | "!=" | "<" | "<=" | ">" | ">=" => (Comparison, Left),
        "+" | "-" => (Sum, Left),
        "*" | "/" | "%" => (Product, Left),
        "^" => (Power, Right),
        _ => return None,
    })
}
