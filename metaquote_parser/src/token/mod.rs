//! Token definitions for the expression lexer

mod precedence;

use logos::Logos;

pub use precedence::{operator_info, Associativity, Precedence};

/// Surface-language tokens
///
/// The language is expression-only: literals, identifiers, calls with
/// optionally named arguments, the usual arithmetic/comparison/logical
/// operators, and the walrus form `lhs := rhs` for dynamically named
/// call arguments.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\f\r]+")] // Skip whitespace (but not newlines)
pub enum Token {
    // ==================== Keyword Literals ====================
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // ==================== Delimiters ====================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    // ==================== Punctuation ====================
    #[token(",")]
    Comma,
    #[token(":=")]
    Walrus,
    #[token("=")]
    Eq,

    // ==================== Operators ====================
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    // Logical negation. Runs of this token are reinterpreted by the
    // quoting-mode parser (see `parser::expressions`).
    #[token("!")]
    Bang,

    // ==================== Literals ====================
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    FloatLiteral,
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+")]
    FloatExponent,
    #[regex(r"[0-9][0-9_]*")]
    IntegerLiteral,
    #[regex(r#""([^"\\\n]|\\.)*""#, priority = 6)]
    StringLiteral,
    // Opening quote with no closing quote on the same input
    #[regex(r#""([^"\\\n]|\\.)*"#, priority = 5)]
    UnterminatedString,

    // ==================== Identifiers ====================
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    // ==================== Trivia ====================
    #[regex(r"#[^\n]*")]
    LineComment,
    #[token("\n")]
    Newline,
}

impl Token {
    /// Check if this token is an operator (binary or unary)
    pub fn is_operator(&self) -> bool {
        self.binary_precedence().is_some() || self.unary_precedence().is_some()
    }

    /// The operator's source text, for operator-symbol call heads
    pub fn operator_text(&self) -> Option<&'static str> {
        Some(match self {
            Token::EqEq => "==",
            Token::NotEq => "!=",
            Token::LtEq => "<=",
            Token::GtEq => ">=",
            Token::Lt => "<",
            Token::Gt => ">",
            Token::AndAnd => "&&",
            Token::OrOr => "||",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::Caret => "^",
            Token::Bang => "!",
            Token::Walrus => ":=",
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos::Logos;

    fn lex(source: &str) -> Vec<Token> {
        Token::lexer(source).map(|t| t.unwrap()).collect()
    }

    #[test]
    fn test_bang_runs_lex_as_separate_tokens() {
        // The lexer never merges `!` runs; classification happens in the parser
        assert_eq!(lex("!!x"), vec![Token::Bang, Token::Bang, Token::Identifier]);
        assert_eq!(
            lex("!!!x"),
            vec![Token::Bang, Token::Bang, Token::Bang, Token::Identifier]
        );
    }

    #[test]
    fn test_bang_eq_is_not_equal() {
        assert_eq!(lex("a != b"), vec![Token::Identifier, Token::NotEq, Token::Identifier]);
    }

    #[test]
    fn test_walrus_vs_eq() {
        assert_eq!(lex("a := 1"), vec![Token::Identifier, Token::Walrus, Token::IntegerLiteral]);
        assert_eq!(lex("a = 1"), vec![Token::Identifier, Token::Eq, Token::IntegerLiteral]);
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(lex("1_000"), vec![Token::IntegerLiteral]);
        assert_eq!(lex("3.14"), vec![Token::FloatLiteral]);
        assert_eq!(lex("1e-5"), vec![Token::FloatExponent]);
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(lex(r#""hi there""#), vec![Token::StringLiteral]);
        assert_eq!(lex(r#""a\"b""#), vec![Token::StringLiteral]);
        assert_eq!(lex(r#""oops"#), vec![Token::UnterminatedString]);
    }
}
