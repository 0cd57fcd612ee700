//! Primary expression parsers

use crate::ast::{Expr, Literal};
use crate::error::{ParseError, ParseResult};
use crate::token::Token;

use super::Parser;

impl<'a> Parser<'a> {
    /// Parse a primary expression (literals, identifiers, parenthesized
    /// expressions)
    pub(crate) fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = match self.current.as_ref() {
            Some(t) => t,
            None => return Err(self.eof_error("expression")),
        };

        match &token.token {
            Token::IntegerLiteral => self.parse_integer_literal(),
            Token::FloatLiteral | Token::FloatExponent => self.parse_float_literal(),
            Token::StringLiteral => self.parse_string_literal(),

            Token::True => {
                self.advance();
                Ok(Expr::Constant(Literal::Bool(true)))
            }
            Token::False => {
                self.advance();
                Ok(Expr::Constant(Literal::Bool(false)))
            }
            Token::Null => {
                self.advance();
                Ok(Expr::Constant(Literal::Null))
            }

            Token::Identifier => {
                let token = self.advance().unwrap();
                Ok(Expr::symbol(token.text))
            }

            // Parenthesized expression
            Token::LParen => {
                self.advance();
                self.skip_newlines();
                let expr = self.parse_expression()?;
                self.skip_newlines();
                self.expect(Token::RParen)?;
                Ok(expr)
            }

            _ => Err(ParseError::unexpected_token(
                token.text,
                "expression",
                token.span,
            )),
        }
    }

    /// Parse an integer literal, allowing `_` digit separators
    fn parse_integer_literal(&mut self) -> ParseResult<Expr> {
        let token = self.advance().unwrap();
        let cleaned: String = token.text.chars().filter(|c| *c != '_').collect();
        match cleaned.parse::<i64>() {
            Ok(value) => Ok(Expr::Constant(Literal::Int(value))),
            Err(_) => Err(ParseError::InvalidNumber {
                literal: token.text.to_string(),
                span: token.span,
            }),
        }
    }

    /// Parse a float literal (decimal point and/or exponent forms)
    fn parse_float_literal(&mut self) -> ParseResult<Expr> {
        let token = self.advance().unwrap();
        let cleaned: String = token.text.chars().filter(|c| *c != '_').collect();
        match cleaned.parse::<f64>() {
            Ok(value) => Ok(Expr::Constant(Literal::Float(value))),
            Err(_) => Err(ParseError::InvalidNumber {
                literal: token.text.to_string(),
                span: token.span,
            }),
        }
    }

    /// Parse a string literal, processing escape sequences
    fn parse_string_literal(&mut self) -> ParseResult<Expr> {
        let token = self.advance().unwrap();
        // Strip the surrounding quotes
        let inner = &token.text[1..token.text.len() - 1];

        let mut value = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                value.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('r') => value.push('\r'),
                Some('\\') => value.push('\\'),
                Some('"') => value.push('"'),
                Some('0') => value.push('\0'),
                other => {
                    let sequence = match other {
                        Some(c) => format!("\\{}", c),
                        None => "\\".to_string(),
                    };
                    return Err(ParseError::InvalidEscape {
                        sequence,
                        span: token.span,
                    });
                }
            }
        }

        Ok(Expr::Constant(Literal::Str(value)))
    }
}
