//! Expression parsing (Pratt parser)
//!
//! Handles:
//! - Binary and unary expressions with precedence climbing
//! - Postfix call application
//! - Negation-run classification in quoting mode
//!
//! # Negation runs
//!
//! The unquote markers reuse the negation token. Outside quoting mode a
//! run of `!` tokens is ordinary repeated negation and keeps its native
//! low precedence: `!!x + y` is `!(!(x + y))`. In quoting mode a run of
//! exactly two `!` immediately prefixing an operand is `UnquoteOne` and a
//! run of exactly three is `UnquoteSplice`, and both bind at `Prefix`
//! strength so that `f(!!x + !!y)` is `f((!!x) + (!!y))`. Literal
//! repeated negation in quoting mode is written with explicit grouping,
//! `!(!x)`. Runs of four or more are not guessed at: they raise
//! `AmbiguousNegation`. This classification happens once, while the tree
//! is built; re-expanding a finished tree never re-runs it.

use crate::ast::{Arg, Expr};
use crate::error::ParseResult;
use crate::token::{Associativity, Precedence, Token};

use super::{ParseMode, Parser};

impl<'a> Parser<'a> {
    // ==================== Expression Parsing (Pratt Parser) ====================

    /// Parse an expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_expression_with_precedence(Precedence::Lowest)
    }

    /// Parse an expression with minimum precedence (Pratt parser core)
    pub(crate) fn parse_expression_with_precedence(
        &mut self,
        min_prec: Precedence,
    ) -> ParseResult<Expr> {
        // Parse prefix expression (unary or primary)
        let mut left = self.parse_prefix()?;

        // Parse infix expressions
        while !self.is_at_end() {
            let Some(token) = self.current.as_ref() else {
                break;
            };

            let Some((prec, assoc)) = token.token.binary_precedence() else {
                break;
            };

            // Check precedence
            if prec < min_prec {
                break;
            }

            // Consume the operator
            let op_token = self.advance().unwrap();

            // Line continuation: an operator at end of line continues on
            // the next one
            self.skip_newlines();

            // Calculate next precedence based on associativity
            let next_prec = match assoc {
                Associativity::Left => Precedence::try_from((prec as i8) + 1).unwrap_or(prec),
                Associativity::Right => prec,
            };

            // Parse right-hand side
            let right = self.parse_expression_with_precedence(next_prec)?;

            let op = op_token
                .token
                .operator_text()
                .expect("binary operators have operator text");
            left = Expr::call_symbol(op, vec![Arg::positional(left), Arg::positional(right)]);
        }

        Ok(left)
    }

    /// Parse a prefix expression (unary operator or primary)
    pub(crate) fn parse_prefix(&mut self) -> ParseResult<Expr> {
        let token = match self.current.as_ref() {
            Some(t) => t,
            None => return Err(self.eof_error("expression")),
        };

        match token.token {
            Token::Bang => self.parse_negation_run(),
            Token::Minus => {
                self.advance();
                // Unary minus binds tighter than binary, but postfix binds
                // tightest: -abs(x) is -(abs(x)), not (-abs)(x)
                let operand = self.parse_prefix_with_postfix()?;
                Ok(Expr::call_symbol("-", vec![Arg::positional(operand)]))
            }
            _ => self.parse_primary_with_postfix(),
        }
    }

    /// Classify a run of consecutive `!` tokens and parse its operand
    fn parse_negation_run(&mut self) -> ParseResult<Expr> {
        let first = self.advance().unwrap();
        let mut span = first.span;
        let mut count = 1usize;
        while self.check(&Token::Bang) {
            let token = self.advance().unwrap();
            span = span.merge(&token.span);
            count += 1;
        }

        if self.mode == ParseMode::Quoting {
            match count {
                2 => {
                    let operand = self.parse_prefix_with_postfix()?;
                    return Ok(Expr::UnquoteOne(Box::new(operand)));
                }
                3 => {
                    let operand = self.parse_prefix_with_postfix()?;
                    return Ok(Expr::UnquoteSplice(Box::new(operand)));
                }
                1 => {}
                _ => {
                    return Err(crate::error::ParseError::AmbiguousNegation { count, span });
                }
            }
        }

        // Literal negation: the whole run shares a single low-precedence
        // operand grab, so `!!x + y` nests as `!(!(x + y))`
        let operand = self.parse_expression_with_precedence(Precedence::Comparison)?;
        let mut expr = operand;
        for _ in 0..count {
            expr = Expr::call_symbol("!", vec![Arg::positional(expr)]);
        }
        Ok(expr)
    }

    /// Parse a primary expression followed by any postfix call applications
    pub(crate) fn parse_primary_with_postfix(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_primary()?;

        while self.check(&Token::LParen) {
            left = self.parse_call_expression(left)?;
        }

        Ok(left)
    }

    /// Parse a prefix expression (possibly with nested unary minus)
    /// followed by postfix call applications
    ///
    /// This is the operand form used by unary operators and by the
    /// unquote markers: tight enough that `!!x + y` leaves `+ y` to the
    /// surrounding binary loop.
    pub(crate) fn parse_prefix_with_postfix(&mut self) -> ParseResult<Expr> {
        let token = match self.current.as_ref() {
            Some(t) => t,
            None => return Err(self.eof_error("operand")),
        };

        if token.token == Token::Minus {
            self.advance();
            let operand = self.parse_prefix_with_postfix()?;
            return Ok(Expr::call_symbol("-", vec![Arg::positional(operand)]));
        }

        self.parse_primary_with_postfix()
    }
}
