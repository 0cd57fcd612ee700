//! Call expression parsers
//!
//! Argument lists support named arguments (`name = value`), empty slots
//! (`f(a, , b)` — a missing-argument placeholder, preserved so callers
//! can inspect "was this supplied"), and the walrus form (`lhs := rhs`)
//! whose left side is an expression that a later collection step resolves
//! to a dynamically computed name.

use crate::ast::{Arg, Expr};
use crate::error::ParseResult;
use crate::token::Token;

use super::Parser;

impl<'a> Parser<'a> {
    /// Parse a function call expression
    pub(crate) fn parse_call_expression(&mut self, head: Expr) -> ParseResult<Expr> {
        self.expect(Token::LParen)?;

        let mut args = Vec::new();

        if !self.check(&Token::RParen) {
            // Whether a separator was consumed without an entry after it;
            // `f(a,)` ends with a missing slot for the trim rule to drop
            let mut pending_entry = false;

            loop {
                self.skip_newlines();

                if self.check(&Token::RParen) {
                    if pending_entry {
                        args.push(Arg::positional(Expr::Missing));
                    }
                    break;
                }

                // Empty slot between separators: f(a, , b)
                if self.check(&Token::Comma) {
                    args.push(Arg::positional(Expr::Missing));
                    self.advance();
                    pending_entry = true;
                    continue;
                }

                args.push(self.parse_call_argument()?);

                if self.check(&Token::Comma) {
                    self.advance();
                    pending_entry = true;
                } else {
                    break;
                }
            }
        }

        self.expect(Token::RParen)?;
        Ok(Expr::call(head, args))
    }

    /// Parse one call argument: named, walrus-named, or positional
    fn parse_call_argument(&mut self) -> ParseResult<Arg> {
        // Static name: identifier followed by = (a distinct token from ==)
        if self.check(&Token::Identifier) && self.peek_next() == Some(Token::Eq) {
            let name_token = self.advance().unwrap();
            self.advance(); // consume '='
            self.skip_newlines();
            let value = self.parse_expression()?;
            return Ok(Arg::named(name_token.text, value));
        }

        let value = self.parse_expression()?;

        // Dynamic name: lhs := rhs. Kept as a `:=` call in the raw tree;
        // the variadic collector computes the actual name.
        if self.check(&Token::Walrus) {
            self.advance();
            self.skip_newlines();
            let rhs = self.parse_expression()?;
            return Ok(Arg::positional(Expr::call_symbol(
                ":=",
                vec![Arg::positional(value), Arg::positional(rhs)],
            )));
        }

        Ok(Arg::positional(value))
    }
}
