//! Recursive descent parser for the surface expression language
//!
//! Converts the token stream from the lexer into `Expr` trees. The parser
//! runs in one of two modes: `Plain` gives every `!` its native
//! low-precedence negation meaning; `Quoting` additionally reinterprets
//! runs of exactly two or three `!` tokens as unquote / unquote-splice
//! markers (see `expressions.rs`).

mod calls;
mod expressions;
mod primary;

use crate::ast::Expr;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, SpannedToken};
use crate::span::{SourceMap, Span};
use crate::token::Token;

/// Parsing mode, chosen once per parse
///
/// Quoting mode is what a quoting function uses to reify its argument;
/// the reinterpretation of `!` runs happens only while that tree is being
/// built and is never re-applied to a finished tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// `!` always means logical negation
    Plain,
    /// `!!` / `!!!` runs become unquote / unquote-splice markers
    Quoting,
}

/// Expression parser
pub struct Parser<'a> {
    /// Source code
    pub(crate) source: &'a str,
    /// Lexer
    pub(crate) lexer: Lexer<'a>,
    /// Source map for line/column calculation
    pub(crate) source_map: SourceMap,
    /// Current token (peeked)
    pub(crate) current: Option<SpannedToken<'a>>,
    /// Lexer error waiting to be surfaced (fail-fast, no recovery)
    pub(crate) pending_error: Option<ParseError>,
    /// Parsing mode
    pub(crate) mode: ParseMode,
}

impl<'a> std::fmt::Debug for Parser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("source", &self.source)
            .field("mode", &self.mode)
            .finish()
    }
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source code
    pub fn new(source: &'a str, mode: ParseMode) -> Self {
        let source_map = SourceMap::new(source);
        let lexer = Lexer::new(source);
        Self {
            source,
            lexer,
            source_map,
            current: None,
            pending_error: None,
            mode,
        }
    }

    /// Parse the source as a single expression
    ///
    /// The input is argument-position syntax, so a top-level walrus form
    /// (`lhs := rhs`) is accepted. Leading and trailing newlines are
    /// permitted; any other trailing input is an error. Errors abort
    /// immediately with no partial tree.
    pub fn parse(mut self) -> ParseResult<Expr> {
        // Prime the parser with the first token
        self.advance();

        while self.check(&Token::Newline) {
            self.advance();
        }

        let mut expr = self.parse_expression()?;

        if self.check(&Token::Walrus) {
            self.advance();
            self.skip_newlines();
            let rhs = self.parse_expression()?;
            expr = Expr::call_symbol(
                ":=",
                vec![crate::ast::Arg::positional(expr), crate::ast::Arg::positional(rhs)],
            );
        }

        while self.check(&Token::Newline) {
            self.advance();
        }

        if let Some(e) = self.pending_error.take() {
            return Err(e);
        }

        if let Some(token) = self.current.as_ref() {
            return Err(ParseError::TrailingInput {
                found: token.text.to_string(),
                span: token.span,
            });
        }

        Ok(expr)
    }

    // ==================== Token Management ====================

    /// Advance to the next token
    pub(crate) fn advance(&mut self) -> Option<SpannedToken<'a>> {
        let prev = self.current.take();
        loop {
            match self.lexer.next_token() {
                Some(Ok(token)) => {
                    // Skip comments
                    if matches!(token.token, Token::LineComment) {
                        continue;
                    }
                    self.current = Some(token);
                    break;
                }
                Some(Err(e)) => {
                    // Surfaced by whoever next needs a token (fail-fast)
                    self.pending_error = Some(e);
                    self.current = None;
                    break;
                }
                None => {
                    self.current = None;
                    break;
                }
            }
        }
        prev
    }

    /// Check if current token matches
    pub(crate) fn check(&self, expected: &Token) -> bool {
        self.current
            .as_ref()
            .map(|t| &t.token == expected)
            .unwrap_or(false)
    }

    /// Peek at the token after the current one without consuming it
    pub(crate) fn peek_next(&mut self) -> Option<Token> {
        loop {
            match self.lexer.peek() {
                Some(Ok(token)) => {
                    // Skip comments
                    if matches!(token.token, Token::LineComment) {
                        let _ = self.lexer.next_token();
                        continue;
                    }
                    return Some(token.token.clone());
                }
                Some(Err(_)) => return None,
                None => return None,
            }
        }
    }

    /// Consume current token if it matches, return error otherwise
    pub(crate) fn expect(&mut self, expected: Token) -> ParseResult<SpannedToken<'a>> {
        if self.check(&expected) {
            Ok(self.advance().unwrap())
        } else {
            let found = self
                .current
                .as_ref()
                .map(|t| t.text)
                .unwrap_or("end of input");
            let span = self.current_span();
            Err(ParseError::unexpected_token(
                found,
                format!("{:?}", expected),
                span,
            ))
        }
    }

    /// Get the span of the current token
    pub(crate) fn current_span(&self) -> Span {
        self.current
            .as_ref()
            .map(|t| t.span)
            .unwrap_or_else(|| self.source_map.span(self.source.len(), self.source.len()))
    }

    /// Check if we're at end of input
    pub(crate) fn is_at_end(&self) -> bool {
        self.current.is_none()
    }

    /// The error to report when a token was required but none is left:
    /// a pending lexer error if there is one, otherwise unexpected EOF
    pub(crate) fn eof_error(&mut self, expected: &str) -> ParseError {
        self.pending_error
            .take()
            .unwrap_or_else(|| ParseError::unexpected_eof(expected, self.current_span()))
    }

    /// Skip any newline tokens
    pub(crate) fn skip_newlines(&mut self) {
        while self.check(&Token::Newline) {
            self.advance();
        }
    }
}

/// Parse source code as a single expression in the given mode
pub fn parse(source: &str, mode: ParseMode) -> ParseResult<Expr> {
    Parser::new(source, mode).parse()
}
