//! Readers that build an [`Equation`] from its text form or from XML.
//!
//! The text grammar is the one [`Equation`]'s [`Display`](std::fmt::Display) implementation
//! prints:
//!
//! ```text
//! Expression := ('+' | '-')? Term (('+' | '-') Term)*
//! Term       := Factor ('*'? Factor)*
//! Factor     := Primary (('/' | '^') Factor)?
//! Primary    := '(' Expression ')' | Function | Differential | Letter | Number | Input
//! ```
//!
//! Each grammar alternative returns `Ok(None)` when the text at the cursor cannot start it, so
//! the caller can try the next alternative, and an error when the text starts it but is
//! malformed. Parsing never leaves a half-built tree behind: the equation is only returned once
//! all of the text was read.

pub mod error;
pub mod expr;
pub mod factor;
pub mod literal;
pub mod xml;

use eqn_error::{Error, ErrorKind};
use error::{UnexpectedEof, UnexpectedToken, UnmatchedParen};
use log::trace;
use std::ops::Range;
use super::{
    tokenizer::{tokenize_complete, Token, TokenKind},
    tree::{node::NodeId, Equation},
};

/// A recursive-descent parser for the text form of an equation. The nodes it builds are stored
/// in the equation it is building.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The equation being built.
    pub(crate) eqn: Equation,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            eqn: Equation::blank(),
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the next token that is not whitespace, or the end of the source code
    /// if there is none.
    pub fn span(&self) -> Range<usize> {
        self.peek().map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the next token that is not whitespace, without moving the cursor.
    pub fn peek(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns the kind of the next token that is not whitespace, without moving the cursor.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(UnexpectedEof))
    }

    /// Consumes the next token if it is of the given kind.
    pub fn next_if(&mut self, kind: TokenKind) -> Option<Token<'source>> {
        if self.peek_kind() == Some(kind) {
            self.next_token().ok()
        } else {
            None
        }
    }

    /// Returns true if every token that is not whitespace has been consumed.
    pub fn is_eof(&self) -> bool {
        self.peek().is_none()
    }

    /// Speculatively parses a node using the given grammar alternative. If the alternative does
    /// not match, or fails, the cursor is moved back to where it was.
    pub fn try_parse_with_fn<F>(&mut self, f: F) -> Result<Option<NodeId>, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<Option<NodeId>, Error>,
    {
        let start = self.cursor;
        let result = f(self);
        if !matches!(result, Ok(Some(_))) {
            self.cursor = start;
        }
        result
    }

    /// Creates an error describing the next token as unexpected.
    pub fn unexpected(&self) -> Error {
        match self.peek() {
            Some(token) if token.kind == TokenKind::CloseParen => self.error(UnmatchedParen),
            Some(token) => self.error(UnexpectedToken { found: token.lexeme.to_string() }),
            None => self.error(UnexpectedEof),
        }
    }

    /// Parses the whole text as an equation.
    pub fn parse_equation(mut self) -> Result<Equation, Error> {
        if self.is_eof() {
            return Err(self.error(UnexpectedEof));
        }

        let root = expr::parse_expression(&mut self)?;
        if !self.is_eof() {
            return Err(self.unexpected());
        }

        self.eqn.set_root(root);
        self.unwrap_root();
        trace!("parsed {}", self.eqn);
        Ok(self.eqn)
    }

    /// Replaces a root holding nothing but one parenthesized expression with that expression, so
    /// that `(+x)` and `x` read the same.
    fn unwrap_root(&mut self) {
        let eqn = &mut self.eqn;
        let root = eqn.root();
        let &[term] = eqn.terms(root) else {
            return;
        };
        if !eqn[term].sign || eqn[term].nth != 1 {
            return;
        }
        let &[inner] = eqn.factors(term) else {
            return;
        };
        if !eqn[inner].is_expression() || !eqn[inner].sign || eqn[inner].nth != 1 {
            return;
        }

        if let Ok(factors) = eqn.factors_mut(term) {
            factors.clear();
        }
        eqn.free(root);
        eqn.set_root(inner);
    }
}

impl Equation {
    /// Parses the text form of an equation.
    ///
    /// ```
    /// use eqn_parser::tree::Equation;
    ///
    /// let eqn = Equation::parse("2x^2 - 3sin(x)").unwrap();
    /// assert_eq!(eqn.to_string(), "(+2(+x)^(+2)-3sin(+x))");
    ///
    /// let err = Equation::parse("2x +").unwrap_err();
    /// assert!(err.is_format());
    /// ```
    pub fn parse(text: &str) -> Result<Equation, Error> {
        Parser::new(text).parse_equation()
    }
}
