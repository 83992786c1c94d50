use logos::{Lexer, Logos};
use std::ops::Range;

/// Extends a number token with an exponent, if one follows.
///
/// The exponent is only consumed if the `e` / `E` is followed by at least one digit, optionally
/// after a sign. Otherwise the letter is left for the next token, where it will be read as the
/// constant `e` or the variable `E`.
fn exponent(lexer: &mut Lexer<TokenKind>) -> bool {
    let rest = lexer.remainder().as_bytes();
    if let Some(b'e' | b'E') = rest.first() {
        let sign = usize::from(matches!(rest.get(1), Some(b'+' | b'-')));
        let digits = rest[1 + sign..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits > 0 {
            lexer.bump(1 + sign + digits);
        }
    }
    true
}

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    #[regex(r"[ \t\n\r]+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("^")]
    Exp,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    /// The name of a function, including its opening parenthesis, such as `sin(`.
    #[regex(r"(sin|cos|tan|log|exp)\(")]
    Function,

    /// A differential operator, such as `D/Dx`.
    #[regex(r"D/D[a-zA-Z]")]
    Differential,

    /// An inactive input with text already typed into it, such as `[12]`.
    #[regex(r"\[[^\]]*\]")]
    Typed,

    /// The current, empty input.
    #[token("#")]
    Current,

    /// An inactive, empty input.
    #[token("?")]
    Empty,

    #[regex(r"[0-9]+(\.[0-9]*)?", exponent)]
    Number,

    /// A single letter, naming either a constant or a variable.
    #[regex(r"[a-zA-Z]")]
    Letter,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}
