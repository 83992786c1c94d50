pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack when a grammar alternative does not match.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(Ok(kind)) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind,
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn sum() {
        compare_tokens(
            "2 + x",
            [
                (TokenKind::Number, "2"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Letter, "x"),
            ],
        );
    }

    #[test]
    fn numbers() {
        compare_tokens(
            "3.25 1. 6e23 2.5E-3",
            [
                (TokenKind::Number, "3.25"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Number, "1."),
                (TokenKind::Whitespace, " "),
                (TokenKind::Number, "6e23"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Number, "2.5E-3"),
            ],
        );
    }

    #[test]
    fn exponent_needs_digits() {
        compare_tokens(
            "2e+x",
            [
                (TokenKind::Number, "2"),
                (TokenKind::Letter, "e"),
                (TokenKind::Add, "+"),
                (TokenKind::Letter, "x"),
            ],
        );
    }

    #[test]
    fn functions_and_differentials() {
        compare_tokens(
            "sin(x)D/Dy(y)",
            [
                (TokenKind::Function, "sin("),
                (TokenKind::Letter, "x"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Differential, "D/Dy"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Letter, "y"),
                (TokenKind::CloseParen, ")"),
            ],
        );
    }

    #[test]
    fn letters_are_not_functions() {
        compare_tokens(
            "sx/D",
            [
                (TokenKind::Letter, "s"),
                (TokenKind::Letter, "x"),
                (TokenKind::Div, "/"),
                (TokenKind::Letter, "D"),
            ],
        );
    }

    #[test]
    fn inputs() {
        compare_tokens(
            "#?[12a]$",
            [
                (TokenKind::Current, "#"),
                (TokenKind::Empty, "?"),
                (TokenKind::Typed, "[12a]"),
                (TokenKind::Symbol, "$"),
            ],
        );
    }
}
