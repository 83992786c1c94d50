use eqn_error::Error;
use crate::{tokenizer::TokenKind, tree::node::NodeId};
use super::{
    error::{ExpectedTerm, MissingOperand},
    factor::parse_factor,
    Parser,
};

/// Returns true if the token ends a term.
fn ends_term(kind: Option<TokenKind>) -> bool {
    matches!(kind, None | Some(TokenKind::Add | TokenKind::Sub | TokenKind::CloseParen))
}

/// Parses a sum of terms, stopping before a `)` or the end of the text.
///
/// Unlike the other grammar rules, an expression is never optional where it appears, so this
/// returns an error instead of [`None`] when no term can be read.
pub fn parse_expression(input: &mut Parser) -> Result<NodeId, Error> {
    let mut terms = Vec::new();

    loop {
        let sign = match input.peek_kind() {
            Some(TokenKind::Add) => {
                input.next_token()?;
                true
            },
            Some(TokenKind::Sub) => {
                input.next_token()?;
                false
            },
            _ if terms.is_empty() => true,
            _ => break,
        };

        let Some(term) = input.try_parse_with_fn(parse_term)? else {
            return Err(input.error(ExpectedTerm));
        };
        input.eqn[term].sign = sign;
        terms.push(term);
    }

    Ok(input.eqn.expression(terms))
}

/// Parses a product of factors. Returns [`None`] if no factor starts here.
pub fn parse_term(input: &mut Parser) -> Result<Option<NodeId>, Error> {
    let mut factors = Vec::new();

    loop {
        if !factors.is_empty() {
            if let Some(star) = input.next_if(TokenKind::Mul) {
                match input.try_parse_with_fn(parse_factor)? {
                    Some(factor) => {
                        factors.push(factor);
                        continue;
                    },
                    None => return Err(Error::new(vec![star.span], MissingOperand { op: '*' })),
                }
            }
        }

        match input.try_parse_with_fn(parse_factor)? {
            Some(factor) => factors.push(factor),
            None if ends_term(input.peek_kind()) => break,
            None => return Err(input.unexpected()),
        }
    }

    if factors.is_empty() {
        Ok(None)
    } else {
        Ok(Some(input.eqn.term(factors)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn term_stops_at_operators() {
        let mut parser = Parser::new("ab+c");
        let term = parse_term(&mut parser).unwrap().unwrap();
        assert_eq!(parser.eqn.factors(term).len(), 2);
        assert_eq!(parser.peek_kind(), Some(TokenKind::Add));
    }

    #[test]
    fn no_term() {
        let mut parser = Parser::new(")");
        assert_eq!(parse_term(&mut parser).unwrap(), None);
    }

    #[test]
    fn dangling_star() {
        let err = Parser::new("a*").parse_equation().unwrap_err();
        assert_eq!(err.message(), "missing right-hand side of `*`");
        assert_eq!(err.spans, vec![1..2]);
    }

    #[test]
    fn leading_star() {
        let err = Parser::new("*a").parse_equation().unwrap_err();
        assert_eq!(err.message(), "unexpected `*`");
    }
}
