use eqn_error::Error;
use crate::{tokenizer::TokenKind, tree::node::NodeId};
use super::{error::InvalidNumber, Parser};

/// Letters that name a constant instead of a variable.
pub const CONSTANT_NAMES: [char; 3] = ['e', 'P', 'i'];

/// Parses a single letter, which is a constant if it is one of [`CONSTANT_NAMES`], and a
/// variable otherwise.
pub fn parse_letter(input: &mut Parser) -> Result<Option<NodeId>, Error> {
    let Some(token) = input.next_if(TokenKind::Letter) else {
        return Ok(None);
    };
    let Some(name) = token.lexeme.chars().next() else {
        return Ok(None);
    };

    if CONSTANT_NAMES.contains(&name) {
        Ok(Some(input.eqn.constant(name)))
    } else {
        Ok(Some(input.eqn.variable(name)))
    }
}

/// Parses a number literal. Numbers with a fractional part or an exponent are not integers,
/// even if their value is whole. A literal too large to be finite is an error.
pub fn parse_number(input: &mut Parser) -> Result<Option<NodeId>, Error> {
    let Some(token) = input.next_if(TokenKind::Number) else {
        return Ok(None);
    };
    let value = token.lexeme
        .parse::<f64>()
        .ok()
        .filter(|value: &f64| value.is_finite())
        .ok_or_else(|| Error::new(vec![token.span.clone()], InvalidNumber {
            lexeme: token.lexeme.to_string(),
        }))?;
    let integer = !token.lexeme.contains(['.', 'e', 'E']);
    Ok(Some(input.eqn.number(value, integer)))
}

/// Parses an input placeholder: `#` for the current input, `?` for an empty one, or `[text]` for
/// one with text already typed into it.
pub fn parse_input(input: &mut Parser) -> Result<Option<NodeId>, Error> {
    let Some(token) = input.peek().cloned() else {
        return Ok(None);
    };

    let (text, current) = match token.kind {
        TokenKind::Current => (String::new(), true),
        TokenKind::Empty => (String::new(), false),
        TokenKind::Typed => {
            let inner = token.lexeme
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
                .unwrap_or_default();
            (inner.to_string(), false)
        },
        _ => return Ok(None),
    };
    input.next_token()?;
    Ok(Some(input.eqn.input(text, current)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::tree::node::NodeKind;

    fn parse_one(
        source: &str,
        f: fn(&mut Parser) -> Result<Option<NodeId>, Error>,
    ) -> Option<NodeKind> {
        let mut parser = Parser::new(source);
        f(&mut parser).unwrap().map(|id| parser.eqn[id].kind.clone())
    }

    #[test]
    fn letters() {
        assert_eq!(parse_one("x", parse_letter), Some(NodeKind::Variable('x')));
        assert_eq!(parse_one("P", parse_letter), Some(NodeKind::Constant('P')));
        assert_eq!(parse_one("E", parse_letter), Some(NodeKind::Variable('E')));
        assert_eq!(parse_one("2", parse_letter), None);
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_one("42", parse_number), Some(NodeKind::Number { value: 42.0, integer: true }));
        assert_eq!(parse_one("4.", parse_number), Some(NodeKind::Number { value: 4.0, integer: false }));
        assert_eq!(parse_one("1E-2", parse_number), Some(NodeKind::Number { value: 0.01, integer: false }));
        assert_eq!(parse_one("x", parse_number), None);

        let err = parse_number(&mut Parser::new("1e400")).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn inputs() {
        let mut parser = Parser::new("[a+b]");
        let id = parse_input(&mut parser).unwrap().unwrap();
        assert_eq!(parser.eqn.input_text(id), "a+b");
        assert_eq!(parser.eqn.current_input(), None);

        let mut parser = Parser::new("#");
        let id = parse_input(&mut parser).unwrap().unwrap();
        assert_eq!(parser.eqn.current_input(), Some(id));

        assert_eq!(parse_one("(", parse_input), None);
    }
}
