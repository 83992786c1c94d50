use eqn_error::Error;
use log::trace;
use crate::{tokenizer::TokenKind, tree::node::NodeId};
use super::{
    error::{MissingDifferentialArg, MissingOperand, UnclosedParen},
    expr::parse_expression,
    literal::{parse_input, parse_letter, parse_number},
    Parser,
};

/// Parses a factor: a primary, optionally followed by `/` or `^` and another factor.
///
/// The right-hand side is itself a factor, so `a^b^c` reads as `a^(b^c)`.
pub fn parse_factor(input: &mut Parser) -> Result<Option<NodeId>, Error> {
    let Some(base) = parse_primary(input)? else {
        return Ok(None);
    };

    let (op, span) = match input.peek() {
        Some(token) if token.kind == TokenKind::Div => ('/', token.span.clone()),
        Some(token) if token.kind == TokenKind::Exp => ('^', token.span.clone()),
        _ => return Ok(Some(base)),
    };
    input.next_token()?;

    let Some(rhs) = input.try_parse_with_fn(parse_factor)? else {
        return Err(Error::new(vec![span], MissingOperand { op }));
    };
    let node = if op == '/' {
        input.eqn.divide(base, rhs)
    } else {
        input.eqn.power(base, rhs)
    };
    Ok(Some(node))
}

/// Tries each kind of primary in turn.
fn parse_primary(input: &mut Parser) -> Result<Option<NodeId>, Error> {
    let alternatives: [fn(&mut Parser) -> Result<Option<NodeId>, Error>; 6] = [
        parse_paren,
        parse_function,
        parse_differential,
        parse_letter,
        parse_number,
        parse_input,
    ];
    for alternative in alternatives {
        if let Some(node) = input.try_parse_with_fn(alternative)? {
            return Ok(Some(node));
        }
    }
    Ok(None)
}

/// Parses the rest of a parenthesized expression, after its `(`. `open` is the span of the `(`.
fn parse_enclosed(input: &mut Parser, open: std::ops::Range<usize>) -> Result<NodeId, Error> {
    let expr = parse_expression(input)?;
    if input.next_if(TokenKind::CloseParen).is_none() {
        return Err(Error::new(vec![open], UnclosedParen));
    }
    Ok(expr)
}

/// Parses an expression in parentheses.
pub fn parse_paren(input: &mut Parser) -> Result<Option<NodeId>, Error> {
    let Some(open) = input.next_if(TokenKind::OpenParen) else {
        return Ok(None);
    };
    parse_enclosed(input, open.span).map(Some)
}

/// Parses a function application, such as `sin(x)`. The function token includes the `(`.
pub fn parse_function(input: &mut Parser) -> Result<Option<NodeId>, Error> {
    let Some(token) = input.next_if(TokenKind::Function) else {
        return Ok(None);
    };
    let name = token.lexeme.trim_end_matches('(');
    let arg = parse_enclosed(input, token.span.clone())?;
    trace!("parsed function {}", name);
    Ok(Some(input.eqn.function(name, arg)))
}

/// Parses a differential, such as `D/Dx(x^2)`.
pub fn parse_differential(input: &mut Parser) -> Result<Option<NodeId>, Error> {
    let Some(token) = input.next_if(TokenKind::Differential) else {
        return Ok(None);
    };
    let Some(variable) = token.lexeme.chars().last() else {
        return Ok(None);
    };

    let Some(open) = input.next_if(TokenKind::OpenParen) else {
        return Err(Error::new(vec![token.span, input.span()], MissingDifferentialArg));
    };
    let function = parse_enclosed(input, open.span)?;
    Ok(Some(input.eqn.differential(variable, function)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::tree::node::NodeKind;

    #[test]
    fn divide_binds_to_neighbors() {
        let mut parser = Parser::new("a/b c");
        let factor = parse_factor(&mut parser).unwrap().unwrap();
        assert!(matches!(parser.eqn[factor].kind, NodeKind::Divide(_)));
        assert_eq!(parser.peek().map(|token| token.lexeme), Some("c"));
    }

    #[test]
    fn not_a_factor() {
        let mut parser = Parser::new("+a");
        assert_eq!(parse_factor(&mut parser).unwrap(), None);
        assert_eq!(parser.peek_kind(), Some(TokenKind::Add));
    }

    #[test]
    fn function_name() {
        let mut parser = Parser::new("cos(y)");
        let factor = parse_factor(&mut parser).unwrap().unwrap();
        match &parser.eqn[factor].kind {
            NodeKind::Function { name, .. } => assert_eq!(name, "cos"),
            kind => panic!("expected a function, found {:?}", kind),
        }
    }

    #[test]
    fn unclosed_function() {
        let err = Parser::new("1+exp(x").parse_equation().unwrap_err();
        assert_eq!(err.message(), "unclosed parenthesis");
        assert_eq!(err.spans, vec![2..6]);
    }
}
