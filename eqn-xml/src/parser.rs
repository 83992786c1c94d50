use eqn_error::Error;
use once_cell::sync::Lazy;
use regex::Regex;
use std::{collections::BTreeMap, ops::Range};
use super::{error::{SyntaxError, UnexpectedEnd}, escape::unescape, state::{Fsm, State}};

/// Splits a document into start tags, attribute blocks, tag ends and element text.
///
/// A quoted value in an attribute block is taken whole, so it may contain `/` and `>`. A quote
/// with no closing quote is taken as a plain character, which leaves the block for the name,
/// value pair check to reject.
static TOKENS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(</?\w+)\s*((?:"[^"]*"|[^/>"]|")*)\s*(/?>)([^<]*)"#)
        .unwrap_or_else(|err| unreachable!("{}", err))
});

/// A whole attribute block.
static NAME_VALUES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(\w+="[^"]*"\s*)+$"#).unwrap_or_else(|err| unreachable!("{}", err))
});

/// A single attribute within a block.
static NAME_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(\w+)="([^"]*)""#).unwrap_or_else(|err| unreachable!("{}", err))
});

/// A token of the document.
#[derive(Debug, Clone, PartialEq)]
struct Token<'source> {
    /// The region of the document this token was read from.
    span: Range<usize>,

    /// The raw text of the token.
    lexeme: &'source str,
}

/// Splits the document into tokens, dropping whitespace-only pieces.
fn tokenize(source: &str) -> Box<[Token<'_>]> {
    TOKENS.captures_iter(source)
        .flat_map(|captures| {
            captures.iter()
                .skip(1)
                .flatten()
                .filter(|m| !m.as_str().trim().is_empty())
                .map(|m| Token { span: m.range(), lexeme: m.as_str() })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// A reader for documents produced by [`Stream`](crate::Stream).
///
/// The whole document is tokenized up front. The tokens are then replayed through the same
/// [`Fsm`] the writer uses, one at a time, with [`Parser::next`] (which requires the next token
/// to be of a given kind) and [`Parser::check`] (which only looks). Any violation produces a
/// syntax error whose message echoes every token read so far.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    tokens: Box<[Token<'source>]>,
    cursor: usize,
    fsm: Fsm,
    tag: String,
    element: Option<String>,
    attributes: BTreeMap<String, String>,
}

impl<'source> Parser<'source> {
    /// Creates a parser for the given document and reads the opening `<document>` tag.
    pub fn new(source: &'source str) -> Result<Self, Error> {
        let mut parser = Self {
            tokens: tokenize(source),
            cursor: 0,
            fsm: Fsm::new(),
            tag: String::new(),
            element: None,
            attributes: BTreeMap::new(),
        };
        parser.next_tag(State::Header, "document")?.next(State::HeaderEnd)?;
        Ok(parser)
    }

    /// The tag of the last start or end tag read.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The text content read since the last start tag, if any.
    pub fn element(&self) -> Option<&str> {
        self.element.as_deref()
    }

    /// Removes and returns the attribute with the given name from the last start tag.
    pub fn attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// The names of the attributes of the last start tag that have not been taken yet.
    pub fn remaining_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Returns true if attributes of the last start tag have not been taken yet.
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Returns true if every token has been read.
    pub fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Returns the span of the current token, or the end of the document if there is none.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .or_else(|| self.tokens.last())
            .map_or(0..0, |token| token.span.clone())
    }

    /// Creates a syntax error at the current token.
    pub fn syntax_error(&self, reason: impl Into<String>) -> Error {
        let last = self.cursor.min(self.tokens.len().saturating_sub(1));
        let consumed = self.tokens
            .iter()
            .take(last + 1)
            .map(|token| token.lexeme)
            .collect::<String>();
        Error::new(vec![self.span()], SyntaxError { reason: reason.into(), consumed })
    }

    /// Classifies the current token, without consuming it.
    fn classify(&self) -> Option<(State, &'source str)> {
        let lexeme = self.tokens.get(self.cursor)?.lexeme;
        let classified = if let Some(tag) = lexeme.strip_prefix("</") {
            (State::Footer, tag)
        } else if let Some(tag) = lexeme.strip_prefix('<') {
            (State::Header, tag)
        } else if lexeme == "/>" {
            (State::AtomEnd, "")
        } else if lexeme == ">" {
            if self.fsm.state() == State::Footer {
                (State::FooterEnd, "")
            } else {
                (State::HeaderEnd, "")
            }
        } else if NAME_VALUES.is_match(lexeme) {
            (State::NameValue, "")
        } else {
            (State::Element, "")
        };
        Some(classified)
    }

    /// Reads the attributes of an attribute block.
    fn parse_attributes(&mut self, block: &str) {
        for captures in NAME_VALUE.captures_iter(block) {
            let (_, [name, value]) = captures.extract();
            self.attributes.insert(name.to_string(), unescape(value));
        }
    }

    /// Consumes the current token, whatever it is.
    fn advance(&mut self) -> Result<(), Error> {
        let Some((state, tag)) = self.classify() else {
            return Err(Error::new(vec![self.span()], UnexpectedEnd));
        };
        log::trace!("xml token {}: {} {}", self.cursor, state, tag);

        match state {
            State::Element => {
                if matches!(self.fsm.state(), State::Header | State::NameValue) {
                    return Err(self.syntax_error("Bad name, value pair:"));
                }
                let lexeme = self.tokens[self.cursor].lexeme;
                if lexeme.contains(['<', '>', '"', '\'']) {
                    return Err(self.syntax_error("Element expected:"));
                }
                self.element = Some(unescape(lexeme));
                self.fsm.next(State::Element, None);
            },
            State::Header => {
                self.attributes.clear();
                self.element = None;
                self.tag = tag.to_string();
                self.fsm.next(state, Some(tag));
            },
            State::Footer => {
                self.tag = tag.to_string();
                self.fsm.next(state, Some(tag));
            },
            State::NameValue => {
                self.fsm.next(state, None);
                if self.fsm.state() != State::Illegal {
                    let block = self.tokens[self.cursor].lexeme;
                    self.parse_attributes(block);
                }
            },
            _ => self.fsm.next(state, None),
        }

        if self.fsm.state() == State::Illegal {
            let reason = if tag.is_empty() {
                format!("Bad xml syntax: {}", state)
            } else {
                format!("Bad xml syntax: {}, {}", state, tag)
            };
            return Err(self.syntax_error(reason));
        }

        self.cursor += 1;
        if state == State::Footer {
            self.advance()?;
        }
        Ok(())
    }

    /// Returns true if the current token is of the given kind.
    pub fn check(&self, state: State) -> bool {
        self.classify().is_some_and(|(found, _)| found == state)
    }

    /// Returns true if the current token is of the given kind and names the given tag.
    pub fn check_tag(&self, state: State, tag: &str) -> bool {
        self.classify().is_some_and(|(found, found_tag)| found == state && found_tag == tag)
    }

    /// Builds the error for a token that is not the one the caller asked for.
    ///
    /// If the token would not be accepted at this point anyway, the error describes that
    /// instead, since it is the more precise diagnosis.
    fn unexpected(&self, expected: String) -> Error {
        let mut probe = self.clone();
        match probe.advance() {
            Err(err) => err,
            Ok(()) => self.syntax_error(expected),
        }
    }

    /// Consumes the current token, which must be of the given kind.
    pub fn next(&mut self, state: State) -> Result<&mut Self, Error> {
        if !self.check(state) {
            return Err(self.unexpected(format!("Expected xml: {}, ", state)));
        }
        self.advance()?;
        Ok(self)
    }

    /// Consumes the current token, which must be of the given kind and name the given tag.
    pub fn next_tag(&mut self, state: State, tag: &str) -> Result<&mut Self, Error> {
        if !self.check_tag(state, tag) {
            return Err(self.unexpected(format!("Expected xml: {}, {}", state, tag)));
        }
        self.advance()?;
        Ok(self)
    }

    /// Consumes the remaining end tags and checks that every element has been closed.
    pub fn finish(&mut self) -> Result<(), Error> {
        while !self.is_eof() {
            self.next(State::Footer)?;
        }
        if !self.fsm.finished() {
            return Err(self.syntax_error("Missing footer:"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn tokens() {
        let tokens = tokenize("<document>\n  <a x=\"1\"/>\n  <b>text &amp; more</b>\n</document>");
        let lexemes = tokens.iter().map(|t| t.lexeme).collect::<Vec<_>>();
        assert_eq!(lexemes, vec![
            "<document", ">",
            "<a", "x=\"1\"", "/>",
            "<b", ">", "text &amp; more",
            "</b", ">",
            "</document", ">",
        ]);
    }

    #[test]
    fn quoted_values_keep_slashes() {
        let tokens = tokenize("<document><input text=\"a/b>c\" current=\"true\"/></document>");
        let lexemes = tokens.iter().map(|t| t.lexeme).collect::<Vec<_>>();
        assert_eq!(lexemes, vec![
            "<document", ">",
            "<input", "text=\"a/b>c\" current=\"true\"", "/>",
            "</document", ">",
        ]);

        let mut parser = Parser::new("<document><input text=\"x/y\"/></document>").unwrap();
        parser.next_tag(State::Header, "input").unwrap().next(State::NameValue).unwrap();
        assert_eq!(parser.attribute("text").as_deref(), Some("x/y"));
        parser.next(State::AtomEnd).unwrap();
        parser.finish().unwrap();
    }

    #[test]
    fn token_spans() {
        let source = "<document>\n</document>";
        let tokens = tokenize(source);
        assert_eq!(tokens[2].span, 11..21);
        assert_eq!(&source[tokens[2].span.clone()], "</document");
    }

    #[test]
    fn attributes_are_consumed() {
        let mut parser = Parser::new("<document><a x=\"1\" y=\"&lt;2&gt;\"/></document>").unwrap();
        parser.next_tag(State::Header, "a").unwrap().next(State::NameValue).unwrap();
        assert_eq!(parser.attribute("y").as_deref(), Some("<2>"));
        assert_eq!(parser.remaining_attributes().collect::<Vec<_>>(), vec!["x"]);
        assert_eq!(parser.attribute("x").as_deref(), Some("1"));
        assert_eq!(parser.attribute("x"), None);
        assert!(!parser.has_attributes());
        parser.next(State::AtomEnd).unwrap();
        parser.finish().unwrap();
    }

    #[test]
    fn missing_document() {
        let err = Parser::new("<equation/>").unwrap_err();
        assert!(err.is_format());
        assert_eq!(err.to_string(), "Expected xml: HEADER, document\n<equation<<<<<");
    }

    #[test]
    fn unexpected_end() {
        let mut parser = Parser::new("<document>").unwrap();
        let err = parser.next(State::Header).unwrap_err();
        assert!(err.is_format());
        assert_eq!(err.to_string(), "Unexpected end of xml in parser");
    }

    #[test]
    fn expected_other_tag() {
        let mut parser = Parser::new("<document><a/></document>").unwrap();
        let err = parser.next_tag(State::Header, "b").unwrap_err();
        assert_eq!(err.to_string(), "Expected xml: HEADER, b\n<document><a<<<<<");
        assert!(parser.check_tag(State::Header, "a"));
    }

    #[test]
    fn missing_footer() {
        let mut parser = Parser::new("<document><a>").unwrap();
        parser.next_tag(State::Header, "a").unwrap().next(State::HeaderEnd).unwrap();
        let err = parser.finish().unwrap_err();
        assert_eq!(err.to_string(), "Missing footer:\n<document><a><<<<<");
    }
}
