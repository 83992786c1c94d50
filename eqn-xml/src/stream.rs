use eqn_error::Error;
use std::fmt::Write;
use super::{error::*, escape::escape, state::{Fsm, State}};

/// Layout options for a [`Stream`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamOptions {
    /// The number of spaces each nesting level is indented by.
    pub indent_step: usize,

    /// Written before every start tag (except the first) and every end tag that does not follow
    /// element text.
    pub separator: String,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self { indent_step: 2, separator: "\n".to_string() }
    }
}

/// One item written to a [`Stream`]: either a grammar state or a piece of text whose meaning
/// depends on the state written before it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Item<'a> {
    State(State),
    Text(&'a str),
}

impl From<State> for Item<'_> {
    fn from(state: State) -> Self {
        Item::State(state)
    }
}

impl<'a> From<&'a str> for Item<'a> {
    fn from(text: &'a str) -> Self {
        Item::Text(text)
    }
}

impl<'a> From<&'a String> for Item<'a> {
    fn from(text: &'a String) -> Self {
        Item::Text(text)
    }
}

/// What the next piece of text written to the stream means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    None,
    HeaderTag,
    Name,
    Value,
    ElementText,
}

/// A streaming XML writer.
///
/// States and text are written with [`Stream::out`], which can be chained:
///
/// - [`State::Header`] followed by the tag name opens an element.
/// - [`State::NameValue`] followed by a name and a value adds an attribute.
/// - [`State::HeaderEnd`] ends the start tag, [`State::AtomEnd`] ends an element with no content.
/// - [`State::Element`] followed by text writes the text content of an element.
/// - [`State::Footer`] closes the innermost element.
/// - [`State::Finish`] closes every open element.
///
/// The stream opens a `<document>` element on construction. Every element still open is closed
/// by [`Stream::finish`], or when the stream is dropped.
#[derive(Debug)]
pub struct Stream<W: Write> {
    out: W,
    options: StreamOptions,
    fsm: Fsm,
    pending: Pending,
    name: String,
    indent: usize,
    finished: bool,
}

impl<W: Write> Stream<W> {
    /// Creates a stream writing to `out` with the default layout.
    pub fn new(out: W) -> Result<Self, Error> {
        Self::with_options(out, StreamOptions::default())
    }

    /// Creates a stream writing to `out` with the given layout.
    pub fn with_options(out: W, options: StreamOptions) -> Result<Self, Error> {
        let mut stream = Self {
            out,
            options,
            fsm: Fsm::new(),
            pending: Pending::None,
            name: String::new(),
            indent: 0,
            finished: false,
        };
        stream.out(State::Header)?.out("document")?.out(State::HeaderEnd)?;
        Ok(stream)
    }

    /// Writes the next item.
    pub fn out<'a>(&mut self, item: impl Into<Item<'a>>) -> Result<&mut Self, Error> {
        match item.into() {
            Item::State(state) => self.out_state(state)?,
            Item::Text(text) => self.out_text(text)?,
        }
        Ok(self)
    }

    /// Closes every open element, including `<document>`.
    pub fn finish(mut self) -> Result<(), Error> {
        self.close_all()
    }

    fn close_all(&mut self) -> Result<(), Error> {
        self.finished = true;
        self.out_state(State::Finish)
    }

    fn write(&mut self, s: &str) -> Result<(), Error> {
        self.out.write_str(s).map_err(|_| Error::unspanned(WriteFailed))
    }

    fn write_indent(&mut self) -> Result<(), Error> {
        if self.indent > 0 {
            let indent = " ".repeat(self.indent);
            self.write(&indent)?;
        }
        Ok(())
    }

    fn check(&self, state: State) -> Result<(), Error> {
        if self.fsm.state() == State::Illegal {
            Err(Error::unspanned(BadNextState { state }))
        } else {
            Ok(())
        }
    }

    fn out_state(&mut self, state: State) -> Result<(), Error> {
        if self.pending != Pending::None {
            return Err(Error::unspanned(BadNextState { state }));
        }

        match state {
            State::NameValue => self.pending = Pending::Name,
            State::Element => self.pending = Pending::ElementText,
            State::Header => self.pending = Pending::HeaderTag,
            State::HeaderEnd => {
                self.write(">")?;
                self.indent += self.options.indent_step;
                self.fsm.next(state, None);
            },
            State::AtomEnd => {
                self.write("/>")?;
                self.fsm.next(state, None);
            },
            State::Footer => {
                let Some(tag) = self.fsm.tag().map(str::to_string) else {
                    return Err(Error::unspanned(TooManyFooters));
                };
                self.indent = self.indent.saturating_sub(self.options.indent_step);
                if self.fsm.state() != State::Element {
                    let separator = self.options.separator.clone();
                    self.write(&separator)?;
                    self.write_indent()?;
                }
                self.write(&format!("</{}>", tag))?;
                self.fsm.next(State::Footer, None);
                self.fsm.next(State::FooterEnd, None);
            },
            State::Finish => {
                while !self.fsm.finished() {
                    self.out_state(State::Footer)?;
                }
            },
            State::End | State::FooterEnd | State::New | State::Illegal => {
                return Err(Error::unspanned(BadState { state }));
            },
        }

        self.check(state)
    }

    fn out_text(&mut self, text: &str) -> Result<(), Error> {
        match self.pending {
            Pending::HeaderTag => {
                self.pending = Pending::None;
                if self.fsm.state() != State::New {
                    let separator = self.options.separator.clone();
                    self.write(&separator)?;
                }
                self.write_indent()?;
                self.write(&format!("<{}", text))?;
                self.fsm.next(State::Header, Some(text));
                self.check(State::Header)
            },
            Pending::ElementText => {
                self.pending = Pending::None;
                self.write(&escape(text))?;
                self.fsm.next(State::Element, None);
                self.check(State::Element)
            },
            Pending::Name => {
                self.pending = Pending::Value;
                self.name = text.to_string();
                Ok(())
            },
            Pending::Value => {
                self.pending = Pending::None;
                let pair = format!(" {}=\"{}\"", self.name, escape(text));
                self.write(&pair)?;
                self.fsm.next(State::NameValue, None);
                self.check(State::NameValue)
            },
            Pending::None => Err(Error::unspanned(BadPendingTag { text: text.to_string() })),
        }
    }
}

impl<W: Write> Drop for Stream<W> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(err) = self.close_all() {
            log::warn!("could not close xml stream: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn empty_document() {
        let mut out = String::new();
        Stream::new(&mut out).unwrap().finish().unwrap();
        assert_eq!(out, "<document>\n</document>");
    }

    #[test]
    fn nested() {
        let mut out = String::new();
        {
            let mut xml = Stream::new(&mut out).unwrap();
            xml.out(State::Header).unwrap().out("equation").unwrap().out(State::HeaderEnd).unwrap();
            xml.out(State::Header).unwrap().out("variable").unwrap().out(State::AtomEnd).unwrap();
            xml.out(State::Footer).unwrap();
        }
        assert_eq!(out, "<document>\n  <equation>\n    <variable/>\n  </equation>\n</document>");
    }

    #[test]
    fn custom_layout() {
        let mut out = String::new();
        let options = StreamOptions { indent_step: 0, separator: String::new() };
        {
            let mut xml = Stream::with_options(&mut out, options).unwrap();
            xml.out(State::Header).unwrap().out("a").unwrap().out(State::AtomEnd).unwrap();
        }
        assert_eq!(out, "<document><a/></document>");
    }

    #[test]
    fn text_without_state() {
        let mut out = String::new();
        let mut xml = Stream::new(&mut out).unwrap();
        let err = xml.out("stray").unwrap_err();
        assert!(err.is_logic());
        assert_eq!(err.to_string(), "Bad pending xml tag: stray");
    }

    #[test]
    fn state_while_pending() {
        let mut out = String::new();
        let mut xml = Stream::new(&mut out).unwrap();
        let err = xml.out(State::Header).unwrap().out(State::AtomEnd).unwrap_err();
        assert_eq!(err.to_string(), "Bad next xml state: ATOM_END");
    }

    #[test]
    fn bad_state() {
        let mut out = String::new();
        let mut xml = Stream::new(&mut out).unwrap();
        let err = xml.out(State::End).unwrap_err();
        assert_eq!(err.to_string(), "Bad xml state: END");
    }

    #[test]
    fn element_in_header() {
        let mut out = String::new();
        let mut xml = Stream::new(&mut out).unwrap();
        xml.out(State::Header).unwrap().out("a").unwrap();
        let err = xml.out(State::Element).unwrap().out("text").unwrap_err();
        assert_eq!(err.to_string(), "Bad next xml state: ELEMENT");
    }
}
