use std::fmt;

/// A step in the XML grammar.
///
/// The writer is driven by these states directly; the reader classifies every token it reads as
/// one of them. [`State::Illegal`] is where the [`Fsm`] ends up after any transition the grammar
/// does not allow, and it never leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// A bare `>`, before it is known whether it ends a header or a footer.
    End,

    /// The start of an element, `<tag`.
    Header,

    /// The `>` closing the start of an element.
    HeaderEnd,

    /// The start of an end tag, `</tag`.
    Footer,

    /// The `>` closing an end tag.
    FooterEnd,

    /// The `/>` closing an element with no content.
    AtomEnd,

    /// An attribute, `name="value"`.
    NameValue,

    /// Text content of an element.
    Element,

    /// Nothing has been written or read yet.
    New,

    /// The grammar was violated.
    Illegal,

    /// Close every element that is still open.
    Finish,
}

impl State {
    /// The bit used for this state in the transition table.
    const fn bit(self) -> u16 {
        match self {
            State::End => 1,
            State::Header => 2,
            State::HeaderEnd => 4,
            State::Footer => 8,
            State::AtomEnd => 16,
            State::NameValue => 32,
            State::Element => 64,
            State::New => 128,
            State::Illegal => 256,
            State::Finish => 512,
            State::FooterEnd => 1024,
        }
    }

    /// Returns the name of the state as it appears in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            State::End => "END",
            State::Header => "HEADER",
            State::HeaderEnd => "HEADER_END",
            State::Footer => "FOOTER",
            State::FooterEnd => "FOOTER_END",
            State::AtomEnd => "ATOM_END",
            State::NameValue => "NAME_VALUE",
            State::Element => "ELEMENT",
            State::New => "NEW",
            State::Illegal => "ILLEGAL",
            State::Finish => "FINISH",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

const fn bits(states: &[State]) -> u16 {
    let mut acc = 0;
    let mut i = 0;
    while i < states.len() {
        acc |= states[i].bit();
        i += 1;
    }
    acc
}

/// The allowed transitions, as `(from, to)` pairs of state sets.
///
/// ```text
///               +--------+      NEW  +--------+
///               ^        |       |   |        |
///               |        V       V   V        |
///  FOOTER_END<-FOOTER<---+------>HEADER-----+ |
///     |         ^        ^        |  |      | |
///     |         |        |   +----+  |  +-+ | |
///     |         |        |   |       |  | | | |
///     |         |        |   V       V  V | | |
///     +---------)----->ATOM_END<-NAME_VALUE | |
///               |                   |       | |
///               |                   V       | |
///               +--ELEMENT<-----HEADER_END<-+ |
///                                   |         |
///                                   +---------+
/// ```
const TRANSITIONS: [(u16, u16); 7] = [
    (bits(&[State::New]), bits(&[State::Header])),
    (bits(&[State::AtomEnd, State::FooterEnd]), bits(&[State::Footer, State::Header])),
    (bits(&[State::Header]), bits(&[State::NameValue, State::HeaderEnd, State::AtomEnd])),
    (bits(&[State::NameValue]), bits(&[State::HeaderEnd, State::AtomEnd, State::NameValue])),
    (bits(&[State::HeaderEnd]), bits(&[State::Element, State::Header])),
    (bits(&[State::Element]), bits(&[State::Footer])),
    (bits(&[State::Footer]), bits(&[State::FooterEnd])),
];

/// The state machine shared by the writer and the reader.
///
/// Besides the current [`State`], the machine keeps the stack of open element names, so that an
/// end tag can be checked against the element it closes.
#[derive(Debug, Clone)]
pub struct Fsm {
    state: State,
    tags: Vec<String>,
}

impl Default for Fsm {
    fn default() -> Self {
        Self::new()
    }
}

impl Fsm {
    /// Creates a machine that has seen nothing yet.
    pub fn new() -> Self {
        Self { state: State::New, tags: Vec::new() }
    }

    /// The current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The innermost open element, if any.
    pub fn tag(&self) -> Option<&str> {
        self.tags.last().map(String::as_str)
    }

    /// Returns true if no element is open.
    pub fn finished(&self) -> bool {
        self.tags.is_empty()
    }

    /// Moves to `new_state`, or to [`State::Illegal`] if the grammar does not allow it.
    fn advance(&mut self, new_state: State) {
        let from = self.state.bit();
        let to = new_state.bit();
        let allowed = TRANSITIONS.iter().any(|(a, b)| a & from != 0 && b & to != 0);
        self.state = if allowed { new_state } else { State::Illegal };
    }

    /// Feeds the next state into the machine.
    ///
    /// A tag may only accompany [`State::Header`], which opens it, or [`State::Footer`], which
    /// must name the innermost open element. A footer without a tag, or [`State::AtomEnd`],
    /// closes the innermost element whatever its name.
    pub fn next(&mut self, new_state: State, tag: Option<&str>) {
        self.advance(new_state);
        if self.state == State::Illegal {
            return;
        }

        match (new_state, tag) {
            (State::Header, Some(tag)) => self.tags.push(tag.to_string()),
            (State::Footer, Some(tag)) => {
                if self.tag() != Some(tag) {
                    self.state = State::Illegal;
                }
                self.tags.pop();
            },
            (_, Some(_)) => self.state = State::Illegal,
            (State::Footer | State::AtomEnd, None) => {
                if self.tags.pop().is_none() {
                    self.state = State::Illegal;
                }
            },
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn header_atom() {
        let mut fsm = Fsm::new();
        fsm.next(State::Header, Some("document"));
        fsm.next(State::HeaderEnd, None);
        fsm.next(State::Header, Some("variable"));
        fsm.next(State::NameValue, None);
        fsm.next(State::NameValue, None);
        fsm.next(State::AtomEnd, None);
        assert_eq!(fsm.state(), State::AtomEnd);
        assert_eq!(fsm.tag(), Some("document"));
        fsm.next(State::Footer, Some("document"));
        fsm.next(State::FooterEnd, None);
        assert_eq!(fsm.state(), State::FooterEnd);
        assert!(fsm.finished());
    }

    #[test]
    fn element_then_footer() {
        let mut fsm = Fsm::new();
        fsm.next(State::Header, Some("test"));
        fsm.next(State::HeaderEnd, None);
        fsm.next(State::Element, None);
        fsm.next(State::Footer, None);
        assert_eq!(fsm.state(), State::Footer);
        assert!(fsm.finished());
    }

    #[test]
    fn mismatched_footer() {
        let mut fsm = Fsm::new();
        fsm.next(State::Header, Some("a"));
        fsm.next(State::HeaderEnd, None);
        fsm.next(State::Header, Some("b"));
        fsm.next(State::AtomEnd, None);
        fsm.next(State::Footer, Some("c"));
        assert_eq!(fsm.state(), State::Illegal);
    }

    #[test]
    fn illegal_is_sticky() {
        let mut fsm = Fsm::new();
        fsm.next(State::Element, None);
        assert_eq!(fsm.state(), State::Illegal);
        fsm.next(State::Header, Some("a"));
        assert_eq!(fsm.state(), State::Illegal);
    }

    #[test]
    fn tag_only_on_header_or_footer() {
        let mut fsm = Fsm::new();
        fsm.next(State::Header, Some("a"));
        fsm.next(State::HeaderEnd, Some("a"));
        assert_eq!(fsm.state(), State::Illegal);
    }

    #[test]
    fn content_requires_header_end() {
        let mut fsm = Fsm::new();
        fsm.next(State::Header, Some("a"));
        fsm.next(State::Element, None);
        assert_eq!(fsm.state(), State::Illegal);
    }
}
