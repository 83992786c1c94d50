use eqn_attrs::ErrorKind;
use crate::state::State;

/// An end tag was written while no element was open.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "Too many footers", category = Logic)]
pub struct TooManyFooters;

/// A state that the writer cannot emit, such as [`State::End`].
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("Bad xml state: {}", state), category = Logic)]
pub struct BadState {
    /// The state that was written.
    pub state: State,
}

/// The writer was driven into a transition the grammar does not allow.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("Bad next xml state: {}", state), category = Logic)]
pub struct BadNextState {
    /// The state that caused the violation.
    pub state: State,
}

/// Text was written when the writer was not expecting a tag name, attribute or element text.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("Bad pending xml tag: {}", text), category = Logic)]
pub struct BadPendingTag {
    /// The text that was written.
    pub text: String,
}

/// The underlying writer failed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "failed to write xml output", category = Logic)]
pub struct WriteFailed;

/// The document ended while the reader still expected more.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "Unexpected end of xml in parser",
    labels = ["the document ends here"],
)]
pub struct UnexpectedEnd;

/// The reader found a token the grammar does not allow at this point.
///
/// The message carries every token consumed so far, followed by `<<<<<` to mark the place the
/// reader stopped.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("{}\n{}<<<<<", reason, consumed),
    labels = ["stopped here"],
)]
pub struct SyntaxError {
    /// What went wrong.
    pub reason: String,

    /// The concatenated tokens up to and including the offending one.
    pub consumed: String,
}
