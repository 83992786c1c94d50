//! Errors raised by operations on the expression tree. These signal misuse by the caller
//! ([`Category::Logic`](eqn_error::Category::Logic)) or a cursor that ran off either end
//! ([`Category::Range`](eqn_error::Category::Range)).

use eqn_attrs::ErrorKind;

/// A node was not of the kind the operation needs.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("{} expected, found {}", expected, found), category = Logic)]
pub struct UnexpectedKind {
    /// The kind of node that was needed.
    pub expected: &'static str,

    /// The kind of node that was found.
    pub found: &'static str,
}

/// The handle does not refer to a node of this equation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("no node {} in this equation", id), category = Logic)]
pub struct NoSuchNode {
    /// The index of the handle.
    pub id: usize,
}

/// The node is not a factor of a term inside an expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "node is not a factor of a term", category = Logic)]
pub struct NotAFactor;

/// The node has no parent, so it cannot be replaced in place.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "node is not attached to the equation", category = Logic)]
pub struct Detached;

/// The operation would remove the last term of an expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "expression would have no terms", category = Logic)]
pub struct EmptyExpression;

/// The operation would leave a term without factors.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "term would have no factors", category = Logic)]
pub struct EmptyTerm;

/// The end of a range comes before its start.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "end of range is before its start", category = Logic)]
pub struct BackwardRange;

/// Two cursors over different expressions were compared.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "cursors are over different expressions", category = Logic)]
pub struct DifferentExpressions;

/// A term cannot be split at the cursor.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "term cannot be split here", category = Logic)]
pub struct BadSplit;

/// An operation needs a current input, but there is none.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "no current input", category = Logic)]
pub struct NoCurrentInput;

/// No input has the given serial number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("no input with serial number {}", serial), category = Logic)]
pub struct NoSuchInput {
    /// The serial number that was looked up.
    pub serial: usize,
}

/// A character that cannot appear in the text of an input.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` cannot be typed into an input", c),
    help = "the text of an input is printed between `[` and `]`",
    category = Format,
)]
pub struct BadInputChar {
    /// The rejected character.
    pub c: char,
}

/// An operation needs a selection, but there is none.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "nothing is selected", category = Logic)]
pub struct NoSelection;

/// The cursor was moved or dereferenced past the end.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "cursor is past the end", category = Range)]
pub struct PastEnd;

/// The cursor was moved or dereferenced before the beginning.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "cursor is before the beginning", category = Range)]
pub struct PastBegin;

/// There is no term after the cursor's term.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "no term follows", category = Range)]
pub struct NoNextTerm;
