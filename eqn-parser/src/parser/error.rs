//! Errors raised while reading an equation from text or XML.
//!
//! Text errors are [`Category::Format`](eqn_error::Category::Format) errors whose spans point
//! into the text. A well-formed XML document that does not describe a valid tree produces a
//! [`Category::Logic`](eqn_error::Category::Logic) error instead.

use ariadne::Fmt;
use eqn_attrs::ErrorKind;
use eqn_error::EXPR;

/// The end of the text was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "term".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// A token that cannot appear at this point.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected `{}`", found),
    labels = ["here"],
)]
pub struct UnexpectedToken {
    /// The text of the token.
    pub found: String,
}

/// A `)` with no matching `(`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unmatched closing parenthesis",
    labels = ["this parenthesis was never opened"],
    help = "remove it, or add a `(` before it",
)]
pub struct UnmatchedParen;

/// A `(` with no matching `)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is never closed"],
    help = "add a `)` to close it",
)]
pub struct UnclosedParen;

/// A term was expected, such as after a `+` or `-`, but none starts here.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected a term",
    labels = [format!("add a {} here", "term".fg(EXPR))],
)]
pub struct ExpectedTerm;

/// A `/`, `^` or `*` that is not followed by a factor.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing right-hand side of `{}`", op),
    labels = [format!("a {} must follow this operator", "factor".fg(EXPR))],
)]
pub struct MissingOperand {
    /// The operator.
    pub op: char,
}

/// A differential operator that is not followed by a parenthesized expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "differential needs an expression in parentheses",
    labels = ["this differential", "expected `(` here"],
    help = format!("write the function to differentiate in parentheses, as in {}", "D/Dx(x^2)".fg(EXPR)),
)]
pub struct MissingDifferentialArg;

/// A number that could not be read.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid number `{}`", lexeme),
    labels = ["here"],
)]
pub struct InvalidNumber {
    /// The text of the number.
    pub lexeme: String,
}

/// An XML element that does not describe a node, where a node was expected.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown xml tag `{}`", tag),
    labels = ["here"],
    category = Logic,
)]
pub struct UnknownTag {
    /// The tag that was found.
    pub tag: String,
}

/// An XML attribute that the element does not use.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown attribute `{}` on xml tag `{}`", attribute, tag),
    labels = ["here"],
    category = Logic,
)]
pub struct UnknownAttribute {
    /// The tag of the element.
    pub tag: String,

    /// The name of the attribute.
    pub attribute: String,
}

/// An XML attribute whose value is missing or cannot be read.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("bad value `{}` for attribute `{}`", value, attribute),
    labels = ["here"],
    category = Logic,
)]
pub struct BadAttribute {
    /// The name of the attribute.
    pub attribute: String,

    /// The value that was found, if any.
    pub value: String,
}

/// An XML expression or term element with no children.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("xml tag `{}` must not be empty", tag),
    labels = ["here"],
    category = Logic,
)]
pub struct EmptyContainer {
    /// The tag of the element.
    pub tag: String,
}

/// An XML element describing a node that cannot appear inside its parent element.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("xml tag `{}` cannot appear inside `{}`", tag, parent),
    labels = ["here"],
    category = Logic,
)]
pub struct MisplacedTag {
    /// The tag of the element.
    pub tag: String,

    /// The tag of its parent.
    pub parent: String,
}

/// An XML element with the wrong number of children for the node it describes.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("xml tag `{}` needs {} children, found {}", tag, expected, found),
    labels = ["here"],
    category = Logic,
)]
pub struct ChildCount {
    /// The tag of the element.
    pub tag: String,

    /// The number of children the node needs.
    pub expected: usize,

    /// The number of children found.
    pub found: usize,
}
