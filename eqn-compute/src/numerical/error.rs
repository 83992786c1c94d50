//! Errors that can occur while evaluating an equation. None of these point into source text, so
//! they are all raised unspanned.

use eqn_attrs::ErrorKind;

/// A function node names a function that does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown function `{}`", name),
    help = "the functions are `sin`, `cos`, `tan`, `log` and `exp`",
    category = Logic,
)]
pub struct UnknownFunction {
    /// The name of the function.
    pub name: String,
}

/// A constant node names a constant that does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown constant `{}`", name),
    help = "the constants are `e`, `P` (pi) and `i`",
    category = Logic,
)]
pub struct UnknownConstant {
    /// The name of the constant.
    pub name: char,
}

/// The equation still has an input in it, which has no value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot evaluate an equation with an unfinished input",
    help = "finish typing into every input first",
    category = Logic,
)]
pub struct InputHasNoValue;
