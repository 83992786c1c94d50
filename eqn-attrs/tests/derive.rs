use eqn_attrs::ErrorKind;
use eqn_error::{Category, Error};
use pretty_assertions::assert_eq;

#[derive(Debug, ErrorKind)]
#[error(
    message = "unexpected end of input",
    labels = ["add another factor here"],
    help = "every `/` and `^` needs a right-hand side",
)]
struct UnexpectedEnd;

#[derive(Debug, ErrorKind)]
#[error(message = format!("cannot remove the last {} of an expression", what), category = Logic)]
struct LastOne {
    what: &'static str,
}

#[derive(Debug, ErrorKind)]
#[error(message = "cursor is past the end", category = Range)]
struct PastEnd;

#[test]
fn defaults_to_format() {
    let err = Error::new(vec![3..3], UnexpectedEnd);
    assert_eq!(err.category(), Category::Format);
    assert_eq!(err.message(), "unexpected end of input");
}

#[test]
fn fields_are_in_scope() {
    let err = Error::unspanned(LastOne { what: "term" });
    assert!(err.is_logic());
    assert_eq!(err.to_string(), "cannot remove the last term of an expression");
}

#[test]
fn range_category() {
    let err = Error::unspanned(PastEnd);
    assert!(err.is_range());
}

#[test]
fn report_without_spans() {
    // building a report must not index into an empty span list
    let err = Error::unspanned(PastEnd);
    let _ = err.build_report("input");
}
