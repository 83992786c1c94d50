//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that carries one.
//!
//! Every error belongs to one of three [`Category`]s:
//!
//! - [`Category::Format`]: the input text or XML was malformed. These are user-facing and are
//!   reported at the parser boundary.
//! - [`Category::Logic`]: a caller broke an invariant of the tree, such as removing the last term
//!   of an expression or comparing cursors over different expressions.
//! - [`Category::Range`]: a cursor moved or was dereferenced past either end. Loops over cursors
//!   use this as their "no more" signal.

use ariadne::{Color, Report};
use std::{fmt::{self, Debug, Display}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// The broad class an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Malformed text or XML input.
    Format,

    /// An invariant violation caused by the caller.
    Logic,

    /// A cursor was moved or dereferenced past either end.
    Range,
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Format => write!(f, "format error"),
            Category::Logic => write!(f, "logic error"),
            Category::Range => write!(f, "range error"),
        }
    }
}

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// The category of this error.
    fn category(&self) -> Category;

    /// The plain-text message of this error, without any source annotations.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error that is not associated with any source code.
    pub fn unspanned(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// Returns the category of this error.
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Returns true if the input was malformed.
    pub fn is_format(&self) -> bool {
        self.category() == Category::Format
    }

    /// Returns true if the caller broke an invariant.
    pub fn is_logic(&self) -> bool {
        self.category() == Category::Logic
    }

    /// Returns true if a cursor ran past either end.
    pub fn is_range(&self) -> bool {
        self.category() == Category::Range
    }

    /// Returns the plain-text message of this error.
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use ariadne::{Label, ReportKind, Source};
    use pretty_assertions::assert_eq;
    use super::*;

    #[derive(Debug)]
    struct Misplaced {
        what: &'static str,
    }

    impl ErrorKind for Misplaced {
        fn category(&self) -> Category {
            Category::Logic
        }

        fn message(&self) -> String {
            format!("misplaced {}", self.what)
        }

        fn build_report<'a>(
            &self,
            src_id: &'a str,
            spans: &[Range<usize>],
        ) -> Report<(&'a str, Range<usize>)> {
            Report::build(ReportKind::Error, src_id, spans[0].start)
                .with_message(self.message())
                .with_label(Label::new((src_id, spans[0].clone())).with_color(EXPR))
                .finish()
        }
    }

    #[test]
    fn category_predicates() {
        let err = Error::new(vec![1..2], Misplaced { what: "term" });
        assert_eq!(err.category(), Category::Logic);
        assert!(err.is_logic());
        assert!(!err.is_format());
        assert!(!err.is_range());
    }

    #[test]
    fn display_is_message() {
        let err = Error::new(vec![0..1], Misplaced { what: "factor" });
        assert_eq!(err.to_string(), "misplaced factor");
    }

    #[test]
    fn report_mentions_message() {
        let err = Error::new(vec![2..3], Misplaced { what: "cursor" });
        let mut out = Vec::new();
        err.build_report("input")
            .write(("input", Source::from("ab)c")), &mut out)
            .unwrap();
        let out = String::from_utf8(strip_ansi_escapes::strip(out)).unwrap();
        assert!(out.contains("misplaced cursor"));
    }
}
