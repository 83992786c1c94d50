use ariadne::Source;
use eqn_error::Error as EqnError;

/// Utility enum to package errors that can occur while running a line of input.
#[derive(Debug)]
pub enum Error {
    /// An error from parsing, evaluating or rewriting an equation.
    Eqn(EqnError),

    /// The left-hand side of an assignment is not a single variable letter.
    InvalidName(String),
}

impl Error {
    /// Report this [`Error`] to stderr. `input` is the text the error's spans point into.
    ///
    /// The `ariadne` crate's [`Report`](ariadne::Report) type does not have a `Display`
    /// implementation, so we can only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, input: &str) {
        match self {
            Self::Eqn(err) => {
                let report = err.build_report("input");
                if let Err(io_err) = report.eprint(("input", Source::from(input))) {
                    eprintln!("{}: {}", err, io_err);
                }
            },
            Self::InvalidName(name) => {
                eprintln!("cannot assign to `{}`: expected a single variable letter", name);
            },
        }
    }
}

impl From<EqnError> for Error {
    fn from(err: EqnError) -> Self {
        Self::Eqn(err)
    }
}
