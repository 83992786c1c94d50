use eqn_compute::{
    consts::is_zero,
    numerical::{Environment, Eval},
    symbolic::Normalized,
};
use eqn_parser::{parser::literal::CONSTANT_NAMES, tree::Equation};
use num_complex::Complex64;
use crate::error::Error;

/// One line of input, split into what it asks for and the equation text it applies to.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    /// `name = expr`: evaluate `expr` and store the result in `name`.
    Assign { name: &'a str, expr: &'a str },

    /// `:xml expr`: print the XML form of `expr`.
    Xml(&'a str),

    /// `:simplify expr`: print `expr` after normalization and simplification.
    Simplify(&'a str),

    /// Print the canonical text of the equation and its value.
    Evaluate(&'a str),
}

impl<'a> Command<'a> {
    /// Splits a line into its command.
    pub fn parse(line: &'a str) -> Self {
        if let Some(expr) = line.strip_prefix(":xml") {
            Self::Xml(expr.trim())
        } else if let Some(expr) = line.strip_prefix(":simplify") {
            Self::Simplify(expr.trim())
        } else if let Some((name, expr)) = line.split_once('=') {
            Self::Assign { name: name.trim(), expr: expr.trim() }
        } else {
            Self::Evaluate(line.trim())
        }
    }

    /// The equation text of the command, which is what error spans point into.
    pub fn source(&self) -> &'a str {
        match self {
            Self::Assign { expr, .. } | Self::Xml(expr) | Self::Simplify(expr) | Self::Evaluate(expr) => expr,
        }
    }
}

/// Formats a value, dropping the imaginary part when it is zero.
pub fn fmt_value(value: Complex64) -> String {
    // adding zero turns -0 into 0
    let re = value.re + 0.0;
    if is_zero(Complex64::new(value.im, 0.0)) {
        format!("{}", re)
    } else if is_zero(Complex64::new(re, 0.0)) {
        format!("{}i", value.im)
    } else if value.im < 0.0 {
        format!("{} - {}i", re, -value.im)
    } else {
        format!("{} + {}i", re, value.im)
    }
}

/// The state kept between lines: the variables assigned so far.
#[derive(Debug, Default)]
pub struct Session {
    env: Environment,
}

impl Session {
    /// Creates a session with no variables assigned.
    pub fn new() -> Self {
        Self::default()
    }

    /// The variables assigned so far.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Runs one command, returning the text to print.
    pub fn run(&mut self, command: &Command) -> Result<String, Error> {
        match *command {
            Command::Assign { name, expr } => {
                let mut chars = name.chars();
                let letter = match (chars.next(), chars.next()) {
                    (Some(letter), None)
                        if letter.is_ascii_alphabetic() && !CONSTANT_NAMES.contains(&letter) => letter,
                    _ => return Err(Error::InvalidName(name.to_string())),
                };
                let value = Equation::parse(expr)?.eval(&self.env)?;
                self.env.set(letter, value);
                Ok(format!("{} = {}", letter, fmt_value(value)))
            },
            Command::Xml(expr) => Ok(Equation::parse(expr)?.to_xml()?),
            Command::Simplify(expr) => {
                let mut normalized = Normalized::new(Equation::parse(expr)?)?;
                normalized.simplify_fully()?;
                Ok(normalized.to_string())
            },
            Command::Evaluate(expr) => {
                let eqn = Equation::parse(expr)?;
                let value = eqn.eval(&self.env)?;
                Ok(format!("{} = {}", eqn, fmt_value(value)))
            },
        }
    }
}
