//! Algebraic manipulation of equations.
//!
//! # Normalization
//!
//! [`normalize`] rewrites an equation into a canonical shape: divisions become negative
//! multiplicities, integer powers become multiplicities, single-term parentheses are removed,
//! signs are gathered into terms, and factors and terms are sorted. See [`normalize`](mod@normalize)
//! for the details.
//!
//! # Simplification
//!
//! Simplification reduces a normalized equation: numbers are folded, equal factors and like terms
//! are combined, and powers of the same base have their exponents added. The rules recognize like
//! terms and equal factors by comparing their text, so they only work on an equation in the
//! canonical shape. [`Normalized`] makes this ordering explicit: simplification is only
//! available on an equation that has been normalized, and every pass normalizes the equation
//! again before returning it.
//!
//! ```
//! use eqn_compute::symbolic::Normalized;
//! use eqn_parser::tree::Equation;
//!
//! let eqn = Equation::parse("x + 2 + x + 3").unwrap();
//! let mut normalized = Normalized::new(eqn).unwrap();
//! assert_eq!(normalized.to_string(), "(+x+x+2+3)");
//!
//! normalized.simplify_fully().unwrap();
//! assert_eq!(normalized.to_string(), "(+2x+5)");
//! ```
//!
//! The steps a pass takes can be collected with [`Normalized::simplify_with_steps`], passing any
//! [`StepCollector`](step_collector::StepCollector).

pub mod normalize;
pub mod simplify;
pub mod step_collector;

use eqn_error::Error;
use eqn_parser::tree::Equation;
use log::debug;
use std::{fmt, ops::Deref};
use simplify::step::Step;
use step_collector::StepCollector;

pub use normalize::normalize;

/// The most passes [`Normalized::simplify_fully`] runs.
pub const MAX_PASSES: usize = 64;

/// An equation that has been normalized.
///
/// The equation can be read through [`Deref`], but can only be changed through
/// [`Normalized::simplify`], which keeps it normalized.
#[derive(Debug, Clone)]
pub struct Normalized {
    eqn: Equation,
}

impl Normalized {
    /// Normalizes the equation.
    pub fn new(mut eqn: Equation) -> Result<Self, Error> {
        normalize(&mut eqn)?;
        Ok(Self { eqn })
    }

    /// Runs one pass of simplification, then normalizes the equation again. Returns true if the
    /// pass changed anything.
    pub fn simplify(&mut self) -> Result<bool, Error> {
        self.simplify_with_steps(&mut ())
    }

    /// Runs one pass of simplification like [`Normalized::simplify`], recording each rule that
    /// applied.
    pub fn simplify_with_steps(
        &mut self,
        step_collector: &mut dyn StepCollector<Step>,
    ) -> Result<bool, Error> {
        let root = self.eqn.root();
        let changed = simplify::simplify_node(&mut self.eqn, root, step_collector)?;
        normalize(&mut self.eqn)?;
        debug!("simplify pass {}: {}", if changed { "changed" } else { "kept" }, self.eqn);
        Ok(changed)
    }

    /// Runs simplification passes until one changes nothing, or [`MAX_PASSES`] have run. Returns
    /// the number of passes that changed the equation.
    pub fn simplify_fully(&mut self) -> Result<usize, Error> {
        let mut passes = 0;
        while passes < MAX_PASSES && self.simplify()? {
            passes += 1;
        }
        debug!("simplified in {} passes", passes);
        Ok(passes)
    }

    /// Returns the equation.
    pub fn into_inner(self) -> Equation {
        self.eqn
    }
}

impl Deref for Normalized {
    type Target = Equation;

    fn deref(&self) -> &Equation {
        &self.eqn
    }
}

impl fmt::Display for Normalized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.eqn)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use assert_float_eq::assert_float_relative_eq;
    use crate::numerical::{Environment, Eval};

    fn simplified(text: &str) -> String {
        let mut normalized = Normalized::new(Equation::parse(text).unwrap()).unwrap();
        normalized.simplify_fully().unwrap();
        normalized.to_string()
    }

    #[test]
    fn like_terms() {
        assert_eq!(simplified("x+x"), "(+2x)");
        assert_eq!(simplified("3y - y + x - y"), "(+x+y)");
    }

    #[test]
    fn numbers() {
        assert_eq!(simplified("2^3"), "(+8)");
        assert_eq!(simplified("2*3x + 1 + 1"), "(+6x+2)");
        assert_eq!(simplified("x/2"), "(+0.5x)");
    }

    #[test]
    fn large_numbers_keep_their_value() {
        let text = simplified("10^30");
        assert!(!text.contains("9223372036854775807"));
        let value = Equation::parse(&text).unwrap().eval(&Environment::new()).unwrap();
        assert_float_relative_eq!(value.re, 1e30, 1e-12);
    }

    #[test]
    fn division_by_zero_is_not_folded() {
        let text = simplified("1/0");
        assert!(!text.contains("inf"), "{}", text);
        let reparsed = Equation::parse(&text).unwrap().to_string();
        assert_eq!(Equation::parse(&reparsed).unwrap().to_string(), reparsed);
    }

    #[test]
    fn factors() {
        assert_eq!(simplified("x x"), "(+x^2)");
        assert_eq!(simplified("x/x"), "(+1)");
        assert_eq!(simplified("x - x"), "(+0)");
    }

    #[test]
    fn powers() {
        assert_eq!(simplified("x^y x^y"), "(+(+x)^(+2y))");
        assert_eq!(simplified("x^y x^(-y)"), "(+1)");
    }

    #[test]
    fn steps() {
        let mut normalized = Normalized::new(Equation::parse("x+x").unwrap()).unwrap();
        let mut steps = Vec::new();
        assert!(normalized.simplify_with_steps(&mut steps).unwrap());
        assert_eq!(steps, vec![Step::CombineLikeTerms]);

        steps.clear();
        assert!(!normalized.simplify_with_steps(&mut steps).unwrap());
        assert!(steps.is_empty());
    }

    #[test]
    fn into_inner() {
        let normalized = Normalized::new(Equation::parse("b a").unwrap()).unwrap();
        assert_eq!(normalized.into_inner().to_string(), "(+ab)");
    }
}
