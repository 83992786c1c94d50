//! Evaluation, layout and algebra for the equations of [`eqn_parser`].
//!
//! - [`numerical`] evaluates an equation to a complex number, given the values of its
//!   variables.
//! - [`layout`] computes where each node of an equation is drawn, and finds the node drawn at a
//!   point.
//! - [`symbolic`] normalizes and simplifies equations.
//!
//! ```
//! use eqn_compute::{numerical::{Environment, Eval}, symbolic::Normalized};
//! use eqn_parser::tree::Equation;
//!
//! let eqn = Equation::parse("a/b + a/b").unwrap();
//! let mut env = Environment::new();
//! env.set('a', 6.0);
//! env.set('b', 2.0);
//! assert_eq!(eqn.eval(&env).unwrap().re, 6.0);
//!
//! let mut normalized = Normalized::new(eqn).unwrap();
//! normalized.simplify_fully().unwrap();
//! assert_eq!(normalized.to_string(), "(+2ab^(-1))");
//! assert_eq!(normalized.eval(&env).unwrap().re, 6.0);
//! ```

pub mod consts;
pub mod funcs;
pub mod layout;
pub mod numerical;
pub mod symbolic;
