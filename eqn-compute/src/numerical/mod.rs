//! Numerical evaluation of equations.
//!
//! Every node evaluates to a [`Complex64`](num_complex::Complex64). Variables take their values
//! from an explicit [`Environment`], so separate evaluations never share state.
//!
//! ```
//! use eqn_compute::numerical::{Environment, Eval};
//! use eqn_parser::tree::Equation;
//!
//! let mut env = Environment::new();
//! env.set('x', 4.0);
//!
//! let eqn = Equation::parse("x^2 - 3x").unwrap();
//! assert_eq!(eqn.eval(&env).unwrap().re, 4.0);
//! ```

pub mod env;
pub mod error;
pub mod eval;

pub use env::Environment;
pub use eval::{evaluate, Eval};
