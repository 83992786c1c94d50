//! The expression tree of an interactive equation editor, along with the readers and writers
//! that move it in and out of text and XML.
//!
//! - [`tree`] holds the [`Equation`](tree::Equation) arena, its cursors and its editing
//!   commands.
//! - [`tokenizer`] and [`parser`] read the infix text form that the tree prints.
//! - The XML form is written by [`Equation::to_xml`](tree::Equation::to_xml) and read back by
//!   [`Equation::from_xml`](tree::Equation::from_xml).
//!
//! ```
//! use eqn_parser::tree::Equation;
//!
//! let eqn = Equation::parse("x^2 + 2x + 1").unwrap();
//! let copy = Equation::from_xml(&eqn.to_xml().unwrap()).unwrap();
//! assert_eq!(copy.to_string(), "(+(+x)^(+2)+2x+1)");
//! ```

pub mod parser;
pub mod tokenizer;
pub mod tree;
