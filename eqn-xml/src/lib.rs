//! A small, strict XML dialect used to persist equations.
//!
//! The dialect is a subset of XML: elements with attributes, nested elements, and plain text
//! content. Both the [`Stream`] writer and the [`Parser`] reader drive the same [`Fsm`], so the
//! writer can never produce a document the reader rejects, and both fail the same way when
//! driven out of order.
//!
//! A document is always wrapped in a `<document>` element, which the writer opens on
//! construction and closes (along with anything else still open) when it is finished or
//! dropped:
//!
//! ```
//! use eqn_xml::{Parser, State, Stream};
//!
//! let mut out = String::new();
//! {
//!     let mut xml = Stream::new(&mut out).unwrap();
//!     xml.out(State::Header).unwrap()
//!         .out("variable").unwrap()
//!         .out(State::NameValue).unwrap()
//!         .out("name").unwrap()
//!         .out("a").unwrap()
//!         .out(State::AtomEnd).unwrap();
//! }
//! assert_eq!(out, "<document>\n  <variable name=\"a\"/>\n</document>");
//!
//! let mut parser = Parser::new(&out).unwrap();
//! parser.next_tag(State::Header, "variable").unwrap()
//!     .next(State::NameValue).unwrap()
//!     .next(State::AtomEnd).unwrap();
//! assert_eq!(parser.attribute("name").as_deref(), Some("a"));
//! parser.finish().unwrap();
//! ```

pub mod error;
pub mod escape;
pub mod parser;
pub mod state;
pub mod stream;

pub use escape::{escape, unescape};
pub use parser::Parser;
pub use state::{Fsm, State};
pub use stream::{Item, Stream, StreamOptions};
