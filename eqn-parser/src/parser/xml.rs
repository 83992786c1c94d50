//! Reads an [`Equation`] back from the XML that [`Equation::to_xml`] writes.
//!
//! The reader walks the document with the same recursive shape as the text parser, but it is
//! keyed on element tags instead of tokens. Attributes of an element are taken before its
//! children are read, and any attribute left over is an error, so a document that would not be
//! written back identically is rejected.

use eqn_error::Error;
use eqn_xml::{Parser as XmlParser, State};
use log::trace;
use std::{ops::Range, str::FromStr};
use crate::tree::{node::{NodeId, Select}, Equation};
use super::error::{
    BadAttribute,
    ChildCount,
    EmptyContainer,
    MisplacedTag,
    UnknownAttribute,
    UnknownTag,
};

/// The node an element describes, with the attributes specific to its kind.
enum Shape {
    Number { value: f64, integer: bool },
    Variable(char),
    Constant(char),
    Function(String),
    Divide,
    Power,
    Differential(char),
    Term,
    Expression,
    Input { text: String, current: bool },
}

/// Returns true if a number value was written for an integer, i.e. it has no decimal point or
/// exponent.
fn is_integer(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

struct Reader<'source> {
    xml: XmlParser<'source>,
    eqn: Equation,
}

impl Reader<'_> {
    fn bad_attribute(&self, attribute: &str, value: String) -> Error {
        Error::new(vec![self.xml.span()], BadAttribute { attribute: attribute.to_string(), value })
    }

    /// Takes an optional attribute and parses its value.
    fn attribute<T: FromStr>(&mut self, name: &str) -> Result<Option<T>, Error> {
        let Some(value) = self.xml.attribute(name) else {
            return Ok(None);
        };
        match value.parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(self.bad_attribute(name, value)),
        }
    }

    /// Takes an attribute that must be present.
    fn required<T: FromStr>(&mut self, name: &str) -> Result<T, Error> {
        self.attribute(name)?
            .ok_or_else(|| self.bad_attribute(name, String::new()))
    }

    /// Takes the attributes specific to the element's tag.
    fn shape(&mut self, tag: &str, span: Range<usize>) -> Result<Shape, Error> {
        let shape = match tag {
            "number" => {
                let value = self.required::<String>("value")?;
                let integer = is_integer(&value);
                match value.parse() {
                    Ok(parsed) => Shape::Number { value: parsed, integer },
                    Err(_) => return Err(self.bad_attribute("value", value)),
                }
            },
            "variable" => Shape::Variable(self.required("name")?),
            "constant" => Shape::Constant(self.required("name")?),
            "function" => Shape::Function(self.required("name")?),
            "divide" => Shape::Divide,
            "power" => Shape::Power,
            "differential" => Shape::Differential(self.required("variable")?),
            "term" => Shape::Term,
            "expression" => Shape::Expression,
            "input" => Shape::Input {
                text: self.attribute("text")?.unwrap_or_default(),
                current: self.attribute("current")?.unwrap_or(false),
            },
            _ => return Err(Error::new(vec![span], UnknownTag { tag: tag.to_string() })),
        };
        Ok(shape)
    }

    /// Reads the children of the element whose attributes were just read, up to and including
    /// its end tag.
    fn children(&mut self) -> Result<Vec<NodeId>, Error> {
        if self.xml.check(State::AtomEnd) {
            self.xml.next(State::AtomEnd)?;
            return Ok(Vec::new());
        }

        self.xml.next(State::HeaderEnd)?;
        let mut children = Vec::new();
        while !self.xml.check(State::Footer) {
            children.push(self.read_node()?);
        }
        self.xml.next(State::Footer)?;
        Ok(children)
    }

    /// Checks that the element has exactly `N` children.
    fn exactly<const N: usize>(&self, tag: &str, children: Vec<NodeId>) -> Result<[NodeId; N], Error> {
        <[NodeId; N]>::try_from(children).map_err(|children| {
            Error::new(vec![self.xml.span()], ChildCount {
                tag: tag.to_string(),
                expected: N,
                found: children.len(),
            })
        })
    }

    fn misplaced(&self, child: NodeId, parent: &str) -> Error {
        Error::new(vec![self.xml.span()], MisplacedTag {
            tag: self.eqn[child].kind.tag().to_string(),
            parent: parent.to_string(),
        })
    }

    /// Reads one element and everything inside it, and returns the node it describes.
    fn read_node(&mut self) -> Result<NodeId, Error> {
        let span = self.xml.span();
        self.xml.next(State::Header)?;
        let tag = self.xml.tag().to_string();
        if self.xml.check(State::NameValue) {
            self.xml.next(State::NameValue)?;
        }

        let nth = self.attribute("nth")?.unwrap_or(1);
        let negative = self.attribute("negative")?.unwrap_or(false);
        let select = match self.xml.attribute("select") {
            Some(name) => match Select::from_name(&name) {
                Some(select) => select,
                None => return Err(self.bad_attribute("select", name)),
            },
            None => Select::None,
        };
        let shape = self.shape(&tag, span.clone())?;
        if let Some(attribute) = self.xml.remaining_attributes().next() {
            return Err(Error::new(vec![span], UnknownAttribute {
                tag,
                attribute: attribute.to_string(),
            }));
        }

        let children = self.children()?;
        let id = match shape {
            Shape::Number { value, integer } => {
                self.exactly::<0>(&tag, children)?;
                self.eqn.number(value, integer)
            },
            Shape::Variable(name) => {
                self.exactly::<0>(&tag, children)?;
                self.eqn.variable(name)
            },
            Shape::Constant(name) => {
                self.exactly::<0>(&tag, children)?;
                self.eqn.constant(name)
            },
            Shape::Input { text, current } => {
                self.exactly::<0>(&tag, children)?;
                self.eqn.input(text, current)
            },
            Shape::Function(name) => {
                let [arg] = self.exactly(&tag, children)?;
                self.eqn.function(name, arg)
            },
            Shape::Divide => {
                let [first, second] = self.exactly(&tag, children)?;
                self.eqn.divide(first, second)
            },
            Shape::Power => {
                let [first, second] = self.exactly(&tag, children)?;
                self.eqn.power(first, second)
            },
            Shape::Differential(variable) => {
                let [function] = self.exactly(&tag, children)?;
                self.eqn.differential(variable, function)
            },
            Shape::Term => {
                if children.is_empty() {
                    return Err(Error::new(vec![span], EmptyContainer { tag }));
                }
                if let Some(&term) = children.iter().find(|id| self.eqn[**id].is_term()) {
                    return Err(self.misplaced(term, &tag));
                }
                self.eqn.term(children)
            },
            Shape::Expression => {
                if children.is_empty() {
                    return Err(Error::new(vec![span], EmptyContainer { tag }));
                }
                let mut terms = Vec::with_capacity(children.len());
                for child in children {
                    let node = &self.eqn[child];
                    if node.is_term() {
                        terms.push(child);
                    } else if node.is_input() {
                        terms.push(self.eqn.term(vec![child]));
                    } else {
                        return Err(self.misplaced(child, &tag));
                    }
                }
                self.eqn.expression(terms)
            },
        };

        let node = &mut self.eqn[id];
        node.nth = nth;
        node.sign = !negative;
        self.eqn.mark_select(id, select);
        trace!("read xml node {} as {}", tag, id);
        Ok(id)
    }
}

impl Equation {
    /// Reads an equation from an XML document written by [`Equation::to_xml`].
    ///
    /// A malformed document is a [`Category::Format`](eqn_error::Category::Format) error. A
    /// well-formed document that does not describe a valid tree, such as one with an unknown tag
    /// or attribute, is a [`Category::Logic`](eqn_error::Category::Logic) error.
    ///
    /// ```
    /// use eqn_parser::tree::Equation;
    ///
    /// let eqn = Equation::parse("a/(b-2)").unwrap();
    /// let copy = Equation::from_xml(&eqn.to_xml().unwrap()).unwrap();
    /// assert_eq!(copy.to_string(), "(+(+a)/(+b-2))");
    /// ```
    pub fn from_xml(source: &str) -> Result<Equation, Error> {
        let mut xml = XmlParser::new(source)?;
        xml.next_tag(State::Header, "equation")?.next(State::HeaderEnd)?;

        let mut reader = Reader { xml, eqn: Equation::blank() };
        let root = reader.read_node()?;
        if !reader.eqn[root].is_expression() {
            return Err(reader.misplaced(root, "equation"));
        }
        reader.xml.next_tag(State::Footer, "equation")?;
        reader.xml.finish()?;

        reader.eqn.set_root(root);
        Ok(reader.eqn)
    }
}
