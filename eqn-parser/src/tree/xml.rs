use eqn_error::Error;
use eqn_xml::{State, Stream};
use std::fmt::Write;
use super::{node::{NodeId, NodeKind, Select}, Equation};

/// The `value` attribute of a number. Integers are written without a decimal point, which is how
/// the reader tells them apart.
pub fn number_value(value: f64, integer: bool) -> String {
    if integer {
        // `-0` would read back as a negative zero
        format!("{:.0}", if value == 0.0 { 0.0 } else { value })
    } else {
        format!("{:?}", value)
    }
}

fn name_value<W: Write>(xml: &mut Stream<W>, name: &str, value: &str) -> Result<(), Error> {
    xml.out(State::NameValue)?.out(name)?.out(value)?;
    Ok(())
}

impl Equation {
    /// Writes the equation as an `<equation>` element.
    pub fn write_xml<W: Write>(&self, xml: &mut Stream<W>) -> Result<(), Error> {
        xml.out(State::Header)?.out("equation")?.out(State::HeaderEnd)?;
        self.write_node(xml, self.root)?;
        xml.out(State::Footer)?;
        Ok(())
    }

    /// Returns the equation as a complete XML document.
    ///
    /// ```
    /// use eqn_parser::tree::Equation;
    ///
    /// let eqn = Equation::parse("-x").unwrap();
    /// assert_eq!(eqn.to_xml().unwrap(), "<document>
    ///   <equation>
    ///     <expression>
    ///       <term negative=\"true\">
    ///         <variable name=\"x\"/>
    ///       </term>
    ///     </expression>
    ///   </equation>
    /// </document>");
    /// ```
    pub fn to_xml(&self) -> Result<String, Error> {
        let mut out = String::new();
        let mut xml = Stream::new(&mut out)?;
        self.write_xml(&mut xml)?;
        xml.finish()?;
        Ok(out)
    }

    fn write_node<W: Write>(&self, xml: &mut Stream<W>, id: NodeId) -> Result<(), Error> {
        let node = self.node(id)?;
        xml.out(State::Header)?.out(node.kind.tag())?;

        if node.nth != 1 {
            name_value(xml, "nth", &node.nth.to_string())?;
        }
        if !node.sign {
            name_value(xml, "negative", "true")?;
        }
        if node.select != Select::None {
            name_value(xml, "select", node.select.name())?;
        }

        match &node.kind {
            NodeKind::Number { value, integer } => {
                name_value(xml, "value", &number_value(*value, *integer))?;
            },
            NodeKind::Variable(name) | NodeKind::Constant(name) => {
                name_value(xml, "name", &name.to_string())?;
            },
            NodeKind::Function { name, .. } => name_value(xml, "name", name)?,
            NodeKind::Differential { variable, .. } => {
                name_value(xml, "variable", &variable.to_string())?;
            },
            NodeKind::Input { text, current, .. } => {
                if !text.is_empty() {
                    name_value(xml, "text", text)?;
                }
                if *current {
                    name_value(xml, "current", "true")?;
                }
            },
            _ => {},
        }

        if node.kind.is_leaf() {
            xml.out(State::AtomEnd)?;
        } else {
            xml.out(State::HeaderEnd)?;
            for child in node.kind.children() {
                self.write_node(xml, child)?;
            }
            xml.out(State::Footer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn number_values() {
        assert_eq!(number_value(12.0, true), "12");
        assert_eq!(number_value(-4.0, true), "-4");
        assert_eq!(number_value(2.5, false), "2.5");
        assert_eq!(number_value(1.0, false), "1.0");
        assert_eq!(number_value(1e20, true), "100000000000000000000");
        assert_eq!(number_value(-0.0, true), "0");
    }

    #[test]
    fn large_integers_read_back() {
        let eqn = Equation::parse("100000000000000000000").unwrap();
        assert_eq!(eqn.to_string(), "(+100000000000000000000)");
        let copy = Equation::from_xml(&eqn.to_xml().unwrap()).unwrap();
        assert_eq!(copy.to_string(), eqn.to_string());
    }

    #[test]
    fn input_text_with_markup_reads_back() {
        let mut eqn = Equation::parse("[a/b]x#").unwrap();
        for c in "\"<&/>'".chars() {
            eqn.input_push(c).unwrap();
        }
        let xml = eqn.to_xml().unwrap();
        assert!(xml.contains("<input text=\"a/b\"/>"));

        let copy = Equation::from_xml(&xml).unwrap();
        assert_eq!(copy.to_xml().unwrap(), xml);
        assert_eq!(copy.to_string(), eqn.to_string());
        let current = copy.current_input().unwrap();
        assert_eq!(copy.input_text(current), "\"<&/>'");
    }

    #[test]
    fn attributes() {
        let mut eqn = Equation::parse("sin(x)^2[ab]#").unwrap();
        let term = eqn.terms(eqn.root())[0];
        let power = eqn.factors(term)[0];
        eqn.set_select(power, power).unwrap();
        eqn[power].nth = -2;

        let xml = eqn.to_xml().unwrap();
        assert!(xml.contains("<power nth=\"-2\" select=\"ALL\">"));
        assert!(xml.contains("<function name=\"sin\">"));
        assert!(xml.contains("<number value=\"2\"/>"));
        assert!(xml.contains("<input text=\"ab\"/>"));
        assert!(xml.contains("<input current=\"true\"/>"));
    }

    #[test]
    fn differential() {
        let eqn = Equation::parse("D/Dx(x^2)").unwrap();
        let xml = eqn.to_xml().unwrap();
        assert!(xml.contains("<differential variable=\"x\">"));
    }
}
