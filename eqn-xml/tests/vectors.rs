use eqn_xml::{Parser, State, Stream};
use pretty_assertions::assert_eq;

const NESTED: &str = "<document>\n  <equation>\n    <variable/>\n  </equation>\n</document>";

const ATTRIBUTES: &str =
"<document>
  <equation>
    <variable name=\"a\" negative=\"true\"/>
  </equation>
</document>";

const ELEMENT: &str =
"<document>
  <plans>
    <test plan=\"foo&lt;bar&gt;\">frick &amp;
 frack</test>
  </plans>
</document>";

const MISMATCHED_FOOTER: &str =
"<document>
  <equation>
    <variable/>
</document>";

const BROKEN_ATTRIBUTE: &str =
"<document>
  <equation>
    <variable name=\"a negative=\"true\"/>
  </equation>
</document>";

#[test]
fn write_nested() {
    let mut out = String::new();
    {
        let mut xml = Stream::new(&mut out).unwrap();
        xml.out(State::Header).unwrap().out("equation").unwrap().out(State::HeaderEnd).unwrap();
        xml.out(State::Header).unwrap().out("variable").unwrap().out(State::AtomEnd).unwrap();
        xml.out(State::Footer).unwrap();
    }
    assert_eq!(out, NESTED);
}

#[test]
fn read_nested() {
    let mut parser = Parser::new(NESTED).unwrap();
    parser.next_tag(State::Header, "equation").unwrap().next(State::HeaderEnd).unwrap();
    parser.next_tag(State::Header, "variable").unwrap().next(State::AtomEnd).unwrap();
    parser.finish().unwrap();
}

#[test]
fn write_attributes() {
    let mut out = String::new();
    {
        let mut xml = Stream::new(&mut out).unwrap();
        xml.out(State::Header).unwrap().out("equation").unwrap().out(State::HeaderEnd).unwrap();
        xml.out(State::Header).unwrap().out("variable").unwrap()
            .out(State::NameValue).unwrap().out("name").unwrap().out("a").unwrap()
            .out(State::NameValue).unwrap().out("negative").unwrap().out("true").unwrap()
            .out(State::AtomEnd).unwrap();
        xml.out(State::Footer).unwrap();
    }
    assert_eq!(out, ATTRIBUTES);
}

#[test]
fn read_attributes() {
    let mut parser = Parser::new(ATTRIBUTES).unwrap();
    parser.next_tag(State::Header, "equation").unwrap().next(State::HeaderEnd).unwrap();
    parser.next_tag(State::Header, "variable").unwrap();
    if parser.check(State::NameValue) {
        parser.next(State::NameValue).unwrap();
    }
    parser.next(State::AtomEnd).unwrap();
    assert_eq!(parser.attribute("name").as_deref(), Some("a"));
    assert_eq!(parser.attribute("negative").as_deref(), Some("true"));
    parser.finish().unwrap();
}

#[test]
fn write_element() {
    let mut out = String::new();
    {
        let mut xml = Stream::new(&mut out).unwrap();
        xml.out(State::Header).unwrap().out("plans").unwrap().out(State::HeaderEnd).unwrap();
        xml.out(State::Header).unwrap().out("test").unwrap()
            .out(State::NameValue).unwrap().out("plan").unwrap().out("foo<bar>").unwrap()
            .out(State::HeaderEnd).unwrap();
        xml.out(State::Element).unwrap().out("frick &\n frack").unwrap();
    }
    assert_eq!(out, ELEMENT);
}

#[test]
fn read_element() {
    let mut parser = Parser::new(ELEMENT).unwrap();
    parser.next_tag(State::Header, "plans").unwrap().next(State::HeaderEnd).unwrap();
    parser.next_tag(State::Header, "test").unwrap()
        .next(State::NameValue).unwrap()
        .next(State::HeaderEnd).unwrap();
    assert_eq!(parser.attribute("plan").as_deref(), Some("foo<bar>"));
    parser.next(State::Element).unwrap();
    assert_eq!(parser.element(), Some("frick &\n frack"));
    parser.finish().unwrap();
}

#[test]
fn too_many_footers() {
    let mut out = String::new();
    let mut xml = Stream::new(&mut out).unwrap();
    xml.out(State::Header).unwrap().out("equation").unwrap().out(State::HeaderEnd).unwrap();
    xml.out(State::Header).unwrap().out("variable").unwrap().out(State::AtomEnd).unwrap();
    xml.out(State::Footer).unwrap().out(State::Footer).unwrap();
    let err = xml.out(State::Footer).unwrap_err();
    assert!(err.is_logic());
    assert_eq!(err.to_string(), "Too many footers");
}

#[test]
fn mismatched_footer() {
    let mut parser = Parser::new(MISMATCHED_FOOTER).unwrap();
    parser.next_tag(State::Header, "equation").unwrap().next(State::HeaderEnd).unwrap();
    parser.next_tag(State::Header, "variable").unwrap().next(State::AtomEnd).unwrap();
    let err = parser.finish().unwrap_err();
    assert!(err.is_format());
    assert_eq!(
        err.to_string(),
        "Bad xml syntax: FOOTER, document\n<document><equation><variable/></document<<<<<",
    );
}

#[test]
fn broken_attribute() {
    let mut parser = Parser::new(BROKEN_ATTRIBUTE).unwrap();
    parser.next_tag(State::Header, "equation").unwrap().next(State::HeaderEnd).unwrap();
    parser.next_tag(State::Header, "variable").unwrap();
    assert!(!parser.check(State::NameValue));
    let err = parser.next(State::AtomEnd).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Bad name, value pair:\n<document><equation><variablename=\"a negative=\"true\"<<<<<",
    );
}
