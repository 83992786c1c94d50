//! Canonical text form of an equation.
//!
//! Every expression is printed in parentheses, with an explicit sign before each of its terms.
//! The printed text parses back to an equation that prints the same way.

use std::fmt::{Display, Formatter, Result};
use super::{node::{NodeId, NodeKind}, Equation};

/// Function names recognized by the tokenizer. A `(` after any of these would be read as a
/// function call.
const FUNCTION_NAMES: [&str; 5] = ["sin", "cos", "tan", "log", "exp"];

/// Formats a number the way it appears in the canonical text.
///
/// Integers print without a decimal point, with every digit written out. Anything else prints
/// with up to six decimal places, keeping the point so that the number is read back as a
/// non-integer.
pub fn fmt_number(value: f64, integer: bool) -> String {
    let magnitude = if integer {
        format!("{:.0}", value.abs())
    } else {
        let text = format!("{:.6}", value.abs());
        text.trim_end_matches('0').to_string()
    };

    if value < 0.0 {
        format!("(-{})", magnitude)
    } else {
        magnitude
    }
}

/// The suffix for a multiplicity other than 1.
fn nth_suffix(nth: i32) -> String {
    if nth < 0 {
        format!("^(-{})", nth.unsigned_abs())
    } else {
        format!("^{}", nth)
    }
}

/// Returns true if the two factor texts need a `*` between them so they are not read back as a
/// single token.
fn needs_separator(before: &str, after: &str) -> bool {
    let Some(last) = before.chars().last() else {
        return false;
    };
    let Some(first) = after.chars().next() else {
        return false;
    };

    if last.is_ascii_digit() || last == '.' {
        return first.is_ascii_digit() || matches!(first, '.' | 'e' | 'E');
    }

    first == '(' && FUNCTION_NAMES.iter().any(|name| before.ends_with(name))
}

impl Equation {
    /// Returns the canonical text of the subtree rooted at the node.
    ///
    /// The sign of a term is printed by its expression, so the text of a lone positive term and
    /// a lone negative term are the same.
    pub fn text(&self, id: NodeId) -> String {
        let Some(node) = self.get(id) else {
            return String::new();
        };

        match &node.kind {
            NodeKind::Term(factors) => {
                let body = self.factors_text(factors);
                if node.nth == 1 {
                    body
                } else {
                    let sign = if node.sign { '+' } else { '-' };
                    format!("({}{}){}", sign, body, nth_suffix(node.nth))
                }
            },
            _ => {
                let body = self.body_text(id);
                let compound = matches!(node.kind, NodeKind::Divide(_) | NodeKind::Power(_));
                let mut out = if !node.sign {
                    format!("(-{})", body)
                } else if compound && node.nth != 1 {
                    format!("(+{})", body)
                } else {
                    body
                };
                if node.nth != 1 {
                    out.push_str(&nth_suffix(node.nth));
                }
                out
            },
        }
    }

    /// The text of a node, ignoring its sign and multiplicity.
    fn body_text(&self, id: NodeId) -> String {
        match &self[id].kind {
            NodeKind::Number { value, integer } => fmt_number(*value, *integer),
            NodeKind::Variable(name) | NodeKind::Constant(name) => name.to_string(),
            NodeKind::Function { name, arg } => format!("{}{}", name, self.text(*arg)),
            NodeKind::Divide(binary) => {
                format!("{}/{}", self.text(binary.first), self.text(binary.second))
            },
            NodeKind::Power(binary) => {
                format!("{}^{}", self.text(binary.first), self.text(binary.second))
            },
            NodeKind::Differential { variable, function } => {
                format!("D/D{}{}", variable, self.text(*function))
            },
            NodeKind::Input { text, current, .. } => match (text.is_empty(), current) {
                (true, true) => "#".to_string(),
                (true, false) => "?".to_string(),
                (false, _) => format!("[{}]", text),
            },
            NodeKind::Expression(terms) => {
                let mut out = String::from("(");
                for term in terms {
                    let term_node = &self[*term];
                    out.push(if term_node.nth == 1 && !term_node.sign { '-' } else { '+' });
                    out.push_str(&self.text(*term));
                }
                out.push(')');
                out
            },
            NodeKind::Term(factors) => self.factors_text(factors),
        }
    }

    /// The text of a list of factors, with separators where adjacent texts would run together.
    fn factors_text(&self, factors: &[NodeId]) -> String {
        let mut out = String::new();
        for factor in factors {
            let text = self.text(*factor);
            if needs_separator(&out, &text) {
                out.push('*');
            }
            out.push_str(&text);
        }
        out
    }
}

impl Display for Equation {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}", self.text(self.root))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(fmt_number(42.0, true), "42");
        assert_eq!(fmt_number(1.0, false), "1.");
        assert_eq!(fmt_number(0.0025, false), "0.0025");
        assert_eq!(fmt_number(-3.0, true), "(-3)");
        assert_eq!(fmt_number(1e20, true), "100000000000000000000");
        assert_eq!(fmt_number(1e30, true).parse::<f64>().unwrap(), 1e30);
    }

    #[test]
    fn separators() {
        assert!(needs_separator("2", "3"));
        assert!(needs_separator("x^2", "e"));
        assert!(needs_separator("1.", "5"));
        assert!(!needs_separator("2", "x"));
        assert!(!needs_separator("x", "2"));
        assert!(needs_separator("2sin", "(+x)"));
        assert!(!needs_separator("ab", "(+x)"));
    }

    #[test]
    fn display_terms() {
        let mut eqn = Equation::blank();
        let two = eqn.number(2.0, true);
        let three = eqn.number(3.0, true);
        let x = eqn.variable('x');
        let first = eqn.term(vec![two, three]);
        let second = eqn.term(vec![x]);
        eqn[second].sign = false;
        let root = eqn.expression(vec![first, second]);
        eqn.set_root(root);
        assert_eq!(eqn.to_string(), "(+2*3-x)");
    }

    #[test]
    fn display_signs_and_powers() {
        let mut eqn = Equation::blank();
        let x = eqn.variable('x');
        eqn[x].sign = false;
        eqn[x].nth = 2;
        let y = eqn.variable('y');
        eqn[y].nth = -1;
        let term = eqn.term(vec![x, y]);
        let root = eqn.expression(vec![term]);
        eqn.set_root(root);
        assert_eq!(eqn.to_string(), "(+(-x)^2y^(-1))");
    }

    #[test]
    fn display_compound_power() {
        let mut eqn = Equation::blank();
        let a = eqn.variable('a');
        let b = eqn.variable('b');
        let divide = eqn.divide(a, b);
        eqn[divide].nth = 3;
        let term = eqn.term(vec![divide]);
        let root = eqn.expression(vec![term]);
        eqn.set_root(root);
        assert_eq!(eqn.to_string(), "(+(+(+a)/(+b))^3)");
    }

    #[test]
    fn display_inputs() {
        let mut eqn = Equation::blank();
        let current = eqn.input(String::new(), true);
        let empty = eqn.input(String::new(), false);
        let typed = eqn.input("12".to_string(), false);
        let term = eqn.term(vec![current, empty, typed]);
        let root = eqn.expression(vec![term]);
        eqn.set_root(root);
        assert_eq!(eqn.to_string(), "(+#?[12])");
    }
}
