//! Canonical shape and ordering of an equation.
//!
//! Normalization works depth-first, children before their parents, and leaves the equation in a
//! shape where:
//!
//! - no term has a [`NodeKind::Divide`] factor: `a/b` becomes `a b^(-1)`;
//! - no term has an expression factor with a single term: its factors are spliced in;
//! - no power has an integer exponent: `x^2` becomes `x` with multiplicity 2;
//! - every factor is positive, with the signs gathered into the sign of its term;
//! - factors are sorted by kind, and terms are sorted so like terms sit next to each other, with
//!   terms made only of numbers last.
//!
//! Normalizing a normalized equation changes nothing.

use eqn_error::Error;
use eqn_parser::tree::{node::{Binary, NodeId, NodeKind}, Equation};
use log::{debug, trace};
use std::{cmp::Ordering, collections::VecDeque};
use crate::consts::ZERO_TOLERANCE;

/// Normalizes the whole equation.
pub fn normalize(eqn: &mut Equation) -> Result<(), Error> {
    let root = eqn.root();
    normalize_node(eqn, root)?;
    debug!("normalized to {}", eqn);
    Ok(())
}

/// Normalizes the subtree rooted at the node.
pub fn normalize_node(eqn: &mut Equation, id: NodeId) -> Result<(), Error> {
    let node = eqn.node(id)?;
    if node.is_expression() {
        normalize_expression(eqn, id)
    } else if node.is_term() {
        normalize_term(eqn, id)
    } else {
        for child in eqn.children(id) {
            normalize_node(eqn, child)?;
        }
        Ok(())
    }
}

/// The text of the factors of a term that follow its leading numbers, which is what like terms
/// have in common.
pub fn variable_part(eqn: &Equation, term: NodeId) -> String {
    eqn.factors(term)
        .iter()
        .skip_while(|factor| eqn[**factor].is_number())
        .map(|factor| eqn.text(*factor))
        .collect::<Vec<_>>()
        .join("*")
}

/// The key terms are sorted by.
fn term_key(eqn: &Equation, term: NodeId) -> (bool, String, String, bool) {
    let numeric = eqn.factors(term).iter().all(|factor| eqn[*factor].is_number());
    (numeric, variable_part(eqn, term), eqn.text(term), !eqn[term].sign)
}

fn normalize_expression(eqn: &mut Equation, id: NodeId) -> Result<(), Error> {
    for term in eqn.terms(id).to_vec() {
        normalize_term(eqn, term)?;
    }

    let mut keyed = eqn.terms(id)
        .iter()
        .map(|term| (term_key(eqn, *term), *term))
        .collect::<Vec<_>>();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    eqn.replace_list(id, keyed.into_iter().map(|(_, term)| term).collect())?;
    Ok(())
}

/// The order factors of a term are sorted in.
fn compare_factors(eqn: &Equation, a: NodeId, b: NodeId) -> Ordering {
    let (a_node, b_node) = (&eqn[a], &eqn[b]);
    a_node.kind.rank()
        .cmp(&b_node.kind.rank())
        .then_with(|| match (&a_node.kind, &b_node.kind) {
            (NodeKind::Number { value: x, .. }, NodeKind::Number { value: y, .. }) => x.total_cmp(y),
            _ => Ordering::Equal,
        })
        .then_with(|| eqn.text(a).cmp(&eqn.text(b)))
}

/// Returns true if the factor is a literal zero that is not divided by.
fn is_zero_factor(eqn: &Equation, id: NodeId) -> bool {
    let node = &eqn[id];
    node.nth > 0 && matches!(node.kind, NodeKind::Number { value, .. } if value.abs() < ZERO_TOLERANCE)
}

fn normalize_term(eqn: &mut Equation, id: NodeId) -> Result<(), Error> {
    let mut sign = eqn.node(id)?.sign;

    // factors still to look at, and whether they still need to be normalized themselves
    let mut queue = eqn.replace_list(id, Vec::new())?
        .into_iter()
        .map(|factor| (factor, true))
        .collect::<VecDeque<_>>();
    let mut kept = Vec::new();

    while let Some((factor, fresh)) = queue.pop_front() {
        if fresh {
            normalize_node(eqn, factor)?;
        }

        if !eqn[factor].sign {
            eqn[factor].sign = true;
            if eqn[factor].nth % 2 != 0 {
                sign = !sign;
            }
        }

        let nth = eqn[factor].nth;
        match &eqn[factor].kind {
            NodeKind::Divide(binary) => {
                let Binary { first, second } = *binary;
                eqn[first].nth = eqn[first].nth.saturating_mul(nth);
                eqn[second].nth = eqn[second].nth.saturating_mul(nth).saturating_neg();
                eqn.free_node(factor);
                queue.push_front((second, false));
                queue.push_front((first, false));
            },
            NodeKind::Power(binary) => {
                let Binary { first, second } = *binary;
                match fold_power(eqn, factor, first, second)? {
                    Some(base) => queue.push_front((base, false)),
                    None => kept.push(factor),
                }
            },
            NodeKind::Expression(terms) if terms.len() == 1 => {
                let inner = terms[0];
                let total = nth.saturating_mul(eqn[inner].nth);
                if !eqn[inner].sign && total % 2 != 0 {
                    sign = !sign;
                }
                eqn.free_node(factor);
                for spliced in eqn.free_node(inner).into_iter().rev() {
                    eqn[spliced].nth = eqn[spliced].nth.saturating_mul(total);
                    queue.push_front((spliced, false));
                }
            },
            _ => kept.push(factor),
        }
    }

    let mut factors = Vec::with_capacity(kept.len());
    for factor in kept {
        if eqn[factor].nth == 0 {
            eqn.free(factor);
        } else {
            factors.push(factor);
        }
    }
    if factors.is_empty() {
        factors.push(eqn.number(1.0, true));
    }
    factors.sort_by(|a, b| compare_factors(eqn, *a, *b));

    if factors.iter().any(|factor| is_zero_factor(eqn, *factor)) {
        for factor in factors.drain(..) {
            eqn.free(factor);
        }
        factors.push(eqn.number(0.0, true));
        sign = true;
    }

    eqn.replace_list(id, factors)?;
    eqn[id].sign = sign;
    trace!("normalized term {}", eqn.text(id));
    Ok(())
}

/// Moves the multiplicity of a power into its exponent. If the exponent is then a single
/// integer, the power is freed and its base is returned, with the exponent folded into the
/// base's multiplicity.
fn fold_power(
    eqn: &mut Equation,
    power: NodeId,
    base: NodeId,
    exponent: NodeId,
) -> Result<Option<NodeId>, Error> {
    let mut exponent = exponent;
    if eqn[exponent].nth != 1 || !eqn[exponent].sign {
        exponent = wrap_exponent(eqn, power, exponent, None)?;
    }

    let nth = eqn[power].nth;
    if nth != 1 {
        exponent = wrap_exponent(eqn, power, exponent, Some(nth))?;
        eqn[power].nth = 1;
    }

    let Some(value) = integer_value(eqn, exponent) else {
        return Ok(None);
    };
    eqn.free_node(power);
    eqn.free(exponent);
    eqn[base].nth = eqn[base].nth.saturating_mul(value);
    Ok(Some(base))
}

/// Replaces the exponent of a power with the single-term expression `(+n*exponent)`, or
/// `(+exponent)` if there is no `n`, and normalizes it.
fn wrap_exponent(
    eqn: &mut Equation,
    power: NodeId,
    exponent: NodeId,
    coefficient: Option<i32>,
) -> Result<NodeId, Error> {
    let mut factors = Vec::with_capacity(2);
    if let Some(n) = coefficient {
        let number = eqn.number(f64::from(n.unsigned_abs()), true);
        eqn[number].sign = n > 0;
        factors.push(number);
    }
    factors.push(exponent);

    let term = eqn.term(factors);
    let wrapped = eqn.expression(vec![term]);
    if let NodeKind::Power(binary) = &mut eqn[power].kind {
        binary.second = wrapped;
    }
    eqn[wrapped].parent = Some(power);
    normalize_node(eqn, wrapped)?;
    Ok(wrapped)
}

/// If the expression is a single whole number, returns it.
fn integer_value(eqn: &Equation, expr: NodeId) -> Option<i32> {
    let node = eqn.get(expr)?;
    let [term_id] = eqn.terms(expr) else {
        return None;
    };
    let [factor_id] = eqn.factors(*term_id) else {
        return None;
    };
    let (term, factor) = (&eqn[*term_id], &eqn[*factor_id]);
    let NodeKind::Number { value, .. } = factor.kind else {
        return None;
    };
    if node.nth != 1 || !node.sign || term.nth != 1 || factor.nth != 1 {
        return None;
    }

    let value = if term.sign == factor.sign { value } else { -value };
    let rounded = value.round();
    if (value - rounded).abs() < ZERO_TOLERANCE && rounded.abs() <= f64::from(i32::MAX) {
        Some(rounded as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn normalized(text: &str) -> String {
        let mut eqn = Equation::parse(text).unwrap();
        normalize(&mut eqn).unwrap();
        eqn.to_string()
    }

    #[test]
    fn sorts_factors() {
        assert_eq!(normalized("ba"), "(+ab)");
        assert_eq!(normalized("x 2 P"), "(+2Px)");
    }

    #[test]
    fn sorts_terms() {
        assert_eq!(normalized("2+x"), "(+x+2)");
        assert_eq!(normalized("y+3+x"), "(+x+y+3)");
    }

    #[test]
    fn division_becomes_negative_power() {
        assert_eq!(normalized("x/y"), "(+xy^(-1))");
        assert_eq!(normalized("(a+b)/c"), "(+c^(-1)(+a+b))");
    }

    #[test]
    fn integer_powers_become_multiplicity() {
        assert_eq!(normalized("x^2"), "(+x^2)");
        assert_eq!(normalized("a^0"), "(+1)");
        assert_eq!(normalized("(x^2)^3"), "(+x^6)");
    }

    #[test]
    fn signs_move_to_the_term() {
        assert_eq!(normalized("(-x)(-y)"), "(+xy)");
        assert_eq!(normalized("a(-b)"), "(-ab)");
    }

    #[test]
    fn zero_factor() {
        assert_eq!(normalized("3*x*0"), "(+0)");
    }

    #[test]
    fn symbolic_exponents_stay() {
        assert_eq!(normalized("x^y"), "(+(+x)^(+y))");
    }

    #[test]
    fn idempotent() {
        for text in ["x/y + 2", "a(b+c)^2/(d e)", "-(x^y)^2 + sin(b a)", "D/Dx(x^2 3) - 1"] {
            let once = normalized(text);
            let mut eqn = Equation::parse(text).unwrap();
            normalize(&mut eqn).unwrap();
            normalize(&mut eqn).unwrap();
            assert_eq!(eqn.to_string(), once, "{}", text);
        }
    }
}
