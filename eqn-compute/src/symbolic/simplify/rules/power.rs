//! Simplification rules for powers.

use eqn_error::Error;
use eqn_parser::tree::{node::{Binary, NodeId, NodeKind}, Equation};
use crate::symbolic::{
    simplify::{body_text, contains_input, step::Step},
    step_collector::StepCollector,
};
use super::remove_child;

/// If the node is a positive power with multiplicity 1, whose exponent is also positive with
/// multiplicity 1, returns its base and exponent.
fn plain_power(eqn: &Equation, id: NodeId) -> Option<Binary> {
    let node = eqn.get(id)?;
    let NodeKind::Power(binary) = node.kind else {
        return None;
    };
    let exponent = eqn.get(binary.second)?;
    (node.nth == 1 && node.sign && exponent.nth == 1 && exponent.sign).then_some(binary)
}

/// If the base of a power is a single plain factor, such as the `(+x)` in `(+x)^(+y)`, returns
/// that factor.
fn single_factor(eqn: &Equation, base: NodeId) -> Option<NodeId> {
    let expr = eqn.get(base)?;
    let [term] = eqn.terms(base) else {
        return None;
    };
    let [factor] = eqn.factors(*term) else {
        return None;
    };
    let (term_node, factor_node) = (&eqn[*term], &eqn[*factor]);
    let plain = expr.nth == 1 && expr.sign && term_node.nth == 1 && term_node.sign && factor_node.nth == 1;
    plain.then_some(*factor)
}

/// Appends terms to the exponent of a power.
fn extend_exponent(eqn: &mut Equation, exponent: NodeId, terms: Vec<NodeId>) -> Result<(), Error> {
    let mut list = eqn.terms(exponent).to_vec();
    list.extend(terms);
    eqn.replace_list(exponent, list)?;
    Ok(())
}

/// Combines one pair of factors of a term that are powers of the same base. Returns true if a
/// pair was combined; the caller repeats this until it returns false.
///
/// `x^a x^b = x^(a+b)`
/// `x x^a = x^(a+1)`
pub fn combine_powers(
    eqn: &mut Equation,
    term: NodeId,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<bool, Error> {
    let factors = eqn.factors(term).to_vec();

    for &power in &factors {
        let Some(Binary { first: base, second: exponent }) = plain_power(eqn, power) else {
            continue;
        };
        if contains_input(eqn, power) {
            continue;
        }
        let base_text = eqn.text(base);

        for &other in factors.iter().filter(|other| **other != power) {
            if contains_input(eqn, other) {
                continue;
            }

            if let Some(other_power) = plain_power(eqn, other) {
                if eqn.text(other_power.first) != base_text {
                    continue;
                }
                let moved = eqn.replace_list(other_power.second, Vec::new())?;
                extend_exponent(eqn, exponent, moved)?;
                remove_child(eqn, term, other)?;
            } else if matches!(eqn[other].kind, NodeKind::Power(_)) {
                continue;
            } else {
                let Some(inner) = single_factor(eqn, base) else {
                    continue;
                };
                if eqn[inner].sign != eqn[other].sign || eqn.text(inner) != body_text(eqn, other) {
                    continue;
                }
                let nth = eqn[other].nth;
                let number = eqn.number(f64::from(nth.unsigned_abs()), true);
                let added = eqn.term(vec![number]);
                eqn[added].sign = nth > 0;
                extend_exponent(eqn, exponent, vec![added])?;
                remove_child(eqn, term, other)?;
            }

            step_collector.push(Step::CombinePowers);
            return Ok(true);
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::normalize::normalize;

    fn combined(text: &str) -> (bool, String) {
        let mut eqn = Equation::parse(text).unwrap();
        normalize(&mut eqn).unwrap();
        let term = eqn.terms(eqn.root())[0];
        let mut steps = Vec::new();
        let mut applied = false;
        while combine_powers(&mut eqn, term, &mut steps).unwrap() {
            applied = true;
        }
        assert_eq!(steps.is_empty(), !applied);
        normalize(&mut eqn).unwrap();
        (applied, eqn.to_string())
    }

    #[test]
    fn same_base() {
        assert_eq!(combined("x^y x^z"), (true, "(+(+x)^(+y+z))".to_string()));
    }

    #[test]
    fn plain_factor() {
        assert_eq!(combined("x x^y"), (true, "(+(+x)^(+y+1))".to_string()));
        assert_eq!(combined("x^(-1) x^y"), (true, "(+(+x)^(+y-1))".to_string()));
    }

    #[test]
    fn different_bases() {
        assert_eq!(combined("x^y z^y"), (false, "(+(+x)^(+y)(+z)^(+y))".to_string()));
        assert_eq!(combined("y x^y"), (false, "(+y(+x)^(+y))".to_string()));
    }
}
