//! Simplification rules for terms, including combining like factors.

use eqn_error::Error;
use eqn_parser::tree::{node::NodeId, Equation};
use crate::symbolic::{
    simplify::{body_text, contains_input, number_value, step::Step},
    step_collector::StepCollector,
};

/// Moves the multiplicity of a term onto each of its factors.
///
/// `(ab)^n = a^n b^n`
pub fn distribute_multiplicity(
    eqn: &mut Equation,
    term: NodeId,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<bool, Error> {
    let nth = eqn.node(term)?.nth;
    if nth == 1 {
        return Ok(false);
    }

    for factor in eqn.factors(term).to_vec() {
        eqn[factor].nth = eqn[factor].nth.saturating_mul(nth);
    }
    let node = &mut eqn[term];
    if !node.sign && nth % 2 == 0 {
        node.sign = true;
    }
    node.nth = 1;

    step_collector.push(Step::DistributeMultiplicity);
    Ok(true)
}

/// Multiplies the numbers at the start of a term into one.
///
/// `2*3x = 6x`
pub fn fold_numbers(
    eqn: &mut Equation,
    term: NodeId,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<bool, Error> {
    let factors = eqn.factors(term).to_vec();
    let run = factors.iter()
        .take_while(|factor| number_value(eqn, **factor).is_some())
        .count();
    if run < 2 {
        return Ok(false);
    }

    let (product, integer) = factors[..run]
        .iter()
        .filter_map(|factor| number_value(eqn, *factor))
        .fold((1.0, true), |(product, integer), (value, is_integer)| {
            (product * value, integer && is_integer)
        });
    if !product.is_finite() {
        return Ok(false);
    }

    let number = eqn.number(product.abs(), integer);
    let mut list = vec![number];
    list.extend_from_slice(&factors[run..]);
    for old in eqn.replace_list(term, list)?.into_iter().take(run) {
        eqn.free(old);
    }
    if product < 0.0 {
        let node = &mut eqn[term];
        node.sign = !node.sign;
    }

    step_collector.push(Step::FoldNumbers);
    Ok(true)
}

/// Combines factors that are the same apart from their multiplicity, by adding their
/// multiplicities. Factors left with multiplicity 0 are dropped.
///
/// `x x = x^2`
/// `x^2 x^(-1) = x`
pub fn combine_factors(
    eqn: &mut Equation,
    term: NodeId,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<bool, Error> {
    let factors = eqn.factors(term).to_vec();
    let mut kept: Vec<(NodeId, Option<String>)> = Vec::with_capacity(factors.len());
    let mut merged = Vec::new();

    for factor in factors {
        if contains_input(eqn, factor) {
            kept.push((factor, None));
            continue;
        }

        let body = body_text(eqn, factor);
        let existing = kept.iter()
            .find(|(_, other)| other.as_deref() == Some(body.as_str()))
            .map(|(id, _)| *id);
        match existing {
            Some(into) => {
                eqn[into].nth = eqn[into].nth.saturating_add(eqn[factor].nth);
                merged.push(factor);
            },
            None => kept.push((factor, Some(body))),
        }
    }

    if merged.is_empty() {
        return Ok(false);
    }

    let (list, dropped): (Vec<_>, Vec<_>) = kept.into_iter()
        .map(|(factor, _)| factor)
        .partition(|factor| eqn[*factor].nth != 0);
    let list = if list.is_empty() {
        vec![eqn.number(1.0, true)]
    } else {
        list
    };
    eqn.replace_list(term, list)?;
    for factor in merged.into_iter().chain(dropped) {
        eqn.free(factor);
    }

    step_collector.push(Step::CombineFactors);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::normalize::normalize;

    /// Normalizes the text, then applies the rule to the first term.
    fn apply(
        text: &str,
        rule: fn(&mut Equation, NodeId, &mut dyn StepCollector<Step>) -> Result<bool, Error>,
    ) -> (bool, String) {
        let mut eqn = Equation::parse(text).unwrap();
        normalize(&mut eqn).unwrap();
        let term = eqn.terms(eqn.root())[0];
        let applied = rule(&mut eqn, term, &mut ()).unwrap();
        (applied, eqn.to_string())
    }

    #[test]
    fn numbers() {
        assert_eq!(apply("2*3x", fold_numbers), (true, "(+6x)".to_string()));
        assert_eq!(apply("2x", fold_numbers), (false, "(+2x)".to_string()));
    }

    #[test]
    fn factors() {
        assert_eq!(apply("x y x", combine_factors), (true, "(+x^2y)".to_string()));
        assert_eq!(apply("x/x", combine_factors), (true, "(+1)".to_string()));
        assert_eq!(apply("xy", combine_factors), (false, "(+xy)".to_string()));
    }

    #[test]
    fn inputs_are_not_combined() {
        assert_eq!(apply("??", combine_factors), (false, "(+??)".to_string()));
    }

    #[test]
    fn multiplicity() {
        let mut eqn = Equation::parse("-xy").unwrap();
        let term = eqn.terms(eqn.root())[0];
        eqn[term].nth = 2;

        let mut steps = Vec::new();
        assert!(distribute_multiplicity(&mut eqn, term, &mut steps).unwrap());
        assert_eq!(steps, vec![Step::DistributeMultiplicity]);
        assert_eq!(eqn.to_string(), "(+x^2y^2)");
    }
}
