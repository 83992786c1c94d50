//! Simplification rules for expressions, including combining like terms.

use eqn_error::Error;
use eqn_parser::tree::{node::NodeId, Equation};
use crate::consts::ZERO_TOLERANCE;
use crate::symbolic::{
    normalize::variable_part,
    simplify::{contains_input, number_value, step::Step},
    step_collector::StepCollector,
};

/// If the term is a single number, returns its signed value and whether it is an integer.
fn constant_term(eqn: &Equation, term: NodeId) -> Option<(f64, bool)> {
    let node = eqn.get(term)?;
    let [factor] = eqn.factors(term) else {
        return None;
    };
    if node.nth != 1 {
        return None;
    }
    let (value, integer) = number_value(eqn, *factor)?;
    Some((if node.sign { value } else { -value }, integer))
}

/// Creates a term holding a single number with the given signed value.
fn number_term(eqn: &mut Equation, value: f64, integer: bool) -> NodeId {
    let number = eqn.number(value.abs(), integer);
    let term = eqn.term(vec![number]);
    eqn[term].sign = value >= 0.0;
    term
}

/// Adds up the terms at the end of an expression that are single numbers.
///
/// `x+2+3 = x+5`
pub fn fold_constant_terms(
    eqn: &mut Equation,
    expr: NodeId,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<bool, Error> {
    let terms = eqn.terms(expr).to_vec();
    let run = terms.iter()
        .rev()
        .take_while(|term| constant_term(eqn, **term).is_some())
        .count();
    if run < 2 {
        return Ok(false);
    }

    let start = terms.len() - run;
    let (sum, integer) = terms[start..]
        .iter()
        .filter_map(|term| constant_term(eqn, *term))
        .fold((0.0, true), |(sum, integer), (value, is_integer)| {
            (sum + value, integer && is_integer)
        });
    if !sum.is_finite() {
        return Ok(false);
    }

    let folded = number_term(eqn, sum, integer);
    let mut list = terms[..start].to_vec();
    list.push(folded);
    for old in eqn.replace_list(expr, list)?.into_iter().skip(start) {
        eqn.free(old);
    }

    step_collector.push(Step::FoldConstantTerms);
    Ok(true)
}

/// The part of a term that like terms share, or [`None`] if the term cannot be combined with
/// another.
fn like_key(eqn: &Equation, term: NodeId) -> Option<String> {
    if eqn.get(term)?.nth != 1 || contains_input(eqn, term) {
        return None;
    }
    let key = variable_part(eqn, term);
    (!key.is_empty()).then_some(key)
}

/// The coefficient of a term: the product of its leading numbers, with the sign of the term.
/// Also returns whether the coefficient is an integer, and how many factors make it up.
fn coefficient(eqn: &Equation, term: NodeId) -> (f64, bool, usize) {
    let (mut value, mut integer, mut count) = (1.0, true, 0);
    for factor in eqn.factors(term) {
        if !eqn[*factor].is_number() {
            break;
        }
        let Some((factor_value, factor_integer)) = number_value(eqn, *factor) else {
            break;
        };
        value *= factor_value;
        integer &= factor_integer;
        count += 1;
    }
    if !eqn[term].sign {
        value = -value;
    }
    (value, integer, count)
}

/// Combines one pair of terms that differ only in their coefficient. Returns true if a pair was
/// combined; the caller repeats this until it returns false.
///
/// `x+x = 2x`
/// `2x-3x = -x`
/// `x-x = 0`
pub fn combine_like_terms(
    eqn: &mut Equation,
    expr: NodeId,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<bool, Error> {
    let terms = eqn.terms(expr).to_vec();
    let keys = terms.iter().map(|term| like_key(eqn, *term)).collect::<Vec<_>>();

    let pair = (0..terms.len())
        .flat_map(|i| (i + 1..terms.len()).map(move |j| (i, j)))
        .find(|&(i, j)| keys[i].is_some() && keys[i] == keys[j]);
    let Some((i, j)) = pair else {
        return Ok(false);
    };
    let (into, from) = (terms[i], terms[j]);

    let (into_value, into_integer, count) = coefficient(eqn, into);
    let (from_value, from_integer, _) = coefficient(eqn, from);
    let sum = into_value + from_value;
    if !sum.is_finite() {
        return Ok(false);
    }
    let zero = sum.abs() < ZERO_TOLERANCE;

    let old = eqn.factors(into).to_vec();
    let (numbers, rest) = old.split_at(count);
    let mut list = Vec::with_capacity(rest.len() + 1);
    if zero {
        list.push(eqn.number(0.0, true));
    } else {
        if (sum.abs() - 1.0).abs() >= ZERO_TOLERANCE {
            list.push(eqn.number(sum.abs(), into_integer && from_integer));
        }
        list.extend_from_slice(rest);
    }
    eqn.replace_list(into, list)?;
    for factor in numbers {
        eqn.free(*factor);
    }
    if zero {
        for factor in rest {
            eqn.free(*factor);
        }
    }
    eqn[into].sign = zero || sum > 0.0;

    let remaining = terms.iter().copied().filter(|term| *term != from).collect();
    eqn.replace_list(expr, remaining)?;
    eqn.free(from);

    step_collector.push(Step::CombineLikeTerms);
    Ok(true)
}

/// Removes terms that are zero, as long as another term is left.
///
/// `x+0 = x`
pub fn drop_zero_terms(
    eqn: &mut Equation,
    expr: NodeId,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<bool, Error> {
    let terms = eqn.terms(expr).to_vec();
    if terms.len() < 2 {
        return Ok(false);
    }

    let (mut zeros, mut kept): (Vec<_>, Vec<_>) = terms.into_iter().partition(|term| {
        constant_term(eqn, *term).map_or(false, |(value, _)| value.abs() < ZERO_TOLERANCE)
    });
    if zeros.is_empty() {
        return Ok(false);
    }
    if kept.is_empty() {
        kept.push(zeros.remove(0));
    }

    eqn.replace_list(expr, kept)?;
    for term in zeros {
        eqn.free(term);
    }

    step_collector.push(Step::DropZeroTerms);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::normalize::normalize;

    fn apply(
        text: &str,
        rule: fn(&mut Equation, NodeId, &mut dyn StepCollector<Step>) -> Result<bool, Error>,
    ) -> (bool, String) {
        let mut eqn = Equation::parse(text).unwrap();
        normalize(&mut eqn).unwrap();
        let root = eqn.root();
        let applied = rule(&mut eqn, root, &mut ()).unwrap();
        (applied, eqn.to_string())
    }

    #[test]
    fn constants() {
        assert_eq!(apply("2+x+3", fold_constant_terms), (true, "(+x+5)".to_string()));
        assert_eq!(apply("1-3.5", fold_constant_terms), (true, "(-2.5)".to_string()));
        assert_eq!(apply("x+3", fold_constant_terms), (false, "(+x+3)".to_string()));
    }

    #[test]
    fn like_terms() {
        assert_eq!(apply("x+x", combine_like_terms), (true, "(+2x)".to_string()));
        assert_eq!(apply("2x-3x", combine_like_terms), (true, "(-x)".to_string()));
        assert_eq!(apply("xy-yx", combine_like_terms), (true, "(+0)".to_string()));
        assert_eq!(apply("x+y", combine_like_terms), (false, "(+x+y)".to_string()));
    }

    #[test]
    fn inputs_are_not_combined() {
        assert_eq!(apply("?+?", combine_like_terms), (false, "(+?+?)".to_string()));
    }

    #[test]
    fn zero_terms() {
        assert_eq!(apply("x+0", drop_zero_terms), (true, "(+x)".to_string()));
        assert_eq!(apply("0-0", drop_zero_terms), (true, "(+0)".to_string()));
        assert_eq!(apply("0", drop_zero_terms), (false, "(+0)".to_string()));
    }
}
