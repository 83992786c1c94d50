//! One pass of algebraic simplification over a normalized equation.
//!
//! Each rule in [`rules`] rewrites one node in place and returns whether it changed anything.
//! A pass applies the rules depth-first; the caller then normalizes again, and repeats passes
//! until nothing changes.

pub mod rules;
pub mod step;

use eqn_error::Error;
use eqn_parser::tree::{node::{NodeId, NodeKind}, Equation};
use super::step_collector::StepCollector;
use step::Step;

/// If the node is a number with multiplicity 1, returns its signed value and whether it is an
/// integer.
pub(crate) fn number_value(eqn: &Equation, id: NodeId) -> Option<(f64, bool)> {
    let node = eqn.get(id)?;
    match node.kind {
        NodeKind::Number { value, integer } if node.nth == 1 => {
            Some((if node.sign { value } else { -value }, integer))
        },
        _ => None,
    }
}

/// The text of the node with its multiplicity left out.
pub(crate) fn body_text(eqn: &mut Equation, id: NodeId) -> String {
    let nth = std::mem::replace(&mut eqn[id].nth, 1);
    let text = eqn.text(id);
    eqn[id].nth = nth;
    text
}

/// Returns true if there is an input anywhere in the subtree. Rules leave such subtrees alone so
/// that no input is lost.
pub(crate) fn contains_input(eqn: &Equation, id: NodeId) -> bool {
    eqn.post_order(id).any(|node| eqn[node].is_input())
}

/// Simplifies the subtree rooted at the node. Returns true if anything changed.
pub fn simplify_node(
    eqn: &mut Equation,
    id: NodeId,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<bool, Error> {
    let node = eqn.node(id)?;
    if node.is_expression() {
        simplify_expression(eqn, id, step_collector)
    } else if node.is_term() {
        simplify_term(eqn, id, step_collector)
    } else if node.is_number() {
        rules::number::fold_number_power(eqn, id, step_collector)
    } else {
        let mut changed = false;
        for child in eqn.children(id) {
            changed |= simplify_node(eqn, child, step_collector)?;
        }
        Ok(changed)
    }
}

fn simplify_expression(
    eqn: &mut Equation,
    id: NodeId,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<bool, Error> {
    let mut changed = false;
    for term in eqn.terms(id).to_vec() {
        changed |= simplify_term(eqn, term, step_collector)?;
    }
    changed |= rules::add::fold_constant_terms(eqn, id, step_collector)?;
    while rules::add::combine_like_terms(eqn, id, step_collector)? {
        changed = true;
    }
    changed |= rules::add::drop_zero_terms(eqn, id, step_collector)?;
    Ok(changed)
}

fn simplify_term(
    eqn: &mut Equation,
    id: NodeId,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<bool, Error> {
    let mut changed = rules::multiply::distribute_multiplicity(eqn, id, step_collector)?;
    for factor in eqn.factors(id).to_vec() {
        changed |= simplify_node(eqn, factor, step_collector)?;
    }
    changed |= rules::multiply::fold_numbers(eqn, id, step_collector)?;
    changed |= rules::multiply::combine_factors(eqn, id, step_collector)?;
    while rules::power::combine_powers(eqn, id, step_collector)? {
        changed = true;
    }
    Ok(changed)
}
