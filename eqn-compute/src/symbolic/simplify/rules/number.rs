//! Simplification rules for numbers.

use eqn_error::Error;
use eqn_parser::tree::{node::{NodeId, NodeKind}, Equation};
use crate::symbolic::{simplify::step::Step, step_collector::StepCollector};

/// Raises a number to its multiplicity. A power that is not finite, such as `0^(-1)`, is left
/// as it is.
///
/// `2^3 = 8`
/// `2^(-1) = 0.5`
/// `x^0 = 1`
pub fn fold_number_power(
    eqn: &mut Equation,
    id: NodeId,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<bool, Error> {
    let node = eqn.node(id)?;
    let NodeKind::Number { value, integer } = node.kind else {
        return Ok(false);
    };
    if node.nth == 1 {
        return Ok(false);
    }

    let base = if node.sign { value } else { -value };
    let result = if node.nth == 0 { 1.0 } else { base.powi(node.nth) };
    if !result.is_finite() {
        return Ok(false);
    }
    let integer = node.nth == 0 || (integer && node.nth > 0);

    let node = &mut eqn[id];
    node.kind = NodeKind::Number { value: result.abs(), integer };
    node.sign = result >= 0.0;
    node.nth = 1;
    step_collector.push(Step::FoldNumberPower);
    Ok(true)
}
