//! The simplification rules.
//!
//! Each rule takes the node to simplify and rewrites it in place. A rule returns `Ok(true)` and
//! records a [`Step`](super::step::Step) if it applied, or `Ok(false)` if it did not.

pub mod add;
pub mod multiply;
pub mod number;
pub mod power;

use eqn_error::Error;
use eqn_parser::tree::{node::NodeId, Equation};

/// Removes a child from a term or expression and frees it. The list must keep at least one
/// other child.
pub(crate) fn remove_child(eqn: &mut Equation, list: NodeId, child: NodeId) -> Result<(), Error> {
    let rest = eqn.children(list)
        .into_iter()
        .filter(|id| *id != child)
        .collect();
    eqn.replace_list(list, rest)?;
    eqn.free(child);
    Ok(())
}
