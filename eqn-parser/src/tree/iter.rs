use eqn_error::Error;
use super::{error::{PastBegin, PastEnd}, node::NodeId, Equation};

impl Equation {
    /// Follows first children down from the node until reaching a node without children. This is
    /// the first node of the subtree in post-order.
    pub fn leftmost(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(first) = self.children(current).first() {
            current = *first;
        }
        current
    }

    /// The node after this one in left-to-right post-order, or [`None`] after the root.
    pub fn next_node(&self, id: NodeId) -> Option<NodeId> {
        let (parent, index) = self.position(id)?;
        match self.children(parent).get(index + 1) {
            Some(sibling) => Some(self.leftmost(*sibling)),
            None => Some(parent),
        }
    }

    /// The node before this one in left-to-right post-order, or [`None`] before the first node.
    pub fn prev_node(&self, id: NodeId) -> Option<NodeId> {
        if let Some(last) = self.children(id).last() {
            return Some(*last);
        }

        let mut current = id;
        loop {
            let (parent, index) = self.position(current)?;
            if index > 0 {
                return Some(self.children(parent)[index - 1]);
            }
            current = parent;
        }
    }

    /// Returns an iterator over every node of the equation in left-to-right post-order: children
    /// before their parents, and the root last.
    pub fn iter(&self) -> Iter<'_> {
        self.post_order(self.root)
    }

    /// Returns an iterator over the subtree rooted at the node, in left-to-right post-order.
    pub fn post_order(&self, id: NodeId) -> Iter<'_> {
        Iter {
            eqn: self,
            next: self.get(id).map(|_| self.leftmost(id)),
            last: id,
        }
    }
}

/// An iterator that traverses a subtree in left-to-right post-order.
///
/// This iterator is created by [`Equation::iter`] and [`Equation::post_order`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    eqn: &'a Equation,
    next: Option<NodeId>,
    last: NodeId,
}

impl Iterator for Iter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = if current == self.last {
            None
        } else {
            self.eqn.next_node(current)
        };
        Some(current)
    }
}

/// Where a [`NodeCursor`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Before the first node.
    Front,

    /// On a node.
    At(NodeId),

    /// After the root.
    Back,
}

/// A bidirectional cursor that walks every node of an equation in left-to-right post-order.
///
/// The cursor does not borrow the equation, so it can be kept across edits; every movement takes
/// the equation it walks. Moving past either end parks the cursor at [`Position::Front`] or
/// [`Position::Back`], from where it can be moved back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeCursor {
    position: Position,
}

impl NodeCursor {
    /// Creates a cursor on the first node of the equation.
    pub fn begin(eqn: &Equation) -> Self {
        Self { position: Position::At(eqn.leftmost(eqn.root())) }
    }

    /// Creates a cursor after the root of the equation.
    pub fn end() -> Self {
        Self { position: Position::Back }
    }

    /// Creates a cursor on the given node.
    pub fn at(id: NodeId) -> Self {
        Self { position: Position::At(id) }
    }

    /// Where the cursor is.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The node the cursor is on.
    pub fn get(&self) -> Result<NodeId, Error> {
        match self.position {
            Position::Front => Err(Error::unspanned(PastBegin)),
            Position::At(id) => Ok(id),
            Position::Back => Err(Error::unspanned(PastEnd)),
        }
    }

    /// Moves the cursor to the next node. Moving past the root parks the cursor at
    /// [`Position::Back`]; moving from there is a range error.
    pub fn next(&mut self, eqn: &Equation) -> Result<(), Error> {
        self.position = match self.position {
            Position::Front => Position::At(eqn.leftmost(eqn.root())),
            Position::At(id) => eqn.next_node(id).map_or(Position::Back, Position::At),
            Position::Back => return Err(Error::unspanned(PastEnd)),
        };
        Ok(())
    }

    /// Moves the cursor to the previous node. Moving before the first node parks the cursor at
    /// [`Position::Front`]; moving from there is a range error.
    pub fn prev(&mut self, eqn: &Equation) -> Result<(), Error> {
        self.position = match self.position {
            Position::Front => return Err(Error::unspanned(PastBegin)),
            Position::At(id) => eqn.prev_node(id).map_or(Position::Front, Position::At),
            Position::Back => Position::At(eqn.root()),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::tree::node::NodeKind;

    fn tags(eqn: &Equation, nodes: impl Iterator<Item = NodeId>) -> Vec<String> {
        nodes.map(|id| match &eqn[id].kind {
            NodeKind::Variable(name) => name.to_string(),
            kind => kind.tag().to_string(),
        }).collect()
    }

    #[test]
    fn post_order() {
        let eqn = Equation::parse("a/b+c").unwrap();
        assert_eq!(
            tags(&eqn, eqn.iter()),
            [
                "a", "term", "expression",
                "b", "term", "expression",
                "divide", "term",
                "c", "term",
                "expression",
            ],
        );
    }

    #[test]
    fn walk_both_ways() {
        let eqn = Equation::parse("a/b+c").unwrap();
        let forward = eqn.iter().collect::<Vec<_>>();

        let mut cursor = NodeCursor::end();
        let mut backward = Vec::new();
        loop {
            match cursor.prev(&eqn) {
                Ok(()) => match cursor.get() {
                    Ok(id) => backward.push(id),
                    Err(err) => {
                        assert!(err.is_range());
                        break;
                    },
                },
                Err(_) => break,
            }
        }
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(cursor.position(), Position::Front);
        assert!(cursor.prev(&eqn).unwrap_err().is_range());
    }

    #[test]
    fn past_the_end() {
        let eqn = Equation::parse("x").unwrap();
        let mut cursor = NodeCursor::at(eqn.root());
        cursor.next(&eqn).unwrap();
        assert_eq!(cursor.position(), Position::Back);
        assert!(cursor.get().unwrap_err().is_range());
        assert!(cursor.next(&eqn).unwrap_err().is_range());

        let mut cursor = NodeCursor::begin(&eqn);
        assert_eq!(eqn[cursor.get().unwrap()].kind, NodeKind::Variable('x'));
        cursor.prev(&eqn).unwrap();
        assert_eq!(cursor.position(), Position::Front);
    }

    #[test]
    fn subtree() {
        let eqn = Equation::parse("ab+c").unwrap();
        let first = eqn.terms(eqn.root())[0];
        assert_eq!(tags(&eqn, eqn.post_order(first)), ["a", "b", "term"]);
    }
}
