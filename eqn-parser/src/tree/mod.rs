//! The expression tree of an equation.
//!
//! An [`Equation`] owns every node of its tree in an arena, and nodes refer to each other with
//! [`NodeId`] handles. Ownership follows the tree strictly: an [`NodeKind::Expression`] owns its
//! terms, a [`NodeKind::Term`] owns its factors, and every other node owns the children listed in
//! its [`NodeKind`]. Each node also records its `parent`, which every mutating operation keeps in
//! step with the actual containment.
//!
//! ```
//! use eqn_parser::tree::{Equation, node::NodeKind};
//!
//! let eqn = Equation::parse("2x-y").unwrap();
//! assert_eq!(eqn.to_string(), "(+2x-y)");
//!
//! let root = eqn.root();
//! let terms = eqn.terms(root);
//! assert_eq!(terms.len(), 2);
//! assert!(!eqn[terms[1]].sign);
//! assert_eq!(eqn[eqn.factors(terms[1])[0]].kind, NodeKind::Variable('y'));
//! ```
//!
//! Nodes that have been removed from the tree are freed, and their handles may be reused.

pub mod cursor;
pub mod edit;
pub mod error;
pub mod fmt;
pub mod iter;
pub mod node;
pub mod xml;

use eqn_error::Error;
use error::{Detached, NoSuchNode, UnexpectedKind};
use node::{Binary, Node, NodeId, NodeKind};
use std::ops::{Index, IndexMut};

pub use cursor::FactorCursor;
pub use iter::{Iter, NodeCursor, Position};

/// An equation: one root [`NodeKind::Expression`], plus the state the editor keeps about it.
#[derive(Debug, Clone)]
pub struct Equation {
    /// Node storage. Freed slots are `None`.
    nodes: Vec<Option<Node>>,

    /// Indices of freed slots, reused by later allocations.
    free: Vec<usize>,

    /// The root expression.
    root: NodeId,

    /// Every input in the tree, in order of creation.
    inputs: Vec<NodeId>,

    /// The input that accepts typed characters, if any.
    current: Option<NodeId>,

    /// The serial number to give the next input.
    next_serial: usize,

    /// The first selected node, if any.
    select_start: Option<NodeId>,

    /// The last selected node, if any.
    select_end: Option<NodeId>,
}

impl Default for Equation {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<NodeId> for Equation {
    type Output = Node;

    /// # Panics
    ///
    /// Panics if the node has been freed or belongs to another equation.
    fn index(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("no node {} in this equation", id),
        }
    }
}

impl IndexMut<NodeId> for Equation {
    /// # Panics
    ///
    /// Panics if the node has been freed or belongs to another equation.
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("no node {} in this equation", id),
        }
    }
}

impl Equation {
    /// Creates an equation holding a single, current, empty input.
    pub fn new() -> Self {
        let mut eqn = Self::blank();
        let input = eqn.input(String::new(), true);
        let term = eqn.term(vec![input]);
        let root = eqn.expression(vec![term]);
        eqn.set_root(root);
        eqn
    }

    /// Creates an equation with no nodes. A root must be set before the equation is used.
    pub(crate) fn blank() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: NodeId(usize::MAX),
            inputs: Vec::new(),
            current: None,
            next_serial: 0,
            select_start: None,
            select_end: None,
        }
    }

    pub(crate) fn set_root(&mut self, root: NodeId) {
        self.root = root;
        if let Some(node) = self.get_mut(root) {
            node.parent = None;
        }
    }

    /// The root expression.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The number of nodes stored, including nodes that have been created but not yet attached
    /// to the tree.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Returns true if no nodes are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the node with the given handle, if it exists.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)?.as_ref()
    }

    /// Returns the node with the given handle mutably, if it exists.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)?.as_mut()
    }

    /// Returns the node with the given handle, or a logic error if it does not exist.
    pub fn node(&self, id: NodeId) -> Result<&Node, Error> {
        self.get(id).ok_or_else(|| Error::unspanned(NoSuchNode { id: id.0 }))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, Error> {
        self.get_mut(id).ok_or_else(|| Error::unspanned(NoSuchNode { id: id.0 }))
    }

    /// The parent of the node, or [`None`] for the root and for detached nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// The children of the node, in order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id).map(|node| node.kind.children()).unwrap_or_default()
    }

    /// The terms of an expression. Empty if the node is not an expression.
    pub fn terms(&self, expr: NodeId) -> &[NodeId] {
        match self.get(expr).map(|node| &node.kind) {
            Some(NodeKind::Expression(terms)) => terms,
            _ => &[],
        }
    }

    /// The factors of a term. Empty if the node is not a term.
    pub fn factors(&self, term: NodeId) -> &[NodeId] {
        match self.get(term).map(|node| &node.kind) {
            Some(NodeKind::Term(factors)) => factors,
            _ => &[],
        }
    }

    pub(crate) fn terms_mut(&mut self, expr: NodeId) -> Result<&mut Vec<NodeId>, Error> {
        match &mut self.node_mut(expr)?.kind {
            NodeKind::Expression(terms) => Ok(terms),
            other => Err(Error::unspanned(UnexpectedKind { expected: "expression", found: other.tag() })),
        }
    }

    pub(crate) fn factors_mut(&mut self, term: NodeId) -> Result<&mut Vec<NodeId>, Error> {
        match &mut self.node_mut(term)?.kind {
            NodeKind::Term(factors) => Ok(factors),
            other => Err(Error::unspanned(UnexpectedKind { expected: "term", found: other.tag() })),
        }
    }

    /// Returns the node's parent and the node's position among the parent's children.
    pub fn position(&self, id: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.parent(id)?;
        let index = self.children(parent).iter().position(|child| *child == id)?;
        Some((parent, index))
    }

    /// Returns true if `ancestor` is `id` or contains it.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Stores a node and returns its handle.
    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(node);
                NodeId(index)
            },
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            },
        }
    }

    /// Points the parent links of `children` at `parent`.
    pub(crate) fn adopt(&mut self, parent: NodeId, children: &[NodeId]) {
        for child in children {
            if let Some(node) = self.get_mut(*child) {
                node.parent = Some(parent);
            }
        }
    }

    /// Stores a node of the given kind and adopts its children.
    pub(crate) fn alloc_kind(&mut self, kind: NodeKind) -> NodeId {
        let children = kind.children();
        let id = self.alloc(Node::new(kind));
        self.adopt(id, &children);
        id
    }

    /// Frees a detached subtree. Inputs and selected nodes inside it are forgotten.
    pub fn free(&mut self, id: NodeId) {
        let mut stack = vec![id];
        let mut lost_selection = false;
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get_mut(id.0).and_then(Option::take) else {
                continue;
            };
            stack.extend(node.kind.children());
            if node.is_input() {
                self.inputs.retain(|input| *input != id);
                if self.current == Some(id) {
                    self.current = None;
                }
            }
            lost_selection |= self.select_start == Some(id) || self.select_end == Some(id);
            self.free.push(id.0);
        }
        if lost_selection {
            self.clear_select();
        }
    }

    /// Puts `new` where `old` is in the tree. `old` is left detached, but not freed.
    pub(crate) fn replace_child(&mut self, old: NodeId, new: NodeId) -> Result<(), Error> {
        match self.node(old)?.parent {
            Some(parent) => {
                if !self.node_mut(parent)?.kind.replace_child(old, new) {
                    return Err(Error::unspanned(Detached));
                }
            },
            None if old == self.root => self.root = new,
            None => return Err(Error::unspanned(Detached)),
        }
        let parent = self.node_mut(old)?.parent.take();
        self.node_mut(new)?.parent = parent;
        Ok(())
    }

    /// Frees a single detached node and returns its children, which are left detached instead
    /// of being freed with it.
    pub fn free_node(&mut self, id: NodeId) -> Vec<NodeId> {
        let children = self.children(id);
        for child in &children {
            if let Some(node) = self.get_mut(*child) {
                node.parent = None;
            }
        }
        if !children.is_empty() {
            if let Some(node) = self.get_mut(id) {
                node.kind = NodeKind::Term(Vec::new());
            }
        }
        self.free(id);
        children
    }

    /// Replaces the factors of a term or the terms of an expression with `list`, and adopts
    /// them. The previous children are returned detached, but not freed.
    pub fn replace_list(&mut self, id: NodeId, list: Vec<NodeId>) -> Result<Vec<NodeId>, Error> {
        let old = match &mut self.node_mut(id)?.kind {
            NodeKind::Term(children) | NodeKind::Expression(children) => std::mem::replace(children, list),
            other => {
                return Err(Error::unspanned(UnexpectedKind {
                    expected: "term or expression",
                    found: other.tag(),
                }));
            },
        };
        for child in &old {
            if let Some(node) = self.get_mut(*child) {
                node.parent = None;
            }
        }
        let children = self.children(id);
        self.adopt(id, &children);
        Ok(old)
    }

    /// Replaces `id` in the tree by the node `wrap` builds around it.
    pub(crate) fn wrap_in_place<F>(&mut self, id: NodeId, wrap: F) -> Result<NodeId, Error>
    where
        F: FnOnce(&mut Self, NodeId) -> NodeId,
    {
        let slot = self.alloc(Node::new(NodeKind::Term(Vec::new())));
        if let Err(err) = self.replace_child(id, slot) {
            self.free(slot);
            return Err(err);
        }
        let wrapped = wrap(self, id);
        self.replace_child(slot, wrapped)?;
        self.free(slot);
        Ok(wrapped)
    }

    /// Creates a detached number.
    pub fn number(&mut self, value: f64, integer: bool) -> NodeId {
        self.alloc_kind(NodeKind::Number { value, integer })
    }

    /// Creates a detached variable.
    pub fn variable(&mut self, name: char) -> NodeId {
        self.alloc_kind(NodeKind::Variable(name))
    }

    /// Creates a detached constant.
    pub fn constant(&mut self, name: char) -> NodeId {
        self.alloc_kind(NodeKind::Constant(name))
    }

    /// Creates a detached function application. The argument is wrapped in an expression if it
    /// is not one already.
    pub fn function(&mut self, name: impl Into<String>, arg: NodeId) -> NodeId {
        let arg = self.wrap_expression(arg);
        self.alloc_kind(NodeKind::Function { name: name.into(), arg })
    }

    /// Creates a detached division. Operands are wrapped in expressions.
    pub fn divide(&mut self, first: NodeId, second: NodeId) -> NodeId {
        let first = self.wrap_expression(first);
        let second = self.wrap_expression(second);
        self.alloc_kind(NodeKind::Divide(Binary { first, second }))
    }

    /// Creates a detached power. Operands are wrapped in expressions.
    pub fn power(&mut self, first: NodeId, second: NodeId) -> NodeId {
        let first = self.wrap_expression(first);
        let second = self.wrap_expression(second);
        self.alloc_kind(NodeKind::Power(Binary { first, second }))
    }

    /// Creates a detached differential. The function is wrapped in an expression.
    pub fn differential(&mut self, variable: char, function: NodeId) -> NodeId {
        let function = self.wrap_expression(function);
        self.alloc_kind(NodeKind::Differential { variable, function })
    }

    /// Creates a detached term with the given factors.
    pub fn term(&mut self, factors: Vec<NodeId>) -> NodeId {
        self.alloc_kind(NodeKind::Term(factors))
    }

    /// Creates a detached expression with the given terms.
    pub fn expression(&mut self, terms: Vec<NodeId>) -> NodeId {
        self.alloc_kind(NodeKind::Expression(terms))
    }

    /// Creates a detached input with a fresh serial number. If `current` is true, the input
    /// becomes the current input.
    pub fn input(&mut self, text: String, current: bool) -> NodeId {
        let serial = self.next_serial;
        self.next_serial += 1;
        let id = self.alloc_kind(NodeKind::Input { serial, text, current: false });
        self.inputs.push(id);
        if current {
            self.make_current(id);
        }
        id
    }

    /// Wraps the node in an expression, unless it is one already. A term becomes the single term
    /// of the expression, anything else the single factor of its single term.
    pub fn wrap_expression(&mut self, id: NodeId) -> NodeId {
        match self.get(id).map(|node| &node.kind) {
            Some(NodeKind::Expression(_)) => id,
            Some(NodeKind::Term(_)) => self.expression(vec![id]),
            _ => {
                let term = self.term(vec![id]);
                self.expression(vec![term])
            },
        }
    }

    /// The number of factors the subtree contributes when a selection is extended over it.
    pub fn num_factors(&self, id: NodeId) -> usize {
        let Some(node) = self.get(id) else {
            return 0;
        };
        match &node.kind {
            NodeKind::Input { text, .. } => text.chars().count(),
            NodeKind::Function { arg, .. } => self.num_factors(*arg) + 1,
            NodeKind::Differential { function, .. } => self.num_factors(*function),
            NodeKind::Divide(binary) | NodeKind::Power(binary) => {
                self.num_factors(binary.first) + self.num_factors(binary.second)
            },
            NodeKind::Term(children) | NodeKind::Expression(children) => {
                children.iter().map(|child| self.num_factors(*child)).sum()
            },
            NodeKind::Number { .. } | NodeKind::Variable(_) | NodeKind::Constant(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn new_equation() {
        let eqn = Equation::new();
        assert_eq!(eqn.to_string(), "(+#)");
        assert_eq!(eqn.len(), 3);
        assert!(eqn.current_input().is_some());
    }

    #[test]
    fn parent_links() {
        let mut eqn = Equation::blank();
        let x = eqn.variable('x');
        let two = eqn.number(2.0, true);
        let power = eqn.power(x, two);
        let NodeKind::Power(binary) = eqn[power].kind.clone() else {
            panic!("not a power");
        };
        assert_eq!(eqn.parent(binary.first), Some(power));
        let term = eqn.terms(binary.first)[0];
        assert_eq!(eqn.parent(x), Some(term));
        assert_eq!(eqn.position(x), Some((term, 0)));
        assert!(eqn.is_ancestor(power, x));
        assert!(!eqn.is_ancestor(x, power));
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut eqn = Equation::blank();
        let a = eqn.variable('a');
        let b = eqn.variable('b');
        let term = eqn.term(vec![a, b]);
        eqn.free(term);
        assert!(eqn.is_empty());
        let c = eqn.variable('c');
        assert!(c.index() <= 2);
        assert_eq!(eqn.len(), 1);
    }

    #[test]
    fn wrap_in_place() {
        let mut eqn = Equation::parse("ab").unwrap();
        let term = eqn.terms(eqn.root())[0];
        let b = eqn.factors(term)[1];
        let wrapped = eqn.wrap_in_place(b, |eqn, b| eqn.function("sin", b)).unwrap();
        assert_eq!(eqn.factors(term)[1], wrapped);
        assert_eq!(eqn.parent(wrapped), Some(term));
        assert_eq!(eqn.to_string(), "(+asin(+b))");
    }

    #[test]
    fn replace_lists() {
        let mut eqn = Equation::parse("ab+c").unwrap();
        let term = eqn.terms(eqn.root())[0];
        let old = eqn.replace_list(term, Vec::new()).unwrap();
        assert_eq!(old.len(), 2);
        assert_eq!(eqn.parent(old[0]), None);

        let reversed = old.into_iter().rev().collect::<Vec<_>>();
        eqn.replace_list(term, reversed.clone()).unwrap();
        assert_eq!(eqn.parent(reversed[0]), Some(term));
        assert_eq!(eqn.to_string(), "(+ba+c)");

        let b = reversed[0];
        assert!(eqn.replace_list(b, Vec::new()).unwrap_err().is_logic());
    }

    #[test]
    fn free_single_node() {
        let mut eqn = Equation::blank();
        let x = eqn.variable('x');
        let function = eqn.function("sin", x);
        let arg = eqn.free_node(function);
        assert_eq!(arg.len(), 1);
        assert!(eqn.get(function).is_none());
        assert_eq!(eqn.parent(arg[0]), None);
        assert_eq!(eqn.text(arg[0]), "(+x)");
    }

    #[test]
    fn num_factors() {
        let eqn = Equation::parse("2x/y+sin(z)[abc]").unwrap();
        assert_eq!(eqn.num_factors(eqn.root()), 2 + 1 + 2 + 3);
    }
}
