use std::fmt;

/// A handle to a node stored in an [`Equation`](super::Equation).
///
/// Handles are only meaningful for the equation that created them. A handle to a node that has
/// been removed from the equation may later be reused for a different node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The index of the node within its equation's storage.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The selection state of a node.
///
/// At most one selection exists in an equation at a time: either a single node marked
/// [`Select::All`], or a pair of nodes marked [`Select::Start`] and [`Select::End`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Select {
    #[default]
    None,
    Start,
    End,
    All,
}

impl Select {
    /// The name of the selection state, as it is written to XML.
    pub fn name(self) -> &'static str {
        match self {
            Select::None => "NONE",
            Select::Start => "START",
            Select::End => "END",
            Select::All => "ALL",
        }
    }

    /// Parses the name of a selection state.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "NONE" => Some(Select::None),
            "START" => Some(Select::Start),
            "END" => Some(Select::End),
            "ALL" => Some(Select::All),
            _ => None,
        }
    }
}

/// The layout box of a node, in whatever units the layout pass measured text in.
///
/// `base` is the distance from the top of the box to the line the box's text sits on. Boxes are
/// a cache: they are only valid after a layout pass, and are never written to XML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub base: i32,
}

impl Frame {
    /// Returns true if the point lies within this box.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Returns true if this box lies entirely within `other`.
    pub fn inside(&self, other: &Frame) -> bool {
        self.x >= other.x
            && self.y >= other.y
            && self.x + self.width <= other.x + other.width
            && self.y + self.height <= other.y + other.height
    }

    /// Returns true if this box and `other` overlap.
    pub fn intersects(&self, other: &Frame) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// The two operands of a [`NodeKind::Divide`] or [`NodeKind::Power`]. Both are always
/// [`NodeKind::Expression`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binary {
    pub first: NodeId,
    pub second: NodeId,
}

/// The variant of a node, along with the data specific to it.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A literal number. `integer` controls how the number is displayed.
    Number { value: f64, integer: bool },

    /// A single-letter variable, whose value is looked up when the equation is evaluated.
    Variable(char),

    /// A single-letter constant with a fixed value: `e`, `P` (π), or `i`.
    Constant(char),

    /// A named unary function applied to an expression, such as `sin(+x)`.
    Function { name: String, arg: NodeId },

    /// The first operand divided by the second.
    Divide(Binary),

    /// The first operand raised to the power of the second.
    Power(Binary),

    /// The derivative of an expression with respect to a variable.
    Differential { variable: char, function: NodeId },

    /// A product of factors.
    Term(Vec<NodeId>),

    /// A sum of terms.
    Expression(Vec<NodeId>),

    /// A place where the user can type. `serial` is unique within the equation.
    Input { serial: usize, text: String, current: bool },
}

impl NodeKind {
    /// The XML tag of this kind of node.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Number { .. } => "number",
            NodeKind::Variable(_) => "variable",
            NodeKind::Constant(_) => "constant",
            NodeKind::Function { .. } => "function",
            NodeKind::Divide(_) => "divide",
            NodeKind::Power(_) => "power",
            NodeKind::Differential { .. } => "differential",
            NodeKind::Term(_) => "term",
            NodeKind::Expression(_) => "expression",
            NodeKind::Input { .. } => "input",
        }
    }

    /// The position of this kind of node when the factors of a term are sorted.
    pub fn rank(&self) -> u8 {
        match self {
            NodeKind::Number { .. } => 0,
            NodeKind::Constant(_) => 1,
            NodeKind::Variable(_) => 2,
            NodeKind::Expression(_) => 3,
            NodeKind::Function { .. } => 4,
            NodeKind::Divide(_) => 5,
            NodeKind::Power(_) => 6,
            NodeKind::Differential { .. } => 7,
            NodeKind::Input { .. } => 8,
            NodeKind::Term(_) => 9,
        }
    }

    /// Returns true if this kind of node has no children.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            NodeKind::Number { .. } | NodeKind::Variable(_) | NodeKind::Constant(_) | NodeKind::Input { .. }
        )
    }

    /// The children of the node, in order.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::Function { arg, .. } => vec![*arg],
            NodeKind::Divide(binary) | NodeKind::Power(binary) => vec![binary.first, binary.second],
            NodeKind::Differential { function, .. } => vec![*function],
            NodeKind::Term(children) | NodeKind::Expression(children) => children.clone(),
            NodeKind::Number { .. }
                | NodeKind::Variable(_)
                | NodeKind::Constant(_)
                | NodeKind::Input { .. } => Vec::new(),
        }
    }

    /// Replaces the child `old` with `new`. Returns false if `old` is not a child.
    pub(crate) fn replace_child(&mut self, old: NodeId, new: NodeId) -> bool {
        let slot = match self {
            NodeKind::Function { arg, .. } => Some(arg).filter(|id| **id == old),
            NodeKind::Divide(binary) | NodeKind::Power(binary) => {
                if binary.first == old {
                    Some(&mut binary.first)
                } else if binary.second == old {
                    Some(&mut binary.second)
                } else {
                    None
                }
            },
            NodeKind::Differential { function, .. } => Some(function).filter(|id| **id == old),
            NodeKind::Term(children) | NodeKind::Expression(children) => {
                children.iter_mut().find(|id| **id == old)
            },
            _ => None,
        };
        match slot {
            Some(slot) => {
                *slot = new;
                true
            },
            None => false,
        }
    }
}

/// A node of the expression tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// What the node is.
    pub kind: NodeKind,

    /// True if the node is positive.
    pub sign: bool,

    /// The multiplicity of the node: the power its value is raised to.
    pub nth: i32,

    /// The node containing this one, if any.
    pub parent: Option<NodeId>,

    /// The selection state of the node.
    pub select: Select,

    /// The layout box of the node.
    pub frame: Frame,
}

impl Node {
    /// Creates a positive, unselected node with multiplicity 1.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            sign: true,
            nth: 1,
            parent: None,
            select: Select::None,
            frame: Frame::default(),
        }
    }

    /// Returns true if the node is a [`NodeKind::Term`].
    pub fn is_term(&self) -> bool {
        matches!(self.kind, NodeKind::Term(_))
    }

    /// Returns true if the node is a [`NodeKind::Expression`].
    pub fn is_expression(&self) -> bool {
        matches!(self.kind, NodeKind::Expression(_))
    }

    /// Returns true if the node is a [`NodeKind::Input`].
    pub fn is_input(&self) -> bool {
        matches!(self.kind, NodeKind::Input { .. })
    }

    /// Returns true if the node is a [`NodeKind::Number`].
    pub fn is_number(&self) -> bool {
        matches!(self.kind, NodeKind::Number { .. })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn select_names() {
        for select in [Select::None, Select::Start, Select::End, Select::All] {
            assert_eq!(Select::from_name(select.name()), Some(select));
        }
        assert_eq!(Select::from_name("start"), None);
    }

    #[test]
    fn frames() {
        let outer = Frame { x: 0, y: 0, width: 10, height: 3, base: 1 };
        let inner = Frame { x: 2, y: 1, width: 3, height: 1, base: 0 };
        assert!(inner.inside(&outer));
        assert!(!outer.inside(&inner));
        assert!(outer.intersects(&inner));
        assert!(outer.contains(9, 2));
        assert!(!outer.contains(10, 2));
    }

    #[test]
    fn replace_binary_operand() {
        let mut kind = NodeKind::Power(Binary { first: NodeId(1), second: NodeId(2) });
        assert!(kind.replace_child(NodeId(2), NodeId(7)));
        assert!(!kind.replace_child(NodeId(3), NodeId(8)));
        assert_eq!(kind.children(), vec![NodeId(1), NodeId(7)]);
    }
}
