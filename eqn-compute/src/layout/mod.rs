//! Layout of an equation for drawing.
//!
//! Layout runs in two passes over the tree. [`calc_size`] works bottom-up, storing each node's
//! width, height and base line in its [`Frame`]. [`calc_origin`] then works top-down, placing each
//! node relative to its parent. [`layout`] runs both passes from the root.
//!
//! Once an equation is laid out, [`find_node`] and [`find_node_box`] map drawing coordinates
//! back to nodes.
//!
//! ```
//! use eqn_compute::layout::{find_node, layout, CharMeasure};
//! use eqn_parser::tree::{node::NodeKind, Equation};
//!
//! let mut eqn = Equation::parse("a/b").unwrap();
//! let frame = layout(&mut eqn, &CharMeasure);
//! assert_eq!((frame.width, frame.height), (1, 3));
//!
//! let hit = find_node(&eqn, 0, 2).unwrap();
//! assert_eq!(eqn[hit].kind, NodeKind::Variable('b'));
//! ```

pub mod measure;

use eqn_parser::tree::{
    fmt::fmt_number,
    node::{Binary, Frame, NodeId, NodeKind},
    Equation,
};

pub use measure::{CharMeasure, Measure};

/// Space taken around a node's own content by its parentheses, sign and multiplicity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Decoration {
    /// Width before the content: `(` and a `-` sign.
    lead: i32,

    /// Width after the content: `)` and the multiplicity.
    trail: i32,

    /// Height above the content, taken up by the multiplicity.
    raise: i32,
}

/// Returns true if the node is drawn inside parentheses.
fn parenthesized(eqn: &Equation, id: NodeId) -> bool {
    let node = &eqn[id];
    match &node.kind {
        // the sign of a term is drawn by its expression
        NodeKind::Term(_) => node.nth != 1,
        NodeKind::Expression(terms) => {
            if !node.sign || node.nth != 1 {
                return true;
            }
            match eqn.parent(id).map(|parent| &eqn[parent].kind) {
                Some(NodeKind::Term(_) | NodeKind::Function { .. } | NodeKind::Differential { .. }) => true,
                Some(NodeKind::Power(binary)) if binary.first == id => {
                    terms.len() > 1 || terms.iter().any(|term| eqn.factors(*term).len() > 1)
                },
                _ => false,
            }
        },
        NodeKind::Divide(_) | NodeKind::Power(_) => !node.sign || node.nth != 1,
        _ => !node.sign,
    }
}

fn decoration(eqn: &Equation, id: NodeId, measure: &dyn Measure) -> Decoration {
    let node = &eqn[id];
    let mut deco = Decoration::default();
    if parenthesized(eqn, id) {
        deco.lead += measure.char_width('(');
        if !node.sign {
            deco.lead += measure.char_width('-');
        }
        deco.trail += measure.char_width(')');
    }
    if node.nth != 1 {
        deco.trail += measure.text_width(&node.nth.to_string());
        deco.raise = (measure.text_height() + 1) / 2;
    }
    deco
}

/// The width of the sign drawn before a term of an expression. A positive first term has no
/// sign drawn.
fn sign_width(eqn: &Equation, index: usize, term: NodeId, measure: &dyn Measure) -> i32 {
    if index == 0 && eqn[term].sign {
        0
    } else {
        measure.char_width('-')
    }
}

fn leaf(width: i32, measure: &dyn Measure) -> Frame {
    Frame { width, height: measure.text_height(), ..Frame::default() }
}

/// Sizes a row of nodes set side by side on a shared base line.
fn row_size(
    eqn: &mut Equation,
    ids: &[NodeId],
    measure: &dyn Measure,
    gap: fn(&Equation, usize, NodeId, &dyn Measure) -> i32,
) -> Frame {
    let (mut width, mut base, mut below) = (0, 0, 0);
    for (i, id) in ids.iter().enumerate() {
        width += gap(eqn, i, *id, measure);
        let frame = calc_size(eqn, *id, measure);
        width += frame.width;
        base = base.max(frame.base);
        below = below.max(frame.height - frame.base);
    }
    Frame { width, height: base + below, base, ..Frame::default() }
}

/// Computes the size and base line of the subtree rooted at the node, storing them in the
/// frames of every node of the subtree. The origins of the frames are reset to zero.
pub fn calc_size(eqn: &mut Equation, id: NodeId, measure: &dyn Measure) -> Frame {
    let inner = match eqn[id].kind.clone() {
        NodeKind::Number { value, integer } => {
            leaf(measure.text_width(&fmt_number(value, integer)), measure)
        },
        NodeKind::Variable(name) | NodeKind::Constant(name) => leaf(measure.char_width(name), measure),
        NodeKind::Input { text, .. } => {
            leaf(measure.text_width(&text) + measure.char_width('?'), measure)
        },
        NodeKind::Function { name, arg } => {
            let arg = calc_size(eqn, arg, measure);
            Frame {
                width: measure.text_width(&name) + arg.width,
                height: arg.height,
                base: arg.base,
                ..Frame::default()
            }
        },
        NodeKind::Divide(Binary { first, second }) => {
            let first = calc_size(eqn, first, measure);
            let second = calc_size(eqn, second, measure);
            let line = measure.divide_line_height();
            Frame {
                width: first.width.max(second.width),
                height: first.height + line + second.height,
                base: first.height + line / 2,
                ..Frame::default()
            }
        },
        NodeKind::Power(Binary { first, second }) => {
            let first = calc_size(eqn, first, measure);
            let second = calc_size(eqn, second, measure);
            let lift = (second.height - measure.text_height() / 2).max(0);
            Frame {
                width: first.width + second.width,
                height: lift + first.height,
                base: lift + first.base,
                ..Frame::default()
            }
        },
        NodeKind::Differential { variable, function } => {
            let function = calc_size(eqn, function, measure);
            let glyph_base = measure.differential_base(variable);
            let base = glyph_base.max(function.base);
            let below = (measure.differential_height(variable) - glyph_base)
                .max(function.height - function.base);
            Frame {
                width: measure.differential_width(variable) + function.width,
                height: base + below,
                base,
                ..Frame::default()
            }
        },
        NodeKind::Term(factors) => row_size(eqn, &factors, measure, |_, _, _, _| 0),
        NodeKind::Expression(terms) => row_size(eqn, &terms, measure, sign_width),
    };

    let deco = decoration(eqn, id, measure);
    let frame = Frame {
        x: 0,
        y: 0,
        width: inner.width + deco.lead + deco.trail,
        height: inner.height + deco.raise,
        base: inner.base + deco.raise,
    };
    eqn[id].frame = frame;
    frame
}

/// Places a row of nodes side by side on a shared base line.
fn row_origin(
    eqn: &mut Equation,
    ids: &[NodeId],
    (x, y, base): (i32, i32, i32),
    measure: &dyn Measure,
    gap: fn(&Equation, usize, NodeId, &dyn Measure) -> i32,
) {
    let mut x = x;
    for (i, id) in ids.iter().enumerate() {
        x += gap(eqn, i, *id, measure);
        let frame = eqn[*id].frame;
        calc_origin(eqn, *id, x, y + base - frame.base, measure);
        x += frame.width;
    }
}

/// Places the subtree rooted at the node with its top left corner at `(x, y)`. The subtree must
/// have been sized with [`calc_size`] first.
pub fn calc_origin(eqn: &mut Equation, id: NodeId, x: i32, y: i32, measure: &dyn Measure) {
    let deco = decoration(eqn, id, measure);
    let frame = {
        let frame = &mut eqn[id].frame;
        frame.x = x;
        frame.y = y;
        *frame
    };

    // the box of the node's own content, inside its decoration
    let x = x + deco.lead;
    let y = y + deco.raise;
    let base = frame.base - deco.raise;
    let width = frame.width - deco.lead - deco.trail;

    match eqn[id].kind.clone() {
        NodeKind::Number { .. }
            | NodeKind::Variable(_)
            | NodeKind::Constant(_)
            | NodeKind::Input { .. } => {},
        NodeKind::Function { name, arg } => {
            let arg_frame = eqn[arg].frame;
            calc_origin(eqn, arg, x + measure.text_width(&name), y + base - arg_frame.base, measure);
        },
        NodeKind::Divide(Binary { first, second }) => {
            let first_frame = eqn[first].frame;
            let second_frame = eqn[second].frame;
            calc_origin(eqn, first, x + (width - first_frame.width) / 2, y, measure);
            calc_origin(
                eqn,
                second,
                x + (width - second_frame.width) / 2,
                y + first_frame.height + measure.divide_line_height(),
                measure,
            );
        },
        NodeKind::Power(Binary { first, second }) => {
            let first_frame = eqn[first].frame;
            calc_origin(eqn, first, x, y + base - first_frame.base, measure);
            calc_origin(eqn, second, x + first_frame.width, y, measure);
        },
        NodeKind::Differential { variable, function } => {
            let function_frame = eqn[function].frame;
            calc_origin(
                eqn,
                function,
                x + measure.differential_width(variable),
                y + base - function_frame.base,
                measure,
            );
        },
        NodeKind::Term(factors) => row_origin(eqn, &factors, (x, y, base), measure, |_, _, _, _| 0),
        NodeKind::Expression(terms) => row_origin(eqn, &terms, (x, y, base), measure, sign_width),
    }
}

/// Lays out the whole equation with its top left corner at the origin, and returns the frame of
/// the root.
pub fn layout(eqn: &mut Equation, measure: &dyn Measure) -> Frame {
    let root = eqn.root();
    calc_size(eqn, root, measure);
    calc_origin(eqn, root, 0, 0, measure);
    eqn[root].frame
}

/// Returns the leaf node drawn at the point, if any.
pub fn find_node(eqn: &Equation, x: i32, y: i32) -> Option<NodeId> {
    find_point(eqn, eqn.root(), x, y)
}

fn find_point(eqn: &Equation, id: NodeId, x: i32, y: i32) -> Option<NodeId> {
    let node = eqn.get(id)?;
    if !node.frame.contains(x, y) {
        return None;
    }
    if node.kind.is_leaf() {
        return Some(id);
    }
    eqn.children(id)
        .into_iter()
        .find_map(|child| find_point(eqn, child, x, y))
}

/// Returns the first node, in pre-order, that is drawn entirely inside the area.
pub fn find_node_box(eqn: &Equation, area: &Frame) -> Option<NodeId> {
    find_area(eqn, eqn.root(), area)
}

fn find_area(eqn: &Equation, id: NodeId, area: &Frame) -> Option<NodeId> {
    let node = eqn.get(id)?;
    if node.frame.inside(area) {
        return Some(id);
    }
    if !node.frame.intersects(area) {
        return None;
    }
    eqn.children(id)
        .into_iter()
        .find_map(|child| find_area(eqn, child, area))
}
