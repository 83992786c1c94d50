//! Editing commands on an [`Equation`]: typing into inputs, inserting text, selecting, and the
//! structural commands that turn part of a term into a division or a power.
//!
//! Every command either completes or leaves the equation as it was. Commands that parse text do
//! so into a scratch equation first and only touch the tree once parsing succeeded.

use eqn_error::Error;
use log::debug;
use std::cmp::Ordering;
use super::{
    cursor::FactorCursor,
    error::{BackwardRange, BadInputChar, NoCurrentInput, NoSelection, NoSuchInput, NotAFactor},
    node::{Binary, NodeId, NodeKind, Select},
    Equation,
};

impl Equation {
    /// The input that accepts typed characters, if any.
    pub fn current_input(&self) -> Option<NodeId> {
        self.current
    }

    /// Every input in the equation, in order of creation.
    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    /// Finds the input with the given serial number.
    pub fn find_input(&self, serial: usize) -> Option<NodeId> {
        self.inputs.iter().copied().find(|id| {
            matches!(self.get(*id).map(|node| &node.kind), Some(NodeKind::Input { serial: s, .. }) if *s == serial)
        })
    }

    /// The text typed into an input. Empty if the node is not an input.
    pub fn input_text(&self, id: NodeId) -> &str {
        match self.get(id).map(|node| &node.kind) {
            Some(NodeKind::Input { text, .. }) => text,
            _ => "",
        }
    }

    fn input_text_mut(&mut self, id: NodeId) -> Result<&mut String, Error> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Input { text, .. } => Ok(text),
            _ => Err(Error::unspanned(NoCurrentInput)),
        }
    }

    /// Makes the input current, clearing the flag on the previous current input.
    pub(crate) fn make_current(&mut self, id: NodeId) {
        self.clear_current();
        if let Some(NodeKind::Input { current, .. }) = self.get_mut(id).map(|node| &mut node.kind) {
            *current = true;
            self.current = Some(id);
        }
    }

    /// Leaves the equation without a current input.
    fn clear_current(&mut self) {
        if let Some(old) = self.current.take() {
            if let Some(NodeKind::Input { current, .. }) = self.get_mut(old).map(|node| &mut node.kind) {
                *current = false;
            }
        }
    }

    /// Makes the input with the given serial number current.
    pub fn set_current_input(&mut self, serial: usize) -> Result<NodeId, Error> {
        let id = self.find_input(serial)
            .ok_or_else(|| Error::unspanned(NoSuchInput { serial }))?;
        self.make_current(id);
        Ok(id)
    }

    /// Makes the next input current, in order of creation, wrapping around at either end. If
    /// there is no current input, the first input (or the last, if `reverse` is true) becomes
    /// current. Returns the new current input, or [`None`] if there are no inputs.
    pub fn next_input(&mut self, reverse: bool) -> Option<NodeId> {
        let len = self.inputs.len();
        if len == 0 {
            return None;
        }

        let index = match self.current.and_then(|id| self.inputs.iter().position(|i| *i == id)) {
            Some(index) if reverse => (index + len - 1) % len,
            Some(index) => (index + 1) % len,
            None if reverse => len - 1,
            None => 0,
        };
        let id = self.inputs[index];
        self.make_current(id);
        Some(id)
    }

    /// Appends a character to the current input. A `]` is refused, since it would end the input
    /// in the printed text.
    pub fn input_push(&mut self, c: char) -> Result<(), Error> {
        let current = self.current.ok_or_else(|| Error::unspanned(NoCurrentInput))?;
        if c == ']' {
            return Err(Error::unspanned(BadInputChar { c }));
        }
        self.input_text_mut(current)?.push(c);
        Ok(())
    }

    /// Removes the last character from the current input and returns it.
    pub fn input_pop(&mut self) -> Result<Option<char>, Error> {
        let current = self.current.ok_or_else(|| Error::unspanned(NoCurrentInput))?;
        Ok(self.input_text_mut(current)?.pop())
    }

    /// Copies a subtree of another equation into this one, returning the detached copy. Inputs in
    /// the copy get new serial numbers; an input that was current in `src` becomes current here.
    pub(crate) fn transplant(&mut self, src: &Equation, id: NodeId) -> NodeId {
        let node = &src[id];
        let kind = match &node.kind {
            NodeKind::Input { text, current, .. } => {
                let copy = self.input(text.clone(), *current);
                self[copy].sign = node.sign;
                self[copy].nth = node.nth;
                return copy;
            },
            NodeKind::Function { name, arg } => NodeKind::Function {
                name: name.clone(),
                arg: self.transplant(src, *arg),
            },
            NodeKind::Divide(binary) => NodeKind::Divide(Binary {
                first: self.transplant(src, binary.first),
                second: self.transplant(src, binary.second),
            }),
            NodeKind::Power(binary) => NodeKind::Power(Binary {
                first: self.transplant(src, binary.first),
                second: self.transplant(src, binary.second),
            }),
            NodeKind::Differential { variable, function } => NodeKind::Differential {
                variable: *variable,
                function: self.transplant(src, *function),
            },
            NodeKind::Term(factors) => {
                NodeKind::Term(factors.iter().map(|f| self.transplant(src, *f)).collect())
            },
            NodeKind::Expression(terms) => {
                NodeKind::Expression(terms.iter().map(|t| self.transplant(src, *t)).collect())
            },
            leaf => leaf.clone(),
        };

        let copy = self.alloc_kind(kind);
        self[copy].sign = node.sign;
        self[copy].nth = node.nth;
        copy
    }

    /// Splices a parsed equation in before the cursor. A single positive term is spliced factor
    /// by factor; anything else goes in as one parenthesized factor. The cursor ends on the
    /// factor it was on before.
    fn splice(&mut self, cursor: &mut FactorCursor, scratch: &Equation) -> Result<(), Error> {
        let root = scratch.root();
        let terms = scratch.terms(root);
        let single = terms.len() == 1 && scratch[terms[0]].sign && scratch[terms[0]].nth == 1;

        let nodes = if single {
            scratch.factors(terms[0])
                .iter()
                .map(|factor| self.transplant(scratch, *factor))
                .collect::<Vec<_>>()
        } else {
            vec![self.transplant(scratch, root)]
        };

        for node in nodes {
            cursor.insert(self, node)?;
            cursor.next(self)?;
        }
        Ok(())
    }

    /// Parses `text` and inserts it before the cursor. The cursor ends on the factor it was on
    /// before. If the text does not parse, the equation is not changed.
    pub fn insert(&mut self, cursor: &mut FactorCursor, text: &str) -> Result<(), Error> {
        let scratch = Equation::parse(text)?;
        debug!("inserting {} at {:?}", scratch, cursor);
        self.splice(cursor, &scratch)
    }

    /// Parses the text typed into the input, inserts it before the input, and clears the input.
    /// Returns a cursor on the input.
    pub fn empty_buffer(&mut self, input: NodeId) -> Result<FactorCursor, Error> {
        let text = self.input_text(input).to_string();
        let mut cursor = FactorCursor::at(self, input)?;
        if text.is_empty() {
            return Ok(cursor);
        }

        let scratch = Equation::parse(&text)?;
        self.input_text_mut(input)?.clear();
        self.splice(&mut cursor, &scratch)?;
        Ok(cursor)
    }

    /// Empties the current input's buffer into the tree and leaves the equation without a
    /// current input. The input itself is removed, unless it is the only factor of its
    /// expression.
    ///
    /// Returns a cursor on the factor before the input, or on the factor after it if there is
    /// none before. If the input was kept, the cursor is on the input.
    pub fn disable_current_input(&mut self) -> Result<FactorCursor, Error> {
        let input = self.current.ok_or_else(|| Error::unspanned(NoCurrentInput))?;
        let mut cursor = self.empty_buffer(input)?;
        self.clear_current();

        let term = cursor.term(self)?;
        if self.factors(term).len() == 1 && self.terms(cursor.expression()).len() == 1 {
            return Ok(cursor);
        }

        let had_prev = !cursor.is_begin();
        cursor.erase(self)?;
        if had_prev {
            cursor.prev(self)?;
        }
        Ok(cursor)
    }

    /// Marks a selection. A single node is selected whole when `start` and `end` are the same.
    pub fn set_select(&mut self, start: NodeId, end: NodeId) -> Result<(), Error> {
        self.node(start)?;
        self.node(end)?;
        self.clear_select();

        if start == end {
            self[start].select = Select::All;
        } else {
            self[start].select = Select::Start;
            self[end].select = Select::End;
        }
        self.select_start = Some(start);
        self.select_end = Some(end);
        Ok(())
    }

    /// Removes the selection, if any.
    pub fn clear_select(&mut self) {
        for id in [self.select_start.take(), self.select_end.take()].into_iter().flatten() {
            if let Some(node) = self.get_mut(id) {
                node.select = Select::None;
            }
        }
    }

    /// The first and last selected nodes, which are the same node when it is selected whole.
    pub fn selection(&self) -> Option<(NodeId, NodeId)> {
        Some((self.select_start?, self.select_end?))
    }

    pub(crate) fn mark_select(&mut self, id: NodeId, select: Select) {
        match select {
            Select::None => return,
            Select::Start => self.select_start = Some(id),
            Select::End => self.select_end = Some(id),
            Select::All => {
                self.select_start = Some(id);
                self.select_end = Some(id);
            },
        }
        if let Some(node) = self.get_mut(id) {
            node.select = select;
        }
    }

    /// Replaces the selection with a detached node, and clears the selection.
    ///
    /// A range of factors is erased and the node takes the place of the first one. A term
    /// selected whole becomes a term of just the node; an expression selected whole keeps a
    /// single term holding the node.
    pub fn erase_selection(&mut self, replacement: NodeId) -> Result<(), Error> {
        let (start, end) = self.selection().ok_or_else(|| Error::unspanned(NoSelection))?;

        if start == end {
            self.clear_select();
            let node = self.node(start)?;
            if node.is_term() {
                let term = self.term(vec![replacement]);
                self.replace_child(start, term)?;
                self.free(start);
            } else if node.is_expression() {
                let old = std::mem::take(self.terms_mut(start)?);
                for term in old {
                    self.free(term);
                }
                let term = self.term(vec![replacement]);
                self.terms_mut(start)?.push(term);
                self.node_mut(term)?.parent = Some(start);
            } else {
                FactorCursor::at(self, start)?.replace(self, replacement)?;
            }
            return Ok(());
        }

        let mut first = FactorCursor::at(self, start)?;
        let last = FactorCursor::at(self, end)?;
        if first.expression() != last.expression() {
            return Err(Error::unspanned(NotAFactor));
        }
        if first.compare(&last)? == Ordering::Greater {
            return Err(Error::unspanned(BackwardRange));
        }

        self.clear_select();
        first.insert(self, replacement)?;
        first.next(self)?;
        let last = FactorCursor::at(self, end)?;
        first.erase_range(self, &last)
    }

    /// Turns the current input's term into a division.
    ///
    /// The factors before the input become the numerator, and the input with everything after
    /// it becomes the denominator, so typing continues in the denominator. If the input is the
    /// first factor of its term, an empty input is made the numerator. The division keeps the
    /// sign the term had. Returns the new division.
    pub fn create_divide(&mut self) -> Result<NodeId, Error> {
        let input = self.current.ok_or_else(|| Error::unspanned(NoCurrentInput))?;
        let mut cursor = self.empty_buffer(input)?;
        let upper = cursor.term(self)?;
        let negative = !self[upper].sign;

        if cursor.is_begin_term() {
            let placeholder = self.input(String::new(), false);
            cursor.insert(self, placeholder)?;
            cursor.next(self)?;
        }
        let lower = cursor.split_term(self, false)?;
        self[upper].sign = true;

        let term = self.wrap_in_place(upper, |eqn, upper| {
            let divide = eqn.divide(upper, lower);
            eqn.term(vec![divide])
        })?;
        self[term].sign = !negative;
        debug!("created divide {}", self.text(term));
        Ok(self.factors(term)[0])
    }

    /// Raises a factor to a power whose exponent is a new current input.
    ///
    /// If text was typed into the current input, it is parsed and its last factor becomes the
    /// base. Otherwise the current input itself is the base. Returns the new power.
    pub fn create_power(&mut self) -> Result<NodeId, Error> {
        let input = self.current.ok_or_else(|| Error::unspanned(NoCurrentInput))?;
        let base = if self.input_text(input).is_empty() {
            input
        } else {
            let cursor = self.disable_current_input()?;
            cursor.get(self)?
        };

        let exponent = self.input(String::new(), false);
        let power = self.wrap_in_place(base, |eqn, base| eqn.power(base, exponent))?;
        self.make_current(exponent);
        debug!("created power {}", self.text(power));
        Ok(power)
    }

    /// Splits the current input's term in front of the input, as typing `+` or `-` does. The
    /// input and everything after it move into a new term, which is negative if `negate` is
    /// true. If the input is the first factor of its term, an empty input is left behind.
    pub fn split_at_input(&mut self, negate: bool) -> Result<(), Error> {
        let input = self.current.ok_or_else(|| Error::unspanned(NoCurrentInput))?;
        let mut cursor = self.empty_buffer(input)?;

        if cursor.is_begin_term() {
            let placeholder = self.input(String::new(), false);
            cursor.insert(self, placeholder)?;
            cursor.next(self)?;
        }
        let rest = cursor.split_term(self, negate)?;
        cursor.insert_term_after(self, rest)
    }

    /// Makes an independent copy of the equation by writing it to XML and reading it back.
    pub fn clone_equation(&self) -> Result<Equation, Error> {
        Equation::from_xml(&self.to_xml()?)
    }
}
