//! A cursor over the factors of an expression.
//!
//! A [`FactorCursor`] addresses one factor of one [`NodeKind::Expression`] by the index of its
//! term and its index within that term. Moving the cursor flows across term boundaries: after
//! the last factor of one term comes the first factor of the next. This flattens the two levels
//! of an expression into one sequence, which is what most editing commands want.
//!
//! The cursor has one position past the last factor, its *end*, which is addressed as
//! `(last term, number of factors in the last term)`. The cursor never rests between two terms:
//! a position one past the last factor of any other term is moved to the start of the following
//! term.
//!
//! Like [`NodeCursor`](super::NodeCursor), the cursor does not borrow the equation. A cursor
//! should not be used after the expression it points into was changed through something other
//! than the cursor itself.
//!
//! [`NodeKind::Expression`]: super::node::NodeKind::Expression

use eqn_error::Error;
use std::cmp::Ordering;
use super::{
    error::{
        BackwardRange,
        BadSplit,
        DifferentExpressions,
        EmptyExpression,
        NoNextTerm,
        NotAFactor,
        PastBegin,
        PastEnd,
    },
    node::NodeId,
    Equation,
};

/// A position among the factors of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorCursor {
    /// The expression the cursor walks.
    expr: NodeId,

    /// The index of the term.
    term: usize,

    /// The index of the factor within the term.
    factor: usize,
}

impl PartialOrd for FactorCursor {
    /// Cursors order by term index, then factor index. Cursors over different expressions are
    /// unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.expr != other.expr {
            return None;
        }
        Some((self.term, self.factor).cmp(&(other.term, other.factor)))
    }
}

impl FactorCursor {
    /// Creates a cursor on the first factor of the expression.
    pub fn new(expr: NodeId) -> Self {
        Self { expr, term: 0, factor: 0 }
    }

    /// Creates a cursor on the first factor of the expression.
    pub fn begin(expr: NodeId) -> Self {
        Self::new(expr)
    }

    /// Creates a cursor on the given factor. The node must be a factor of a term of an
    /// expression.
    pub fn at(eqn: &Equation, node: NodeId) -> Result<Self, Error> {
        let not_a_factor = || Error::unspanned(NotAFactor);
        let (term, factor) = eqn.position(node).ok_or_else(not_a_factor)?;
        if !eqn.node(term)?.is_term() {
            return Err(not_a_factor());
        }
        let (expr, term) = eqn.position(term).ok_or_else(not_a_factor)?;
        if !eqn.node(expr)?.is_expression() {
            return Err(not_a_factor());
        }
        Ok(Self { expr, term, factor })
    }

    /// Creates a cursor at the end of the expression, one past its last factor.
    pub fn end(eqn: &Equation, expr: NodeId) -> Self {
        let terms = eqn.terms(expr);
        let term = terms.len().saturating_sub(1);
        let factor = terms.last().map_or(0, |last| eqn.factors(*last).len());
        Self { expr, term, factor }
    }

    /// Creates a cursor on the last factor of the expression.
    pub fn last(eqn: &Equation, expr: NodeId) -> Self {
        let mut cursor = Self::end(eqn, expr);
        cursor.factor = cursor.factor.saturating_sub(1);
        cursor
    }

    /// The expression the cursor walks.
    pub fn expression(&self) -> NodeId {
        self.expr
    }

    /// The index of the cursor's term.
    pub fn term_index(&self) -> usize {
        self.term
    }

    /// The index of the cursor's factor within its term.
    pub fn factor_index(&self) -> usize {
        self.factor
    }

    /// The term the cursor is in.
    pub fn term(&self, eqn: &Equation) -> Result<NodeId, Error> {
        eqn.terms(self.expr)
            .get(self.term)
            .copied()
            .ok_or_else(|| Error::unspanned(PastEnd))
    }

    /// The factor the cursor is on. Fails with a range error at the end.
    pub fn get(&self, eqn: &Equation) -> Result<NodeId, Error> {
        let term = self.term(eqn)?;
        eqn.factors(term)
            .get(self.factor)
            .copied()
            .ok_or_else(|| Error::unspanned(PastEnd))
    }

    /// Returns true if the cursor is on the first factor.
    pub fn is_begin(&self) -> bool {
        self.term == 0 && self.factor == 0
    }

    /// Returns true if the cursor is on the first factor of its term.
    pub fn is_begin_term(&self) -> bool {
        self.factor == 0
    }

    /// Returns true if the cursor is at the end of the expression.
    pub fn is_end(&self, eqn: &Equation) -> bool {
        let terms = eqn.terms(self.expr);
        match terms.len().checked_sub(1) {
            Some(last) => {
                self.term > last
                    || (self.term == last && self.factor >= eqn.factors(terms[last]).len())
            },
            None => true,
        }
    }

    /// Compares two cursors, failing if they walk different expressions.
    pub fn compare(&self, other: &Self) -> Result<Ordering, Error> {
        self.partial_cmp(other).ok_or_else(|| Error::unspanned(DifferentExpressions))
    }

    /// Moves a cursor resting one past the last factor of a term that is not the last term to
    /// the start of the next term.
    fn settle(&mut self, eqn: &Equation) {
        let terms = eqn.terms(self.expr);
        while self.term + 1 < terms.len() && self.factor >= eqn.factors(terms[self.term]).len() {
            self.term += 1;
            self.factor = 0;
        }
    }

    /// Moves the cursor to the next factor, or to the end after the last factor.
    pub fn next(&mut self, eqn: &Equation) -> Result<(), Error> {
        if self.is_end(eqn) {
            return Err(Error::unspanned(PastEnd));
        }
        self.factor += 1;
        self.settle(eqn);
        Ok(())
    }

    /// Moves the cursor to the previous factor.
    pub fn prev(&mut self, eqn: &Equation) -> Result<(), Error> {
        if self.is_begin() {
            return Err(Error::unspanned(PastBegin));
        }
        if self.factor > 0 {
            self.factor -= 1;
        } else {
            self.term -= 1;
            let term = self.term(eqn)?;
            self.factor = eqn.factors(term).len().saturating_sub(1);
        }
        Ok(())
    }

    /// Inserts a detached factor before the cursor. The cursor ends on the new factor.
    pub fn insert(&mut self, eqn: &mut Equation, node: NodeId) -> Result<(), Error> {
        let term = self.term(eqn)?;
        let factors = eqn.factors_mut(term)?;
        let index = self.factor.min(factors.len());
        factors.insert(index, node);
        eqn.node_mut(node)?.parent = Some(term);
        self.factor = index;
        Ok(())
    }

    /// Inserts a detached factor after the cursor. The cursor does not move.
    pub fn insert_after(&mut self, eqn: &mut Equation, node: NodeId) -> Result<(), Error> {
        let term = self.term(eqn)?;
        let factors = eqn.factors_mut(term)?;
        let index = (self.factor + 1).min(factors.len());
        factors.insert(index, node);
        eqn.node_mut(node)?.parent = Some(term);
        Ok(())
    }

    /// Inserts a detached term before the cursor's term. The cursor moves to the first factor of
    /// the new term.
    pub fn insert_term(&mut self, eqn: &mut Equation, term: NodeId) -> Result<(), Error> {
        let terms = eqn.terms_mut(self.expr)?;
        let index = self.term.min(terms.len());
        terms.insert(index, term);
        eqn.node_mut(term)?.parent = Some(self.expr);
        self.term = index;
        self.factor = 0;
        Ok(())
    }

    /// Inserts a detached term after the cursor's term. The cursor does not move.
    pub fn insert_term_after(&mut self, eqn: &mut Equation, term: NodeId) -> Result<(), Error> {
        let terms = eqn.terms_mut(self.expr)?;
        let index = (self.term + 1).min(terms.len());
        terms.insert(index, term);
        eqn.node_mut(term)?.parent = Some(self.expr);
        Ok(())
    }

    /// Removes the term at `index` from the expression after it has been emptied, and frees it.
    fn remove_term(&mut self, eqn: &mut Equation, index: usize) -> Result<(), Error> {
        let term = eqn.terms_mut(self.expr)?.remove(index);
        eqn.free(term);

        let len = eqn.terms(self.expr).len();
        if self.term >= len {
            *self = Self::end(eqn, self.expr);
        } else {
            self.factor = 0;
        }
        Ok(())
    }

    /// Removes and frees the factor at the cursor. If that empties the term, the term is removed
    /// too. The cursor ends on the factor that followed the removed one.
    ///
    /// Removing the only factor of the only term is a logic error, detected before anything is
    /// changed.
    pub fn erase(&mut self, eqn: &mut Equation) -> Result<(), Error> {
        let node = self.get(eqn)?;
        let term = self.term(eqn)?;
        if eqn.factors(term).len() == 1 && eqn.terms(self.expr).len() == 1 {
            return Err(Error::unspanned(EmptyExpression));
        }

        eqn.factors_mut(term)?.remove(self.factor);
        eqn.free(node);

        if eqn.factors(term).is_empty() {
            self.remove_term(eqn, self.term)?;
        }
        self.settle(eqn);
        Ok(())
    }

    /// Removes and frees every factor from the cursor up to and including `end`. The terms the
    /// range spans are merged into the cursor's term first.
    ///
    /// `end` must walk the same expression, must not come before the cursor, and must be on a
    /// factor. Removing every factor of the expression is a logic error. All of these are
    /// checked before anything is changed.
    pub fn erase_range(&mut self, eqn: &mut Equation, end: &FactorCursor) -> Result<(), Error> {
        if self.compare(end)? == Ordering::Greater {
            return Err(Error::unspanned(BackwardRange));
        }
        if end.is_end(eqn) {
            return Err(Error::unspanned(PastEnd));
        }
        let terms = eqn.terms(self.expr);
        let last_term = terms.len() - 1;
        let last_len = eqn.factors(terms[last_term]).len();
        if self.is_begin() && end.term == last_term && end.factor + 1 == last_len {
            return Err(Error::unspanned(EmptyExpression));
        }

        // index of `end` once the spanned terms are merged into this one
        let end_index = terms[self.term..end.term]
            .iter()
            .map(|term| eqn.factors(*term).len())
            .sum::<usize>()
            + end.factor;
        for _ in self.term..end.term {
            self.merge_next_term(eqn)?;
        }

        let term = self.term(eqn)?;
        let removed = eqn.factors_mut(term)?
            .drain(self.factor..=end_index)
            .collect::<Vec<_>>();
        for node in removed {
            eqn.free(node);
        }

        if eqn.factors(term).is_empty() {
            self.remove_term(eqn, self.term)?;
        }
        self.settle(eqn);
        Ok(())
    }

    /// Puts a detached node in place of the factor at the cursor, and frees the old factor.
    pub fn replace(&mut self, eqn: &mut Equation, node: NodeId) -> Result<(), Error> {
        let old = self.exchange(eqn, node)?;
        eqn.free(old);
        Ok(())
    }

    /// Puts a detached node in place of the factor at the cursor, and returns the old factor,
    /// now detached.
    pub fn exchange(&mut self, eqn: &mut Equation, node: NodeId) -> Result<NodeId, Error> {
        let old = self.get(eqn)?;
        eqn.replace_child(old, node)?;
        Ok(old)
    }

    /// Puts a detached term in place of the cursor's term, and frees the old term. The cursor
    /// moves to the first factor of the new term.
    pub fn replace_term(&mut self, eqn: &mut Equation, term: NodeId) -> Result<(), Error> {
        let old = self.term(eqn)?;
        eqn.replace_child(old, term)?;
        eqn.free(old);
        self.factor = 0;
        Ok(())
    }

    /// Cuts the cursor's term in two. The factors from the cursor on are moved into a new,
    /// detached term, which is returned. The new term is negative if `negate` is true. The cursor
    /// ends on the last factor left in its term.
    ///
    /// The cursor must be on a factor other than the first of its term.
    pub fn split_term(&mut self, eqn: &mut Equation, negate: bool) -> Result<NodeId, Error> {
        let term = self.term(eqn)?;
        let len = eqn.factors(term).len();
        if self.factor == 0 || self.factor >= len {
            return Err(Error::unspanned(BadSplit));
        }

        let moved = eqn.factors_mut(term)?.split_off(self.factor);
        let new_term = eqn.term(moved);
        eqn.node_mut(new_term)?.sign = !negate;
        self.factor -= 1;
        Ok(new_term)
    }

    /// Moves the factors of the next term onto the end of the cursor's term, and removes the
    /// next term. The cursor does not move.
    pub fn merge_next_term(&mut self, eqn: &mut Equation) -> Result<(), Error> {
        let term = self.term(eqn)?;
        let next = eqn.terms(self.expr)
            .get(self.term + 1)
            .copied()
            .ok_or_else(|| Error::unspanned(NoNextTerm))?;

        let moved = std::mem::take(eqn.factors_mut(next)?);
        eqn.adopt(term, &moved);
        eqn.factors_mut(term)?.extend(moved);
        eqn.terms_mut(self.expr)?.remove(self.term + 1);
        eqn.free(next);
        Ok(())
    }

    /// Exchanges the factors at two cursors.
    pub fn swap(eqn: &mut Equation, a: &FactorCursor, b: &FactorCursor) -> Result<(), Error> {
        let first = a.get(eqn)?;
        let second = b.get(eqn)?;
        if first == second {
            return Ok(());
        }
        let first_term = a.term(eqn)?;
        let second_term = b.term(eqn)?;

        eqn.factors_mut(first_term)?[a.factor] = second;
        eqn.factors_mut(second_term)?[b.factor] = first;
        eqn.node_mut(first)?.parent = Some(second_term);
        eqn.node_mut(second)?.parent = Some(first_term);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::tree::node::NodeKind;

    fn letter(eqn: &Equation, id: NodeId) -> char {
        match eqn[id].kind {
            NodeKind::Variable(name) | NodeKind::Constant(name) => name,
            _ => '?',
        }
    }

    #[test]
    fn walk_across_terms() {
        let eqn = Equation::parse("ab-c+d").unwrap();
        let mut cursor = FactorCursor::new(eqn.root());
        let mut seen = String::new();
        while !cursor.is_end(&eqn) {
            seen.push(letter(&eqn, cursor.get(&eqn).unwrap()));
            cursor.next(&eqn).unwrap();
        }
        assert_eq!(seen, "abcd");
        assert_eq!(cursor, FactorCursor::end(&eqn, eqn.root()));
        assert!(cursor.next(&eqn).unwrap_err().is_range());
        assert!(cursor.get(&eqn).unwrap_err().is_range());

        let mut seen = String::new();
        while cursor.prev(&eqn).is_ok() {
            seen.push(letter(&eqn, cursor.get(&eqn).unwrap()));
        }
        assert_eq!(seen, "dcba");
        assert!(cursor.is_begin());
    }

    #[test]
    fn cursor_at_node() {
        let eqn = Equation::parse("ab-c").unwrap();
        let c = eqn.factors(eqn.terms(eqn.root())[1])[0];
        let cursor = FactorCursor::at(&eqn, c).unwrap();
        assert_eq!((cursor.term_index(), cursor.factor_index()), (1, 0));
        assert!(cursor.is_begin_term());

        let term = eqn.terms(eqn.root())[1];
        assert!(FactorCursor::at(&eqn, term).unwrap_err().is_logic());
    }

    #[test]
    fn insert_before_and_after() {
        let mut eqn = Equation::parse("ac").unwrap();
        let mut cursor = FactorCursor::new(eqn.root());
        cursor.next(&eqn).unwrap();
        let b = eqn.variable('b');
        cursor.insert(&mut eqn, b).unwrap();
        assert_eq!(cursor.get(&eqn).unwrap(), b);
        let d = eqn.variable('d');
        cursor.insert_after(&mut eqn, d).unwrap();
        assert_eq!(cursor.get(&eqn).unwrap(), b);
        assert_eq!(eqn.to_string(), "(+abdc)");
        assert_eq!(eqn.parent(d), Some(cursor.term(&eqn).unwrap()));
    }

    #[test]
    fn insert_terms() {
        let mut eqn = Equation::parse("a").unwrap();
        let mut cursor = FactorCursor::new(eqn.root());
        let b = eqn.variable('b');
        let term = eqn.term(vec![b]);
        eqn[term].sign = false;
        cursor.insert_term_after(&mut eqn, term).unwrap();
        assert_eq!(eqn.to_string(), "(+a-b)");
        assert_eq!(cursor.term_index(), 0);

        let z = eqn.variable('z');
        let term = eqn.term(vec![z]);
        cursor.insert_term(&mut eqn, term).unwrap();
        assert_eq!(eqn.to_string(), "(+z+a-b)");
        assert_eq!(cursor.get(&eqn).unwrap(), z);
    }

    #[test]
    fn erase_removes_empty_term() {
        let mut eqn = Equation::parse("a+b+c").unwrap();
        let mut cursor = FactorCursor::new(eqn.root());
        cursor.next(&eqn).unwrap();
        cursor.erase(&mut eqn).unwrap();
        assert_eq!(eqn.to_string(), "(+a+c)");
        assert_eq!(letter(&eqn, cursor.get(&eqn).unwrap()), 'c');

        cursor.erase(&mut eqn).unwrap();
        assert_eq!(eqn.to_string(), "(+a)");
        assert!(cursor.is_end(&eqn));
    }

    #[test]
    fn erase_last_factor_fails() {
        let mut eqn = Equation::parse("a").unwrap();
        let mut cursor = FactorCursor::new(eqn.root());
        let err = cursor.erase(&mut eqn).unwrap_err();
        assert!(err.is_logic());
        assert_eq!(eqn.to_string(), "(+a)");
    }

    #[test]
    fn erase_range_merges_terms() {
        let mut eqn = Equation::parse("ab+cd-ef").unwrap();
        let root = eqn.root();
        let mut start = FactorCursor::new(root);
        start.next(&eqn).unwrap();
        let mut end = start;
        for _ in 0..3 {
            end.next(&eqn).unwrap();
        }
        assert_eq!(letter(&eqn, end.get(&eqn).unwrap()), 'e');

        start.erase_range(&mut eqn, &end).unwrap();
        assert_eq!(eqn.to_string(), "(+af)");
        assert_eq!(letter(&eqn, start.get(&eqn).unwrap()), 'f');
    }

    #[test]
    fn erase_range_checks() {
        let mut eqn = Equation::parse("a+b").unwrap();
        let root = eqn.root();
        let mut begin = FactorCursor::new(root);
        let last = FactorCursor::last(&eqn, root);
        assert!(begin.erase_range(&mut eqn, &last).unwrap_err().is_logic());

        let mut last_copy = last;
        assert!(last_copy.erase_range(&mut eqn, &begin).unwrap_err().is_logic());

        let end = FactorCursor::end(&eqn, root);
        assert!(begin.erase_range(&mut eqn, &end).unwrap_err().is_range());

        let foreign = FactorCursor::new(NodeId(root.index() + 100));
        assert!(begin.erase_range(&mut eqn, &foreign).unwrap_err().is_logic());
        assert_eq!(eqn.to_string(), "(+a+b)");
    }

    #[test]
    fn split_and_merge() {
        let mut eqn = Equation::parse("abc").unwrap();
        let root = eqn.root();
        let mut cursor = FactorCursor::new(root);
        assert!(cursor.split_term(&mut eqn, true).unwrap_err().is_logic());

        cursor.next(&eqn).unwrap();
        cursor.next(&eqn).unwrap();
        let rest = cursor.split_term(&mut eqn, true).unwrap();
        assert_eq!(letter(&eqn, cursor.get(&eqn).unwrap()), 'b');
        assert!(!eqn[rest].sign);
        cursor.insert_term_after(&mut eqn, rest).unwrap();
        assert_eq!(eqn.to_string(), "(+ab-c)");

        cursor.merge_next_term(&mut eqn).unwrap();
        assert_eq!(eqn.to_string(), "(+abc)");
        assert!(cursor.merge_next_term(&mut eqn).unwrap_err().is_range());
    }

    #[test]
    fn replace_and_exchange() {
        let mut eqn = Equation::parse("ab").unwrap();
        let mut cursor = FactorCursor::new(eqn.root());
        let x = eqn.variable('x');
        let old = cursor.exchange(&mut eqn, x).unwrap();
        assert_eq!(letter(&eqn, old), 'a');
        assert_eq!(eqn.parent(old), None);
        let y = eqn.variable('y');
        cursor.replace(&mut eqn, y).unwrap();
        assert_eq!(eqn.to_string(), "(+yb)");
        assert!(eqn.get(x).is_none());
    }

    #[test]
    fn swap_across_terms() {
        let mut eqn = Equation::parse("ab+c").unwrap();
        let root = eqn.root();
        let a = FactorCursor::new(root);
        let c = FactorCursor::last(&eqn, root);
        FactorCursor::swap(&mut eqn, &a, &c).unwrap();
        assert_eq!(eqn.to_string(), "(+cb+a)");
        let term = a.term(&eqn).unwrap();
        assert_eq!(eqn.parent(a.get(&eqn).unwrap()), Some(term));
    }

    #[test]
    fn ordering() {
        let eqn = Equation::parse("a+b").unwrap();
        let begin = FactorCursor::new(eqn.root());
        let end = FactorCursor::end(&eqn, eqn.root());
        assert!(begin < end);
        assert_eq!(begin.compare(&end).unwrap(), Ordering::Less);

        let other = FactorCursor::new(NodeId(eqn.root().index() + 1));
        assert_eq!(begin.partial_cmp(&other), None);
        assert!(begin.compare(&other).unwrap_err().is_logic());
    }
}
