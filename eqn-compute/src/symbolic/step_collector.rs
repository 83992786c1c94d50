/// Something that records the steps a pass takes, in order.
///
/// Implemented for `()`, which throws the steps away, and for `Vec<S>`, which keeps them.
pub trait StepCollector<S> {
    /// Records one step.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
