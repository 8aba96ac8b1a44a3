//! The operand stack shared by one interpreter's whole walk.

use crate::dispatch::Results;
use crate::value::Value;

/// Intermediate expression results.
///
/// Every expression pushes its results; consumers remember the depth before
/// evaluating (`base`) and take everything above it afterwards.
#[derive(Default, Debug)]
pub(crate) struct OperandStack {
    values: Vec<Value>,
}

impl OperandStack {
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub(crate) fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub(crate) fn extend(&mut self, values: impl IntoIterator<Item = Value>) {
        self.values.extend(values);
    }

    /// Remove and return everything above `base`, in push order.
    pub(crate) fn take_from(&mut self, base: usize) -> Results {
        let base = base.min(self.values.len());
        self.values.drain(base..).collect()
    }

    /// Discard everything above `base`.
    #[inline]
    pub(crate) fn truncate(&mut self, base: usize) {
        self.values.truncate(base);
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
    }
}
