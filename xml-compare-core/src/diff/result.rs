use serde::Serialize;

use crate::diff::difference::Difference;

/// What the engine should do after recording a difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Abort,
}

impl Flow {
    pub fn is_abort(self) -> bool {
        self == Flow::Abort
    }
}

/// Outcome of one comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    identical: bool,
    equal: bool,
    differences: Vec<Difference>,
}

impl Default for DiffResult {
    fn default() -> Self {
        Self {
            identical: true,
            equal: true,
            differences: Vec::new(),
        }
    }
}

impl DiffResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// No differences of any kind were found.
    pub fn identical(&self) -> bool {
        self.identical
    }

    /// No major differences were found.
    pub fn equal(&self) -> bool {
        self.equal
    }

    /// Every recorded difference, in the order found.
    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }

    pub fn last_difference(&self) -> Option<&Difference> {
        self.differences.last()
    }

    /// Record `difference` and report whether comparison may continue.
    pub fn record_difference(&mut self, difference: Difference) -> Flow {
        self.identical = false;
        let flow = if difference.is_major() {
            self.equal = false;
            Flow::Abort
        } else {
            Flow::Continue
        };
        self.differences.push(difference);
        flow
    }
}

#[cfg(test)]
mod tests {
    use super::{DiffResult, Flow};
    use crate::diff::difference::{Difference, DifferenceKind};
    use crate::event::NodeType;

    fn element_difference(kind: DifferenceKind) -> Difference {
        Difference::new(kind, Some(NodeType::Element), Some(NodeType::Element))
    }

    #[test]
    fn new_result_is_equal_and_identical() {
        let result = DiffResult::new();
        assert!(result.identical());
        assert!(result.equal());
        assert!(result.last_difference().is_none());
    }

    #[test]
    fn major_difference_breaks_both_and_aborts() {
        let mut result = DiffResult::new();
        let flow = result.record_difference(element_difference(
            DifferenceKind::ElementTagNameMismatch,
        ));
        assert_eq!(flow, Flow::Abort);
        assert!(!result.identical());
        assert!(!result.equal());
    }

    #[test]
    fn minor_difference_only_breaks_identity() {
        let mut result = DiffResult::new();
        let difference = element_difference(DifferenceKind::AttributeSequenceMismatch);
        let flow = result.record_difference(difference);
        assert_eq!(flow, Flow::Continue);
        assert!(!result.identical());
        assert!(result.equal());
        assert_eq!(result.last_difference(), Some(&difference));
    }
}
