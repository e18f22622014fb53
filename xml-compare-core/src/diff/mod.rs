//! Streaming structural comparison.

pub mod difference;
pub mod engine;
pub mod result;

pub use difference::{Difference, DifferenceKind, Severity};
pub use engine::{compare_cursors, compare_documents, XmlDiff};
pub use result::{DiffResult, Flow};
