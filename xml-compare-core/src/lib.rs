//! Streaming XML comparison.
//!
//! Two documents, a *control* and a *test*, are read node by node in
//! lock-step. Every divergence is classified as a [`Difference`]; differences
//! whose [`DifferenceKind`] is major make the documents unequal and stop the
//! comparison, minor ones (attribute order) only make them non-identical.
//!
//! ```
//! use xml_compare_core::{compare_documents, DiffConfiguration, DifferenceKind, XmlInput};
//!
//! let control = XmlInput::from("<a x='1' y='2'/>");
//! let test = XmlInput::from("<a y='2' x='1'/>");
//! let result = compare_documents(&control, &test, &DiffConfiguration::default())?;
//!
//! assert!(result.equal());
//! assert!(!result.identical());
//! assert_eq!(
//!     result.last_difference().map(|d| d.kind()),
//!     Some(DifferenceKind::AttributeSequenceMismatch)
//! );
//! # Ok::<(), xml_compare_core::CompareError>(())
//! ```
//!
//! Whitespace is handled by the cursors, not the engine: see
//! [`WhitespaceHandling`] and [`cursor::WhitespaceCursor`].

pub mod config;
pub mod cursor;
pub mod diff;
pub mod error;
pub mod event;
pub mod format;
pub mod input;
pub mod parser;
pub mod tree;

pub use config::{DiffConfiguration, WhitespaceHandling};
pub use cursor::{collect_events, NodeCursor};
pub use diff::{
    compare_cursors, compare_documents, DiffResult, Difference, DifferenceKind, Flow, Severity,
    XmlDiff,
};
pub use error::{CompareError, Side};
pub use event::{Attribute, ElementStart, NodeEvent, NodeType};
pub use format::{format_json, format_summary, format_text};
pub use input::XmlInput;
pub use parser::{parse, parse_file, ParseError};
pub use tree::{XmlContent, XmlDocument, XmlNode};
