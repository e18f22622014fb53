//! Forward-only node event sources.
//!
//! A cursor yields the [`NodeEvent`]s of one document in document order. The
//! diff engine reads two cursors in lock-step and never looks at whitespace
//! itself: [`WhitespaceCursor`] decides which text nodes it gets to see.

pub mod reader;
pub mod tree;
pub mod whitespace;

pub use reader::ReaderCursor;
pub use tree::TreeCursor;
pub use whitespace::WhitespaceCursor;

use crate::event::NodeEvent;
use crate::parser::ParseError;

/// A lazy, forward-only sequence of node events.
pub trait NodeCursor {
    /// Return the next event, `None` once the document is exhausted.
    fn advance(&mut self) -> Result<Option<NodeEvent>, ParseError>;
}

impl<C: NodeCursor + ?Sized> NodeCursor for &mut C {
    fn advance(&mut self) -> Result<Option<NodeEvent>, ParseError> {
        (**self).advance()
    }
}

impl<C: NodeCursor + ?Sized> NodeCursor for Box<C> {
    fn advance(&mut self) -> Result<Option<NodeEvent>, ParseError> {
        (**self).advance()
    }
}

/// Collect every remaining event of `cursor`.
pub fn collect_events(cursor: &mut dyn NodeCursor) -> Result<Vec<NodeEvent>, ParseError> {
    let mut events = Vec::new();
    while let Some(event) = cursor.advance()? {
        events.push(event);
    }
    Ok(events)
}
