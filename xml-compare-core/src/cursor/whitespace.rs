use tracing::trace;

use crate::config::WhitespaceHandling;
use crate::cursor::reader::is_xml_whitespace;
use crate::cursor::NodeCursor;
use crate::event::NodeEvent;
use crate::parser::ParseError;

/// Applies a [`WhitespaceHandling`] policy to the text events of another cursor.
pub struct WhitespaceCursor<C> {
    inner: C,
    handling: WhitespaceHandling,
    // One entry per open element: whether `xml:space="preserve"` is in scope.
    preserve: Vec<bool>,
}

impl<C: NodeCursor> WhitespaceCursor<C> {
    pub fn new(inner: C, handling: WhitespaceHandling) -> Self {
        Self {
            inner,
            handling,
            preserve: Vec::new(),
        }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    fn preserving(&self) -> bool {
        self.preserve.last().copied().unwrap_or(false)
    }

    fn track_scope(&mut self, event: &NodeEvent) {
        match event {
            NodeEvent::ElementStart(start) if !start.is_empty => {
                let preserve = match start.xml_space() {
                    Some("preserve") => true,
                    Some("default") => false,
                    _ => self.preserving(),
                };
                self.preserve.push(preserve);
            }
            NodeEvent::ElementEnd => {
                self.preserve.pop();
            }
            _ => {}
        }
    }

    fn filter_text(&self, text: String) -> Option<String> {
        match self.handling {
            WhitespaceHandling::All => Some(text),
            WhitespaceHandling::Significant => {
                if text.chars().all(is_xml_whitespace) && !self.preserving() {
                    None
                } else {
                    Some(text)
                }
            }
            WhitespaceHandling::None => {
                let trimmed = text.trim_matches(is_xml_whitespace);
                if trimmed.is_empty() {
                    None
                } else if trimmed.len() == text.len() {
                    Some(text)
                } else {
                    Some(trimmed.to_string())
                }
            }
        }
    }
}

impl<C: NodeCursor> NodeCursor for WhitespaceCursor<C> {
    fn advance(&mut self) -> Result<Option<NodeEvent>, ParseError> {
        while let Some(event) = self.inner.advance()? {
            if let NodeEvent::Text(text) = event {
                match self.filter_text(text) {
                    Some(text) => return Ok(Some(NodeEvent::Text(text))),
                    None => {
                        trace!(handling = %self.handling, "dropped whitespace text node");
                        continue;
                    }
                }
            }
            self.track_scope(&event);
            return Ok(Some(event));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::WhitespaceCursor;
    use crate::config::WhitespaceHandling;
    use crate::cursor::{collect_events, ReaderCursor};
    use crate::event::NodeEvent;

    fn texts(xml: &str, handling: WhitespaceHandling) -> Vec<String> {
        let mut cursor = WhitespaceCursor::new(ReaderCursor::new(xml.as_bytes(), true), handling);
        collect_events(&mut cursor)
            .expect("events")
            .into_iter()
            .filter_map(|event| match event {
                NodeEvent::Text(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    const MIXED: &str = "<a>\n  <b> x </b>\n</a>";

    #[test]
    fn all_keeps_every_text_node() {
        assert_eq!(
            texts(MIXED, WhitespaceHandling::All),
            vec!["\n  ", " x ", "\n"]
        );
    }

    #[test]
    fn significant_drops_whitespace_only_runs() {
        assert_eq!(texts(MIXED, WhitespaceHandling::Significant), vec![" x "]);
    }

    #[test]
    fn none_trims_remaining_text() {
        assert_eq!(texts(MIXED, WhitespaceHandling::None), vec!["x"]);
    }

    #[test]
    fn significant_honours_xml_space_preserve_scope() {
        let xml = r#"<a xml:space="preserve"> <b> </b><c xml:space="default"> </c></a>"#;
        assert_eq!(
            texts(xml, WhitespaceHandling::Significant),
            vec![" ", " "]
        );
    }
}
