use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::cursor::{NodeCursor, ReaderCursor};
use crate::event::NodeEvent;
use crate::tree::{XmlContent, XmlDocument, XmlNode};

/// Errors that can occur while tokenizing XML into node events.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input XML could not be decoded or tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Input bytes were not valid UTF-8 for tag/attribute/text extraction.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to decode text entity or bytes.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Failed to read input.
    #[error("failed to read XML input: {0}")]
    Io(#[from] std::io::Error),
    /// Structural issue in XML document.
    #[error("malformed XML: {0}")]
    Malformed(String),
}

/// Parse XML bytes into an [`XmlDocument`], keeping every text node.
pub fn parse(xml: &[u8]) -> Result<XmlDocument, ParseError> {
    build_document(&mut ReaderCursor::new(xml, true))
}

/// Parse an XML file into an [`XmlDocument`].
pub fn parse_file(path: &Path) -> Result<XmlDocument, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

/// Drain `cursor` into an owned tree.
pub fn build_document(cursor: &mut dyn NodeCursor) -> Result<XmlDocument, ParseError> {
    let mut declaration = false;
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    while let Some(event) = cursor.advance()? {
        match event {
            NodeEvent::Declaration => declaration = true,
            NodeEvent::ElementStart(start) => {
                let is_empty = start.is_empty;
                let node = XmlNode::from(start);
                if is_empty {
                    attach(node, &mut stack, &mut root)?;
                } else {
                    stack.push(node);
                }
            }
            NodeEvent::ElementEnd => {
                let node = stack.pop().ok_or_else(|| {
                    ParseError::Malformed("encountered closing tag without open tag".to_string())
                })?;
                attach(node, &mut stack, &mut root)?;
            }
            NodeEvent::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.children.push(XmlContent::Text(text));
                }
            }
            NodeEvent::Other => {}
        }
    }

    if !stack.is_empty() {
        return Err(ParseError::Malformed(
            "unclosed element(s) at end of document".to_string(),
        ));
    }

    let root = root.ok_or_else(|| ParseError::Malformed("no root element found".to_string()))?;
    Ok(XmlDocument { declaration, root })
}

fn attach(
    node: XmlNode,
    stack: &mut [XmlNode],
    root: &mut Option<XmlNode>,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlContent::Element(node));
    } else if root.is_none() {
        *root = Some(node);
    } else {
        return Err(ParseError::Malformed(
            "multiple top-level elements found".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::tree::XmlContent;

    #[test]
    fn keeps_whitespace_text_and_declaration() {
        let doc = parse(b"<?xml version=\"1.0\"?>\n<a> <b/>\n</a>").expect("parse");
        assert!(doc.declaration);
        assert_eq!(doc.root.children.len(), 3);
        assert!(matches!(&doc.root.children[0], XmlContent::Text(t) if t == " "));
    }

    #[test]
    fn rejects_unclosed_elements() {
        assert!(parse(b"<a><b></b>").is_err());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(parse(b"").is_err());
    }
}
