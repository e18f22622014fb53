use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, QName, ResolveResult};
use quick_xml::reader::NsReader;

use crate::cursor::NodeCursor;
use crate::event::{local_part, Attribute, ElementStart, NodeEvent, XMLNS_NAMESPACE, XMLNS_PREFIX};
use crate::parser::ParseError;

/// Streams node events straight from a `quick-xml` namespace-aware reader.
///
/// Adjacent text and CDATA runs are merged into one text event. Whitespace
/// outside the root element is dropped; every other text node is surfaced.
/// Wrap the cursor in a
/// [`WhitespaceCursor`](crate::cursor::WhitespaceCursor) to filter them.
pub struct ReaderCursor<R> {
    reader: NsReader<R>,
    buf: Vec<u8>,
    strict: bool,
    depth: usize,
    seen_root: bool,
    peeked: Option<NodeEvent>,
    finished: bool,
}

impl<R: BufRead> ReaderCursor<R> {
    /// Create a cursor over `source`.
    ///
    /// With `strict` set, end tag names must match, duplicate attributes are
    /// rejected and unbound namespace prefixes are errors.
    pub fn new(source: R, strict: bool) -> Self {
        let mut reader = NsReader::from_reader(source);
        let config = reader.config_mut();
        config.trim_text(false);
        config.expand_empty_elements = false;
        config.check_end_names = strict;

        Self {
            reader,
            buf: Vec::new(),
            strict,
            depth: 0,
            seen_root: false,
            peeked: None,
            finished: false,
        }
    }

    fn next_raw(&mut self) -> Result<Option<NodeEvent>, ParseError> {
        self.buf.clear();
        let (resolved, event) = self.reader.read_resolved_event_into(&mut self.buf)?;
        let namespace_uri = resolved_uri(resolved, self.strict)?;

        // Convert to owned data before touching cursor state; `event` borrows `buf`.
        let raw = match event {
            Event::Start(e) => Raw::Open(element_start(
                &self.reader,
                &e,
                namespace_uri,
                false,
                self.strict,
            )?),
            Event::Empty(e) => Raw::Open(element_start(
                &self.reader,
                &e,
                namespace_uri,
                true,
                self.strict,
            )?),
            Event::End(_) => Raw::Close,
            Event::Text(e) => Raw::Text(e.unescape()?.into_owned()),
            Event::CData(e) => Raw::Text(std::str::from_utf8(&e)?.to_string()),
            Event::Decl(_) => Raw::Event(NodeEvent::Declaration),
            Event::PI(_) | Event::DocType(_) | Event::Comment(_) => Raw::Event(NodeEvent::Other),
            Event::Eof => Raw::Eof,
        };

        let event = match raw {
            Raw::Open(start) => {
                self.enter_element()?;
                if !start.is_empty {
                    self.depth += 1;
                }
                NodeEvent::ElementStart(start)
            }
            Raw::Close => {
                self.depth = self.depth.checked_sub(1).ok_or_else(|| {
                    ParseError::Malformed("encountered closing tag without open tag".to_string())
                })?;
                NodeEvent::ElementEnd
            }
            Raw::Text(text) => {
                self.check_text_placement(&text)?;
                NodeEvent::Text(text)
            }
            Raw::Event(event) => event,
            Raw::Eof => {
                if self.depth > 0 {
                    return Err(ParseError::Malformed(
                        "unclosed element(s) at end of document".to_string(),
                    ));
                }
                if !self.seen_root {
                    return Err(ParseError::Malformed("no root element found".to_string()));
                }
                return Ok(None);
            }
        };
        Ok(Some(event))
    }

    fn enter_element(&mut self) -> Result<(), ParseError> {
        if self.depth == 0 {
            if self.seen_root {
                return Err(ParseError::Malformed(
                    "multiple top-level elements found".to_string(),
                ));
            }
            self.seen_root = true;
        }
        Ok(())
    }

    fn check_text_placement(&self, text: &str) -> Result<(), ParseError> {
        if self.depth == 0 && !text.chars().all(is_xml_whitespace) {
            return Err(ParseError::Malformed(
                "text found outside of the root element".to_string(),
            ));
        }
        Ok(())
    }
}

impl<R: BufRead> NodeCursor for ReaderCursor<R> {
    fn advance(&mut self) -> Result<Option<NodeEvent>, ParseError> {
        if let Some(event) = self.peeked.take() {
            return Ok(Some(event));
        }
        if self.finished {
            return Ok(None);
        }

        let mut text: Option<String> = None;
        loop {
            match self.next_raw()? {
                Some(NodeEvent::Text(_)) if self.depth == 0 => {}
                Some(NodeEvent::Text(chunk)) => match &mut text {
                    Some(existing) => existing.push_str(&chunk),
                    None => text = Some(chunk),
                },
                Some(event) => {
                    if let Some(text) = text {
                        self.peeked = Some(event);
                        return Ok(Some(NodeEvent::Text(text)));
                    }
                    return Ok(Some(event));
                }
                None => {
                    self.finished = true;
                    return Ok(text.map(NodeEvent::Text));
                }
            }
        }
    }
}

enum Raw {
    Open(ElementStart),
    Close,
    Text(String),
    Event(NodeEvent),
    Eof,
}

pub(crate) fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn element_start<R>(
    reader: &NsReader<R>,
    e: &BytesStart<'_>,
    namespace_uri: Option<String>,
    is_empty: bool,
    strict: bool,
) -> Result<ElementStart, ParseError> {
    let name = qname_to_string(e.name())?;
    let local_name = std::str::from_utf8(e.local_name().as_ref())?.to_string();

    let mut attributes = Vec::new();
    let mut raw_attributes = e.attributes();
    raw_attributes.with_checks(strict);
    for attr in raw_attributes {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let attr_name = qname_to_string(attr.key)?;
        let value = attr
            .decode_and_unescape_value(reader.decoder())?
            .into_owned();

        let (attr_local, attr_ns) =
            if attr_name == XMLNS_PREFIX || attr_name.starts_with("xmlns:") {
                (
                    local_part(&attr_name).to_string(),
                    Some(XMLNS_NAMESPACE.to_string()),
                )
            } else {
                let (resolved, local) = reader.resolve_attribute(attr.key);
                (
                    std::str::from_utf8(local.as_ref())?.to_string(),
                    resolved_uri(resolved, strict)?,
                )
            };

        attributes.push(Attribute {
            name: attr_name,
            local_name: attr_local,
            namespace_uri: attr_ns,
            value,
        });
    }

    Ok(ElementStart {
        name,
        local_name,
        namespace_uri,
        attributes,
        is_empty,
    })
}

fn resolved_uri(resolved: ResolveResult<'_>, strict: bool) -> Result<Option<String>, ParseError> {
    match resolved {
        ResolveResult::Bound(Namespace(ns)) => Ok(Some(std::str::from_utf8(ns)?.to_string())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) if strict => Err(ParseError::Malformed(format!(
            "unbound namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
        ResolveResult::Unknown(_) => Ok(None),
    }
}

fn qname_to_string(name: QName<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(name.as_ref())?.to_string())
}
