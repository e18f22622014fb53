use std::fmt::{self, Display, Formatter};

use quick_xml::escape::escape;
use serde::Serialize;

use crate::event::{local_part, Attribute, ElementStart};

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XmlDocument {
    /// Whether the document started with an `<?xml ...?>` declaration.
    pub declaration: bool,
    pub root: XmlNode,
}

impl From<XmlNode> for XmlDocument {
    fn from(root: XmlNode) -> Self {
        Self {
            declaration: false,
            root,
        }
    }
}

/// Content of an element, in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum XmlContent {
    Element(XmlNode),
    Text(String),
}

/// A generic XML element node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XmlNode {
    /// Qualified element name.
    pub tag: String,
    /// Resolved namespace URI of the element.
    pub namespace_uri: Option<String>,
    /// Attributes in document order.
    pub attributes: Vec<Attribute>,
    /// Child elements and text.
    pub children: Vec<XmlContent>,
}

impl XmlNode {
    /// Create a new XML node with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            namespace_uri: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append an attribute without a namespace.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Append a child element.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(XmlContent::Element(child));
        self
    }

    /// Append a text node.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlContent::Text(text.into()));
        self
    }

    /// Return the first child element with the provided tag.
    pub fn get_child(&self, tag: &str) -> Option<&XmlNode> {
        self.elements().find(|child| child.tag == tag)
    }

    /// Return all child elements with the provided tag.
    pub fn get_children(&self, tag: &str) -> Vec<&XmlNode> {
        self.elements().filter(|child| child.tag == tag).collect()
    }

    /// Iterate over child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter().filter_map(|child| match child {
            XmlContent::Element(node) => Some(node),
            XmlContent::Text(_) => None,
        })
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                XmlContent::Text(text) => Some(text.as_str()),
                XmlContent::Element(_) => None,
            })
            .collect()
    }

    /// Value of the attribute with the given qualified name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    pub(crate) fn start_event(&self, is_empty: bool) -> ElementStart {
        ElementStart {
            name: self.tag.clone(),
            local_name: local_part(&self.tag).to_string(),
            namespace_uri: self.namespace_uri.clone(),
            attributes: self.attributes.clone(),
            is_empty,
        }
    }
}

impl From<ElementStart> for XmlNode {
    fn from(start: ElementStart) -> Self {
        Self {
            tag: start.name,
            namespace_uri: start.namespace_uri,
            attributes: start.attributes,
            children: Vec::new(),
        }
    }
}

impl Display for XmlNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for attr in &self.attributes {
            write!(f, " {}=\"{}\"", attr.name, escape(attr.value.as_str()))?;
        }

        if self.children.is_empty() {
            return write!(f, "/>");
        }

        write!(f, ">")?;
        for child in &self.children {
            match child {
                XmlContent::Element(node) => write!(f, "{node}")?,
                XmlContent::Text(text) => write!(f, "{}", escape(text.as_str()))?,
            }
        }
        write!(f, "</{}>", self.tag)
    }
}

impl Display for XmlDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.declaration {
            write!(f, "<?xml version=\"1.0\"?>")?;
        }
        write!(f, "{}", self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::XmlNode;
    use crate::parser::parse;

    #[test]
    fn text_and_children_are_kept_in_order() {
        let root = XmlNode::new("root")
            .with_text("a")
            .with_child(XmlNode::new("child").with_attribute("id", "1"))
            .with_text("b");

        assert_eq!(root.text(), "ab");
        assert_eq!(
            root.get_child("child").and_then(|c| c.attribute("id")),
            Some("1")
        );
        assert_eq!(root.to_string(), r#"<root>a<child id="1"/>b</root>"#);
    }

    #[test]
    fn display_output_parses_back_to_the_same_tree() {
        let doc = parse(br#"<a x="&lt;1">t &amp; u<b/></a>"#).expect("parse");
        let again = parse(doc.to_string().as_bytes()).expect("reparse");
        assert_eq!(doc, again);
    }
}
