use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// Name of the attribute (and prefix) reserved for namespace declarations.
pub const XMLNS_PREFIX: &str = "xmlns";

/// Namespace URI bound to the `xmlns` prefix.
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// An attribute as it appeared on an element start tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Qualified name, including any prefix.
    pub name: String,
    /// Name without prefix.
    pub local_name: String,
    /// Resolved namespace URI, if the attribute is prefixed and bound.
    pub namespace_uri: Option<String>,
    /// Unescaped attribute value.
    pub value: String,
}

impl Attribute {
    /// Create an attribute without a namespace.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            local_name: local_part(&name).to_string(),
            name,
            namespace_uri: None,
            value: value.into(),
        }
    }

    /// Attach a namespace URI.
    pub fn with_namespace(mut self, uri: impl Into<String>) -> Self {
        self.namespace_uri = Some(uri.into());
        self
    }

    /// Prefix part of the qualified name, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// True for `xmlns` and `xmlns:*` namespace declarations.
    pub fn is_namespace_declaration(&self) -> bool {
        self.name == XMLNS_PREFIX || self.prefix() == Some(XMLNS_PREFIX)
    }

    /// True when the attribute carries a non-empty namespace URI.
    pub fn is_namespaced(&self) -> bool {
        self.namespace_uri.as_deref().is_some_and(|ns| !ns.is_empty())
    }

    /// Name used to match this attribute against its counterpart.
    pub fn match_name(&self) -> &str {
        if self.is_namespaced() {
            &self.local_name
        } else {
            &self.name
        }
    }
}

/// Payload of an element start event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementStart {
    pub name: String,
    pub local_name: String,
    pub namespace_uri: Option<String>,
    /// Attributes in document order, namespace declarations included.
    pub attributes: Vec<Attribute>,
    /// True for a self-closing tag; no [`NodeEvent::ElementEnd`] follows it.
    pub is_empty: bool,
}

impl ElementStart {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            local_name: local_part(&name).to_string(),
            name,
            namespace_uri: None,
            attributes: Vec::new(),
            is_empty: false,
        }
    }

    pub fn is_namespaced(&self) -> bool {
        self.namespace_uri.as_deref().is_some_and(|ns| !ns.is_empty())
    }

    /// Name compared against the counterpart element: the local name when the
    /// element is in a namespace, the qualified name otherwise.
    pub fn match_name(&self) -> &str {
        if self.is_namespaced() {
            &self.local_name
        } else {
            &self.name
        }
    }

    /// Attributes that are not namespace declarations, in document order.
    pub fn significant_attributes(&self) -> Vec<&Attribute> {
        self.attributes
            .iter()
            .filter(|attr| !attr.is_namespace_declaration())
            .collect()
    }

    /// Value of the `xml:space` attribute, if present.
    pub fn xml_space(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == "xml:space")
            .map(|attr| attr.value.as_str())
    }
}

/// A single node event produced by a [`crate::cursor::NodeCursor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum NodeEvent {
    ElementStart(ElementStart),
    ElementEnd,
    Text(String),
    /// The `<?xml ...?>` declaration.
    Declaration,
    /// Comments, processing instructions and DOCTYPE.
    Other,
}

impl NodeEvent {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeEvent::ElementStart(_) => NodeType::Element,
            NodeEvent::ElementEnd => NodeType::EndElement,
            NodeEvent::Text(_) => NodeType::Text,
            NodeEvent::Declaration => NodeType::Declaration,
            NodeEvent::Other => NodeType::Other,
        }
    }

    pub fn as_element(&self) -> Option<&ElementStart> {
        match self {
            NodeEvent::ElementStart(start) => Some(start),
            _ => None,
        }
    }
}

/// Kind of node a difference was observed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Element,
    EndElement,
    Text,
    Declaration,
    Attribute,
    Other,
}

impl Display for NodeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            NodeType::Element => "element",
            NodeType::EndElement => "end element",
            NodeType::Text => "text",
            NodeType::Declaration => "xml declaration",
            NodeType::Attribute => "attribute",
            NodeType::Other => "other",
        };
        f.write_str(label)
    }
}

pub(crate) fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}
