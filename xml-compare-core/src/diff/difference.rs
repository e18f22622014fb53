use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::event::NodeType;

/// Whether a difference breaks equality or only identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Major,
    Minor,
}

/// The closed set of differences the engine can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    NodeTypeMismatch,
    ChildListLengthMismatch,
    ElementTagNameMismatch,
    ElementAttributeCountMismatch,
    AttributeValueMismatch,
    AttributeNameNotFound,
    TextValueMismatch,
    HasXmlDeclarationMismatch,
    AttributeSequenceMismatch,
}

impl DifferenceKind {
    pub const ALL: [DifferenceKind; 9] = [
        DifferenceKind::NodeTypeMismatch,
        DifferenceKind::ChildListLengthMismatch,
        DifferenceKind::ElementTagNameMismatch,
        DifferenceKind::ElementAttributeCountMismatch,
        DifferenceKind::AttributeValueMismatch,
        DifferenceKind::AttributeNameNotFound,
        DifferenceKind::TextValueMismatch,
        DifferenceKind::HasXmlDeclarationMismatch,
        DifferenceKind::AttributeSequenceMismatch,
    ];

    pub const fn severity(self) -> Severity {
        match self {
            DifferenceKind::AttributeSequenceMismatch => Severity::Minor,
            DifferenceKind::NodeTypeMismatch
            | DifferenceKind::ChildListLengthMismatch
            | DifferenceKind::ElementTagNameMismatch
            | DifferenceKind::ElementAttributeCountMismatch
            | DifferenceKind::AttributeValueMismatch
            | DifferenceKind::AttributeNameNotFound
            | DifferenceKind::TextValueMismatch
            | DifferenceKind::HasXmlDeclarationMismatch => Severity::Major,
        }
    }

    pub const fn is_major(self) -> bool {
        matches!(self.severity(), Severity::Major)
    }

    pub fn description(self) -> &'static str {
        match self {
            DifferenceKind::NodeTypeMismatch => "node type mismatch",
            DifferenceKind::ChildListLengthMismatch => "number of child nodes differs",
            DifferenceKind::ElementTagNameMismatch => "element tag name differs",
            DifferenceKind::ElementAttributeCountMismatch => "number of attributes differs",
            DifferenceKind::AttributeValueMismatch => "attribute value differs",
            DifferenceKind::AttributeNameNotFound => "attribute not found",
            DifferenceKind::TextValueMismatch => "text value differs",
            DifferenceKind::HasXmlDeclarationMismatch => "xml declaration present on one side only",
            DifferenceKind::AttributeSequenceMismatch => "attribute order differs",
        }
    }
}

impl Display for DifferenceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// One observed divergence between the control and test documents.
///
/// A side's node type is `None` when that side had no node at the point of
/// divergence, for example the exhausted side of a child list mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Difference {
    kind: DifferenceKind,
    control_node_type: Option<NodeType>,
    test_node_type: Option<NodeType>,
}

impl Difference {
    pub fn new(
        kind: DifferenceKind,
        control_node_type: Option<NodeType>,
        test_node_type: Option<NodeType>,
    ) -> Self {
        Self {
            kind,
            control_node_type,
            test_node_type,
        }
    }

    pub fn kind(&self) -> DifferenceKind {
        self.kind
    }

    pub fn control_node_type(&self) -> Option<NodeType> {
        self.control_node_type
    }

    pub fn test_node_type(&self) -> Option<NodeType> {
        self.test_node_type
    }

    pub fn is_major(&self) -> bool {
        self.kind.is_major()
    }
}

impl Display for Difference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let severity = if self.is_major() { "major" } else { "minor" };
        write!(
            f,
            "{} ({severity}; control: {}, test: {})",
            self.kind,
            side_label(self.control_node_type),
            side_label(self.test_node_type)
        )
    }
}

fn side_label(node_type: Option<NodeType>) -> String {
    node_type.map_or_else(|| "none".to_string(), |t| t.to_string())
}

#[cfg(test)]
mod tests {
    use super::{Difference, DifferenceKind, Severity};
    use crate::event::NodeType;

    #[test]
    fn only_attribute_order_is_minor() {
        let minor: Vec<_> = DifferenceKind::ALL
            .iter()
            .filter(|kind| kind.severity() == Severity::Minor)
            .collect();
        assert_eq!(minor, vec![&DifferenceKind::AttributeSequenceMismatch]);
    }

    #[test]
    fn equality_covers_kind_and_both_node_types() {
        let a = Difference::new(
            DifferenceKind::TextValueMismatch,
            Some(NodeType::Text),
            Some(NodeType::Text),
        );
        let b = Difference::new(
            DifferenceKind::TextValueMismatch,
            Some(NodeType::Text),
            Some(NodeType::Element),
        );
        assert_eq!(a, a);
        assert_ne!(a, b);
    }

    #[test]
    fn display_names_missing_side() {
        let d = Difference::new(
            DifferenceKind::ChildListLengthMismatch,
            Some(NodeType::Element),
            None,
        );
        assert_eq!(
            d.to_string(),
            "number of child nodes differs (major; control: element, test: none)"
        );
    }
}
