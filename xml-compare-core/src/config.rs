use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// How text nodes made of whitespace are surfaced by a cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhitespaceHandling {
    /// Every text node is surfaced, whitespace-only runs included.
    #[default]
    All,
    /// Whitespace-only runs are dropped unless `xml:space="preserve"` is in scope.
    Significant,
    /// Text is trimmed; text that trims to nothing is dropped.
    None,
}

impl Display for WhitespaceHandling {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            WhitespaceHandling::All => "all",
            WhitespaceHandling::Significant => "significant",
            WhitespaceHandling::None => "none",
        };
        f.write_str(label)
    }
}

/// Immutable settings for one comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfiguration {
    description: String,
    use_validating_parser: bool,
    base_uri: String,
    whitespace_handling: WhitespaceHandling,
    ignore_attribute_order: bool,
}

impl Default for DiffConfiguration {
    fn default() -> Self {
        Self {
            description: String::new(),
            use_validating_parser: true,
            base_uri: ".".to_string(),
            whitespace_handling: WhitespaceHandling::All,
            ignore_attribute_order: false,
        }
    }
}

impl DiffConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Optional human-readable description carried along with the result.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the tokenizer runs its strict well-formedness checks.
    pub fn use_validating_parser(&self) -> bool {
        self.use_validating_parser
    }

    /// Directory relative file inputs are resolved against.
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn whitespace_handling(&self) -> WhitespaceHandling {
        self.whitespace_handling
    }

    pub fn ignore_attribute_order(&self) -> bool {
        self.ignore_attribute_order
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self
        }
    }

    pub fn with_validating_parser(self, use_validating_parser: bool) -> Self {
        Self {
            use_validating_parser,
            ..self
        }
    }

    pub fn with_base_uri(self, base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            ..self
        }
    }

    pub fn with_whitespace_handling(self, whitespace_handling: WhitespaceHandling) -> Self {
        Self {
            whitespace_handling,
            ..self
        }
    }

    pub fn with_ignore_attribute_order(self, ignore_attribute_order: bool) -> Self {
        Self {
            ignore_attribute_order,
            ..self
        }
    }
}
