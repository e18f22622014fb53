use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::parser::ParseError;

/// Which of the two documents an error or difference belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Control,
    Test,
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Side::Control => f.write_str("control"),
            Side::Test => f.write_str("test"),
        }
    }
}

/// Errors that prevent a comparison from being performed at all.
///
/// Documents that differ are not an error; see [`crate::DiffResult`].
#[derive(Debug, Error)]
pub enum CompareError {
    /// One of the inputs could not be tokenized.
    #[error("malformed {side} document: {source}")]
    MalformedInput { side: Side, source: ParseError },
    /// The configuration cannot be used for this comparison.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl CompareError {
    pub(crate) fn malformed(side: Side) -> impl FnOnce(ParseError) -> Self {
        move |source| CompareError::MalformedInput { side, source }
    }

    /// The side whose input was malformed, if that is what went wrong.
    pub fn side(&self) -> Option<Side> {
        match self {
            CompareError::MalformedInput { side, .. } => Some(*side),
            CompareError::InvalidConfiguration(_) => None,
        }
    }
}
