//! Command-line front end for `xml-compare-core`.
//!
//! - [`settings`] loads a comparison configuration from TOML
//! - [`report`] renders a comparison for the terminal or as JSON
//! - [`inspect`] renders the node event stream of one document

pub mod inspect;
pub mod report;
pub mod settings;
