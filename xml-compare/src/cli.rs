use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use xml_compare_core::WhitespaceHandling;

#[derive(Parser, Debug)]
#[command(name = "xml-compare")]
#[command(about = "Compare two XML documents and report whether they are identical or equal")]
pub struct Cli {
    /// Log comparison details to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Compare a control document with a test document.
    Compare(CompareArgs),
    /// Print the node events one document produces.
    Events(EventsArgs),
}

#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// Reference document.
    pub control: PathBuf,
    /// Document checked against the control.
    pub test: PathBuf,
    /// Optional TOML file with comparison settings; flags override it.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub whitespace: Option<WhitespaceArg>,
    /// Do not report attribute order differences.
    #[arg(long)]
    pub ignore_attribute_order: bool,
    /// Relax end-tag, duplicate-attribute and namespace-prefix checks.
    #[arg(long)]
    pub no_validate: bool,
    /// Free-form description echoed in the report.
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Print only the summary line.
    #[arg(long)]
    pub summary: bool,
    /// Fail unless the documents are identical, not just equal.
    #[arg(long)]
    pub identical: bool,
}

#[derive(Parser, Debug)]
pub struct EventsArgs {
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = WhitespaceArg::All)]
    pub whitespace: WhitespaceArg,
    /// Relax end-tag, duplicate-attribute and namespace-prefix checks.
    #[arg(long)]
    pub no_validate: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum WhitespaceArg {
    All,
    Significant,
    None,
}

impl From<WhitespaceArg> for WhitespaceHandling {
    fn from(arg: WhitespaceArg) -> Self {
        match arg {
            WhitespaceArg::All => WhitespaceHandling::All,
            WhitespaceArg::Significant => WhitespaceHandling::Significant,
            WhitespaceArg::None => WhitespaceHandling::None,
        }
    }
}
