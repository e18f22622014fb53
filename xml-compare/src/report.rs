use colored::Colorize;
use serde::Serialize;
use xml_compare_core::{format_summary, format_text, DiffResult};

/// Render a diff result for terminal output.
pub fn render_text(result: &DiffResult) -> String {
    let raw = format_text(result);
    let mut out = Vec::new();

    for line in raw.lines() {
        let colored = if line.starts_with('!') {
            line.red().to_string()
        } else if line.starts_with('~') {
            line.yellow().to_string()
        } else {
            render_verdict(result, line)
        };
        out.push(colored);
    }

    out.join("\n")
}

/// Render the summary line for terminal output.
pub fn render_summary(result: &DiffResult) -> String {
    render_verdict(result, &format_summary(result))
}

fn render_verdict(result: &DiffResult, line: &str) -> String {
    if result.identical() {
        line.green().to_string()
    } else if result.equal() {
        line.cyan().to_string()
    } else {
        line.red().bold().to_string()
    }
}

/// JSON payload of the `compare` command.
#[derive(Debug, Serialize)]
pub struct CompareReport<'a> {
    pub description: &'a str,
    pub control: String,
    pub test: String,
    pub result: &'a DiffResult,
}
