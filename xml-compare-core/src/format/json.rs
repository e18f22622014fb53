use crate::diff::result::DiffResult;

/// Format a diff result as JSON.
pub fn format_json(result: &DiffResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
}
