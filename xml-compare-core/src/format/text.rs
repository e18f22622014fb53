use crate::diff::result::DiffResult;

/// Format every recorded difference as plain text, one per line.
///
/// Major differences are prefixed with `!`, minor ones with `~`.
pub fn format_text(result: &DiffResult) -> String {
    let mut lines = Vec::with_capacity(result.differences().len() + 1);
    for difference in result.differences() {
        let marker = if difference.is_major() { '!' } else { '~' };
        lines.push(format!("{marker} {difference}"));
    }
    lines.push(format_summary(result));
    lines.join("\n")
}

/// Format a one-line summary of the result.
pub fn format_summary(result: &DiffResult) -> String {
    let major = result
        .differences()
        .iter()
        .filter(|difference| difference.is_major())
        .count();
    let minor = result.differences().len() - major;

    format!(
        "identical={} equal={} major={major} minor={minor}",
        result.identical(),
        result.equal()
    )
}
