use serde::Serialize;

use touchlint_domain::common::split_lines;
use touchlint_types::Offense;

use crate::dispatch::DispatchSummary;

/// Render one offense in compiler style:
///
/// ```text
/// app/a.js:3:1: W: LooseEquality: Use strict equality ...
/// if (a == b) {
///
/// ```
///
/// The source line and marker line are omitted when `source_line` is `None`.
/// The marker line is blank for column 1, otherwise spaces up to the column
/// followed by one caret per character of the offense, cut one column past
/// the end of the source line.
pub fn render_offense(path: &str, offense: &Offense, source_line: Option<&str>) -> String {
    let loc = &offense.location;
    let mut out = format!(
        "{path}:{}:{}: {}: {}: {}\n",
        loc.line,
        loc.column,
        offense.severity.initial(),
        offense.cop_name,
        offense.message
    );

    let Some(line) = source_line else {
        return out;
    };
    out.push_str(line.trim_end());
    out.push('\n');

    if loc.column > 1 {
        // The column just past the last character still gets a caret.
        let width = line.chars().count() + 1;
        let pad = (loc.column as usize - 1).min(width);
        let carets = (loc.length as usize).min(width - pad);
        out.push_str(&" ".repeat(pad));
        out.push_str(&"^".repeat(carets));
    }
    out.push('\n');
    out
}

/// Text report for a whole run, in processing order.
pub fn render_text(summary: &DispatchSummary) -> String {
    let mut out = String::new();
    for file in &summary.files {
        let lines = split_lines(&file.source);
        for offense in &file.offenses {
            let source_line = offense
                .location
                .line
                .checked_sub(1)
                .and_then(|i| lines.get(i as usize).copied());
            out.push_str(&render_offense(&file.path, offense, source_line));
        }
    }
    out
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    files: Vec<JsonFile<'a>>,
    summary: JsonSummary,
}

#[derive(Debug, Serialize)]
struct JsonFile<'a> {
    path: &'a str,
    offenses: &'a [Offense],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct JsonSummary {
    files_checked: usize,
    files_failed: usize,
    offenses: usize,
}

/// JSON report for a whole run.
pub fn render_json(summary: &DispatchSummary) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        files: summary
            .files
            .iter()
            .map(|f| JsonFile {
                path: &f.path,
                offenses: &f.offenses,
                error: f.analyzer_error.as_deref(),
            })
            .collect(),
        summary: JsonSummary {
            files_checked: summary.files_checked(),
            files_failed: summary.files_failed(),
            offenses: summary.offense_count(),
        },
    };
    serde_json::to_string_pretty(&report)
}
