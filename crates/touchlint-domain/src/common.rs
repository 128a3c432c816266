//! Checks shared by every in-process engine.

use touchlint_types::{Location, Offense, Severity};

pub const TRAILING_WHITESPACE: &str = "trailing_whitespace";
pub const MISSING_FINAL_NEWLINE: &str = "missing_final_newline";

/// Line content reported for a missing final newline.
pub const END_OF_FILE: &str = "End of file";

/// Split content into lines, dropping each line's `\n`.
///
/// A trailing `\n` does not start an extra empty line, so the result has
/// as many entries as the file has lines.
pub fn split_lines(content: &str) -> Vec<&str> {
    content
        .split_inclusive('\n')
        .map(|l| l.strip_suffix('\n').unwrap_or(l))
        .collect()
}

/// Flags a line whose last character is a space.
pub fn trailing_whitespace(line: u32, content: &str) -> Option<Offense> {
    if !content.ends_with(' ') {
        return None;
    }
    Some(Offense {
        rule: TRAILING_WHITESPACE.to_string(),
        message: "Remove trailing whitespace".to_string(),
        severity: Severity::Warning,
        cop_name: "TrailingWhitespace".to_string(),
        line_content: content.to_string(),
        location: Location::line_start(line),
    })
}

/// Flags non-empty content that does not end with `\n`, at the last line.
pub fn missing_final_newline(content: &str) -> Option<Offense> {
    if content.is_empty() || content.ends_with('\n') {
        return None;
    }
    let line = content.split_inclusive('\n').count() as u32;
    Some(Offense {
        rule: MISSING_FINAL_NEWLINE.to_string(),
        message: "Add final newline at end of file".to_string(),
        severity: Severity::Warning,
        cop_name: "MissingFinalNewline".to_string(),
        line_content: END_OF_FILE.to_string(),
        location: Location::line_start(line),
    })
}
