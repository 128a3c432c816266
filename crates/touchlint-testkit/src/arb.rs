//! Proptest strategies for generating touchlint inputs.
//!
//! Strategies are constructive: hunk headers are always well formed and
//! generated source text is plain ASCII without carriage returns.
//!
//! # Bounds
//!
//! - Max files per diff: 5
//! - Max hunks per file: 5
//! - Max lines per hunk: 20
//! - Max line length: 160 bytes
//! - Max lines per generated file: 40

use std::collections::BTreeSet;

use proptest::prelude::*;

/// Maximum number of files in a generated diff
pub const MAX_FILES: usize = 5;

/// Maximum number of hunks per file
pub const MAX_HUNKS_PER_FILE: usize = 5;

/// Maximum number of lines per hunk
pub const MAX_LINES_PER_HUNK: usize = 20;

/// Maximum line length in bytes
pub const MAX_LINE_LENGTH: usize = 160;

/// Maximum number of lines in a generated source file
pub const MAX_FILE_LINES: usize = 40;

/// A zero-context hunk header together with its `(new_start, new_count)`.
///
/// `new_count` is `None` when the header abbreviates a single-line hunk
/// as `+start`.
pub fn arb_hunk_header() -> impl Strategy<Value = (String, u32, Option<u32>)> {
    (
        1u32..10_000,
        0u32..=MAX_LINES_PER_HUNK as u32,
        1u32..10_000,
        prop::option::of(0u32..=MAX_LINES_PER_HUNK as u32),
        prop::sample::select(vec!["", " function init() {", " def call"]),
    )
        .prop_map(|(old_start, old_count, new_start, new_count, section)| {
            let new_side = match new_count {
                Some(c) => format!("+{new_start},{c}"),
                None => format!("+{new_start}"),
            };
            let header = format!("@@ -{old_start},{old_count} {new_side} @@{section}");
            (header, new_start, new_count)
        })
}

/// A set of 1-based line numbers, possibly reaching past the end of a
/// generated file.
pub fn arb_changed_lines() -> impl Strategy<Value = BTreeSet<u32>> {
    prop::collection::btree_set(1u32..=(MAX_FILE_LINES as u32 + 5), 0..12)
}

/// One line of JavaScript-looking source, biased towards text the rule
/// tables react to.
pub fn arb_js_line() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "",
            "   ",
            "var count = 0;",
            "var unused = 1",
            "count = count + 1;",
            "if (a == b) {",
            "if (a != null) {",
            "if (a === b) {",
            "const x = 1;",
            "let y = () => 2;",
            "console.log('debug');",
            "eval('1 + 1');",
            "document.write(html);",
            "el.innerHTML = markup;",
            "function add(a, b = 1) {",
            "// a comment",
            "/* block",
            " * inside",
            " */",
            "}",
            "});",
            "return value",
            "doSomething()",
            "total = 1 // note",
            "var items = [",
            "  1,",
            "];",
        ])
        .prop_map(str::to_string),
        prop::string::string_regex("[a-zA-Z][a-zA-Z0-9_(){}\\[\\];:,.=!<> ]{0,80}")
            .expect("valid regex for js line"),
        (0usize..3).prop_map(|n| "x".repeat(MAX_LINE_LENGTH - 20 + n)),
    ]
}

/// A JavaScript file body; the trailing newline is optional.
pub fn arb_js_content() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(arb_js_line(), 0..=MAX_FILE_LINES),
        any::<bool>(),
    )
        .prop_map(|(lines, final_newline)| join_lines(&lines, final_newline))
}

/// An ERB file body; the trailing newline is optional.
pub fn arb_erb_content() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        prop::sample::select(vec![
            "",
            "<div>",
            "</div>",
            "<% # old style comment %>",
            "<%if admin? %>",
            "<% if admin? %>",
            "<%=user.name %>",
            "<%= user.name %>",
            "<%#note %>",
            "<%# note %>",
            "<p><%= t('.title') %> </p>",
            "<% end %>",
        ])
        .prop_map(str::to_string),
        prop::string::string_regex("[a-zA-Z<>/ =\"%#.]{0,60}").expect("valid regex for erb line"),
    ];
    (
        prop::collection::vec(line, 0..=MAX_FILE_LINES),
        any::<bool>(),
    )
        .prop_map(|(lines, final_newline)| join_lines(&lines, final_newline))
}

fn join_lines(lines: &[String], final_newline: bool) -> String {
    let mut out = lines.join("\n");
    if final_newline && !lines.is_empty() {
        out.push('\n');
    }
    out
}
