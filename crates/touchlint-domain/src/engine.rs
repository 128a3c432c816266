use std::collections::BTreeSet;

use tracing::trace;

use touchlint_types::{Category, Offense};

use crate::common::{missing_final_newline, split_lines, trailing_whitespace};
use crate::erb::ErbLinter;
use crate::javascript::JavaScriptLinter;
use crate::rules::{RuleTable, first_match};

/// A line-based rule engine.
///
/// Implementors supply ordered rule tables and, optionally, a predicate for
/// lines the tables must not see. Scanning is shared: per inspected line the
/// first firing table rule is reported, then trailing whitespace; a full scan
/// also reports a missing final newline last.
pub trait Linter: Sync {
    fn category(&self) -> Category;

    /// Rule tables in precedence order.
    fn tables(&self) -> &[RuleTable];

    /// Lines for which table rules are not evaluated at all.
    fn skips_line(&self, _lines: &[&str], _index: usize) -> bool {
        false
    }

    /// Lint every line.
    fn lint_full(&self, content: &str) -> Vec<Offense> {
        scan(self, content, None)
    }

    /// Lint only the 1-based lines in `changed_lines`. Numbers past the end
    /// of the content are ignored.
    fn lint_filtered(&self, content: &str, changed_lines: &BTreeSet<u32>) -> Vec<Offense> {
        scan(self, content, Some(changed_lines))
    }
}

/// The in-process engine for a category. Ruby has none.
pub fn linter_for(category: Category) -> Option<&'static dyn Linter> {
    match category {
        Category::Ruby => None,
        Category::JavaScript => Some(&JavaScriptLinter),
        Category::Erb => Some(&ErbLinter),
    }
}

fn scan<L: Linter + ?Sized>(
    linter: &L,
    content: &str,
    changed_lines: Option<&BTreeSet<u32>>,
) -> Vec<Offense> {
    let lines = split_lines(content);
    let mut out = Vec::new();

    match changed_lines {
        None => {
            for index in 0..lines.len() {
                inspect_line(linter, &lines, index, &mut out);
            }
            out.extend(missing_final_newline(content));
        }
        Some(set) => {
            for &line in set {
                let Some(index) = line.checked_sub(1).map(|i| i as usize) else {
                    continue;
                };
                if index >= lines.len() {
                    break;
                }
                inspect_line(linter, &lines, index, &mut out);
            }
        }
    }

    out
}

fn inspect_line<L: Linter + ?Sized>(
    linter: &L,
    lines: &[&str],
    index: usize,
    out: &mut Vec<Offense>,
) {
    let line_no = index as u32 + 1;
    let content = lines[index];

    if linter.skips_line(lines, index) {
        trace!(line = line_no, "skipping table rules");
    } else if let Some(rule) = first_match(linter.tables(), lines, index) {
        out.push(rule.offense(line_no, content));
    }

    out.extend(trailing_whitespace(line_no, content));
}
