use std::fmt;

use regex::Regex;

use touchlint_types::{Location, Offense, Severity};

/// Line predicate with access to the whole file.
///
/// `lines` holds every line of the file without its `\n`; `index` is the
/// 0-based position of the line under test.
pub type LineTest = fn(lines: &[&str], index: usize) -> bool;

pub enum Pattern {
    Regex(Regex),
    /// Hand-written matcher for what a plain regex cannot express.
    Custom {
        describe: &'static str,
        test: LineTest,
    },
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Regex(r) => f.debug_tuple("Regex").field(&r.as_str()).finish(),
            Pattern::Custom { describe, .. } => f.debug_tuple("Custom").field(describe).finish(),
        }
    }
}

/// One entry of an ordered rule table.
#[derive(Debug)]
pub struct Rule {
    pub id: &'static str,
    pub cop_name: &'static str,
    pub severity: Severity,
    pub message: &'static str,
    pub pattern: Pattern,
    /// A matching line is skipped, not reported, when this returns true.
    pub suppress: Option<LineTest>,
    /// Blank-line rules see only blank lines; all others see only non-blank ones.
    pub blank_lines: bool,
}

impl Rule {
    /// Table entry from a regex literal. Only used for static tables.
    pub(crate) fn regex(
        id: &'static str,
        cop_name: &'static str,
        severity: Severity,
        pattern: &str,
        message: &'static str,
    ) -> Self {
        let regex = Regex::new(pattern).expect("built-in rule pattern should compile");
        Self::with_pattern(id, cop_name, severity, Pattern::Regex(regex), message)
    }

    pub(crate) fn custom(
        id: &'static str,
        cop_name: &'static str,
        severity: Severity,
        describe: &'static str,
        test: LineTest,
        message: &'static str,
    ) -> Self {
        Self::with_pattern(
            id,
            cop_name,
            severity,
            Pattern::Custom { describe, test },
            message,
        )
    }

    fn with_pattern(
        id: &'static str,
        cop_name: &'static str,
        severity: Severity,
        pattern: Pattern,
        message: &'static str,
    ) -> Self {
        Self {
            id,
            cop_name,
            severity,
            message,
            pattern,
            suppress: None,
            blank_lines: false,
        }
    }

    pub(crate) fn suppressed_by(mut self, test: LineTest) -> Self {
        self.suppress = Some(test);
        self
    }

    pub(crate) fn on_blank_lines(mut self) -> Self {
        self.blank_lines = true;
        self
    }

    pub fn matches(&self, lines: &[&str], index: usize) -> bool {
        match &self.pattern {
            Pattern::Regex(r) => r.is_match(lines[index]),
            Pattern::Custom { test, .. } => test(lines, index),
        }
    }

    pub fn is_suppressed(&self, lines: &[&str], index: usize) -> bool {
        self.suppress.is_some_and(|s| s(lines, index))
    }

    /// Human-readable pattern, as listed by `touchlint rules`.
    pub fn describe(&self) -> &str {
        match &self.pattern {
            Pattern::Regex(r) => r.as_str(),
            Pattern::Custom { describe, .. } => describe,
        }
    }

    pub fn offense(&self, line: u32, line_content: &str) -> Offense {
        Offense {
            rule: self.id.to_string(),
            message: self.message.to_string(),
            severity: self.severity,
            cop_name: self.cop_name.to_string(),
            line_content: line_content.to_string(),
            location: Location::line_start(line),
        }
    }
}

/// A named, ordered rule table.
#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    pub name: &'static str,
    pub rules: &'static [Rule],
}

/// The first rule across `tables` (in order) that matches line `index` and
/// is not suppressed.
pub fn first_match(tables: &[RuleTable], lines: &[&str], index: usize) -> Option<&'static Rule> {
    let blank = is_blank(lines[index]);

    tables
        .iter()
        .flat_map(|t| t.rules.iter())
        .filter(|r| r.blank_lines == blank)
        .find(|r| r.matches(lines, index) && !r.is_suppressed(lines, index))
}

pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// True when `word` occurs in `line` with no `[A-Za-z0-9_]` neighbour on
/// either side.
pub(crate) fn contains_word(line: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let is_word_byte = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
    let bytes = line.as_bytes();

    line.match_indices(word).any(|(start, m)| {
        let end = start + m.len();
        let before_ok = start == 0 || !is_word_byte(bytes[start - 1]);
        let after_ok = end == bytes.len() || !is_word_byte(bytes[end]);
        before_ok && after_ok
    })
}

/// True when `text` starts with `word` followed by a non-word character
/// or the end of the text.
pub(crate) fn starts_with_word(text: &str, word: &str) -> bool {
    text.strip_prefix(word).is_some_and(|rest| {
        rest.chars()
            .next()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_'))
    })
}
