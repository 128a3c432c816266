//! Data types (change sets, offenses, config) for touchlint.
//!
//! This crate is intentionally "dumb": pure DTOs with serde.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ── Frozen Vocabulary ──────────────────────────────────────────
pub const TOOL_NAME: &str = "touchlint";
pub const CONFIG_FILE_NAME: &str = "touchlint.toml";
pub const BASE_ENV_VAR: &str = "TOUCHLINT_BASE";

/// Linting engine family, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Linted by the external analyzer.
    Ruby,
    #[serde(rename = "javascript")]
    JavaScript,
    Erb,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Ruby => "ruby",
            Category::JavaScript => "javascript",
            Category::Erb => "erb",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    New,
    Modified,
}

/// One changed file, as discovered by the status diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeDescriptor {
    pub path: String,
    pub kind: ChangeKind,
    /// `None` for new files ("lint everything"); a possibly empty set for
    /// modified files.
    pub changed_lines: Option<BTreeSet<u32>>,
    pub category: Category,
}

impl ChangeDescriptor {
    pub fn new_file(path: impl Into<String>, category: Category) -> Self {
        Self {
            path: path.into(),
            kind: ChangeKind::New,
            changed_lines: None,
            category,
        }
    }

    pub fn modified(path: impl Into<String>, category: Category) -> Self {
        Self {
            path: path.into(),
            kind: ChangeKind::Modified,
            changed_lines: Some(BTreeSet::new()),
            category,
        }
    }

    /// Merge new-file line numbers into the changed-line set.
    ///
    /// No-op for new files, which are always linted in full.
    pub fn add_changed_lines(&mut self, lines: impl IntoIterator<Item = u32>) {
        if let Some(set) = self.changed_lines.as_mut() {
            set.extend(lines);
        }
    }
}

/// Changed files keyed by path, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    files: Vec<ChangeDescriptor>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor. An existing entry for the same path is replaced
    /// in place, keeping its original position.
    pub fn insert(&mut self, descriptor: ChangeDescriptor) {
        match self.files.iter_mut().find(|d| d.path == descriptor.path) {
            Some(existing) => *existing = descriptor,
            None => self.files.push(descriptor),
        }
    }

    pub fn get(&self, path: &str) -> Option<&ChangeDescriptor> {
        self.files.iter().find(|d| d.path == path)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut ChangeDescriptor> {
        self.files.iter_mut().find(|d| d.path == path)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangeDescriptor> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Paths of all `Modified` entries, in discovery order.
    pub fn modified_paths(&self) -> Vec<String> {
        self.files
            .iter()
            .filter(|d| d.kind == ChangeKind::Modified)
            .map(|d| d.path.clone())
            .collect()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a ChangeDescriptor;
    type IntoIter = std::slice::Iter<'a, ChangeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

impl FromIterator<ChangeDescriptor> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = ChangeDescriptor>>(iter: I) -> Self {
        let mut set = ChangeSet::new();
        for d in iter {
            set.insert(d);
        }
        set
    }
}

/// Offense severity.
///
/// The in-process engines only emit `Warning` and `Error`; the remaining
/// levels come from the external analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Refactor,
    Convention,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Refactor => "refactor",
            Severity::Convention => "convention",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// First letter, uppercased, as printed in the text report.
    pub fn initial(self) -> char {
        self.as_str()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }

    /// Parse an analyzer severity name. Unknown names degrade to `Warning`.
    pub fn from_analyzer(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "info" => Severity::Info,
            "refactor" => Severity::Refactor,
            "convention" => Severity::Convention,
            "error" => Severity::Error,
            "fatal" => Severity::Fatal,
            _ => Severity::Warning,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// 1-based.
    pub line: u32,
    /// 1-based.
    pub column: u32,
    pub length: u32,
}

impl Location {
    /// Whole-line location used by the in-process engines.
    pub fn line_start(line: u32) -> Self {
        Self {
            line,
            column: 1,
            length: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offense {
    /// Symbolic rule id (e.g. `loose_equality`).
    pub rule: String,
    pub message: String,
    pub severity: Severity,
    /// Display name, stable across engines (e.g. `LooseEquality`).
    pub cop_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub line_content: String,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

/// The on-disk configuration file (`touchlint.toml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Glob patterns of paths that are never linted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    /// Base ref for the diff; auto-detected when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    #[serde(default)]
    pub staged: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

/// External analyzer used for Ruby files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub enabled: bool,
    pub command: String,
    /// Arguments placed before the file path.
    pub args: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "rubocop".to_string(),
            args: vec![
                "--format".to_string(),
                "json".to_string(),
                "--force-exclusion".to_string(),
                "--stdin".to_string(),
            ],
        }
    }
}
