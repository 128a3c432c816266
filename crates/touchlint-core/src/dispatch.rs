use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, info, warn};

use touchlint_domain::{categorize, filter_offenses, linter_for};
use touchlint_types::{Category, ChangeDescriptor, ChangeKind, ChangeSet, Offense};

use crate::analyzer::Analyzer;

#[derive(Debug, thiserror::Error)]
pub enum ExcludeError {
    #[error("invalid exclude glob '{glob}': {source}")]
    InvalidGlob {
        glob: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to build exclude globs: {0}")]
    Build(#[source] globset::Error),
}

/// Result of linting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: String,
    /// File content as read, kept for rendering source lines.
    pub source: String,
    pub offenses: Vec<Offense>,
    /// Set when the external analyzer could not produce a report.
    pub analyzer_error: Option<String>,
}

impl FileOutcome {
    pub fn failed(&self) -> bool {
        !self.offenses.is_empty() || self.analyzer_error.is_some()
    }
}

/// Everything a run produced, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub files: Vec<FileOutcome>,
}

impl DispatchSummary {
    pub fn files_checked(&self) -> usize {
        self.files.len()
    }

    pub fn files_failed(&self) -> usize {
        self.files.iter().filter(|f| f.failed()).count()
    }

    pub fn offense_count(&self) -> usize {
        self.files.iter().map(|f| f.offenses.len()).sum()
    }

    /// 1 when any file failed, else 0.
    pub fn exit_code(&self) -> i32 {
        if self.files_failed() > 0 { 1 } else { 0 }
    }
}

/// Routes each changed file to its engine.
pub struct Dispatcher<'a> {
    root: PathBuf,
    analyzer: Option<&'a dyn Analyzer>,
    exclude: Option<GlobSet>,
}

impl<'a> Dispatcher<'a> {
    /// Paths are resolved against `root`. Ruby files are skipped until an
    /// analyzer is attached.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            analyzer: None,
            exclude: None,
        }
    }

    pub fn with_analyzer(mut self, analyzer: &'a dyn Analyzer) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn with_exclude(mut self, globs: &[String]) -> Result<Self, ExcludeError> {
        self.exclude = compile_globs(globs)?;
        Ok(self)
    }

    /// Lint every file of a change set. Files are never short-circuited:
    /// one failure does not stop the others from being checked.
    pub fn run(&self, change_set: &ChangeSet) -> DispatchSummary {
        info!("checking {} changed file(s)", change_set.len());
        DispatchSummary {
            files: change_set.iter().filter_map(|d| self.lint_file(d)).collect(),
        }
    }

    /// Fully lint explicitly listed files. Missing files and unsupported
    /// extensions are skipped.
    pub fn run_paths(&self, paths: &[String]) -> DispatchSummary {
        let change_set: ChangeSet = paths
            .iter()
            .filter_map(|p| {
                let Some(category) = categorize(p) else {
                    debug!("{p}: unsupported extension");
                    return None;
                };
                if !self.root.join(p).is_file() {
                    debug!("{p}: not a file");
                    return None;
                }
                Some(ChangeDescriptor::new_file(p.as_str(), category))
            })
            .collect();
        self.run(&change_set)
    }

    fn is_excluded(&self, path: &str) -> bool {
        self.exclude
            .as_ref()
            .is_some_and(|set| set.is_match(Path::new(path)))
    }

    fn lint_file(&self, descriptor: &ChangeDescriptor) -> Option<FileOutcome> {
        let path = descriptor.path.as_str();

        if self.is_excluded(path) {
            debug!("{path}: excluded");
            return None;
        }

        let source = match fs::read(self.root.join(path)) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                debug!("{path}: unreadable, skipping: {e}");
                return None;
            }
        };

        let changed_lines = match (descriptor.kind, &descriptor.changed_lines) {
            (ChangeKind::Modified, Some(lines)) if lines.is_empty() => {
                debug!("{path}: no changed lines");
                return None;
            }
            (ChangeKind::Modified, Some(lines)) => Some(lines),
            _ => None,
        };

        let mut analyzer_error = None;
        let offenses = match descriptor.category {
            Category::Ruby => {
                let Some(analyzer) = self.analyzer else {
                    debug!("{path}: no analyzer configured");
                    return None;
                };
                match analyzer.analyze(path, &source) {
                    Ok(found) => match changed_lines {
                        Some(lines) => filter_offenses(found, lines),
                        None => found,
                    },
                    Err(e) => {
                        warn!("{path}: analysis failed: {e}");
                        analyzer_error = Some(e.to_string());
                        Vec::new()
                    }
                }
            }
            category => {
                let linter = linter_for(category)?;
                match changed_lines {
                    Some(lines) => linter.lint_filtered(&source, lines),
                    None => linter.lint_full(&source),
                }
            }
        };

        debug!("{path}: {} offense(s)", offenses.len());
        Some(FileOutcome {
            path: descriptor.path.clone(),
            source,
            offenses,
            analyzer_error,
        })
    }
}

fn compile_globs(globs: &[String]) -> Result<Option<GlobSet>, ExcludeError> {
    if globs.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for g in globs {
        let glob = Glob::new(g).map_err(|source| ExcludeError::InvalidGlob {
            glob: g.clone(),
            source,
        })?;
        builder.add(glob);
    }

    builder.build().map(Some).map_err(ExcludeError::Build)
}
