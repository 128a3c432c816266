//! Core engine: resolves the change set, dispatches files to their engines
//! and renders reports.

mod analyzer;
mod dispatch;
mod git;
mod report;
mod resolve;

pub use analyzer::{Analyzer, AnalyzerError, CommandAnalyzer, parse_report};
pub use dispatch::{DispatchSummary, Dispatcher, ExcludeError, FileOutcome};
pub use git::{DiffScope, GitCli, Vcs};
pub use report::{render_json, render_offense, render_text};
pub use resolve::{BASE_CANDIDATES, FALLBACK_BASE, detect_base, diff_scope, resolve};
