//! Diff parsing.
//!
//! This crate parses the two `git diff` outputs touchlint consumes: the
//! `--name-status` listing of changed files, and zero-context unified diffs
//! from which per-file changed-line sets are derived. It performs no I/O.

mod status;
mod unified;

pub use status::{StatusCode, StatusEntry, parse_name_status, parse_status_line};
pub use unified::{DiffParseError, Hunk, changed_line_sets, parse_hunk_header};
