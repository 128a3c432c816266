//! Shared test utilities for the touchlint workspace.
//!
//! This crate provides:
//! - **arb**: Proptest strategies for generating source files, hunks and line sets
//! - **diff_builder**: Builders for `--unified=0` diffs and `--name-status` listings
//! - **fixtures**: Common sample sources and git outputs
//!
//! # Example
//!
//! ```rust,ignore
//! use touchlint_testkit::arb;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     fn filtered_scan_stays_in_range(content in arb::arb_js_content()) {
//!         // ...
//!     }
//! }
//! ```

pub mod arb;
pub mod diff_builder;
pub mod fixtures;

// Re-export commonly used items
pub use arb::{arb_changed_lines, arb_erb_content, arb_hunk_header, arb_js_content, arb_js_line};
pub use diff_builder::{DiffBuilder, FileBuilder, HunkBuilder, NameStatusBuilder};
pub use fixtures::{sample_diffs, sample_sources};
