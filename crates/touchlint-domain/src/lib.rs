//! Rule engines for touchlint: categorization, rule tables and scanning.
//!
//! This crate is I/O-free. The external Ruby analyzer lives in
//! `touchlint-core`.

pub mod category;
pub mod common;
pub mod engine;
pub mod erb;
pub mod filter;
pub mod javascript;
pub mod rules;

pub use category::{PATHSPECS, categorize};
pub use engine::{Linter, linter_for};
pub use erb::ErbLinter;
pub use filter::filter_offenses;
pub use javascript::JavaScriptLinter;
pub use rules::{Pattern, Rule, RuleTable, first_match};

/// Every in-process engine, in the order `touchlint rules` lists them.
pub fn builtin_linters() -> [&'static dyn Linter; 2] {
    [&JavaScriptLinter, &ErbLinter]
}
