use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static HUNK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ [^+]*\+(\d+)(?:,(\d+))? @@").expect("hunk header regex should compile")
});

const TARGET_PREFIX: &str = "+++ b/";

/// New-file side of a unified diff hunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hunk {
    pub new_start: u32,
    pub new_count: u32,
}

impl Hunk {
    /// Line numbers this hunk touches in the new file, as `[start, start + count)`.
    ///
    /// A pure deletion (`count == 0`) yields an empty range.
    pub fn new_lines(&self) -> Range<u32> {
        self.new_start..self.new_start.saturating_add(self.new_count)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffParseError {
    #[error("malformed hunk header: {0}")]
    MalformedHunkHeader(String),
}

/// Parse the new-file side of a hunk header.
///
/// Formats:
/// - `@@ -1,2 +3,4 @@`
/// - `@@ -1 +3 @@` (count defaults to 1)
/// - `@@ -5,2 +4,0 @@ fn context()` (trailing section text is allowed)
pub fn parse_hunk_header(line: &str) -> Result<Hunk, DiffParseError> {
    let malformed = || DiffParseError::MalformedHunkHeader(line.to_string());

    let caps = HUNK_HEADER.captures(line).ok_or_else(malformed)?;
    let new_start: u32 = caps[1].parse().map_err(|_| malformed())?;
    let new_count: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().map_err(|_| malformed())?,
        None => 1,
    };

    Ok(Hunk {
        new_start,
        new_count,
    })
}

/// Collect changed new-file line numbers per target path from a
/// `git diff --unified=0` output.
///
/// The current target is set by every `+++ b/<path>` line; hunk headers seen
/// before any target are ignored. A target with no hunks maps to an empty set.
pub fn changed_line_sets(diff_text: &str) -> BTreeMap<String, BTreeSet<u32>> {
    let mut out: BTreeMap<String, BTreeSet<u32>> = BTreeMap::new();
    let mut current: Option<String> = None;

    for raw in diff_text.lines() {
        if let Some(rest) = raw.strip_prefix(TARGET_PREFIX) {
            let path = rest.trim().to_string();
            out.entry(path.clone()).or_default();
            current = Some(path);
            continue;
        }

        if !raw.starts_with("@@") {
            continue;
        }

        let hunk = match parse_hunk_header(raw) {
            Ok(h) => h,
            Err(e) => {
                debug!("skipping {e}");
                continue;
            }
        };

        let Some(path) = current.as_deref() else {
            debug!("hunk before any target path: {raw}");
            continue;
        };

        out.entry(path.to_string())
            .or_default()
            .extend(hunk.new_lines());
    }

    out
}
