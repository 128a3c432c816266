//! Builders for the git outputs touchlint consumes.
//!
//! [`DiffBuilder`] produces `git diff --unified=0` style text, and
//! [`NameStatusBuilder`] produces `git diff --name-status` listings.
//!
//! # Bounds
//!
//! To keep tests fast, the following bounds are enforced:
//! - Max files per diff: 5
//! - Max hunks per file: 5
//! - Max lines per hunk: 20
//!
//! # Example
//!
//! ```rust
//! use touchlint_testkit::diff_builder::DiffBuilder;
//!
//! let diff = DiffBuilder::new()
//!     .file("app/assets/site.js")
//!         .hunk(3, 1, 3, 1)
//!             .remove("var a = 1;")
//!             .add_line("var a = 2;")
//!             .done()
//!         .done()
//!     .build();
//!
//! assert!(diff.contains("+++ b/app/assets/site.js"));
//! assert!(diff.contains("@@ -3,1 +3,1 @@"));
//! ```

use crate::arb::{MAX_FILES, MAX_HUNKS_PER_FILE, MAX_LINES_PER_HUNK};

/// A builder for constructing zero-context unified diff strings.
#[derive(Debug, Clone, Default)]
pub struct DiffBuilder {
    files: Vec<FileBuilder>,
}

impl DiffBuilder {
    /// Create a new empty diff builder.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Add a file to the diff and return a file builder.
    ///
    /// # Panics
    ///
    /// Panics if MAX_FILES would be exceeded.
    pub fn file(self, path: &str) -> FileBuilderInProgress {
        assert!(
            self.files.len() < MAX_FILES,
            "Cannot add more than {} files to a diff",
            MAX_FILES
        );
        FileBuilderInProgress {
            diff_builder: self,
            file_builder: FileBuilder::new(path),
        }
    }

    /// Add a pre-built file to the diff.
    pub fn add_file(mut self, file: FileBuilder) -> Self {
        assert!(
            self.files.len() < MAX_FILES,
            "Cannot add more than {} files to a diff",
            MAX_FILES
        );
        self.files.push(file);
        self
    }

    /// Build the complete diff string.
    pub fn build(self) -> String {
        let mut out = self
            .files
            .iter()
            .map(|f| f.build())
            .collect::<Vec<_>>()
            .join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

/// Helper struct for building a file within a diff.
#[derive(Debug)]
pub struct FileBuilderInProgress {
    diff_builder: DiffBuilder,
    file_builder: FileBuilder,
}

impl FileBuilderInProgress {
    /// Add a hunk to the file.
    pub fn hunk(
        self,
        old_start: u32,
        old_count: u32,
        new_start: u32,
        new_count: u32,
    ) -> HunkBuilderInProgress {
        HunkBuilderInProgress {
            file_in_progress: self,
            hunk_builder: HunkBuilder::new(old_start, old_count, new_start, new_count),
        }
    }

    /// Mark as a rename.
    pub fn rename_from(mut self, old_path: &str) -> Self {
        self.file_builder = self.file_builder.rename_from(old_path);
        self
    }

    /// Finish this file and return to the diff builder.
    pub fn done(mut self) -> DiffBuilder {
        self.diff_builder.files.push(self.file_builder);
        self.diff_builder
    }
}

/// Helper struct for building a hunk within a file.
#[derive(Debug)]
pub struct HunkBuilderInProgress {
    file_in_progress: FileBuilderInProgress,
    hunk_builder: HunkBuilder,
}

impl HunkBuilderInProgress {
    /// Add an added line.
    pub fn add_line(mut self, content: &str) -> Self {
        self.hunk_builder = self.hunk_builder.add_line(content);
        self
    }

    /// Add a removed line.
    pub fn remove(mut self, content: &str) -> Self {
        self.hunk_builder = self.hunk_builder.remove(content);
        self
    }

    /// Finish this hunk and return to the file builder.
    pub fn done(mut self) -> FileBuilderInProgress {
        self.file_in_progress.file_builder = self
            .file_in_progress
            .file_builder
            .add_hunk(self.hunk_builder);
        self.file_in_progress
    }
}

/// A builder for a single file in a diff.
#[derive(Debug, Clone)]
pub struct FileBuilder {
    path: String,
    old_path: Option<String>,
    hunks: Vec<HunkBuilder>,
}

impl FileBuilder {
    /// Create a new file builder with the given path.
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            old_path: None,
            hunks: Vec::new(),
        }
    }

    /// Set the old path for a rename.
    pub fn rename_from(mut self, old_path: &str) -> Self {
        self.old_path = Some(old_path.to_string());
        self
    }

    /// Add a hunk to this file.
    ///
    /// # Panics
    ///
    /// Panics if MAX_HUNKS_PER_FILE would be exceeded.
    pub fn add_hunk(mut self, hunk: HunkBuilder) -> Self {
        assert!(
            self.hunks.len() < MAX_HUNKS_PER_FILE,
            "Cannot add more than {} hunks to a file",
            MAX_HUNKS_PER_FILE
        );
        self.hunks.push(hunk);
        self
    }

    /// Build the diff output for this file.
    pub fn build(&self) -> String {
        let a_path = self.old_path.as_deref().unwrap_or(&self.path);
        let b_path = &self.path;

        let mut lines = vec![format!("diff --git a/{} b/{}", a_path, b_path)];

        if self.old_path.is_some() {
            lines.push("similarity index 100%".to_string());
            lines.push(format!("rename from {}", a_path));
            lines.push(format!("rename to {}", b_path));
            if self.hunks.is_empty() {
                return lines.join("\n");
            }
        }

        lines.push("index 1111111..2222222 100644".to_string());
        lines.push(format!("--- a/{}", a_path));
        lines.push(format!("+++ b/{}", b_path));

        for hunk in &self.hunks {
            lines.push(hunk.build());
        }

        lines.join("\n")
    }
}

/// A builder for a hunk within a file diff.
#[derive(Debug, Clone)]
pub struct HunkBuilder {
    old_start: u32,
    old_count: u32,
    new_start: u32,
    new_count: u32,
    omit_new_count: bool,
    lines: Vec<HunkLine>,
}

#[derive(Debug, Clone)]
enum HunkLine {
    Add(String),
    Remove(String),
}

impl HunkBuilder {
    /// Create a new hunk builder.
    pub fn new(old_start: u32, old_count: u32, new_start: u32, new_count: u32) -> Self {
        Self {
            old_start,
            old_count,
            new_start,
            new_count,
            omit_new_count: false,
            lines: Vec::new(),
        }
    }

    /// Render the new side as `+start` instead of `+start,count`, the way
    /// git abbreviates single-line hunks.
    pub fn abbreviated(mut self) -> Self {
        self.omit_new_count = true;
        self
    }

    /// Add an added line.
    ///
    /// # Panics
    ///
    /// Panics if MAX_LINES_PER_HUNK would be exceeded.
    pub fn add_line(mut self, content: &str) -> Self {
        self.check_line_limits();
        self.lines.push(HunkLine::Add(content.to_string()));
        self
    }

    /// Add a removed line.
    ///
    /// # Panics
    ///
    /// Panics if MAX_LINES_PER_HUNK would be exceeded.
    pub fn remove(mut self, content: &str) -> Self {
        self.check_line_limits();
        self.lines.push(HunkLine::Remove(content.to_string()));
        self
    }

    fn check_line_limits(&self) {
        assert!(
            self.lines.len() < MAX_LINES_PER_HUNK,
            "Cannot add more than {} lines to a hunk",
            MAX_LINES_PER_HUNK
        );
    }

    /// Build the hunk output.
    pub fn build(&self) -> String {
        let new_side = if self.omit_new_count {
            format!("+{}", self.new_start)
        } else {
            format!("+{},{}", self.new_start, self.new_count)
        };

        let mut output = vec![format!(
            "@@ -{},{} {} @@",
            self.old_start, self.old_count, new_side
        )];

        for line in &self.lines {
            match line {
                HunkLine::Add(content) => output.push(format!("+{}", content)),
                HunkLine::Remove(content) => output.push(format!("-{}", content)),
            }
        }

        output.join("\n")
    }
}

/// A builder for `git diff --name-status` output.
#[derive(Debug, Clone, Default)]
pub struct NameStatusBuilder {
    lines: Vec<String>,
}

impl NameStatusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn added(mut self, path: &str) -> Self {
        self.lines.push(format!("A\t{path}"));
        self
    }

    pub fn modified(mut self, path: &str) -> Self {
        self.lines.push(format!("M\t{path}"));
        self
    }

    pub fn deleted(mut self, path: &str) -> Self {
        self.lines.push(format!("D\t{path}"));
        self
    }

    /// A rename line such as `R095\told.js\tnew.js`.
    pub fn renamed(mut self, old_path: &str, new_path: &str, similarity: u8) -> Self {
        self.lines
            .push(format!("R{similarity:03}\t{old_path}\t{new_path}"));
        self
    }

    pub fn build(self) -> String {
        let mut out = self.lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}
