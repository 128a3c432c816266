//! Temporary git repositories for driving the touchlint binary.

#![allow(dead_code)]
#![allow(deprecated)]

use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

/// A throwaway git repository whose first commit is the diff base.
pub struct TestRepo {
    pub dir: TempDir,
    /// SHA of the initial commit.
    pub base_sha: String,
}

impl TestRepo {
    /// A repository whose initial commit holds a single clean JavaScript file.
    pub fn new() -> Self {
        Self::with_initial_content(&[("app/assets/base.js", "var ready = true;\nstart(ready);\n")])
    }

    /// A repository whose initial commit holds `files`.
    pub fn with_initial_content(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path();

        run_git(path, &["init", "--quiet"]);
        run_git(path, &["config", "user.email", "test@example.com"]);
        run_git(path, &["config", "user.name", "Test"]);
        run_git(path, &["config", "commit.gpgsign", "false"]);
        run_git(path, &["config", "diff.renames", "true"]);

        let repo = Self {
            dir,
            base_sha: String::new(),
        };
        for (file, content) in files {
            repo.write_file(file, content);
        }
        let base_sha = repo.commit("initial baseline");

        Self { base_sha, ..repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `relative_path`, creating parent directories.
    pub fn write_file(&self, relative_path: &str, content: &str) {
        let full_path = self.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&full_path, content).expect("write file");
    }

    pub fn write_config(&self, content: &str) {
        self.write_file("touchlint.toml", content);
    }

    /// Stage everything without committing.
    pub fn stage(&self) {
        run_git(self.path(), &["add", "--all"]);
    }

    /// Commit all changes and return the new SHA.
    pub fn commit(&self, message: &str) -> String {
        self.stage();
        run_git(self.path(), &["commit", "--quiet", "-m", message]);
        run_git(self.path(), &["rev-parse", "HEAD"])
    }

    pub fn git(&self, args: &[&str]) -> String {
        run_git(self.path(), args)
    }

    /// `touchlint` with the working directory set to the repository and a
    /// clean environment for the variables it reads.
    pub fn touchlint(&self) -> Command {
        let mut cmd = Command::cargo_bin("touchlint").expect("touchlint binary");
        cmd.current_dir(self.path())
            .env_remove("TOUCHLINT_BASE")
            .env_remove("RUST_LOG");
        cmd
    }

    /// `touchlint check --base <initial commit>` plus `extra_args`.
    pub fn check(&self, extra_args: &[&str]) -> RunResult {
        let mut cmd = self.touchlint();
        cmd.arg("check").arg("--base").arg(&self.base_sha).args(extra_args);
        RunResult::from_command(cmd)
    }

    /// `touchlint` with exactly `args`.
    pub fn run(&self, args: &[&str]) -> RunResult {
        let mut cmd = self.touchlint();
        cmd.args(args);
        RunResult::from_command(cmd)
    }
}

/// Captured outcome of one touchlint run.
#[derive(Debug)]
pub struct RunResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl RunResult {
    pub fn from_command(mut cmd: Command) -> Self {
        let output = cmd.output().expect("run touchlint");
        Self {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    pub fn assert_exit_code(&self, expected: i32) -> &Self {
        assert_eq!(
            self.exit_code, expected,
            "Expected exit code {} but got {}.\nstderr: {}\nstdout: {}",
            expected, self.exit_code, self.stderr, self.stdout
        );
        self
    }

    pub fn assert_stdout_contains(&self, needle: &str) -> &Self {
        assert!(
            self.stdout.contains(needle),
            "Expected stdout to contain '{}'.\nstdout: {}\nstderr: {}",
            needle, self.stdout, self.stderr
        );
        self
    }

    pub fn assert_stdout_lacks(&self, needle: &str) -> &Self {
        assert!(
            !self.stdout.contains(needle),
            "Expected stdout not to contain '{}'.\nstdout: {}",
            needle, self.stdout
        );
        self
    }

    pub fn assert_stderr_contains(&self, needle: &str) -> &Self {
        assert!(
            self.stderr.contains(needle),
            "Expected stderr to contain '{}'.\nstderr: {}",
            needle, self.stderr
        );
        self
    }

    pub fn assert_all_ok(&self) -> &Self {
        self.assert_exit_code(0)
            .assert_stdout_contains("touchlint: All OK - No violations found")
    }

    /// Offense summary lines (`path:line:col: S: Cop: message`).
    pub fn offense_lines(&self) -> Vec<&str> {
        self.stdout
            .lines()
            .filter(|l| l.split(':').nth(3).is_some_and(|s| s.trim().len() == 1))
            .collect()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).expect("stdout should be JSON")
    }
}

fn run_git(dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .expect("run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
