use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

/// Which changes a diff query looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffScope {
    /// The index against `HEAD` (`git diff --staged`).
    Staged,
    /// Everything on `HEAD` since it forked from `base` (`git diff base...HEAD`).
    Range { base: String },
}

impl DiffScope {
    fn arg(&self) -> String {
        match self {
            DiffScope::Staged => "--staged".to_string(),
            DiffScope::Range { base } => format!("{base}...HEAD"),
        }
    }
}

impl fmt::Display for DiffScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffScope::Staged => f.write_str("staged changes"),
            DiffScope::Range { base } => write!(f, "{base}...HEAD"),
        }
    }
}

/// Read-only version-control queries used to build a change set.
///
/// Implementations never fail: problems are logged and whatever output was
/// captured (possibly nothing) is returned.
pub trait Vcs {
    /// `git diff --name-status` output for `scope`, limited to `pathspecs`.
    fn name_status(&self, scope: &DiffScope, pathspecs: &[&str]) -> String;

    /// `git diff --unified=0` output for `scope`, limited to `paths`.
    fn unified_zero(&self, scope: &DiffScope, paths: &[String]) -> String;

    /// Whether `reference` names a commit.
    fn ref_exists(&self, reference: &str) -> bool;
}

/// [`Vcs`] backed by the `git` executable.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    workdir: Option<PathBuf>,
}

impl GitCli {
    /// Run git in the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git in `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(dir.into()),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new("git");
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn capture(&self, args: &[String]) -> String {
        let shown = format!("git {}", args.join(" "));
        debug!("running {shown}");

        let output = match self.command().args(args).output() {
            Ok(o) => o,
            Err(e) => {
                warn!("{shown} could not be started: {e}");
                return String::new();
            }
        };

        if !output.status.success() {
            warn!(
                "{shown} failed (exit={}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }

        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}

impl Vcs for GitCli {
    fn name_status(&self, scope: &DiffScope, pathspecs: &[&str]) -> String {
        let mut args = vec!["diff".to_string(), "--name-status".to_string(), scope.arg()];
        args.push("--".to_string());
        args.extend(pathspecs.iter().map(|p| p.to_string()));
        self.capture(&args)
    }

    fn unified_zero(&self, scope: &DiffScope, paths: &[String]) -> String {
        let mut args = vec!["diff".to_string(), "--unified=0".to_string(), scope.arg()];
        args.push("--".to_string());
        args.extend(paths.iter().cloned());
        self.capture(&args)
    }

    fn ref_exists(&self, reference: &str) -> bool {
        let status = self
            .command()
            .args(["rev-parse", "--verify", "--quiet", reference])
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(s) => s.success(),
            Err(e) => {
                debug!("git rev-parse --verify {reference} could not be started: {e}");
                false
            }
        }
    }
}
