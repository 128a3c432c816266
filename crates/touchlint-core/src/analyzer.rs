use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use serde::Deserialize;
use tracing::debug;

use touchlint_types::{AnalyzerConfig, Location, Offense, Severity};

#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to talk to `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` did not produce a JSON report: {source}")]
    InvalidReport {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

/// External analyzer for files without an in-process engine.
pub trait Analyzer {
    /// Analyze `content` as if it were the file at `path`.
    fn analyze(&self, path: &str, content: &str) -> Result<Vec<Offense>, AnalyzerError>;
}

/// [`Analyzer`] that pipes the file into a command speaking RuboCop's JSON
/// formatter, e.g. `rubocop --format json --force-exclusion --stdin <path>`.
#[derive(Debug, Clone)]
pub struct CommandAnalyzer {
    command: String,
    args: Vec<String>,
    workdir: Option<PathBuf>,
}

impl CommandAnalyzer {
    /// `args` go before the file path.
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            workdir: None,
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    fn display(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Analyzer for CommandAnalyzer {
    fn analyze(&self, path: &str, content: &str) -> Result<Vec<Offense>, AnalyzerError> {
        let shown = self.display();
        debug!("running {shown} {path}");

        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|source| AnalyzerError::Spawn {
            command: shown.clone(),
            source,
        })?;

        // stdin is fed concurrently with draining stdout.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = content.to_owned();
            thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output().map_err(|source| AnalyzerError::Io {
            command: shown.clone(),
            source,
        })?;

        if let Some(Ok(Err(source))) = writer.map(|w| w.join()) {
            if source.kind() != io::ErrorKind::BrokenPipe {
                return Err(AnalyzerError::Io {
                    command: shown,
                    source,
                });
            }
        }

        if !output.status.success() {
            // RuboCop exits 1 when it finds offenses; the report decides.
            debug!("{shown} exited with {}", output.status);
        }

        parse_report(&String::from_utf8_lossy(&output.stdout)).map_err(|source| {
            AnalyzerError::InvalidReport {
                command: shown,
                source,
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct Report {
    #[serde(default)]
    files: Vec<FileReport>,
}

#[derive(Debug, Deserialize)]
struct FileReport {
    #[serde(default)]
    offenses: Vec<ReportedOffense>,
}

#[derive(Debug, Deserialize)]
struct ReportedOffense {
    severity: String,
    cop_name: String,
    message: String,
    location: ReportedLocation,
}

#[derive(Debug, Deserialize)]
struct ReportedLocation {
    line: u32,
    column: u32,
    #[serde(default)]
    length: u32,
}

/// Parse a RuboCop-style JSON report. Only the first file entry is used.
pub fn parse_report(json: &str) -> Result<Vec<Offense>, serde_json::Error> {
    let report: Report = serde_json::from_str(json)?;
    let Some(file) = report.files.into_iter().next() else {
        return Ok(Vec::new());
    };

    Ok(file
        .offenses
        .into_iter()
        .map(|o| Offense {
            rule: o.cop_name.clone(),
            message: o.message,
            severity: Severity::from_analyzer(&o.severity),
            cop_name: o.cop_name,
            line_content: String::new(),
            location: Location {
                line: o.location.line,
                column: o.location.column,
                length: o.location.length,
            },
        })
        .collect())
}
