use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};

use touchlint_core::{
    CommandAnalyzer, DispatchSummary, Dispatcher, GitCli, render_json, render_text, resolve,
};
use touchlint_domain::{Linter, builtin_linters};
use touchlint_types::{BASE_ENV_VAR, Category, OutputFormat, Severity, TOOL_NAME};

mod config_loader;
mod env_expand;

use config_loader::load_config;

/// Exit code for configuration and usage errors.
const EXIT_CONFIG_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "touchlint")]
#[command(about = "Lint only the lines a change touches", long_about = None)]
struct Cli {
    /// Enable verbose (info-level) logging to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Enable debug-level logging to stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint changed files. Modified files are checked on changed lines only.
    Check(Box<CheckArgs>),

    /// Print the built-in JavaScript and ERB rule tables in precedence order.
    Rules(RulesArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Lint these files in full instead of asking git what changed.
    #[arg(value_name = "FILE", conflicts_with_all = ["base", "staged"])]
    files: Vec<String>,

    /// Base ref for the diff. Falls back to $TOUCHLINT_BASE, the config
    /// file, then the first of origin/main, origin/master, main, master.
    #[arg(long)]
    base: Option<String>,

    /// Check staged changes instead of the base...HEAD range.
    #[arg(long)]
    staged: bool,

    /// Path to a config file. If omitted, uses ./touchlint.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report format. Defaults to the config file's, else text.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

#[derive(Parser, Debug)]
struct RulesArgs {
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    match run_with_args(std::env::args_os()) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("{TOOL_NAME}: {err:?}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

fn run_with_args<I, T>(args: I) -> Result<u8>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    init_logging(cli.verbose, cli.debug);

    match cli.command {
        Commands::Check(args) => cmd_check(*args),
        Commands::Rules(args) => {
            cmd_rules(args)?;
            Ok(0)
        }
    }
}

fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("logging initialized at level: {level}");
}

fn cmd_check(args: CheckArgs) -> Result<u8> {
    let cfg = load_config(args.config)?;

    let format = args
        .format
        .map(OutputFormat::from)
        .or(cfg.defaults.format)
        .unwrap_or_default();

    let analyzer = cfg
        .analyzer
        .enabled
        .then(|| CommandAnalyzer::from_config(&cfg.analyzer));

    let mut dispatcher = Dispatcher::new(".")
        .with_exclude(&cfg.exclude)
        .context("compile exclude globs")?;
    if let Some(analyzer) = &analyzer {
        dispatcher = dispatcher.with_analyzer(analyzer);
    }

    if format == OutputFormat::Text {
        println!("[START] {}", Local::now().format("%Y-%m-%d %H:%M:%S %z"));
    }

    let summary = if args.files.is_empty() {
        let env_base = std::env::var(BASE_ENV_VAR).ok();
        let base = effective_base(
            args.base.as_deref(),
            env_base.as_deref(),
            cfg.defaults.base.as_deref(),
        );
        let staged = args.staged || cfg.defaults.staged;
        if let Some(base) = base {
            info!("base ref: {base}");
        }

        let change_set = resolve(&GitCli::new(), base, staged);
        dispatcher.run(&change_set)
    } else {
        dispatcher.run_paths(&args.files)
    };

    let code = exit_code(&summary);
    match format {
        OutputFormat::Text => {
            print!("{}", render_text(&summary));
            if code == 0 {
                println!("{TOOL_NAME}: All OK - No violations found");
            }
        }
        OutputFormat::Json => {
            println!("{}", render_json(&summary).context("render json")?);
        }
    }

    Ok(code)
}

/// First non-blank base among the flag, the environment and the config.
fn effective_base<'a>(
    flag: Option<&'a str>,
    env: Option<&'a str>,
    config: Option<&'a str>,
) -> Option<&'a str> {
    [flag, env, config]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|b| !b.is_empty())
}

fn exit_code(summary: &DispatchSummary) -> u8 {
    if summary.exit_code() == 0 { 0 } else { 1 }
}

#[derive(Debug, Serialize)]
struct TableListing {
    category: Category,
    table: &'static str,
    rules: Vec<RuleListing>,
}

#[derive(Debug, Serialize)]
struct RuleListing {
    id: &'static str,
    cop_name: &'static str,
    severity: Severity,
    pattern: &'static str,
    message: &'static str,
}

fn rule_listings(linters: &[&'static dyn Linter]) -> Vec<TableListing> {
    linters
        .iter()
        .copied()
        .flat_map(|linter| {
            let category = linter.category();
            linter.tables().iter().map(move |table| TableListing {
                category,
                table: table.name,
                rules: table
                    .rules
                    .iter()
                    .map(|rule| RuleListing {
                        id: rule.id,
                        cop_name: rule.cop_name,
                        severity: rule.severity,
                        pattern: rule.describe(),
                        message: rule.message,
                    })
                    .collect(),
            })
        })
        .collect()
}

fn render_rules_text(listings: &[TableListing]) -> String {
    let mut out = String::new();
    for listing in listings {
        out.push_str(&format!("{}/{}\n", listing.category.as_str(), listing.table));
        for rule in &listing.rules {
            out.push_str(&format!(
                "  {:<22} {:<8} {}: {}\n",
                rule.id,
                rule.severity.as_str(),
                rule.cop_name,
                rule.message
            ));
        }
    }
    out
}

fn cmd_rules(args: RulesArgs) -> Result<()> {
    let listings = rule_listings(&builtin_linters());

    match args.format {
        FormatArg::Text => print!("{}", render_rules_text(&listings)),
        FormatArg::Json => {
            let s = serde_json::to_string_pretty(&listings).context("render json")?;
            println!("{s}");
        }
    }

    Ok(())
}
