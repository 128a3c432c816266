//! Configuration file discovery and loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use touchlint_types::{CONFIG_FILE_NAME, ConfigFile};

use crate::env_expand::expand_env_vars;

/// Load the explicit config, else [`CONFIG_FILE_NAME`] in the working
/// directory if it exists, else built-in defaults. An explicit path that cannot be read is an error.
pub fn load_config(path: Option<PathBuf>) -> Result<ConfigFile> {
    let user_path = path.or_else(|| {
        let p = PathBuf::from(CONFIG_FILE_NAME);
        if p.exists() { Some(p) } else { None }
    });

    let Some(path) = user_path else {
        debug!("no config file found, using defaults");
        return Ok(ConfigFile::default());
    };

    info!("loading config from {}", path.display());
    load_config_file(&path, |text| Ok(expand_env_vars(text)?.into_owned()))
}

/// Read `path`, pass its text through `expand_env`, then parse it.
pub fn load_config_file<F>(path: &Path, expand_env: F) -> Result<ConfigFile>
where
    F: Fn(&str) -> Result<String>,
{
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;

    let expanded =
        expand_env(&text).with_context(|| format!("expand config '{}'", path.display()))?;

    let config: ConfigFile =
        toml::from_str(&expanded).with_context(|| format!("parse config '{}'", path.display()))?;

    debug!(
        "config: {} exclude glob(s), analyzer {}",
        config.exclude.len(),
        if config.analyzer.enabled { "enabled" } else { "disabled" }
    );
    Ok(config)
}
