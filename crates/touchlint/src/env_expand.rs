//! Environment variable expansion for configuration files.
//!
//! - `${VAR}` is replaced with the value of `VAR`; an unset variable is an error.
//! - `${VAR:-default}` uses `default` when `VAR` is unset or empty.
//!
//! A `$` not followed by `{` is kept as is.

use std::borrow::Cow;

use anyhow::{Result, bail};

/// Expand references against the process environment.
pub fn expand_env_vars(text: &str) -> Result<Cow<'_, str>> {
    expand_with(text, |name| std::env::var(name).ok())
}

/// Expand references, resolving names through `lookup`.
pub fn expand_with<F>(text: &str, lookup: F) -> Result<Cow<'_, str>>
where
    F: Fn(&str) -> Option<String>,
{
    if !text.contains("${") {
        return Ok(Cow::Borrowed(text));
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let body = &rest[start + 2..];
        let Some(end) = body.find('}') else {
            let shown: String = body.chars().take(20).collect();
            bail!(
                "unclosed environment variable reference at byte {}: ${{{shown}",
                text.len() - rest.len() + start
            );
        };
        out.push_str(&expand_one(&body[..end], &lookup)?);
        rest = &body[end + 1..];
    }
    out.push_str(rest);

    Ok(Cow::Owned(out))
}

fn expand_one<F>(reference: &str, lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match reference.split_once(":-") {
        Some((name, default)) => {
            validate_name(name)?;
            Ok(lookup(name)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string()))
        }
        None => {
            validate_name(reference)?;
            match lookup(reference) {
                Some(value) => Ok(value),
                None => bail!(
                    "environment variable '{reference}' is not set; \
                     use ${{{reference}:-default}} to provide a default"
                ),
            }
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        bail!("empty environment variable name in ${{}}");
    };
    if !first.is_ascii_alphabetic() && first != '_' {
        bail!("invalid environment variable name '{name}': must start with a letter or underscore");
    }
    if let Some(bad) = chars.find(|c| !c.is_ascii_alphanumeric() && *c != '_') {
        bail!("invalid environment variable name '{name}': contains '{bad}'");
    }
    Ok(())
}
