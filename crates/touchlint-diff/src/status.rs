/// Status letter from `git diff --name-status`, as far as touchlint cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusCode {
    Added,
    Modified,
    Renamed,
    /// Anything else (`D`, `C75`, `T`, an `R` line missing its target, ...).
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub code: StatusCode,
    /// Post-change path. For renames this is the new path.
    pub path: String,
    /// Pre-change path of a rename.
    pub source: Option<String>,
}

/// Parse one name-status line.
///
/// Supports `A\tpath.rb`, `M\tpath.rb` and `R100\told.rb\tnew.rb`.
/// Returns `None` for blank lines and lines without a path.
pub fn parse_status_line(line: &str) -> Option<StatusEntry> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let parts: Vec<&str> = line.split('\t').collect();
    let code = parts[0];

    if code.starts_with('R') && parts.len() == 3 {
        return Some(StatusEntry {
            code: StatusCode::Renamed,
            path: parts[2].to_string(),
            source: Some(parts[1].to_string()),
        });
    }

    let path = parts.get(1).filter(|p| !p.is_empty())?;
    let code = match code {
        "A" => StatusCode::Added,
        "M" => StatusCode::Modified,
        "R" => StatusCode::Renamed,
        other => StatusCode::Other(other.to_string()),
    };

    Some(StatusEntry {
        code,
        path: path.to_string(),
        source: None,
    })
}

/// Parse a full `git diff --name-status` output, skipping unusable lines.
pub fn parse_name_status(text: &str) -> Vec<StatusEntry> {
    text.lines().filter_map(parse_status_line).collect()
}
