use tracing::{debug, info};

use touchlint_diff::{StatusCode, changed_line_sets, parse_name_status};
use touchlint_domain::{PATHSPECS, categorize};
use touchlint_types::{ChangeDescriptor, ChangeSet};

use crate::git::{DiffScope, Vcs};

/// Refs tried, in order, when no base is given.
pub const BASE_CANDIDATES: [&str; 4] = ["origin/main", "origin/master", "main", "master"];

/// Base used when no candidate exists.
pub const FALLBACK_BASE: &str = "HEAD~1";

/// First existing ref among [`BASE_CANDIDATES`], else [`FALLBACK_BASE`].
pub fn detect_base<V: Vcs + ?Sized>(vcs: &V) -> String {
    BASE_CANDIDATES
        .iter()
        .find(|r| vcs.ref_exists(r))
        .unwrap_or(&FALLBACK_BASE)
        .to_string()
}

/// The diff scope for a run. A staged run ignores `base_ref`.
pub fn diff_scope<V: Vcs + ?Sized>(vcs: &V, base_ref: Option<&str>, only_staged: bool) -> DiffScope {
    if only_staged {
        return DiffScope::Staged;
    }
    let base = match base_ref.map(str::trim).filter(|b| !b.is_empty()) {
        Some(b) => b.to_string(),
        None => detect_base(vcs),
    };
    DiffScope::Range { base }
}

/// Build the change set for a run.
///
/// Added files are linted in full. Modified and renamed files carry the
/// new-side line numbers touched by `--unified=0` hunks. The second diff
/// also names each rename's old path so git reports the pair as a rename.
pub fn resolve<V: Vcs + ?Sized>(vcs: &V, base_ref: Option<&str>, only_staged: bool) -> ChangeSet {
    let scope = diff_scope(vcs, base_ref, only_staged);
    info!("resolving changes for {scope}");

    let mut change_set = ChangeSet::new();
    let mut rename_sources = Vec::new();
    for entry in parse_name_status(&vcs.name_status(&scope, &PATHSPECS)) {
        let Some(category) = categorize(&entry.path) else {
            debug!("{}: unsupported extension", entry.path);
            continue;
        };
        let descriptor = match entry.code {
            StatusCode::Added => ChangeDescriptor::new_file(entry.path, category),
            StatusCode::Modified => ChangeDescriptor::modified(entry.path, category),
            StatusCode::Renamed => {
                rename_sources.extend(entry.source);
                ChangeDescriptor::modified(entry.path, category)
            }
            StatusCode::Other(code) => {
                debug!("{}: ignoring status {code}", entry.path);
                continue;
            }
        };
        change_set.insert(descriptor);
    }

    let mut paths = change_set.modified_paths();
    if paths.is_empty() {
        return change_set;
    }
    // Git only pairs a rename when both sides pass the pathspec.
    paths.extend(rename_sources);

    for (path, lines) in changed_line_sets(&vcs.unified_zero(&scope, &paths)) {
        match change_set.get_mut(&path) {
            Some(descriptor) => descriptor.add_changed_lines(lines),
            None => debug!("{path}: hunks for a file outside the change set"),
        }
    }

    change_set
}
