use std::path::Path;

use touchlint_types::Category;

/// Pathspecs handed to `git diff --name-status`, one per supported extension.
pub const PATHSPECS: [&str; 3] = ["*.rb", "*.js", "*.erb"];

/// Engine family for a path, from its final extension.
///
/// Returns `None` for unsupported extensions, extensionless paths and
/// dotfiles such as `.rb`.
pub fn categorize(path: impl AsRef<Path>) -> Option<Category> {
    match path.as_ref().extension().and_then(|e| e.to_str()) {
        Some("rb") => Some(Category::Ruby),
        Some("js") => Some(Category::JavaScript),
        Some("erb") => Some(Category::Erb),
        _ => None,
    }
}
