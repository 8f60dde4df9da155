//! Utility functions for file collection and path display.

use crate::constants::DEFAULT_EXCLUDE_DIRS;
use std::path::{Path, PathBuf};

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips a leading "./" prefix (for cleaner output)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use mdphpfix::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new("./docs/guide.md")), "docs/guide.md");
/// ```
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    let normalized = s.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Checks if a directory name matches any exclusion pattern.
/// Supports exact matching and wildcard patterns starting with `*.`.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    for exclude in excludes {
        if exclude.starts_with("*.") {
            if name.ends_with(&exclude[1..]) {
                return true;
            }
        } else if name == exclude {
            return true;
        }
    }
    false
}

/// Collects Markdown files from a directory with gitignore support.
///
/// Uses the `ignore` crate to respect .gitignore, .git/info/exclude, and the
/// global gitignore IN ADDITION to the default directory exclusions (.git,
/// `node_modules`, vendor, etc.). Excluded directories are pruned at
/// traversal time so the walker never descends into them.
///
/// The result is sorted so batch output is deterministic.
#[must_use]
pub fn collect_markdown_files(root: &Path, exclude: &[String]) -> Vec<PathBuf> {
    use ignore::WalkBuilder;

    let mut all_excludes: Vec<String> = exclude.to_vec();
    all_excludes.extend(DEFAULT_EXCLUDE_DIRS.iter().map(|&s| s.to_owned()));

    let excludes_for_filter = all_excludes;
    let root_for_filter = root.to_path_buf();

    let walker = WalkBuilder::new(root)
        .hidden(false) // Don't skip hidden files (defaults handle .git etc.)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(move |entry| {
            // Always allow the root directory
            if entry.path() == root_for_filter {
                return true;
            }

            // Only filter directories - files are filtered by extension below
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }

            if let Some(name) = entry.file_name().to_str() {
                if is_excluded(name, &excludes_for_filter) {
                    return false;
                }
            }

            true
        })
        .build();

    let mut files: Vec<PathBuf> = walker
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();

    files.sort();
    files
}
