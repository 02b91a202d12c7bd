//! Expansion of command-line input arguments into file paths.
//!
//! Arguments containing `*` or `?` are wildcard patterns matched against the
//! filesystem; anything else is taken literally, whether or not it exists.
//! Existence is checked later, when each path is processed, so a missing
//! file is reported in argument order.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

/// Characters that turn an argument into a wildcard pattern.
const WILDCARDS: [char; 2] = ['*', '?'];

/// `*` stays within one path segment; dot-files are matched like any other.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

pub fn has_wildcard(arg: &str) -> bool {
    arg.contains(WILDCARDS)
}

/// Resolves arguments relative to the current working directory.
///
/// Returned paths keep the form the user typed (`feeds.opml`, not
/// `./feeds.opml`).
pub fn resolve<S: AsRef<str>>(args: &[S]) -> Vec<PathBuf> {
    resolve_in(Path::new(""), args)
}

/// Resolves arguments relative to `base`.
///
/// Output order is argument order. Matches of a single pattern are sorted
/// lexicographically so repeated runs see files in the same order. A path
/// produced by two arguments appears twice.
pub fn resolve_in<S: AsRef<str>>(base: &Path, args: &[S]) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    for arg in args {
        let arg = arg.as_ref();
        if has_wildcard(arg) {
            paths.extend(expand_pattern(base, arg));
        } else {
            paths.push(base.join(arg));
        }
    }

    paths
}

fn expand_pattern(base: &Path, pattern: &str) -> Vec<PathBuf> {
    let escaped_base = Pattern::escape(&base.to_string_lossy());
    let full_pattern = Path::new(&escaped_base).join(pattern);
    let full_pattern = full_pattern.to_string_lossy();

    let entries = match glob::glob_with(&full_pattern, MATCH_OPTIONS) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(pattern = %pattern, error = %e, "Invalid wildcard pattern, skipping");
            return Vec::new();
        }
    };

    let mut matches: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(path = %e.path().display(), error = %e.error(), "Unreadable path while expanding pattern");
                None
            }
        })
        .collect();
    matches.sort();

    if matches.is_empty() {
        tracing::warn!(pattern = %pattern, "Pattern matched no files");
    } else {
        tracing::debug!(pattern = %pattern, count = matches.len(), "Expanded wildcard pattern");
    }

    matches
}
