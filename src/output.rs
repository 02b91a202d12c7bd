//! Rendering and writing of the plain-text feed list.
//!
//! One URL per line. With comments enabled each feed is preceded by a
//! `# <title>` line (when it has a title) and followed by a blank line;
//! comment records such as section markers are written as-is with no
//! trailing blank line.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::feed::FeedRecord;
use crate::util::sanitize_title;

/// Renders records into the feed list text.
pub fn format_feedlist(records: &[FeedRecord], add_comments: bool) -> String {
    let mut out = String::new();

    for record in records {
        let is_comment = record.is_comment();
        if add_comments && !is_comment && !record.title.is_empty() {
            out.push_str("# ");
            out.push_str(&sanitize_title(&record.title));
            out.push('\n');
        }
        out.push_str(&record.url);
        out.push('\n');
        if add_comments && !is_comment {
            out.push('\n');
        }
    }

    out
}

/// Writes the feed list to `path` atomically, replacing any existing file.
///
/// Content goes to a temporary file in the same directory, is synced to
/// disk, then renamed over the destination. On failure the temporary file
/// is removed and an existing destination is left untouched.
pub fn write_feedlist(records: &[FeedRecord], path: &Path, add_comments: bool) -> Result<()> {
    use std::time::{SystemTime, UNIX_EPOCH};

    let content = format_feedlist(records, add_comments);

    // SEC-009: Randomized temp filename to prevent TOCTOU race conditions
    let random_suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = path.with_extension(format!("tmp.{:016x}", random_suffix));

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .with_context(|| {
            format!(
                "Failed to create temporary file '{}': check directory permissions",
                temp_path.display()
            )
        })?;

    file.write_all(content.as_bytes()).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to write feed list to temporary file '{}'",
            temp_path.display()
        )
    })?;

    file.sync_all().with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to sync temporary file '{}' to disk",
            temp_path.display()
        )
    })?;

    drop(file);

    // On Windows, rename fails if destination exists, so remove it first
    #[cfg(windows)]
    if path.exists() {
        std::fs::remove_file(path).with_context(|| {
            let _ = std::fs::remove_file(&temp_path);
            format!("Failed to replace existing '{}'", path.display())
        })?;
    }

    std::fs::rename(&temp_path, path).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to rename '{}' to '{}'",
            temp_path.display(),
            path.display()
        )
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote feed list");
    Ok(())
}
