//! Combines per-file extraction results into one deduplicated feed list.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::feed::{self, ExtractOptions, FeedRecord};

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    /// Feeds found in the file, before deduplication.
    pub extracted: usize,
    /// Feeds from this file that were new to the run.
    pub added: usize,
    /// Why the file contributed nothing, if it failed to parse.
    pub error: Option<String>,
}

/// Final result of a run over all inputs.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Records in output order, including section markers.
    pub records: Vec<FeedRecord>,
    /// Number of distinct feed URLs across every input.
    pub unique_count: usize,
}

/// Accumulates records across input files, first-seen URL wins.
///
/// The seen-URL set spans the whole run, so a feed listed in two files is
/// written once, at its first position. URLs are compared as exact strings.
#[derive(Debug, Default)]
pub struct Aggregator {
    add_comments: bool,
    options: ExtractOptions,
    seen: HashSet<String>,
    records: Vec<FeedRecord>,
}

impl Aggregator {
    pub fn new(add_comments: bool, options: ExtractOptions) -> Self {
        Self {
            add_comments,
            options,
            ..Self::default()
        }
    }

    /// Extracts one file and folds its feeds into the run.
    ///
    /// A file that fails to read or parse is logged and counts as zero
    /// feeds; the run carries on.
    pub async fn add_file(&mut self, path: &Path) -> FileReport {
        match feed::parse(path, self.options).await {
            Ok(feeds) => {
                let extracted = feeds.len();
                let added = self.add_records(&display_name(path), feeds);
                tracing::info!(path = %path.display(), extracted, added, "Processed OPML file");
                FileReport {
                    path: path.to_path_buf(),
                    extracted,
                    added,
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %format!("{:#}", e), "Failed to parse OPML file");
                FileReport {
                    path: path.to_path_buf(),
                    extracted: 0,
                    added: 0,
                    error: Some(format!("{:#}", e)),
                }
            }
        }
    }

    /// Appends the feeds of one file, returning how many were new.
    ///
    /// When comments are enabled and the file produced at least one feed, a
    /// section header naming `file_name` goes first, even if every feed
    /// turns out to be a duplicate.
    pub fn add_records(&mut self, file_name: &str, feeds: Vec<FeedRecord>) -> usize {
        if self.add_comments && !feeds.is_empty() {
            self.records.extend(FeedRecord::section_header(file_name));
        }

        let before = self.seen.len();
        for feed in feeds {
            if self.seen.insert(feed.url.clone()) {
                self.records.push(feed);
            }
        }
        self.seen.len() - before
    }

    pub fn unique_count(&self) -> usize {
        self.seen.len()
    }

    pub fn finish(self) -> Aggregation {
        Aggregation {
            unique_count: self.seen.len(),
            records: self.records,
        }
    }
}

/// File name without its directory, as shown in section headers.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
