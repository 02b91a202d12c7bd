//! One conversion run: resolve inputs, aggregate them, write the feed list.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::aggregate::{Aggregator, FileReport};
use crate::config::RunConfig;
use crate::feed::ExtractOptions;
use crate::{input, output};

/// Progress of a run, reported once per step in input order.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    /// A resolved input does not exist and is skipped.
    Missing(&'a Path),
    /// An input is about to be parsed.
    Processing(&'a Path),
    /// An input failed to parse and contributes no feeds.
    Failed { path: &'a Path, error: &'a str },
    /// An input is done; `extracted` counts feeds before deduplication.
    Found { extracted: usize },
}

impl Progress<'_> {
    /// Whether the step is worth reporting on stderr.
    pub fn is_warning(&self) -> bool {
        matches!(self, Progress::Missing(_) | Progress::Failed { .. })
    }
}

impl fmt::Display for Progress<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::Missing(path) => {
                write!(f, "Warning: {} not found, skipping...", path.display())
            }
            Progress::Processing(path) => write!(f, "Processing {}...", path.display()),
            Progress::Failed { path, error } => {
                write!(f, "Error parsing {}: {}", path.display(), error)
            }
            Progress::Found { extracted } => write!(f, "  Found {} feeds", extracted),
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Where the feed list was written.
    pub output_path: PathBuf,
    /// Distinct feed URLs written.
    pub unique_count: usize,
    /// One report per input that existed, in processing order.
    pub reports: Vec<FileReport>,
    /// Inputs that did not exist.
    pub missing: Vec<PathBuf>,
}

/// Runs a conversion with paths resolved relative to `base`.
///
/// An empty `base` means the current working directory. Missing and
/// unparsable inputs are reported through `on_progress` and skipped;
/// only a failure to write the output is an error.
pub async fn convert<F>(run: &RunConfig, base: &Path, mut on_progress: F) -> Result<Summary>
where
    F: FnMut(Progress<'_>),
{
    let options = ExtractOptions {
        http_only: run.http_only,
    };
    let mut aggregator = Aggregator::new(run.add_comments, options);
    let mut reports = Vec::new();
    let mut missing = Vec::new();

    for path in input::resolve_in(base, &run.input_patterns) {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Input file not found, skipping");
            on_progress(Progress::Missing(&path));
            missing.push(path);
            continue;
        }

        on_progress(Progress::Processing(&path));
        let report = aggregator.add_file(&path).await;
        if let Some(error) = &report.error {
            on_progress(Progress::Failed { path: &path, error });
        }
        on_progress(Progress::Found {
            extracted: report.extracted,
        });
        reports.push(report);
    }

    let result = aggregator.finish();
    let output_path = base.join(&run.output_path);
    output::write_feedlist(&result.records, &output_path, run.add_comments)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    tracing::info!(
        unique = result.unique_count,
        output = %output_path.display(),
        "Feed list written"
    );
    Ok(Summary {
        output_path,
        unique_count: result.unique_count,
        reports,
        missing,
    })
}
