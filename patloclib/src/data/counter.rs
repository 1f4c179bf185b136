//! High-level counting API.
//!
//! This module ties discovery, reading and classification together: it
//! feeds every file through a fresh [`ScanState`](super::classifier::ScanState)
//! and sums the per-file tallies into a run total.

use std::path::Path;

use tracing::{debug, info};

use crate::error::PatlocError;
use crate::options::{Aggregation, OrderBy};
use crate::rules::RuleSet;
use crate::source::{discover_files, FilterConfig, SourceFile, SourceFiles};
use crate::Result;

use super::classifier::LineClassifier;
use super::stats::{FileTally, Tally};

/// Options for a counting run.
#[derive(Debug, Clone, Default)]
pub struct CountOptions {
    /// File filter configuration (directory runs only)
    pub file_filter: FilterConfig,
    /// Aggregation level for results
    pub aggregation: Aggregation,
    /// Ordering of the per-file breakdown
    pub order_by: OrderBy,
}

impl CountOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.file_filter = filter;
        self
    }

    /// Set aggregation level.
    pub fn aggregation(mut self, level: Aggregation) -> Self {
        self.aggregation = level;
        self
    }

    /// Set ordering of per-file results.
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by = order;
        self
    }
}

/// Result of a counting run over a file or directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResult {
    /// Number of files analyzed
    pub file_count: usize,
    /// Run total across all files
    pub total: Tally,
    /// Per-file tallies (only with [`Aggregation::ByFile`])
    pub files: Vec<FileTally>,
}

impl CountResult {
    /// An empty result whose total has a zeroed counter per rule.
    pub fn for_rules(rules: &RuleSet) -> Self {
        Self {
            file_count: 0,
            total: Tally::for_rules(rules),
            files: Vec::new(),
        }
    }

    /// Sort the per-file breakdown.
    pub fn sort_files(&mut self, order: OrderBy) {
        match order {
            OrderBy::Path => self.files.sort_by(|a, b| a.path.cmp(&b.path)),
            OrderBy::Total => self.files.sort_by(|a, b| {
                b.tally
                    .total_lines
                    .cmp(&a.tally.total_lines)
                    .then_with(|| a.path.cmp(&b.path))
            }),
            OrderBy::Code => self.files.sort_by(|a, b| {
                b.tally
                    .code_lines
                    .cmp(&a.tally.code_lines)
                    .then_with(|| a.path.cmp(&b.path))
            }),
        }
    }
}

/// Count lines in a file or directory.
///
/// A file is counted on its own (the glob filter is not applied to an
/// explicitly named file); a directory is walked recursively. Anything
/// else is rejected with [`PatlocError::InvalidPath`] before any counting
/// starts.
///
/// # Example
///
/// ```rust
/// use patloclib::{count_path, CountOptions, RulesConfig};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::write(dir.path().join("a.c"), "// hi\nint x;\n").unwrap();
/// fs::write(dir.path().join("b.c"), "/* one\ntwo */\n").unwrap();
///
/// let rules = RulesConfig::c_style().compile().unwrap();
/// let result = count_path(dir.path(), &rules, &CountOptions::new()).unwrap();
///
/// assert_eq!(result.file_count, 2);
/// assert_eq!(result.total.total_lines, 6);
/// assert_eq!(result.total.count("multiLineComment"), Some(2));
/// ```
pub fn count_path(
    path: impl AsRef<Path>,
    rules: &RuleSet,
    options: &CountOptions,
) -> Result<CountResult> {
    let path = path.as_ref();

    if path.is_file() {
        info!(path = %path.display(), "analyzing file");
        let file = SourceFile::read(path)?;
        return count_sources(std::iter::once(Ok(file)), rules, options.aggregation);
    }

    if path.is_dir() {
        return count_directory(path, rules, options);
    }

    Err(PatlocError::InvalidPath(path.to_path_buf()))
}

/// Count lines in every file under a directory.
pub fn count_directory(
    path: impl AsRef<Path>,
    rules: &RuleSet,
    options: &CountOptions,
) -> Result<CountResult> {
    let path = path.as_ref();

    if !path.is_dir() {
        return Err(PatlocError::InvalidPath(path.to_path_buf()));
    }

    info!(path = %path.display(), "analyzing directory");
    let files = discover_files(path, &options.file_filter)?;
    debug!(count = files.len(), "discovered files");

    let mut result = count_sources(SourceFiles::new(files), rules, options.aggregation)?;
    result.sort_files(options.order_by);
    Ok(result)
}

/// Count lines in a single file.
///
/// # Example
///
/// ```rust
/// use patloclib::{count_file, RulesConfig};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// let file_path = dir.path().join("main.c");
/// fs::write(&file_path, "int main() {\n    // nothing\n}").unwrap();
///
/// let rules = RulesConfig::c_style().compile().unwrap();
/// let tally = count_file(&file_path, &rules).unwrap();
/// assert_eq!(tally.code_lines, 2);
/// assert_eq!(tally.count("singleLineComment"), Some(1));
/// ```
pub fn count_file(path: impl AsRef<Path>, rules: &RuleSet) -> Result<Tally> {
    let file = SourceFile::read(path.as_ref())?;
    Ok(LineClassifier::new(rules).classify_source(&file.content))
}

/// Count lines in any sequence of files.
///
/// Each file is classified from a fresh scan state into its own tally,
/// which is then added to the run total. The first read error aborts the
/// run.
pub fn count_sources<I>(sources: I, rules: &RuleSet, aggregation: Aggregation) -> Result<CountResult>
where
    I: IntoIterator<Item = Result<SourceFile>>,
{
    let classifier = LineClassifier::new(rules);
    let mut result = CountResult::for_rules(rules);

    for source in sources {
        let file = source?;
        debug!(path = %file.path.display(), "analyzing file");

        let tally = classifier.classify_lines(file.lines());
        result.total += &tally;
        result.file_count += 1;

        if aggregation == Aggregation::ByFile {
            result.files.push(FileTally::new(file.path, tally));
        }
    }

    Ok(result)
}
