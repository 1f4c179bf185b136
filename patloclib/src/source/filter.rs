//! File filtering and discovery with glob pattern support.
//!
//! This module finds the files a run should classify, with optional
//! include/exclude glob patterns.

use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::PatlocError;
use crate::Result;

/// Configuration for file filtering.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include every file)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
    /// Skip directories whose name starts with `.`
    pub skip_hidden: bool,
}

impl FilterConfig {
    /// Create a new empty filter config (includes every file).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile_glob(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile_glob(pattern)?);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern)?;
        }
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Skip hidden directories (`.git`, `.cache`, ...) while walking.
    pub fn skip_hidden(mut self, skip: bool) -> Self {
        self.skip_hidden = skip;
        self
    }

    /// Check if a path matches the filter criteria.
    ///
    /// A path matches if it doesn't match any exclude pattern and matches
    /// at least one include pattern (or include is empty).
    pub fn matches(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(&path_str))
    }

    fn should_skip_dir(&self, name: &str) -> bool {
        self.skip_hidden && name.starts_with('.')
    }
}

fn compile_glob(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| PatlocError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Discover files under `root`.
///
/// A file root yields just that file (if it passes the filter). A
/// directory root is walked recursively; results are sorted for
/// deterministic output.
pub fn discover_files(root: impl AsRef<Path>, filter: &FilterConfig) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if root.is_file() {
        let mut files = Vec::new();
        if filter.matches(root) {
            files.push(root.to_path_buf());
        }
        return Ok(files);
    }

    if !root.is_dir() {
        return Err(PatlocError::InvalidPath(root.to_path_buf()));
    }

    let walker = WalkDir::new(root).follow_links(true).into_iter();

    let mut files = Vec::new();
    for entry in walker.filter_entry(|e| {
        if e.depth() == 0 || !e.file_type().is_dir() {
            return true;
        }
        let name = e.file_name().to_str().unwrap_or("");
        !filter.should_skip_dir(name)
    }) {
        let entry = entry.map_err(|e| PatlocError::Walk(e.to_string()))?;
        let path = entry.path();

        if entry.file_type().is_dir() {
            if entry.depth() > 0 {
                debug!(path = %path.display(), "entering directory");
            }
            continue;
        }

        if path.is_file() && filter.matches(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();

    Ok(files)
}
