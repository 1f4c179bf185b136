//! Lazy file reading.
//!
//! [`SourceFiles`] turns a list of paths into a sequence of
//! `(path, content)` pairs, reading each file only when the consumer asks
//! for it. Anything that yields `Result<SourceFile>` can stand in for it,
//! which is how tests feed in-memory content to the counter.

use std::fs;
use std::path::PathBuf;

use crate::error::PatlocError;
use crate::Result;

/// One file's path and full text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Read a file from disk.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so binary-ish files
    /// in a tree still get their lines counted.
    pub fn read(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let bytes = fs::read(&path).map_err(|e| PatlocError::FileRead {
            path: path.clone(),
            source: e,
        })?;
        let content = match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        Ok(Self { path, content })
    }

    /// Lines of the file, split on `\n`.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }
}

/// Iterator reading files on demand.
#[derive(Debug)]
pub struct SourceFiles {
    paths: std::vec::IntoIter<PathBuf>,
}

impl SourceFiles {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths: paths.into_iter(),
        }
    }
}

impl Iterator for SourceFiles {
    type Item = Result<SourceFile>;

    fn next(&mut self) -> Option<Self::Item> {
        self.paths.next().map(SourceFile::read)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.paths.size_hint()
    }
}
