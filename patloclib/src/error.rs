//! Error types for patloclib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while compiling rules or counting lines
#[derive(Error, Debug)]
pub enum PatlocError {
    /// A category rule is ill-formed (bad regex, missing pattern, duplicate name)
    #[error("invalid rule '{name}': {reason}")]
    InvalidRule { name: String, reason: String },

    /// Target path is neither a file nor a directory
    #[error("invalid path: {0} is neither a file nor a directory")]
    InvalidPath(PathBuf),

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read the rules configuration file
    #[error("failed to read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Rules configuration is not valid JSON or has an unexpected shape
    #[error("failed to parse config '{path}': {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Directory traversal failed
    #[error("failed to walk directory: {0}")]
    Walk(String),
}

impl PatlocError {
    pub(crate) fn invalid_rule(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRule {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
