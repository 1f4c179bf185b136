//! Data collection: classify lines and collect tallies.
//!
//! This module handles the second stage of the pipeline:
//!
//! - **Classification**: the per-line state machine (`classifier`)
//! - **Tallies**: per-category and total counters (`stats`)
//! - **Counting**: high-level API over files and directories (`counter`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use patloclib::data::{count_path, CountOptions};
//!
//! let result = count_path(".", &rules, &CountOptions::new())?;
//! println!("Code lines: {}", result.total.code_lines);
//! ```

pub mod classifier;
pub mod counter;
pub mod stats;

pub use classifier::{classify_line, evaluate_line, LineClass, LineClassifier, ScanState};
pub use counter::{
    count_directory, count_file, count_path, count_sources, CountOptions, CountResult,
};
pub use stats::{CategoryCount, FileTally, Tally};
