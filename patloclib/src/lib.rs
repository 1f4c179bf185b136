//! # patloclib
//!
//! A pattern-driven lines of code counter library.
//!
//! ## Overview
//!
//! Instead of knowing any particular language, patloclib classifies every
//! line of a file using an ordered list of regex rules taken from
//! configuration. Each rule is a named category:
//!
//! - **single-line** categories match one line on their own (`^//`, `^$`)
//! - **multi-line** categories open on a start pattern and swallow every
//!   line up to and including the one matching their end pattern (`/*`...`*/`)
//!
//! Lines no rule claims are counted as code. Categories typed `"code"` also
//! count towards code lines.
//!
//! ## Features
//!
//! - **Ordered rules**: the first matching rule in configuration order wins
//! - **Block tracking**: an open block takes precedence over every other rule
//! - **Directory walks**: recursive discovery with include/exclude globs
//! - **Pure data types**: classification does no I/O; results serialize to JSON
//!
//! ## Example
//!
//! ```rust
//! use patloclib::{CategorySpec, LineClassifier, RuleSet};
//!
//! let rules = RuleSet::compile(&[
//!     CategorySpec::single_line("lineComment", "^//").with_type("comment"),
//!     CategorySpec::multi_line("blockComment", r"/\*", r"\*/").with_type("comment"),
//! ]).unwrap();
//!
//! let source = "// header\ncode();\n/* start\nstill in block\nend */\nmore();";
//! let tally = LineClassifier::new(&rules).classify_source(source);
//!
//! assert_eq!(tally.total_lines, 6);
//! assert_eq!(tally.count("lineComment"), Some(1));
//! assert_eq!(tally.count("blockComment"), Some(3));
//! assert_eq!(tally.code_lines, 2);
//! ```

pub mod data;
pub mod error;
pub mod options;
pub mod rules;
pub mod source;

pub use data::{
    classify_line, count_directory, count_file, count_path, count_sources, evaluate_line,
    CategoryCount, CountOptions, CountResult, FileTally, LineClass, LineClassifier, ScanState,
    Tally,
};
pub use error::PatlocError;
pub use options::{Aggregation, OrderBy};
pub use rules::{CategoryRule, CategorySpec, RuleKind, RuleSet, RulesConfig};
pub use source::{discover_files, FilterConfig, SourceFile, SourceFiles};

/// Result type for patloclib operations
pub type Result<T> = std::result::Result<T, PatlocError>;
