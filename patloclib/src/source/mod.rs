//! Source discovery: find and read the files to classify.
//!
//! This module handles the first stage of the pipeline:
//!
//! - **File discovery**: walk a directory, with include/exclude globs
//! - **Reading**: a lazy sequence of `(path, content)` pairs
//!
//! ## Example
//!
//! ```rust,ignore
//! use patloclib::source::{discover_files, FilterConfig, SourceFiles};
//!
//! let filter = FilterConfig::new().exclude("**/vendor/**")?;
//! let files = discover_files(".", &filter)?;
//! for file in SourceFiles::new(files) {
//!     let file = file?;
//!     println!("{}: {} bytes", file.path.display(), file.content.len());
//! }
//! ```

pub mod filter;
pub mod reader;

pub use filter::{discover_files, FilterConfig};
pub use reader::{SourceFile, SourceFiles};
