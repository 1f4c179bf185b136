//! Classification rules: configuration and compilation.
//!
//! This module handles everything that happens before a single line is
//! read:
//!
//! - **Configuration**: the on-disk JSON shape of category specs
//! - **Compilation**: turning specs into an immutable, ordered [`RuleSet`]
//!
//! ## Example
//!
//! ```rust
//! use patloclib::rules::RulesConfig;
//!
//! let config = RulesConfig::from_json(r#"{
//!     "categories": [
//!         { "name": "comment", "pattern": "^#", "type": "comment" }
//!     ]
//! }"#).unwrap();
//! let rules = config.compile().unwrap();
//! assert_eq!(rules.len(), 1);
//! ```

pub mod config;
pub mod ruleset;

pub use config::{CategorySpec, RulesConfig};
pub use ruleset::{CategoryRule, RuleKind, RuleSet};
