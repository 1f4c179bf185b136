//! On-disk rule configuration.
//!
//! Rules are configured as a JSON document holding an ordered list of
//! category specs. Order matters: it is the priority order used when a
//! line matches more than one category.
//!
//! ```json
//! {
//!   "categories": [
//!     { "name": "blank", "pattern": "^$", "type": "blank" },
//!     { "name": "singleLineComment", "pattern": "^//", "type": "comment" },
//!     { "name": "multiLineComment", "startPattern": "/\\*", "endPattern": "\\*/", "type": "comment" }
//!   ]
//! }
//! ```
//!
//! ## Pattern syntax
//!
//! Patterns use the [`regex`] crate's syntax, which is close to but not
//! the same as JavaScript or PCRE regular expressions:
//!
//! - look-around (`(?=`, `(?!`, `(?<=`) and backreferences (`\1`) are not
//!   supported; a rule using them fails to compile
//! - `\d`, `\w`, `\s` and `\b` are Unicode-aware, so `^\d+$` also
//!   matches Arabic-Indic digits; write `[0-9]` or `(?-u:\d)` for the
//!   ASCII-only meaning
//!
//! Patterns are matched against the line after surrounding whitespace is
//! trimmed and are unanchored unless they say otherwise.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PatlocError;
use crate::Result;

use super::ruleset::RuleSet;

/// The `type` value that marks a category as counting towards code lines.
pub const CODE_TYPE: &str = "code";

/// One configured category, exactly as written in the config file.
///
/// Single-line categories set `pattern`; multi-line categories set
/// `startPattern` and `endPattern`. Validation happens in
/// [`RuleSet::compile`], not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategorySpec {
    /// Unique category name, used as the tally key
    pub name: String,
    /// Regex for single-line categories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Regex opening a multi-line block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_pattern: Option<String>,
    /// Regex closing a multi-line block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_pattern: Option<String>,
    /// Free-form category type; only `"code"` has meaning
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub category_type: Option<String>,
}

impl CategorySpec {
    /// A category matched by a single regex on one line.
    pub fn single_line(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: Some(pattern.into()),
            start_pattern: None,
            end_pattern: None,
            category_type: None,
        }
    }

    /// A category spanning lines between a start and an end regex.
    pub fn multi_line(
        name: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: None,
            start_pattern: Some(start.into()),
            end_pattern: Some(end.into()),
            category_type: None,
        }
    }

    /// Set the category type.
    pub fn with_type(mut self, category_type: impl Into<String>) -> Self {
        self.category_type = Some(category_type.into());
        self
    }

    /// Whether lines in this category also count as code.
    pub fn counts_as_code(&self) -> bool {
        self.category_type.as_deref() == Some(CODE_TYPE)
    }
}

/// The full rules configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Categories in priority order
    pub categories: Vec<CategorySpec>,
}

impl RulesConfig {
    /// Create a config from an ordered list of category specs.
    pub fn new(categories: Vec<CategorySpec>) -> Self {
        Self { categories }
    }

    /// Built-in rules for C-family sources: blanks, `//` comments and
    /// `/* */` blocks. Everything else falls through to code.
    pub fn c_style() -> Self {
        Self::new(vec![
            CategorySpec::single_line("blank", "^$").with_type("blank"),
            CategorySpec::single_line("singleLineComment", "^//").with_type("comment"),
            CategorySpec::multi_line("multiLineComment", r"/\*", r"\*/").with_type("comment"),
        ])
    }

    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| PatlocError::ConfigParse {
            path: "<inline>".into(),
            message: e.to_string(),
        })
    }

    /// Read and parse a config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| PatlocError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| PatlocError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Serialize back to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| PatlocError::ConfigParse {
            path: "<inline>".into(),
            message: e.to_string(),
        })
    }

    /// Compile into a [`RuleSet`].
    pub fn compile(&self) -> Result<RuleSet> {
        RuleSet::compile(&self.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_camel_case_fields() {
        let config = RulesConfig::from_json(
            r#"{
                "categories": [
                    { "name": "lineComment", "pattern": "^//", "type": "comment" },
                    { "name": "blockComment", "startPattern": "/\\*", "endPattern": "\\*/" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.categories[0].pattern.as_deref(), Some("^//"));
        assert_eq!(config.categories[0].category_type.as_deref(), Some("comment"));
        assert_eq!(config.categories[1].start_pattern.as_deref(), Some(r"/\*"));
        assert_eq!(config.categories[1].end_pattern.as_deref(), Some(r"\*/"));
        assert_eq!(config.categories[1].category_type, None);
    }

    #[test]
    fn test_counts_as_code_only_for_code_type() {
        assert!(CategorySpec::single_line("a", "x").with_type("code").counts_as_code());
        assert!(!CategorySpec::single_line("a", "x").with_type("Code").counts_as_code());
        assert!(!CategorySpec::single_line("a", "x").with_type("comment").counts_as_code());
        assert!(!CategorySpec::single_line("a", "x").counts_as_code());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = RulesConfig::from_json(r#"{ "categories": [ { "name": "a", "regex": "x" } ] }"#)
            .unwrap_err();
        assert!(matches!(err, PatlocError::ConfigParse { .. }));
    }

    #[test]
    fn test_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, RulesConfig::c_style().to_json_pretty().unwrap()).unwrap();

        let config = RulesConfig::from_path(&path).unwrap();
        assert_eq!(config, RulesConfig::c_style());
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempdir().unwrap();
        let err = RulesConfig::from_path(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, PatlocError::ConfigRead { .. }));
    }

    #[test]
    fn test_c_style_compiles() {
        let rules = RulesConfig::c_style().compile().unwrap();
        let names: Vec<&str> = rules.names().collect();
        assert_eq!(names, vec!["blank", "singleLineComment", "multiLineComment"]);
    }
}
