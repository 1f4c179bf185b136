//! Compiled, ordered category rules.
//!
//! A [`RuleSet`] is built once per run from the configured category specs
//! and is read-only afterwards, so it can be shared freely between files
//! (and threads).

use std::collections::HashSet;

use regex::Regex;

use crate::error::PatlocError;
use crate::Result;

use super::config::CategorySpec;

/// How a category recognizes its lines.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Matches a complete line on its own.
    SingleLine { pattern: Regex },
    /// Opens on `start` and stays open until a line matches `end`.
    MultiLine { start: Regex, end: Regex },
}

/// A single compiled classification category.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    name: String,
    kind: RuleKind,
    counts_as_code: bool,
}

impl CategoryRule {
    /// Compile one category spec.
    pub fn compile(spec: &CategorySpec) -> Result<Self> {
        if spec.name.is_empty() {
            return Err(PatlocError::invalid_rule("", "category name must not be empty"));
        }

        let kind = match (&spec.pattern, &spec.start_pattern, &spec.end_pattern) {
            (Some(pattern), None, None) => RuleKind::SingleLine {
                pattern: compile_regex(&spec.name, pattern)?,
            },
            (None, Some(start), Some(end)) => RuleKind::MultiLine {
                start: compile_regex(&spec.name, start)?,
                end: compile_regex(&spec.name, end)?,
            },
            (Some(_), _, _) => {
                return Err(PatlocError::invalid_rule(
                    &spec.name,
                    "`pattern` cannot be combined with `startPattern`/`endPattern`",
                ))
            }
            (None, Some(_), None) => {
                return Err(PatlocError::invalid_rule(
                    &spec.name,
                    "multi-line category is missing `endPattern`",
                ))
            }
            (None, None, Some(_)) => {
                return Err(PatlocError::invalid_rule(
                    &spec.name,
                    "multi-line category is missing `startPattern`",
                ))
            }
            (None, None, None) => {
                return Err(PatlocError::invalid_rule(
                    &spec.name,
                    "category needs either `pattern` or `startPattern` and `endPattern`",
                ))
            }
        };

        Ok(Self {
            name: spec.name.clone(),
            kind,
            counts_as_code: spec.counts_as_code(),
        })
    }

    /// Category name (the tally key).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Matcher(s) for this category.
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Pattern closing this category's block, for multi-line rules.
    pub fn end_pattern(&self) -> Option<&Regex> {
        match &self.kind {
            RuleKind::MultiLine { end, .. } => Some(end),
            RuleKind::SingleLine { .. } => None,
        }
    }

    /// Whether a line in this category also counts as a code line.
    pub fn counts_as_code(&self) -> bool {
        self.counts_as_code
    }

    /// Whether this category spans lines.
    pub fn is_multi_line(&self) -> bool {
        matches!(self.kind, RuleKind::MultiLine { .. })
    }
}

fn compile_regex(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| PatlocError::invalid_rule(name, format!("bad pattern '{pattern}': {e}")))
}

/// An ordered, immutable collection of category rules.
///
/// Order is the configured order and defines precedence: when a line
/// matches several rules, the first one wins.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CategoryRule>,
}

impl RuleSet {
    /// Compile category specs, in order, into a rule set.
    ///
    /// Fails on the first ill-formed spec: a regex that doesn't compile,
    /// a multi-line category missing one of its patterns, or a name that
    /// was already used.
    pub fn compile(specs: &[CategorySpec]) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(specs.len());

        for spec in specs {
            if !seen.insert(spec.name.as_str()) {
                return Err(PatlocError::invalid_rule(
                    &spec.name,
                    "duplicate category name",
                ));
            }
            rules.push(CategoryRule::compile(spec)?);
        }

        Ok(Self { rules })
    }

    /// Rules in the exact order they were configured.
    pub fn rules_in_priority_order(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Rule at `index` in priority order.
    pub fn get(&self, index: usize) -> Option<&CategoryRule> {
        self.rules.get(index)
    }

    /// Priority index of the rule named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.name == name)
    }

    /// Category names in priority order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
