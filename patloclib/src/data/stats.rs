//! Core data structures for line tallies.
//!
//! A [`Tally`] keeps one counter per configured category plus two named
//! counters that live outside the category mapping:
//!
//! - **total_lines**: every line seen, whatever it was classified as
//! - **code_lines**: lines in a category of type `"code"`, and lines that
//!   matched no category at all
//!
//! Keeping the two totals out of the mapping means a category may be
//! called `totalLines` or `codeLines` without clobbering them.

use serde::Serialize;
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

use crate::rules::RuleSet;

use super::classifier::LineClass;

/// Count for one named category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Category name as configured
    pub name: String,
    /// Number of lines attributed to this category
    pub count: u64,
}

/// Running line counts for one file or a whole run.
///
/// Categories are kept in rule priority order so renderers can print them
/// the way they were configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    /// Every line seen
    pub total_lines: u64,
    /// Lines counted as code (typed `"code"` or unmatched)
    pub code_lines: u64,
    /// Per-category counts, in rule order
    pub categories: Vec<CategoryCount>,
}

impl Tally {
    /// An empty tally with no categories.
    pub fn new() -> Self {
        Self::default()
    }

    /// A zeroed tally with one counter per rule in `rules`.
    pub fn for_rules(rules: &RuleSet) -> Self {
        Self {
            total_lines: 0,
            code_lines: 0,
            categories: rules
                .names()
                .map(|name| CategoryCount {
                    name: name.to_string(),
                    count: 0,
                })
                .collect(),
        }
    }

    /// Count for `name`, or `None` if the category is unknown.
    pub fn count(&self, name: &str) -> Option<u64> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.count)
    }

    /// Lines that were not counted as code.
    pub fn non_code_lines(&self) -> u64 {
        self.total_lines.saturating_sub(self.code_lines)
    }

    /// Record the outcome of classifying one line.
    pub fn record(&mut self, class: LineClass, rules: &RuleSet) {
        self.total_lines += 1;
        match class {
            LineClass::Category {
                index,
                counts_as_code,
            } => {
                if let Some(rule) = rules.get(index) {
                    self.add_to(index, rule.name(), 1);
                }
                if counts_as_code {
                    self.code_lines += 1;
                }
            }
            LineClass::DefaultCode => self.code_lines += 1,
        }
    }

    /// Add `amount` to `name`, using `hint` as the likely slot.
    fn add_to(&mut self, hint: usize, name: &str, amount: u64) {
        if let Some(slot) = self.categories.get_mut(hint).filter(|c| c.name == name) {
            slot.count += amount;
            return;
        }
        match self.categories.iter_mut().find(|c| c.name == name) {
            Some(slot) => slot.count += amount,
            None => self.categories.push(CategoryCount {
                name: name.to_string(),
                count: amount,
            }),
        }
    }
}

impl Add for Tally {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Self) {
        self.total_lines += other.total_lines;
        self.code_lines += other.code_lines;
        for (i, category) in other.categories.into_iter().enumerate() {
            self.add_to(i, &category.name, category.count);
        }
    }
}

impl AddAssign<&Tally> for Tally {
    fn add_assign(&mut self, other: &Tally) {
        self.total_lines += other.total_lines;
        self.code_lines += other.code_lines;
        for (i, category) in other.categories.iter().enumerate() {
            self.add_to(i, &category.name, category.count);
        }
    }
}

/// Tally for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileTally {
    /// Path to the file.
    pub path: PathBuf,
    /// Line counts for this file.
    pub tally: Tally,
}

impl FileTally {
    /// Create new file tally.
    pub fn new(path: PathBuf, tally: Tally) -> Self {
        Self { path, tally }
    }
}
