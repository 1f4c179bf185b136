//! Options controlling what a counting run returns.

use std::str::FromStr;

/// Aggregation level for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    /// Only return the run total
    #[default]
    Total,
    /// Include per-file breakdown
    ByFile,
}

/// Order of the per-file breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    /// Order by path (lexicographical)
    #[default]
    Path,
    /// Largest total line count first
    Total,
    /// Largest code line count first
    Code,
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "path" | "name" => Ok(OrderBy::Path),
            "total" | "lines" => Ok(OrderBy::Total),
            "code" => Ok(OrderBy::Code),
            _ => Err(format!("Unknown order field: {}", s)),
        }
    }
}
