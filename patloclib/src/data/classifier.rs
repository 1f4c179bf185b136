//! Rule-driven line classifier.
//!
//! Each line is assigned to at most one configured category, or falls
//! through to code. The only state carried from one line to the next is
//! which multi-line block (if any) is currently open; it lives in an
//! explicit [`ScanState`] value so classification stays a plain function of
//! `(line, state, rules)`.
//!
//! Per line, after trimming surrounding whitespace (and a leading byte
//! order mark):
//!
//! 1. Inside a block, the line belongs to the rule that opened it. Only
//!    that rule's end pattern is checked; a match closes the block after
//!    the line is counted.
//! 2. Otherwise rules are tried in priority order and the first hit wins.
//!    A single-line rule counts the line (and, for `"code"` categories, a
//!    code line). A multi-line rule counts the line and opens its block,
//!    closing it again at once if the end pattern matches the same line.
//! 3. A line no rule claims is counted as code.
//!
//! The fall-through in step 3 means an incomplete rule set over-counts
//! code: a comment style nobody configured is silently reported as code.

use crate::rules::{CategoryRule, RuleKind, RuleSet};

use super::stats::Tally;

/// Cross-line scanner state for one file.
///
/// Always start a file from [`ScanState::new`]; state from one file must
/// never leak into the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    open_block: Option<usize>,
}

impl ScanState {
    /// Fresh state: no block open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a multi-line block is currently open.
    pub fn inside_multi_line_block(&self) -> bool {
        self.open_block.is_some()
    }

    /// Priority index of the rule that opened the current block.
    pub fn open_rule(&self) -> Option<usize> {
        self.open_block
    }
}

/// Verdict for a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Attributed to the rule at `index`.
    Category { index: usize, counts_as_code: bool },
    /// No rule matched; presumed code.
    DefaultCode,
}

/// Strip surrounding whitespace and byte order marks.
///
/// A file saved with a BOM carries U+FEFF at the start of its first line,
/// which `str::trim` keeps; anchored patterns like `^//` would then miss.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Decide the category of one line without touching any tally.
///
/// Returns the verdict together with the state to use for the next line.
pub fn evaluate_line(line: &str, state: ScanState, rules: &RuleSet) -> (LineClass, ScanState) {
    let line = trim_line(line);

    if let Some(index) = state.open_block {
        let end = rules.get(index).and_then(CategoryRule::end_pattern);
        debug_assert!(
            end.is_some(),
            "open block refers to rule {index}, which is not a multi-line rule"
        );
        let closed = end.map_or(true, |end| end.is_match(line));
        let next = if closed { ScanState::new() } else { state };
        let class = LineClass::Category {
            index,
            counts_as_code: false,
        };
        return (class, next);
    }

    for (index, rule) in rules.rules_in_priority_order().iter().enumerate() {
        match rule.kind() {
            RuleKind::SingleLine { pattern } => {
                if pattern.is_match(line) {
                    let class = LineClass::Category {
                        index,
                        counts_as_code: rule.counts_as_code(),
                    };
                    return (class, ScanState::new());
                }
            }
            RuleKind::MultiLine { start, end } => {
                if start.is_match(line) {
                    let next = if end.is_match(line) {
                        ScanState::new()
                    } else {
                        ScanState {
                            open_block: Some(index),
                        }
                    };
                    let class = LineClass::Category {
                        index,
                        counts_as_code: false,
                    };
                    return (class, next);
                }
            }
        }
    }

    (LineClass::DefaultCode, ScanState::new())
}

/// Classify one line and record it in `tally`.
///
/// Every call adds exactly one to `tally.total_lines`.
pub fn classify_line(line: &str, state: ScanState, rules: &RuleSet, tally: &mut Tally) -> ScanState {
    let (class, next) = evaluate_line(line, state, rules);
    tally.record(class, rules);
    next
}

/// Classifies whole files against a borrowed [`RuleSet`].
#[derive(Debug, Clone, Copy)]
pub struct LineClassifier<'r> {
    rules: &'r RuleSet,
}

impl<'r> LineClassifier<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    /// The rules this classifier applies.
    pub fn rules(&self) -> &'r RuleSet {
        self.rules
    }

    /// Classify one file's lines into a fresh tally.
    pub fn classify_lines<'a, I>(&self, lines: I) -> Tally
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tally = Tally::for_rules(self.rules);
        self.classify_lines_into(lines, &mut tally);
        tally
    }

    /// Classify one file's lines, accumulating into `tally`.
    pub fn classify_lines_into<'a, I>(&self, lines: I, tally: &mut Tally)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut state = ScanState::new();
        for line in lines {
            state = classify_line(line, state, self.rules, tally);
        }
    }

    /// Classify one file's content into a fresh tally.
    ///
    /// Content is split on `\n`, so text ending in a newline has a final
    /// empty line that is counted like any other.
    pub fn classify_source(&self, source: &str) -> Tally {
        self.classify_lines(source.split('\n'))
    }

    /// Classify one file's content, accumulating into `tally`.
    pub fn classify_source_into(&self, source: &str, tally: &mut Tally) {
        self.classify_lines_into(source.split('\n'), tally);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::CategorySpec;

    fn scenario_rules() -> RuleSet {
        RuleSet::compile(&[
            CategorySpec::single_line("lineComment", "^//").with_type("comment"),
            CategorySpec::multi_line("blockComment", r"/\*", r"\*/").with_type("comment"),
        ])
        .unwrap()
    }

    fn classify(rules: &RuleSet, source: &str) -> Tally {
        LineClassifier::new(rules).classify_source(source)
    }

    #[test]
    fn scenario_mixed_comments() {
        let rules = scenario_rules();
        let source = "// header\ncode();\n/* start\nstill in block\nend */\nmore();";

        let tally = classify(&rules, source);

        assert_eq!(tally.total_lines, 6);
        assert_eq!(tally.count("lineComment"), Some(1));
        assert_eq!(tally.count("blockComment"), Some(3));
        assert_eq!(tally.code_lines, 2);
    }

    #[test]
    fn total_counts_trailing_empty_line() {
        let rules = scenario_rules();

        assert_eq!(classify(&rules, "a\nb\n").total_lines, 3);
        assert_eq!(classify(&rules, "a\nb").total_lines, 2);
        assert_eq!(classify(&rules, "").total_lines, 1);
    }

    #[test]
    fn every_line_counted_exactly_once() {
        let rules = RuleSet::compile(&[
            CategorySpec::single_line("blank", "^$"),
            CategorySpec::single_line("attr", "^#\\[").with_type("code"),
            CategorySpec::single_line("comment", "^//"),
            CategorySpec::multi_line("block", r"/\*", r"\*/"),
        ])
        .unwrap();
        let source = "#[test]\nfn f() {}\n\n// x\n/* a\nb */\n/* c */\nlet y = 1;\n";

        let tally = classify(&rules, source);
        let categorized: u64 = tally.categories.iter().map(|c| c.count).sum();
        let typed_code = tally.count("attr").unwrap();
        let default_code = tally.code_lines - typed_code;

        assert_eq!(tally.total_lines, 9);
        assert_eq!(categorized + default_code, tally.total_lines);
        assert_eq!(tally.count("blank"), Some(2));
        assert_eq!(tally.count("comment"), Some(1));
        assert_eq!(tally.count("block"), Some(3));
        assert_eq!(tally.code_lines, 3);
    }

    #[test]
    fn first_declared_rule_wins() {
        let rules = RuleSet::compile(&[
            CategorySpec::single_line("docComment", "^///"),
            CategorySpec::single_line("lineComment", "^//"),
        ])
        .unwrap();

        let tally = classify(&rules, "/// docs");
        assert_eq!(tally.count("docComment"), Some(1));
        assert_eq!(tally.count("lineComment"), Some(0));

        let reversed = RuleSet::compile(&[
            CategorySpec::single_line("lineComment", "^//"),
            CategorySpec::single_line("docComment", "^///"),
        ])
        .unwrap();

        let tally = classify(&reversed, "/// docs");
        assert_eq!(tally.count("lineComment"), Some(1));
        assert_eq!(tally.count("docComment"), Some(0));
    }

    #[test]
    fn open_block_takes_precedence_over_other_rules() {
        let rules = RuleSet::compile(&[
            CategorySpec::single_line("blank", "^$"),
            CategorySpec::single_line("lineComment", "^//"),
            CategorySpec::multi_line("block", r"/\*", r"\*/"),
        ])
        .unwrap();
        let source = "/*\n// not a line comment\n\nfn inside() {}\n\n*/\nafter();";

        let tally = classify(&rules, source);

        assert_eq!(tally.count("block"), Some(6));
        assert_eq!(tally.count("lineComment"), Some(0));
        assert_eq!(tally.count("blank"), Some(0));
        assert_eq!(tally.code_lines, 1);
    }

    #[test]
    fn block_state_persists_across_lines() {
        let rules = scenario_rules();
        let mut tally = Tally::for_rules(&rules);

        let mut state = classify_line("/* open", ScanState::new(), &rules, &mut tally);
        assert!(state.inside_multi_line_block());
        assert_eq!(state.open_rule(), Some(1));

        for _ in 0..100 {
            state = classify_line("code();", state, &rules, &mut tally);
            assert!(state.inside_multi_line_block());
        }

        state = classify_line("close */", state, &rules, &mut tally);
        assert!(!state.inside_multi_line_block());
        assert_eq!(tally.count("blockComment"), Some(102));
        assert_eq!(tally.code_lines, 0);
    }

    #[test]
    fn one_line_block_closes_immediately() {
        let rules = scenario_rules();
        let mut tally = Tally::for_rules(&rules);

        let state = classify_line("/* all in one */", ScanState::new(), &rules, &mut tally);

        assert!(!state.inside_multi_line_block());
        assert_eq!(tally.count("blockComment"), Some(1));
        assert_eq!(tally.code_lines, 0);

        let state = classify_line("next();", state, &rules, &mut tally);
        assert!(!state.inside_multi_line_block());
        assert_eq!(tally.code_lines, 1);
    }

    #[test]
    fn unmatched_line_defaults_to_code() {
        let rules = scenario_rules();
        let (class, state) = evaluate_line("let x = 1;", ScanState::new(), &rules);

        assert_eq!(class, LineClass::DefaultCode);
        assert_eq!(state, ScanState::new());

        let tally = classify(&rules, "let x = 1;");
        assert_eq!(tally.code_lines, 1);
        assert_eq!(tally.count("lineComment"), Some(0));
        assert_eq!(tally.count("blockComment"), Some(0));
    }

    #[test]
    fn blank_without_rule_is_code() {
        let rules = scenario_rules();
        let tally = classify(&rules, "   \t");
        assert_eq!(tally.code_lines, 1);
    }

    #[test]
    fn blank_rule_matches_empty_after_trim() {
        let rules = RuleSet::compile(&[CategorySpec::single_line("blank", "^$")]).unwrap();
        let tally = classify(&rules, "  \t \r\nx");
        assert_eq!(tally.count("blank"), Some(1));
        assert_eq!(tally.code_lines, 1);
    }

    #[test]
    fn byte_order_mark_is_trimmed() {
        let rules = scenario_rules();
        let tally = classify(&rules, "\u{feff}// header\ncode();");

        assert_eq!(tally.count("lineComment"), Some(1));
        assert_eq!(tally.code_lines, 1);
        assert_eq!(tally.total_lines, 2);
    }

    #[test]
    fn byte_order_mark_alone_is_blank() {
        let rules = RuleSet::compile(&[CategorySpec::single_line("blank", "^$")]).unwrap();
        let tally = classify(&rules, "\u{feff}");
        assert_eq!(tally.count("blank"), Some(1));
        assert_eq!(tally.code_lines, 0);
    }

    #[test]
    fn open_block_never_rescans_the_line() {
        let rules = scenario_rules();
        let (_, state) = evaluate_line("/* open", ScanState::new(), &rules);

        let (class, next) = evaluate_line("// looks like a line comment", state, &rules);

        assert_eq!(
            class,
            LineClass::Category {
                index: 1,
                counts_as_code: false
            }
        );
        assert_eq!(next.open_rule(), Some(1));
    }

    #[test]
    fn indentation_is_ignored() {
        let rules = scenario_rules();
        let tally = classify(&rules, "        // indented");
        assert_eq!(tally.count("lineComment"), Some(1));
    }

    #[test]
    fn code_typed_rule_counts_both() {
        let rules = RuleSet::compile(&[
            CategorySpec::single_line("import", "^use ").with_type("code"),
        ])
        .unwrap();

        let tally = classify(&rules, "use std::fs;\nfn main() {}");

        assert_eq!(tally.count("import"), Some(1));
        assert_eq!(tally.code_lines, 2);
        assert_eq!(tally.total_lines, 2);
    }

    #[test]
    fn only_the_open_rule_can_close_its_block() {
        let rules = RuleSet::compile(&[
            CategorySpec::multi_line("block", r"/\*", r"\*/"),
            CategorySpec::multi_line("html", "<!--", "-->"),
        ])
        .unwrap();
        let source = "<!-- open\n*/ not mine\n-->\nafter";

        let tally = classify(&rules, source);

        assert_eq!(tally.count("html"), Some(3));
        assert_eq!(tally.count("block"), Some(0));
        assert_eq!(tally.code_lines, 1);
    }

    #[test]
    fn state_resets_between_files() {
        let rules = scenario_rules();
        let classifier = LineClassifier::new(&rules);
        let mut tally = Tally::for_rules(&rules);

        classifier.classify_source_into("/* never closed", &mut tally);
        classifier.classify_source_into("code();", &mut tally);

        assert_eq!(tally.count("blockComment"), Some(1));
        assert_eq!(tally.code_lines, 1);
        assert_eq!(tally.total_lines, 2);
    }

    #[test]
    fn empty_rule_set_counts_everything_as_code() {
        let rules = RuleSet::compile(&[]).unwrap();
        let tally = classify(&rules, "// a\n/* b */\n");
        assert_eq!(tally.code_lines, 3);
        assert_eq!(tally.total_lines, 3);
        assert!(tally.categories.is_empty());
    }
}
