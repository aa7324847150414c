//! Rule to keep headings short.
//!
//! # Rationale
//!
//! Headings are scanned, not read. H2s name a topic in a few words; deeper
//! headings may be more descriptive. Limits are therefore non-decreasing
//! with depth: the H2 limit is the strictest.
//!
//! # Configuration
//!
//! - `h2_max_words`: Maximum words in an H2 (default: 3)
//! - `h3_max_words`: Maximum words in an H3 (default: 6)
//! - `deep_max_words`: Maximum words in H4 to H6 (default: 8)
//!
//! Every heading needs at least one word. Level-1 headings are left to
//! `no-body-h1`.

use docs_conform_core::{
    CheckContext, Node, Rule, Scope, Section, Severity, Suggestion, ValidationResult,
};

/// Rule code for heading-length.
pub const CODE: &str = "DC102";

/// Rule name for heading-length.
pub const NAME: &str = "heading-length";

/// Rejected heading word limits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeadingLimitsError {
    /// A limit is zero.
    #[error("heading word limits must be at least 1")]
    Zero,
    /// A deeper level has a stricter limit than a shallower one.
    #[error(
        "heading word limits must not decrease with depth \
         (h2 {h2}, h3 {h3}, deeper {deep})"
    )]
    Decreasing {
        /// H2 limit.
        h2: usize,
        /// H3 limit.
        h3: usize,
        /// H4+ limit.
        deep: usize,
    },
}

/// Bounds the word count of section headings by level.
#[derive(Debug, Clone)]
pub struct HeadingLength {
    h2_max_words: usize,
    h3_max_words: usize,
    deep_max_words: usize,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for HeadingLength {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadingLength {
    /// Creates a new rule with default limits (3, 6, 8).
    #[must_use]
    pub fn new() -> Self {
        Self {
            h2_max_words: 3,
            h3_max_words: 6,
            deep_max_words: 8,
            severity: Severity::Error,
        }
    }

    /// Sets the word limits for H2, H3 and deeper headings.
    ///
    /// # Errors
    ///
    /// Returns an error if a limit is zero or a deeper limit is smaller than
    /// a shallower one.
    pub fn limits(mut self, h2: usize, h3: usize, deep: usize) -> Result<Self, HeadingLimitsError> {
        if h2 == 0 || h3 == 0 || deep == 0 {
            return Err(HeadingLimitsError::Zero);
        }
        if h2 > h3 || h3 > deep {
            return Err(HeadingLimitsError::Decreasing { h2, h3, deep });
        }
        self.h2_max_words = h2;
        self.h3_max_words = h3;
        self.deep_max_words = deep;
        Ok(self)
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Word limit for a heading level, `None` for level 1.
    #[must_use]
    pub fn max_words(&self, level: u8) -> Option<usize> {
        match level {
            0 | 1 => None,
            2 => Some(self.h2_max_words),
            3 => Some(self.h3_max_words),
            _ => Some(self.deep_max_words),
        }
    }

    fn result(&self, ctx: &CheckContext<'_>, section: &Section, message: String) -> ValidationResult {
        ValidationResult::new(
            CODE,
            NAME,
            Scope::Section,
            self.severity,
            ctx.section_location(section),
            message,
        )
    }
}

impl Rule for HeadingLength {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Headings must be 1 to N words, with N set per heading level"
    }

    fn scope(&self) -> Scope {
        Scope::Section
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &CheckContext<'_>, node: Node<'_>) -> Vec<ValidationResult> {
        let Node::Section(section) = node else {
            return Vec::new();
        };
        let Some(max) = self.max_words(section.level) else {
            return Vec::new();
        };

        let words = section.word_count();
        if words == 0 {
            return vec![self.result(ctx, section, format!("H{} heading is empty", section.level))];
        }
        if words <= max {
            return Vec::new();
        }

        vec![self
            .result(
                ctx,
                section,
                format!(
                    "H{} heading `{}` has {words} words (maximum {max})",
                    section.level, section.title
                ),
            )
            .with_suggestion(Suggestion::new(format!(
                "Shorten the heading to at most {max} words"
            )))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::run_body;

    #[test]
    fn four_word_h2_is_an_error() {
        let results = run_body(HeadingLength::new(), "## Radix Themes Design System\n");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].rule, NAME);
        assert_eq!(results[0].severity, Severity::Error);
        assert_eq!(results[0].location.line, 5);
        assert_eq!(
            results[0].message,
            "H2 heading `Radix Themes Design System` has 4 words (maximum 3)"
        );
    }

    #[test]
    fn deeper_levels_allow_more_words() {
        let body = "## Usage\n### With an icon on the left\n#### Using the asChild prop with links\n";
        assert!(run_body(HeadingLength::new(), body).is_empty());
    }

    #[test]
    fn h1_is_left_to_no_body_h1() {
        assert!(run_body(HeadingLength::new(), "# A very long top level heading\n").is_empty());
    }

    #[test]
    fn inline_code_counts_as_words() {
        let results = run_body(HeadingLength::new(), "## The `asChild` prop explained\n");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn decreasing_limits_are_rejected() {
        assert_eq!(
            HeadingLength::new().limits(5, 4, 8).unwrap_err(),
            HeadingLimitsError::Decreasing { h2: 5, h3: 4, deep: 8 }
        );
        assert_eq!(
            HeadingLength::new().limits(0, 4, 8).unwrap_err(),
            HeadingLimitsError::Zero
        );
        assert!(HeadingLength::new().limits(2, 2, 2).is_ok());
    }

    #[test]
    fn custom_limits_apply() {
        let rule = HeadingLength::new().limits(1, 2, 3).unwrap();
        let results = run_body(rule, "## Two words\n");
        assert_eq!(results.len(), 1);
        assert!(results[0].message.contains("maximum 1"));
    }
}
