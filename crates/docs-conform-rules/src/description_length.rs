//! Rule to keep page descriptions within a useful length.
//!
//! # Rationale
//!
//! The description is used as the page summary and the meta description.
//! Too short says nothing; too long is cut off by search engines.
//!
//! # Configuration
//!
//! - `min_chars`: Minimum length in characters (default: 50)
//! - `max_chars`: Maximum length in characters (default: 160)

use docs_conform_core::{
    CheckContext, Node, Rule, Scope, Severity, Suggestion, ValidationResult,
};

/// Rule code for description-length.
pub const CODE: &str = "DC002";

/// Rule name for description-length.
pub const NAME: &str = "description-length";

/// Bounds the length of the front matter description.
#[derive(Debug, Clone)]
pub struct DescriptionLength {
    /// Minimum number of characters.
    pub min_chars: usize,
    /// Maximum number of characters.
    pub max_chars: usize,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for DescriptionLength {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptionLength {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_chars: 50,
            max_chars: 160,
            severity: Severity::Warning,
        }
    }

    /// Sets the minimum description length.
    #[must_use]
    pub fn min_chars(mut self, min: usize) -> Self {
        self.min_chars = min;
        self
    }

    /// Sets the maximum description length.
    #[must_use]
    pub fn max_chars(mut self, max: usize) -> Self {
        self.max_chars = max;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for DescriptionLength {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Front matter description must be a one-sentence summary of useful length"
    }

    fn scope(&self) -> Scope {
        Scope::Document
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &CheckContext<'_>, node: Node<'_>) -> Vec<ValidationResult> {
        let Node::Document(doc) = node else {
            return Vec::new();
        };
        let length = doc.frontmatter.description.chars().count();
        let (message, help) = if length < self.min_chars {
            (
                format!(
                    "Description is {length} characters long (minimum {})",
                    self.min_chars
                ),
                "Say what the component does and when to use it",
            )
        } else if length > self.max_chars {
            (
                format!(
                    "Description is {length} characters long (maximum {})",
                    self.max_chars
                ),
                "Keep the description to a single sentence",
            )
        } else {
            return Vec::new();
        };

        vec![ValidationResult::new(
            CODE,
            NAME,
            Scope::Document,
            self.severity,
            ctx.location_at(doc.frontmatter.description_line, 1),
            message,
        )
        .with_suggestion(Suggestion::new(help))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::run;

    fn page(description: &str) -> String {
        format!("---\ntitle: Button\ndescription: {description}\n---\n")
    }

    #[test]
    fn description_in_range_passes() {
        let text = "Trigger an action or event, such as submitting a form.";
        assert!(run(DescriptionLength::new(), &page(text)).is_empty());
    }

    #[test]
    fn short_description_is_reported() {
        let results = run(DescriptionLength::new(), &page("A button."));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].location.line, 3);
        assert!(results[0].message.contains("minimum 50"));
    }

    #[test]
    fn long_description_is_reported() {
        let text = "word ".repeat(40);
        let results = run(DescriptionLength::new(), &page(text.trim()));
        assert_eq!(results.len(), 1);
        assert!(results[0].message.contains("maximum 160"));
    }
}
