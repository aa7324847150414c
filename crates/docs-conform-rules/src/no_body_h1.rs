//! Rule to forbid level-1 headings in the page body.
//!
//! # Rationale
//!
//! The front matter title is rendered as the page's only H1. A second H1 in
//! the body breaks the outline and confuses screen readers.

use docs_conform_core::{
    CheckContext, Node, Rule, Scope, Severity, Suggestion, ValidationResult,
};

/// Rule code for no-body-h1.
pub const CODE: &str = "DC101";

/// Rule name for no-body-h1.
pub const NAME: &str = "no-body-h1";

/// Forbids `#` headings in the body.
#[derive(Debug, Clone)]
pub struct NoBodyH1 {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoBodyH1 {
    fn default() -> Self {
        Self::new()
    }
}

impl NoBodyH1 {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for NoBodyH1 {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "The page title is the only H1; body headings start at H2"
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
        if section.level != 1 {
            return Vec::new();
        }

        vec![ValidationResult::new(
            CODE,
            NAME,
            Scope::Section,
            self.severity,
            ctx.section_location(section),
            format!("Level-1 heading `{}` in page body", section.title),
        )
        .with_suggestion(Suggestion::new(
            "Use `##`; the front matter title is rendered as the H1",
        ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::run_body;

    #[test]
    fn body_h1_is_reported() {
        let results = run_body(NoBodyH1::new(), "# Button\n## Usage\n");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].location.line, 5);
        assert_eq!(results[0].severity, Severity::Error);
    }

    #[test]
    fn h2_sections_pass() {
        assert!(run_body(NoBodyH1::new(), "## Usage\n### Sizes\n").is_empty());
    }
}
