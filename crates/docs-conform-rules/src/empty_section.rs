//! Rule to flag headings with nothing under them.

use docs_conform_core::{
    CheckContext, Node, Rule, Scope, Severity, Suggestion, ValidationResult,
};

/// Rule code for empty-section.
pub const CODE: &str = "DC104";

/// Rule name for empty-section.
pub const NAME: &str = "empty-section";

/// Flags sections without content or subsections.
#[derive(Debug, Clone)]
pub struct EmptySection {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for EmptySection {
    fn default() -> Self {
        Self::new()
    }
}

impl EmptySection {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for EmptySection {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Every heading must have content or subsections"
    }

    fn scope(&self) -> Scope {
        Scope::Section
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &CheckContext<'_>, node: Node<'_>) -> Vec<ValidationResult> {
        match node {
            Node::Section(section) if section.is_empty() => vec![ValidationResult::new(
                CODE,
                NAME,
                Scope::Section,
                self.severity,
                ctx.section_location(section),
                format!("Section `{}` is empty", section.title),
            )
            .with_suggestion(Suggestion::new(
                "Add content or remove the heading",
            ))],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::run_body;

    #[test]
    fn heading_without_content_is_reported() {
        let results = run_body(EmptySection::new(), "## Usage\n## Sizes\nSmall and large.\n");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].message, "Section `Usage` is empty");
    }

    #[test]
    fn section_with_only_children_passes() {
        assert!(run_body(EmptySection::new(), "## Usage\n### Sizes\nText.\n").is_empty());
    }
}
