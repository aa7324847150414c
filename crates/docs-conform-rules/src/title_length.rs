//! Rule to keep page titles short.
//!
//! # Rationale
//!
//! The front matter title is shown in navigation, browser tabs and search
//! results. Long titles get truncated.
//!
//! # Configuration
//!
//! - `max_chars`: Maximum title length in characters (default: 60)

use docs_conform_core::{
    CheckContext, Node, Rule, Scope, Severity, Suggestion, ValidationResult,
};

/// Rule code for title-length.
pub const CODE: &str = "DC001";

/// Rule name for title-length.
pub const NAME: &str = "title-length";

/// Limits the length of the front matter title.
#[derive(Debug, Clone)]
pub struct TitleLength {
    /// Maximum number of characters.
    pub max_chars: usize,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for TitleLength {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleLength {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_chars: 60,
            severity: Severity::Warning,
        }
    }

    /// Sets the maximum title length.
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

impl Rule for TitleLength {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Front matter title must be short enough to display untruncated"
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
        let length = doc.frontmatter.title.chars().count();
        if length <= self.max_chars {
            return Vec::new();
        }

        vec![ValidationResult::new(
            CODE,
            NAME,
            Scope::Document,
            self.severity,
            ctx.location_at(doc.frontmatter.title_line, 1),
            format!(
                "Title is {length} characters long (maximum {})",
                self.max_chars
            ),
        )
        .with_suggestion(Suggestion::new(
            "Use the component or concept name; put detail in the description",
        ))]
    }
}
