//! Rule to forbid sentence punctuation at the end of headings.
//!
//! # Configuration
//!
//! - `characters`: Characters forbidden at the end of a heading
//!   (default: `.`, `:`, `;`, `,`)

use docs_conform_core::{
    CheckContext, Node, Rule, Scope, Severity, Suggestion, ValidationResult,
};

/// Rule code for heading-trailing-punctuation.
pub const CODE: &str = "DC103";

/// Rule name for heading-trailing-punctuation.
pub const NAME: &str = "heading-trailing-punctuation";

/// Forbids headings that end like a sentence.
#[derive(Debug, Clone)]
pub struct HeadingTrailingPunctuation {
    /// Forbidden trailing characters.
    pub characters: Vec<char>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for HeadingTrailingPunctuation {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadingTrailingPunctuation {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            characters: vec!['.', ':', ';', ','],
            severity: Severity::Warning,
        }
    }

    /// Replaces the forbidden trailing characters.
    #[must_use]
    pub fn characters(mut self, characters: &[char]) -> Self {
        self.characters = characters.to_vec();
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for HeadingTrailingPunctuation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Headings must not end with sentence punctuation"
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
        match section.title.chars().last() {
            Some(last) if self.characters.contains(&last) => vec![ValidationResult::new(
                CODE,
                NAME,
                Scope::Section,
                self.severity,
                ctx.section_location(section),
                format!("Heading `{}` ends with `{last}`", section.title),
            )
            .with_suggestion(Suggestion::new("Remove the trailing punctuation"))],
            _ => Vec::new(),
        }
    }
}
