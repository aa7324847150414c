//! Rule to require a language tag on fenced code blocks.
//!
//! # Rationale
//!
//! The language tag drives syntax highlighting and tells readers what they
//! are looking at. Indented blocks cannot carry one and are not checked.

use docs_conform_core::{
    CheckContext, Node, Rule, Scope, Severity, Suggestion, ValidationResult,
};

/// Rule code for code-block-language.
pub const CODE: &str = "DC201";

/// Rule name for code-block-language.
pub const NAME: &str = "code-block-language";

/// Requires fenced code blocks to declare a language.
#[derive(Debug, Clone)]
pub struct CodeBlockLanguage {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for CodeBlockLanguage {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeBlockLanguage {
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

impl Rule for CodeBlockLanguage {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Fenced code blocks must declare a language"
    }

    fn scope(&self) -> Scope {
        Scope::CodeBlock
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &CheckContext<'_>, node: Node<'_>) -> Vec<ValidationResult> {
        match node {
            Node::CodeBlock(block) if block.fenced && block.language.is_none() => {
                vec![ValidationResult::new(
                    CODE,
                    NAME,
                    Scope::CodeBlock,
                    self.severity,
                    ctx.code_location(block),
                    "Code block has no language",
                )
                .with_suggestion(Suggestion::new(
                    "Add a language after the opening fence, e.g. ```tsx",
                ))]
            }
            _ => Vec::new(),
        }
    }
}
