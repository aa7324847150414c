//! Rule to require line numbers on long code samples.
//!
//! # Rationale
//!
//! Readers refer to lines of long examples. Blocks longer than the threshold
//! must carry the `showLineNumbers` info-string flag.
//!
//! # Configuration
//!
//! - `threshold`: Longest block, in lines, that may omit the flag (default: 10)

use docs_conform_core::{
    CheckContext, Node, Rule, Scope, Severity, Suggestion, ValidationResult, LINE_NUMBERS_FLAG,
};

/// Rule code for code-line-numbers.
pub const CODE: &str = "DC202";

/// Rule name for code-line-numbers.
pub const NAME: &str = "code-line-numbers";

/// Requires `showLineNumbers` on code blocks above a line threshold.
#[derive(Debug, Clone)]
pub struct CodeLineNumbers {
    /// Maximum number of lines allowed without the flag.
    pub threshold: usize,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for CodeLineNumbers {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeLineNumbers {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            threshold: 10,
            severity: Severity::Warning,
        }
    }

    /// Sets the line threshold.
    #[must_use]
    pub fn threshold(mut self, lines: usize) -> Self {
        self.threshold = lines;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for CodeLineNumbers {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Code blocks longer than the threshold must request line numbers"
    }

    fn scope(&self) -> Scope {
        Scope::CodeBlock
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &CheckContext<'_>, node: Node<'_>) -> Vec<ValidationResult> {
        let Node::CodeBlock(block) = node else {
            return Vec::new();
        };
        if block.line_numbers || block.line_count <= self.threshold {
            return Vec::new();
        }

        let language = block.language.as_deref().unwrap_or("");
        vec![ValidationResult::new(
            CODE,
            NAME,
            Scope::CodeBlock,
            self.severity,
            ctx.code_location(block),
            format!(
                "Code block has {} lines but no `{LINE_NUMBERS_FLAG}` (threshold {})",
                block.line_count, self.threshold
            ),
        )
        .with_suggestion(Suggestion::new(format!(
            "Open the block with ```{language} {LINE_NUMBERS_FLAG}"
        )))]
    }
}
