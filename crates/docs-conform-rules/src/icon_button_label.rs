//! Rule to require accessible labels on icon buttons in code examples.
//!
//! # Rationale
//!
//! An icon-only button has no text for screen readers. Examples are copied
//! verbatim, so every `<IconButton>` must show an `aria-label` (or
//! `aria-labelledby`).
//!
//! # Configuration
//!
//! - `components`: Component names treated as icon buttons
//!   (default: `["IconButton"]`)
//! - `allow_spread`: Accept elements that spread props, which may carry the
//!   label (default: true)

use docs_conform_core::utils::find_elements;
use docs_conform_core::{
    CheckContext, Node, Rule, Scope, Severity, Suggestion, ValidationResult,
};

use crate::JSX_LANGUAGES;

/// Rule code for icon-button-label.
pub const CODE: &str = "DC203";

/// Rule name for icon-button-label.
pub const NAME: &str = "icon-button-label";

/// Attributes that give an element an accessible name.
const LABEL_ATTRIBUTES: &[&str] = &["aria-label", "aria-labelledby"];

/// Requires icon buttons in JSX examples to have an accessible label.
#[derive(Debug, Clone)]
pub struct IconButtonLabel {
    /// Component names to check.
    pub components: Vec<String>,
    /// Whether `{...props}` counts as possibly labelled.
    pub allow_spread: bool,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for IconButtonLabel {
    fn default() -> Self {
        Self::new()
    }
}

impl IconButtonLabel {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: vec!["IconButton".to_string()],
            allow_spread: true,
            severity: Severity::Error,
        }
    }

    /// Replaces the component names to check.
    #[must_use]
    pub fn components(mut self, components: &[&str]) -> Self {
        self.components = components.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Sets whether prop spreads are accepted.
    #[must_use]
    pub fn allow_spread(mut self, allow: bool) -> Self {
        self.allow_spread = allow;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for IconButtonLabel {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Icon buttons in code examples must have an aria-label"
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
        if !block.language_is(JSX_LANGUAGES) {
            return Vec::new();
        }

        let mut results = Vec::new();
        for component in &self.components {
            for element in find_elements(&block.text, component) {
                if self.allow_spread && element.has_spread() {
                    continue;
                }
                let label = LABEL_ATTRIBUTES
                    .iter()
                    .find_map(|name| element.attribute(name));
                let message = match label {
                    None => format!("`<{component}>` has no `aria-label`"),
                    Some(attr) if attr.value.as_deref().is_some_and(|v| v.trim().is_empty()) => {
                        format!("`<{component}>` has an empty `{}`", attr.name)
                    }
                    Some(_) => continue,
                };
                results.push(
                    ValidationResult::new(
                        CODE,
                        NAME,
                        Scope::CodeBlock,
                        self.severity,
                        ctx.code_span_location(
                            block,
                            element.line,
                            element.column,
                            element.offset,
                            element.length,
                        ),
                        message,
                    )
                    .with_suggestion(Suggestion::new(
                        "Describe the action, e.g. aria-label=\"Close dialog\"",
                    )),
                );
            }
        }
        results
    }
}
