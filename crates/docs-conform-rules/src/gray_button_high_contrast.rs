//! Rule to require `highContrast` on gray buttons in code examples.
//!
//! # Rationale
//!
//! The gray color on its own does not meet text contrast requirements for
//! button labels. Examples must pair `color="gray"` with `highContrast`.
//!
//! # Configuration
//!
//! - `components`: Component names checked (default: `["Button", "IconButton"]`)
//! - `colors`: Color values that need high contrast (default: `["gray"]`)

use docs_conform_core::utils::{find_elements, JsxElement};
use docs_conform_core::{
    CheckContext, Node, Rule, Scope, Severity, Suggestion, ValidationResult,
};

use crate::JSX_LANGUAGES;

/// Rule code for gray-button-high-contrast.
pub const CODE: &str = "DC204";

/// Rule name for gray-button-high-contrast.
pub const NAME: &str = "gray-button-high-contrast";

/// Requires low-contrast button colors to set `highContrast`.
#[derive(Debug, Clone)]
pub struct GrayButtonHighContrast {
    /// Component names to check.
    pub components: Vec<String>,
    /// Color values that need `highContrast`.
    pub colors: Vec<String>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for GrayButtonHighContrast {
    fn default() -> Self {
        Self::new()
    }
}

impl GrayButtonHighContrast {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: vec!["Button".to_string(), "IconButton".to_string()],
            colors: vec!["gray".to_string()],
            severity: Severity::Warning,
        }
    }

    /// Replaces the component names to check.
    #[must_use]
    pub fn components(mut self, components: &[&str]) -> Self {
        self.components = components.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Replaces the colors that need high contrast.
    #[must_use]
    pub fn colors(mut self, colors: &[&str]) -> Self {
        self.colors = colors.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn needs_high_contrast<'e>(&self, element: &'e JsxElement) -> Option<&'e str> {
        let color = element.attribute("color")?.value.as_deref()?;
        if !self.colors.iter().any(|c| c == color) {
            return None;
        }
        let high_contrast = element
            .attribute("highContrast")
            .is_some_and(|a| a.value.as_deref() != Some("false"));
        (!high_contrast).then_some(color)
    }
}

impl Rule for GrayButtonHighContrast {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Gray buttons in code examples must set highContrast"
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
                let Some(color) = self.needs_high_contrast(&element) else {
                    continue;
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
                        format!("`<{component} color=\"{color}\">` without `highContrast`"),
                    )
                    .with_suggestion(Suggestion::new("Add the `highContrast` prop")),
                );
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::run_body;

    fn tsx(code: &str) -> String {
        format!("## Usage\n```jsx\n{code}\n```\n")
    }

    #[test]
    fn gray_button_without_high_contrast_is_reported() {
        let results = run_body(
            GrayButtonHighContrast::new(),
            &tsx("<Button color=\"gray\" variant=\"soft\">Edit</Button>"),
        );
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].message,
            "`<Button color=\"gray\">` without `highContrast`"
        );
        assert_eq!(results[0].location.line, 7);
    }

    #[test]
    fn high_contrast_or_other_color_passes() {
        let code = "<Button color=\"gray\" highContrast>Edit</Button>\n<Button color=\"indigo\">Save</Button>\n<Button>Plain</Button>";
        assert!(run_body(GrayButtonHighContrast::new(), &tsx(code)).is_empty());
    }

    #[test]
    fn explicit_false_is_reported() {
        let code = "<IconButton color={\"gray\"} highContrast={false} aria-label=\"Edit\" />";
        assert_eq!(run_body(GrayButtonHighContrast::new(), &tsx(code)).len(), 1);
    }
}
