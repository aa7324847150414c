//! Rule trait for defining conformance checks.

use crate::context::CheckContext;
use crate::document::Node;
use crate::types::{Scope, Severity, ValidationResult};

/// A conformance check over one kind of document node.
///
/// Each rule declares the [`Scope`] it applies to; the evaluator calls
/// [`Rule::check`] once for every node of that scope. An empty result means
/// the node passes.
///
/// # Example
///
/// ```ignore
/// use docs_conform_core::{CheckContext, Node, Rule, Scope, Severity, ValidationResult};
///
/// pub struct NoTodoHeadings;
///
/// impl Rule for NoTodoHeadings {
///     fn name(&self) -> &'static str { "no-todo-headings" }
///     fn code(&self) -> &'static str { "DC900" }
///     fn scope(&self) -> Scope { Scope::Section }
///
///     fn check(&self, ctx: &CheckContext<'_>, node: Node<'_>) -> Vec<ValidationResult> {
///         let Node::Section(section) = node else { return vec![] };
///         if !section.title.contains("TODO") {
///             return vec![];
///         }
///         vec![ValidationResult::new(
///             self.code(),
///             self.name(),
///             self.scope(),
///             self.default_severity(),
///             ctx.section_location(section),
///             "Heading still contains TODO",
///         )]
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "heading-length").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "DC102").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the class of node this rule inspects.
    fn scope(&self) -> Scope;

    /// Returns the severity for results from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single node and returns any findings.
    ///
    /// Only called with nodes matching [`Rule::scope`].
    fn check(&self, ctx: &CheckContext<'_>, node: Node<'_>) -> Vec<ValidationResult>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
