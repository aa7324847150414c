//! Core types for validation results.

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for validation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Severity {
    /// Advisory finding, never fails a run.
    Warning,
    /// Finding that fails the document.
    Error,
}

impl Severity {
    /// Parses a severity name as written in configuration files.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "warning" | "warn" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = String;

    fn try_from(name: String) -> Result<Self, String> {
        Self::from_name(&name)
            .ok_or_else(|| format!("unknown severity `{name}` (expected `warning` or `error`)"))
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Class of document node a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    /// The whole document, including its front matter.
    Document,
    /// A heading together with its body.
    Section,
    /// A fenced code sample.
    CodeBlock,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Document => write!(f, "document"),
            Self::Section => write!(f, "section"),
            Self::CodeBlock => write!(f, "code-block"),
        }
    }
}

/// Source location inside a documentation file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path as given to the parser.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A suggested fix for a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One outcome of applying a rule to a document node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Rule code (e.g., "DC102").
    pub code: String,
    /// Rule name (e.g., "heading-length").
    pub rule: String,
    /// Scope of the node the rule was applied to.
    pub scope: Scope,
    /// Severity of this finding.
    pub severity: Severity,
    /// Location of the offending node.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl ValidationResult {
    /// Creates a new validation result.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        scope: Scope,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            scope,
            severity,
            location,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Adds a suggestion to this result.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// A validation result paired with its source text for rich rendering.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("[{code}] {message}")]
pub struct ResultDiagnostic {
    code: String,
    message: String,
    #[help]
    help: Option<String>,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl ResultDiagnostic {
    /// Builds a diagnostic for `result` over the full text of its file.
    #[must_use]
    pub fn new(result: &ValidationResult, source: &str) -> Self {
        let offset = result.location.offset.min(source.len());
        let length = result.location.length.min(source.len() - offset);
        Self {
            code: result.code.clone(),
            message: result.message.clone(),
            help: result.suggestion.as_ref().map(|s| s.message.clone()),
            source_code: NamedSource::new(
                result.location.file.display().to_string(),
                source.to_string(),
            ),
            span: SourceSpan::from((offset, length)),
            label_message: result.rule.clone(),
        }
    }

    /// Returns the rule code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(severity: Severity) -> ValidationResult {
        ValidationResult::new(
            "DC102",
            "heading-length",
            Scope::Section,
            severity,
            Location::new(PathBuf::from("docs/button.mdx"), 12, 1),
            "H2 heading has 4 words",
        )
    }

    #[test]
    fn severity_orders_errors_above_warnings() {
        assert!(Severity::Error > Severity::Warning);
    }

    #[test]
    fn severity_from_name_accepts_aliases() {
        assert_eq!(Severity::from_name("warn"), Some(Severity::Warning));
        assert_eq!(Severity::from_name(" Error "), Some(Severity::Error));
        assert_eq!(Severity::from_name("info"), None);
    }

    #[test]
    fn suggestion_is_skipped_in_json_when_absent() {
        let plain = serde_json::to_value(make_result(Severity::Warning)).unwrap();
        assert!(plain.get("suggestion").is_none());

        let with = make_result(Severity::Error).with_suggestion(Suggestion::new("Shorten it"));
        let json = serde_json::to_value(&with).unwrap();
        assert_eq!(json["suggestion"]["message"], "Shorten it");
        assert_eq!(json["scope"], "section");
    }

    #[test]
    fn display_is_compact() {
        let r = make_result(Severity::Warning);
        assert_eq!(
            r.to_string(),
            "docs/button.mdx:12:1: warning [DC102] H2 heading has 4 words"
        );
    }

    #[test]
    fn diagnostic_clamps_span_to_source() {
        let mut r = make_result(Severity::Error);
        r.location = r.location.with_span(100, 50);
        let diag = ResultDiagnostic::new(&r, "short");
        assert_eq!(diag.span.offset(), 5);
        assert_eq!(diag.span.len(), 0);
        assert_eq!(diag.code(), "DC102");
    }
}
