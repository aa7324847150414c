//! Comment-based allowance directives.
//!
//! Supports HTML comments placed directly above a block or heading:
//! ```text
//! <!-- docs-conform: allow(heading-length) reason="product name" -->
//! ```

use std::collections::BTreeSet;

/// Marker that starts a directive inside an HTML comment.
const DIRECTIVE_PREFIX: &str = "docs-conform:";

/// Result of checking for allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowDirective {
    /// Line of the node the directive applies to (1-indexed).
    pub line: usize,
    /// Rule names that are allowed (`all` matches every rule).
    pub rules: BTreeSet<String>,
    /// Optional reason for the allowance.
    pub reason: Option<String>,
}

impl AllowDirective {
    /// Returns true if this directive covers `rule_name`.
    #[must_use]
    pub fn covers(&self, rule_name: &str) -> bool {
        self.rules.contains(rule_name) || self.rules.contains("all")
    }
}

/// Checks whether a finding at `line` for `rule_name` is suppressed.
#[must_use]
pub fn check_allow(directives: &[AllowDirective], line: usize, rule_name: &str) -> AllowCheck {
    directives
        .iter()
        .find(|d| d.line == line && d.covers(rule_name))
        .map_or(AllowCheck::Denied, |d| AllowCheck::Allowed {
            reason: d.reason.clone(),
        })
}

/// Parses an allowance directive from raw HTML.
///
/// Returns the allowed rule names and optional reason; the target line is
/// assigned by the parser once the next node is known.
#[must_use]
pub fn parse_allow_directive(html: &str) -> Option<(BTreeSet<String>, Option<String>)> {
    let inner = html
        .trim()
        .strip_prefix("<!--")?
        .trim_end()
        .strip_suffix("-->")?
        .trim();

    let directive = inner.strip_prefix(DIRECTIVE_PREFIX)?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules: BTreeSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest
        .strip_prefix("reason=")
        .map(str::trim)
        .and_then(|r| r.strip_prefix('"'))
        .and_then(|r| r.find('"').map(|end| r[..end].to_string()));

    Some((rules, reason))
}
