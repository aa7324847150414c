//! Shared helpers for rule unit tests.

use docs_conform_core::{evaluate, parse, Config, Rule, RuleRegistry, ValidationResult};

/// Front matter used by pages that only exercise body rules.
pub const FM: &str = "---\ntitle: Button\ndescription: Trigger an action or event, such as submitting a form or displaying a dialog.\n---\n";

/// Runs a single rule over `source` and returns its results.
pub fn run<R: Rule + 'static>(rule: R, source: &str) -> Vec<ValidationResult> {
    let doc = parse("test.mdx", source).unwrap();
    let registry = RuleRegistry::builder()
        .config(Config::default())
        .rule(rule)
        .unwrap()
        .build();
    evaluate(&doc, &registry)
}

/// Runs a single rule over a body placed after [`FM`].
pub fn run_body<R: Rule + 'static>(rule: R, body: &str) -> Vec<ValidationResult> {
    run(rule, &format!("{FM}{body}"))
}
