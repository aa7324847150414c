//! End-to-end tests of parse, evaluate and summarize with ad-hoc rules.

use docs_conform_core::{
    check_source, evaluate, parse, summarize, CheckContext, Config, DocumentOutcome,
    MalformedDocumentError, Node, RegistryError, Rule, RuleRegistry, Scope, Severity,
    ValidationResult,
};

/// Flags every section whose title has more than `max` words.
struct LongHeading {
    max: usize,
}

impl Rule for LongHeading {
    fn name(&self) -> &'static str {
        "long-heading"
    }
    fn code(&self) -> &'static str {
        "T100"
    }
    fn scope(&self) -> Scope {
        Scope::Section
    }
    fn check(&self, ctx: &CheckContext<'_>, node: Node<'_>) -> Vec<ValidationResult> {
        let Node::Section(section) = node else {
            return vec![];
        };
        if section.word_count() <= self.max {
            return vec![];
        }
        vec![ValidationResult::new(
            self.code(),
            self.name(),
            self.scope(),
            Severity::Error,
            ctx.section_location(section),
            format!("`{}` has {} words", section.title, section.word_count()),
        )]
    }
}

/// Warns on code blocks without a language.
struct BareFence;

impl Rule for BareFence {
    fn name(&self) -> &'static str {
        "bare-fence"
    }
    fn code(&self) -> &'static str {
        "T200"
    }
    fn scope(&self) -> Scope {
        Scope::CodeBlock
    }
    fn check(&self, ctx: &CheckContext<'_>, node: Node<'_>) -> Vec<ValidationResult> {
        let Node::CodeBlock(block) = node else {
            return vec![];
        };
        if block.language.is_some() {
            return vec![];
        }
        vec![ValidationResult::new(
            self.code(),
            self.name(),
            self.scope(),
            Severity::Warning,
            ctx.code_location(block),
            "code block has no language",
        )]
    }
}

fn registry() -> RuleRegistry {
    RuleRegistry::builder()
        .rule(LongHeading { max: 3 })
        .and_then(|b| b.rule(BareFence))
        .unwrap()
        .build()
}

const PAGE: &str = "---
title: Button
description: Trigger an action or event.
---
## Installation
```
npm install @radix-ui/themes
```
## Radix Themes Design System
### Sizes
";

#[test]
fn errors_fail_and_warnings_do_not() {
    let doc = parse("docs/button.mdx", PAGE).unwrap();
    let report = summarize(evaluate(&doc, &registry()));

    assert!(!report.passing);
    assert_eq!(report.count_by_severity(), (1, 1));
    let lines: Vec<String> = report.results.iter().map(ToString::to_string).collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    docs/button.mdx:6:1: warning [T200] code block has no language
    docs/button.mdx:9:1: error [T100] `Radix Themes Design System` has 4 words
    ");
}

#[test]
fn evaluation_is_repeatable() {
    let doc = parse("docs/button.mdx", PAGE).unwrap();
    let registry = registry();
    assert_eq!(evaluate(&doc, &registry), evaluate(&doc, &registry));
}

#[test]
fn disabled_rule_never_runs() {
    let config = Config::parse("[rules.long-heading]\nenabled = false\n").unwrap();
    let registry = RuleRegistry::builder()
        .config(config)
        .rule(LongHeading { max: 3 })
        .unwrap()
        .build();
    let doc = parse("docs/button.mdx", PAGE).unwrap();
    assert!(summarize(evaluate(&doc, &registry)).passing);
}

#[test]
fn duplicate_registration_fails() {
    let err = RuleRegistry::builder()
        .rule(LongHeading { max: 3 })
        .and_then(|b| b.rule(LongHeading { max: 5 }))
        .err()
        .unwrap();
    assert!(matches!(err, RegistryError::DuplicateRule { ref name, .. } if name == "long-heading"));
}

#[test]
fn missing_description_is_malformed() {
    let err = parse("a.md", "---\ntitle: Button\n---\n## Usage\n").unwrap_err();
    assert!(matches!(err, MalformedDocumentError::MissingKey { key: "description", .. }));
}

#[test]
fn skipped_heading_is_malformed_and_no_rules_run() {
    let source = "---\ntitle: T\ndescription: D\n---\n## Usage\n#### Deep\n";
    let outcome = check_source("a.md", source, &registry());
    match outcome {
        DocumentOutcome::Malformed { error, .. } => assert_eq!(
            error,
            MalformedDocumentError::SkippedHeadingLevel {
                path: "a.md".into(),
                line: 6,
                previous: 2,
                found: 4,
            }
        ),
        DocumentOutcome::Checked { .. } => panic!("expected malformed outcome"),
    }
}
