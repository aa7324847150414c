//! Applies a registry's rules to a parsed document.

use tracing::{debug, trace};

use crate::context::CheckContext;
use crate::document::{Block, Document, Node, Section};
use crate::registry::RuleRegistry;
use crate::rule::Rule;
use crate::types::{Scope, ValidationResult};
use crate::utils::allowance::check_allow;

/// Evaluates every enabled rule of `registry` against `document`.
///
/// Nodes are visited in source order: the document itself, then code blocks
/// before the first heading, then each section in pre-order followed by its
/// own code blocks. For each node, rules run in registration order. A failing
/// rule never stops the others, and the document is only read.
///
/// Results suppressed by an allow directive are dropped here, and configured
/// severity overrides are applied.
#[must_use]
pub fn evaluate(document: &Document, registry: &RuleRegistry) -> Vec<ValidationResult> {
    let mut evaluator = Evaluator {
        document,
        registry,
        results: Vec::new(),
    };
    evaluator.run();
    debug!(
        "{}: {} results from {} rules",
        document.path.display(),
        evaluator.results.len(),
        registry.len()
    );
    evaluator.results
}

struct Evaluator<'a> {
    document: &'a Document,
    registry: &'a RuleRegistry,
    results: Vec<ValidationResult>,
}

impl<'a> Evaluator<'a> {
    fn run(&mut self) {
        let ctx = CheckContext::new(self.document);
        self.visit(&ctx, Node::Document(self.document), None);

        for block in self.document.preamble.iter().filter_map(Block::as_code) {
            self.visit(&ctx, Node::CodeBlock(block), Some(block.line));
        }

        for section in &self.document.sections {
            self.visit_section(ctx, section);
        }
    }

    fn visit_section(&mut self, ctx: CheckContext<'a>, section: &'a Section) {
        self.visit(&ctx, Node::Section(section), Some(section.line));

        let inner = ctx.within(Some(section));
        for block in section.code_blocks() {
            self.visit(&inner, Node::CodeBlock(block), Some(block.line));
        }
        for child in &section.children {
            self.visit_section(inner, child);
        }
    }

    fn visit(&mut self, ctx: &CheckContext<'_>, node: Node<'_>, node_line: Option<usize>) {
        let scope: Scope = node.scope();
        let registry = self.registry;
        for rule in registry.rules_for(scope) {
            trace!("Running {} on {} node", rule.name(), scope);
            let found = rule.check(ctx, node);
            let kept = self.filter_allowed(rule, found, node_line);
            let kept = self.apply_severity_override(rule.name(), kept);
            self.results.extend(kept);
        }
    }

    /// Drops results covered by an allow directive on the node or result line.
    fn filter_allowed(
        &self,
        rule: &dyn Rule,
        results: Vec<ValidationResult>,
        node_line: Option<usize>,
    ) -> Vec<ValidationResult> {
        let allowances = &self.document.allowances;
        if allowances.is_empty() {
            return results;
        }
        results
            .into_iter()
            .filter(|result| {
                let lines = node_line
                    .into_iter()
                    .chain(std::iter::once(result.location.line));
                for line in lines {
                    let check = check_allow(allowances, line, rule.name());
                    if check.is_allowed() {
                        debug!(
                            "Allowed {} at {}:{} ({})",
                            rule.name(),
                            result.location.file.display(),
                            result.location.line,
                            check.reason().unwrap_or("no reason given")
                        );
                        return false;
                    }
                }
                true
            })
            .collect()
    }

    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut results: Vec<ValidationResult>,
    ) -> Vec<ValidationResult> {
        if let Some(severity) = self.registry.severity_override(rule_name) {
            for r in &mut results {
                r.severity = severity;
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::parse;
    use crate::types::Severity;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Reports every node it sees, labelled with the node kind.
    struct Echo {
        name: &'static str,
        code: &'static str,
        scope: Scope,
    }

    impl Rule for Echo {
        fn name(&self) -> &'static str {
            self.name
        }
        fn code(&self) -> &'static str {
            self.code
        }
        fn scope(&self) -> Scope {
            self.scope
        }
        fn check(&self, ctx: &CheckContext<'_>, node: Node<'_>) -> Vec<ValidationResult> {
            let (line, label) = match node {
                Node::Document(d) => (d.frontmatter.title_line, "doc".to_string()),
                Node::Section(s) => (s.line, s.title.clone()),
                Node::CodeBlock(c) => (c.line, c.language.clone().unwrap_or_default()),
            };
            vec![ValidationResult::new(
                self.code,
                self.name,
                self.scope,
                Severity::Error,
                ctx.location_at(line, 1),
                label,
            )]
        }
    }

    struct Counting(Arc<AtomicUsize>);

    impl Rule for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }
        fn code(&self) -> &'static str {
            "T999"
        }
        fn scope(&self) -> Scope {
            Scope::Section
        }
        fn check(&self, _ctx: &CheckContext<'_>, _node: Node<'_>) -> Vec<ValidationResult> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Vec::new()
        }
    }

    fn echo(name: &'static str, code: &'static str, scope: Scope) -> Box<dyn Rule> {
        Box::new(Echo { name, code, scope })
    }

    const SOURCE: &str = "---\ntitle: T\ndescription: D\n---\n```sh\nnpm i\n```\n## A\n```tsx\nx\n```\n### B\ntext\n## C\n";

    #[test]
    fn visits_nodes_in_source_order() {
        let doc = parse("a.md", SOURCE).unwrap();
        let registry = RuleRegistry::from_rules(
            vec![
                echo("doc", "T1", Scope::Document),
                echo("sec", "T2", Scope::Section),
                echo("code", "T3", Scope::CodeBlock),
            ],
            Config::default(),
        )
        .unwrap();

        let labels: Vec<String> = evaluate(&doc, &registry)
            .into_iter()
            .map(|r| r.message)
            .collect();
        assert_eq!(labels, vec!["doc", "sh", "A", "tsx", "B", "C"]);
    }

    #[test]
    fn rules_run_in_registration_order_per_node() {
        let doc = parse("a.md", "---\ntitle: T\ndescription: D\n---\n## A\n").unwrap();
        let registry = RuleRegistry::from_rules(
            vec![echo("second", "T2", Scope::Section), echo("first", "T1", Scope::Section)],
            Config::default(),
        )
        .unwrap();
        let codes: Vec<String> = evaluate(&doc, &registry)
            .into_iter()
            .map(|r| r.code)
            .collect();
        assert_eq!(codes, vec!["T2", "T1"]);
    }

    #[test]
    fn every_section_is_checked() {
        let count = Arc::new(AtomicUsize::new(0));
        let doc = parse("a.md", SOURCE).unwrap();
        let registry = RuleRegistry::builder()
            .rule(Counting(Arc::clone(&count)))
            .unwrap()
            .build();
        let results = evaluate(&doc, &registry);
        assert!(results.is_empty());
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn severity_override_is_applied() {
        let doc = parse("a.md", "---\ntitle: T\ndescription: D\n---\n## A\n").unwrap();
        let config = Config::parse("[rules.sec]\nseverity = \"warning\"\n").unwrap();
        let registry =
            RuleRegistry::from_rules(vec![echo("sec", "T2", Scope::Section)], config).unwrap();
        let results = evaluate(&doc, &registry);
        assert_eq!(results[0].severity, Severity::Warning);
    }

    #[test]
    fn allow_directive_suppresses_next_node() {
        let source = "---\ntitle: T\ndescription: D\n---\n<!-- docs-conform: allow(sec) reason=\"brand\" -->\n## A\n## B\n";
        let doc = parse("a.md", source).unwrap();
        let registry =
            RuleRegistry::from_rules(vec![echo("sec", "T2", Scope::Section)], Config::default())
                .unwrap();
        let titles: Vec<String> = evaluate(&doc, &registry)
            .into_iter()
            .map(|r| r.message)
            .collect();
        assert_eq!(titles, vec!["B"]);
    }

    #[test]
    fn evaluation_does_not_mutate_document() {
        let doc = parse("a.md", SOURCE).unwrap();
        let before = format!("{doc:?}");
        let registry =
            RuleRegistry::from_rules(vec![echo("sec", "T2", Scope::Section)], Config::default())
                .unwrap();
        let first = evaluate(&doc, &registry);
        let second = evaluate(&doc, &registry);
        assert_eq!(first, second);
        assert_eq!(before, format!("{doc:?}"));
    }
}
