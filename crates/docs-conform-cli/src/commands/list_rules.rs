//! List rules command implementation.

use docs_conform_rules::{all_rules, Preset, REVIEW_ONLY_GUIDANCE};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!(
        "{:<7} {:<30} {:<11} {:<8} Description",
        "Code", "Name", "Scope", "Severity"
    );
    println!("{}", "-".repeat(100));

    for rule in all_rules() {
        println!(
            "{:<7} {:<30} {:<11} {:<8} {}",
            rule.code(),
            rule.name(),
            rule.scope().to_string(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    println!("\nPresets:");
    for preset in Preset::ALL {
        let summary = match preset {
            Preset::Recommended => "all rules at default severity (default)".to_string(),
            Preset::Strict => "all rules, warnings raised to errors".to_string(),
            Preset::Minimal => preset.rule_names().join(", "),
        };
        println!("  {:<12} - {summary}", preset.name());
    }

    println!("\nHuman review only (not checked):");
    for item in REVIEW_ONLY_GUIDANCE {
        println!("  - {item}");
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  docs-conform check --rules heading-length,code-line-numbers");
    println!("  docs-conform check --rules DC102,DC202");
}
