//! Shared output formatting for batch reports.

use std::fmt::Write as _;

use anyhow::Result;
use docs_conform_core::{BatchReport, DocumentOutcome, ResultDiagnostic, Severity, ValidationResult};
use miette::GraphicalReportHandler;
use serde::Serialize;

use crate::OutputFormat;

/// Print a batch report in the specified format.
pub fn print(batch: &BatchReport, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(batch, true),
        OutputFormat::Json => render_json(batch)?,
        OutputFormat::Compact => render_compact(batch),
        OutputFormat::Pretty => render_pretty(batch),
    };
    print!("{rendered}");
    Ok(())
}

fn render_text(batch: &BatchReport, color: bool) -> String {
    let paint = |code: &str, text: &str| {
        if color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    };
    let mut out = String::new();

    for outcome in &batch.outcomes {
        match outcome {
            DocumentOutcome::Malformed { error, .. } => {
                let _ = writeln!(out, "{}: {error}\n", paint("31", "malformed"));
            }
            DocumentOutcome::Checked { report, .. } => {
                for result in &report.results {
                    let severity = match result.severity {
                        Severity::Error => paint("31", "error"),
                        Severity::Warning => paint("33", "warning"),
                    };
                    let _ = writeln!(
                        out,
                        "{} {} at {}:{}:{}",
                        result.code,
                        result.rule,
                        result.location.file.display(),
                        result.location.line,
                        result.location.column,
                    );
                    let _ = writeln!(out, "  {severity}: {}", result.message);
                    if let Some(suggestion) = &result.suggestion {
                        let _ = writeln!(out, "  = help: {}", suggestion.message);
                    }
                    out.push('\n');
                }
            }
        }
    }

    for outcome in batch.outcomes.iter().filter(|o| !o.is_passing()) {
        let _ = writeln!(out, "{}: {}", outcome.path().display(), outcome.status());
    }

    let (errors, warnings) = batch.count_by_severity();
    let summary_color = if !batch.is_passing() {
        "31"
    } else if warnings > 0 {
        "33"
    } else {
        "32"
    };
    let _ = writeln!(
        out,
        "{}",
        paint(
            summary_color,
            &format!(
                "{} ({errors} error(s), {warnings} warning(s))",
                batch.summary_line()
            )
        )
    );
    out
}

#[derive(Serialize)]
struct JsonBatch<'a> {
    documents: Vec<JsonDocument<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    path: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    results: &'a [ValidationResult],
}

#[derive(Serialize)]
struct JsonSummary {
    documents: usize,
    passing: usize,
    failing: usize,
    malformed: usize,
    errors: usize,
    warnings: usize,
}

fn render_json(batch: &BatchReport) -> Result<String> {
    let documents = batch
        .outcomes
        .iter()
        .map(|outcome| match outcome {
            DocumentOutcome::Malformed { path, error } => JsonDocument {
                path: path.display().to_string(),
                status: "malformed",
                error: Some(error.to_string()),
                results: &[],
            },
            DocumentOutcome::Checked { path, report } => JsonDocument {
                path: path.display().to_string(),
                status: if report.passing { "passing" } else { "failing" },
                error: None,
                results: &report.results,
            },
        })
        .collect();
    let (errors, warnings) = batch.count_by_severity();
    let json = JsonBatch {
        documents,
        summary: JsonSummary {
            documents: batch.documents(),
            passing: batch.passing(),
            failing: batch.failing(),
            malformed: batch.malformed(),
            errors,
            warnings,
        },
    };
    let mut rendered = serde_json::to_string_pretty(&json)?;
    rendered.push('\n');
    Ok(rendered)
}

fn render_compact(batch: &BatchReport) -> String {
    let mut out = String::new();
    for outcome in &batch.outcomes {
        match outcome {
            DocumentOutcome::Malformed { error, .. } => {
                let _ = writeln!(out, "{error}");
            }
            DocumentOutcome::Checked { report, .. } => {
                for result in &report.results {
                    let _ = writeln!(out, "{result}");
                }
            }
        }
    }
    out
}

fn render_pretty(batch: &BatchReport) -> String {
    let handler = GraphicalReportHandler::new();
    let mut out = String::new();

    for outcome in &batch.outcomes {
        match outcome {
            DocumentOutcome::Malformed { error, .. } => {
                if handler.render_report(&mut out, error).is_err() {
                    let _ = writeln!(out, "{error}");
                }
            }
            DocumentOutcome::Checked { path, report } => {
                if report.results.is_empty() {
                    continue;
                }
                let Ok(source) = std::fs::read_to_string(path) else {
                    tracing::warn!("Cannot re-read {} for snippets", path.display());
                    for result in &report.results {
                        let _ = writeln!(out, "{result}");
                    }
                    continue;
                };
                for result in &report.results {
                    let diagnostic = ResultDiagnostic::new(result, &source);
                    if handler.render_report(&mut out, &diagnostic).is_err() {
                        let _ = writeln!(out, "{result}");
                    }
                }
            }
        }
    }

    let _ = writeln!(out, "{}", batch.summary_line());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use docs_conform_core::{check_source, RuleRegistry};
    use docs_conform_rules::HeadingLength;

    fn batch() -> BatchReport {
        let registry = RuleRegistry::builder()
            .rule(HeadingLength::new())
            .unwrap()
            .build();
        BatchReport::new(vec![
            check_source(
                "docs/button.mdx",
                "---\ntitle: Button\ndescription: D\n---\n## Radix Themes Design System\n",
                &registry,
            ),
            check_source("docs/broken.mdx", "## No front matter\n", &registry),
            check_source(
                "docs/card.mdx",
                "---\ntitle: Card\ndescription: D\n---\n## Usage\n",
                &registry,
            ),
        ])
    }

    #[test]
    fn compact_output() {
        insta::assert_snapshot!(render_compact(&batch()), @r"
        docs/broken.mdx: missing front matter (expected a leading `---` block)
        docs/button.mdx:5:1: error [DC102] H2 heading `Radix Themes Design System` has 4 words (maximum 3)
        ");
    }

    #[test]
    fn text_output_without_color() {
        insta::assert_snapshot!(render_text(&batch(), false), @r"
        malformed: docs/broken.mdx: missing front matter (expected a leading `---` block)

        DC102 heading-length at docs/button.mdx:5:1
          error: H2 heading `Radix Themes Design System` has 4 words (maximum 3)
          = help: Shorten the heading to at most 3 words

        docs/broken.mdx: malformed
        docs/button.mdx: failing (1 error)
        3 documents: 1 passing, 1 failing, 1 malformed (1 error(s), 0 warning(s))
        ");
    }

    #[test]
    fn json_output_has_summary() {
        let value: serde_json::Value = serde_json::from_str(&render_json(&batch()).unwrap()).unwrap();
        assert_eq!(value["summary"]["documents"], 3);
        assert_eq!(value["summary"]["malformed"], 1);
        assert_eq!(value["documents"][0]["status"], "malformed");
        assert_eq!(value["documents"][1]["results"][0]["code"], "DC102");
        assert_eq!(value["documents"][2]["status"], "passing");
    }
}
