//! Report aggregation for single documents and batches.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::parser::MalformedDocumentError;
use crate::types::{Severity, ValidationResult};

/// Aggregated outcome of evaluating one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Results in stable order (location, then errors first, then rule code).
    pub results: Vec<ValidationResult>,
    /// True iff no result has severity `error`.
    pub passing: bool,
}

/// Builds a [`Report`] from evaluation results.
///
/// Warnings alone never fail a report. Results are sorted by file, line and
/// column; ties put errors before warnings, then order by rule code.
#[must_use]
pub fn summarize(mut results: Vec<ValidationResult>) -> Report {
    results.sort_by(compare_results);
    let passing = !results.iter().any(|r| r.severity == Severity::Error);
    Report { results, passing }
}

fn compare_results(a: &ValidationResult, b: &ValidationResult) -> Ordering {
    a.location
        .file
        .cmp(&b.location.file)
        .then(a.location.line.cmp(&b.location.line))
        .then(a.location.column.cmp(&b.location.column))
        .then(b.severity.cmp(&a.severity))
        .then_with(|| a.code.cmp(&b.code))
        .then_with(|| a.message.cmp(&b.message))
}

impl Report {
    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.passing
    }

    /// Counts results as `(errors, warnings)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        let errors = self
            .results
            .iter()
            .filter(|r| r.severity == Severity::Error)
            .count();
        (errors, self.results.len() - errors)
    }

    /// Returns results filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&ValidationResult> {
        self.results
            .iter()
            .filter(|r| r.severity == severity)
            .collect()
    }
}

/// What happened to one document in a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// The document could not be parsed; no rules ran.
    Malformed {
        /// Document path.
        path: PathBuf,
        /// Why parsing failed.
        error: MalformedDocumentError,
    },
    /// The document was evaluated.
    Checked {
        /// Document path.
        path: PathBuf,
        /// Evaluation report.
        report: Report,
    },
}

impl DocumentOutcome {
    /// Path of the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Malformed { path, .. } | Self::Checked { path, .. } => path,
        }
    }

    /// Returns true if the document parsed and has no errors.
    #[must_use]
    pub fn is_passing(&self) -> bool {
        matches!(self, Self::Checked { report, .. } if report.passing)
    }

    /// The report, when the document parsed.
    #[must_use]
    pub fn report(&self) -> Option<&Report> {
        match self {
            Self::Checked { report, .. } => Some(report),
            Self::Malformed { .. } => None,
        }
    }

    /// One-line status, e.g. `failing (2 errors)`.
    #[must_use]
    pub fn status(&self) -> String {
        match self {
            Self::Malformed { .. } => "malformed".to_string(),
            Self::Checked { report, .. } if report.passing => "passing".to_string(),
            Self::Checked { report, .. } => {
                let (errors, _) = report.count_by_severity();
                format!("failing ({errors} {})", plural(errors, "error"))
            }
        }
    }
}

/// Outcomes for every document in a run, plus rollup counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// One outcome per document, ordered by path.
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    /// Creates a batch from outcomes, ordering them by path.
    #[must_use]
    pub fn new(mut outcomes: Vec<DocumentOutcome>) -> Self {
        outcomes.sort_by(|a, b| a.path().cmp(b.path()));
        Self { outcomes }
    }

    /// Number of documents in the batch.
    #[must_use]
    pub fn documents(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of documents that parsed and have no errors.
    #[must_use]
    pub fn passing(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_passing()).count()
    }

    /// Number of documents that failed to parse.
    #[must_use]
    pub fn malformed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, DocumentOutcome::Malformed { .. }))
            .count()
    }

    /// Number of documents that parsed but have errors.
    #[must_use]
    pub fn failing(&self) -> usize {
        self.documents() - self.passing() - self.malformed()
    }

    /// Totals of `(errors, warnings)` across all parsed documents.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        self.outcomes
            .iter()
            .filter_map(DocumentOutcome::report)
            .map(Report::count_by_severity)
            .fold((0, 0), |(e, w), (de, dw)| (e + de, w + dw))
    }

    /// All results across the batch, in document order.
    pub fn results(&self) -> impl Iterator<Item = &ValidationResult> {
        self.outcomes
            .iter()
            .filter_map(DocumentOutcome::report)
            .flat_map(|r| r.results.iter())
    }

    /// Returns true if every document parsed and passed.
    #[must_use]
    pub fn is_passing(&self) -> bool {
        self.outcomes.iter().all(DocumentOutcome::is_passing)
    }

    /// Process exit code: 0 when every document passes, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.is_passing())
    }

    /// Rollup line, e.g. `3 documents: 1 passing, 1 failing, 1 malformed`.
    #[must_use]
    pub fn summary_line(&self) -> String {
        let documents = self.documents();
        format!(
            "{documents} {}: {} passing, {} failing, {} malformed",
            plural(documents, "document"),
            self.passing(),
            self.failing(),
            self.malformed()
        )
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, Scope};

    fn result(line: usize, severity: Severity, code: &str) -> ValidationResult {
        ValidationResult::new(
            code,
            "rule",
            Scope::Section,
            severity,
            Location::new(PathBuf::from("a.md"), line, 1),
            "msg",
        )
    }

    fn checked(path: &str, results: Vec<ValidationResult>) -> DocumentOutcome {
        DocumentOutcome::Checked {
            path: PathBuf::from(path),
            report: summarize(results),
        }
    }

    #[test]
    fn empty_results_pass() {
        let report = summarize(Vec::new());
        assert!(report.passing);
        assert_eq!(report.count_by_severity(), (0, 0));
    }

    #[test]
    fn warnings_alone_pass() {
        let report = summarize(vec![result(3, Severity::Warning, "DC103")]);
        assert!(report.passing);
        assert!(!report.has_errors());
    }

    #[test]
    fn one_error_fails() {
        let report = summarize(vec![
            result(3, Severity::Warning, "DC103"),
            result(9, Severity::Error, "DC102"),
        ]);
        assert!(!report.passing);
        assert_eq!(report.count_by_severity(), (1, 1));
        assert_eq!(report.by_severity(Severity::Error).len(), 1);
    }

    #[test]
    fn results_sort_by_location_then_severity_then_code() {
        let report = summarize(vec![
            result(9, Severity::Error, "DC102"),
            result(5, Severity::Warning, "DC103"),
            result(5, Severity::Error, "DC102"),
            result(5, Severity::Error, "DC101"),
        ]);
        let order: Vec<(usize, &str)> = report
            .results
            .iter()
            .map(|r| (r.location.line, r.code.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![(5, "DC101"), (5, "DC102"), (5, "DC103"), (9, "DC102")]
        );
    }

    #[test]
    fn summarize_is_order_independent() {
        let a = vec![
            result(1, Severity::Error, "DC1"),
            result(2, Severity::Warning, "DC2"),
        ];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(summarize(a), summarize(b));
    }

    #[test]
    fn batch_rollup_counts() {
        let batch = BatchReport::new(vec![
            checked("c.md", vec![result(1, Severity::Error, "DC1"), result(2, Severity::Error, "DC2")]),
            DocumentOutcome::Malformed {
                path: PathBuf::from("b.md"),
                error: MalformedDocumentError::MissingFrontmatter {
                    path: PathBuf::from("b.md"),
                },
            },
            checked("a.md", vec![result(1, Severity::Warning, "DC3")]),
        ]);

        assert_eq!(batch.outcomes[0].path(), Path::new("a.md"));
        assert_eq!(batch.passing(), 1);
        assert_eq!(batch.failing(), 1);
        assert_eq!(batch.malformed(), 1);
        assert_eq!(batch.count_by_severity(), (2, 1));
        assert_eq!(batch.results().count(), 3);
        assert_eq!(batch.exit_code(), 1);
        assert_eq!(
            batch.summary_line(),
            "3 documents: 1 passing, 1 failing, 1 malformed"
        );
        assert_eq!(batch.outcomes[2].status(), "failing (2 errors)");
        assert_eq!(batch.outcomes[1].status(), "malformed");
    }

    #[test]
    fn passing_batch_exits_zero() {
        let batch = BatchReport::new(vec![checked("a.md", Vec::new())]);
        assert!(batch.is_passing());
        assert_eq!(batch.exit_code(), 0);
        assert_eq!(batch.summary_line(), "1 document: 1 passing, 0 failing, 0 malformed");
    }

    #[test]
    fn malformed_document_fails_batch() {
        let batch = BatchReport::new(vec![DocumentOutcome::Malformed {
            path: PathBuf::from("a.md"),
            error: MalformedDocumentError::MissingFrontmatter {
                path: PathBuf::from("a.md"),
            },
        }]);
        assert_eq!(batch.exit_code(), 1);
    }
}
