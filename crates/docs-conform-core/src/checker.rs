//! Batch checker: discovers documentation files and checks each one.

use crate::config::Config;
use crate::evaluator::evaluate;
use crate::parser::{parse, MalformedDocumentError};
use crate::registry::RuleRegistry;
use crate::report::{summarize, BatchReport, DocumentOutcome};

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a batch run.
///
/// Malformed documents are not errors here; they become
/// [`DocumentOutcome::Malformed`] entries in the batch.
#[derive(Debug, Error)]
pub enum CheckerError {
    /// The root path does not exist.
    #[error("Path not found: {0}")]
    RootNotFound(PathBuf),

    /// Directory walk error.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// A worker thread panicked.
    #[error("A checker worker thread panicked")]
    WorkerPanicked,
}

/// Parses, evaluates and summarizes one document held in memory.
///
/// This is the whole per-document pipeline. It performs no IO.
#[must_use]
pub fn check_source(path: impl Into<PathBuf>, text: &str, registry: &RuleRegistry) -> DocumentOutcome {
    let path = path.into();
    match parse(path.clone(), text) {
        Ok(document) => {
            let report = summarize(evaluate(&document, registry));
            debug!(
                "{}: {}",
                path.display(),
                if report.passing { "passing" } else { "failing" }
            );
            DocumentOutcome::Checked { path, report }
        }
        Err(error) => {
            warn!("{error}");
            DocumentOutcome::Malformed { path, error }
        }
    }
}

fn check_file(path: &Path, registry: &RuleRegistry) -> DocumentOutcome {
    debug!("Checking: {}", path.display());
    match std::fs::read_to_string(path) {
        Ok(text) => check_source(path, &text, registry),
        Err(source) => {
            let error = MalformedDocumentError::Unreadable {
                path: path.to_path_buf(),
                message: source.to_string(),
            };
            warn!("{error}");
            DocumentOutcome::Malformed {
                path: path.to_path_buf(),
                error,
            }
        }
    }
}

/// Builder for configuring a [`Checker`].
#[derive(Default)]
pub struct CheckerBuilder {
    root: Option<PathBuf>,
    registry: Option<RuleRegistry>,
    exclude_patterns: Vec<String>,
    extensions: Option<Vec<String>>,
    parallelism: Option<usize>,
    config: Option<Config>,
}

impl CheckerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file or directory to check.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the rules to apply.
    #[must_use]
    pub fn registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the file extensions treated as documents (without the dot).
    #[must_use]
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the maximum number of documents checked concurrently.
    #[must_use]
    pub fn parallelism(mut self, jobs: usize) -> Self {
        self.parallelism = Some(jobs);
        self
    }

    /// Sets the configuration (its `[checker]` table supplies defaults).
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the checker.
    ///
    /// # Errors
    ///
    /// Returns an error if the root does not exist or an exclude pattern is
    /// not a valid glob.
    pub fn build(self) -> Result<Checker, CheckerError> {
        let config = self.config.unwrap_or_default();
        let settings = config.checker;

        let root = self.root.unwrap_or(settings.root);
        if !root.exists() {
            return Err(CheckerError::RootNotFound(root));
        }

        // Merge exclude patterns from config
        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(settings.exclude);
        let excludes = exclude_patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let parallelism = self
            .parallelism
            .or(settings.parallelism)
            .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, NonZeroUsize::get))
            .max(1);

        Ok(Checker {
            root,
            registry: self.registry.unwrap_or_else(|| RuleRegistry::builder().build()),
            excludes,
            extensions: self.extensions.unwrap_or(settings.extensions),
            respect_gitignore: settings.respect_gitignore,
            parallelism,
        })
    }
}

/// Checks every documentation file under a root.
///
/// Use [`Checker::builder()`] to construct an instance.
pub struct Checker {
    root: PathBuf,
    registry: RuleRegistry,
    excludes: Vec<glob::Pattern>,
    extensions: Vec<String>,
    respect_gitignore: bool,
    parallelism: usize,
}

impl Checker {
    /// Creates a new builder for configuring a checker.
    #[must_use]
    pub fn builder() -> CheckerBuilder {
        CheckerBuilder::new()
    }

    /// Returns the root being checked.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the rules applied to each document.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Checks all discovered documents.
    ///
    /// Documents are checked concurrently; outcomes are ordered by path so
    /// the report does not depend on scheduling.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails. A document that cannot be read
    /// becomes a malformed outcome instead.
    pub fn run(&self) -> Result<BatchReport, CheckerError> {
        info!("Starting check at {}", self.root.display());

        let files = self.discover_files()?;
        info!(
            "Found {} documents to check with {} rules",
            files.len(),
            self.registry.len()
        );

        let outcomes = self.check_files(&files)?;
        let batch = BatchReport::new(outcomes);
        let (errors, warnings) = batch.count_by_severity();
        info!(
            "Check complete: {}, {} errors, {} warnings",
            batch.summary_line(),
            errors,
            warnings
        );
        Ok(batch)
    }

    fn check_files(&self, files: &[PathBuf]) -> Result<Vec<DocumentOutcome>, CheckerError> {
        let registry = &self.registry;
        let workers = self.parallelism.min(files.len()).max(1);
        if workers == 1 {
            return Ok(files.iter().map(|p| check_file(p, registry)).collect());
        }

        debug!("Checking with {workers} workers");
        let chunk_size = files.len().div_ceil(workers);
        std::thread::scope(|scope| {
            let handles: Vec<_> = files
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|p| check_file(p, registry))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            let mut outcomes = Vec::with_capacity(files.len());
            for handle in handles {
                let chunk = handle.join().map_err(|_| CheckerError::WorkerPanicked)?;
                outcomes.extend(chunk);
            }
            Ok(outcomes)
        })
    }

    /// Discovers documentation files under the root.
    ///
    /// A root that is itself a file is returned as-is, whatever its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory walk fails.
    pub fn discover_files(&self) -> Result<Vec<PathBuf>, CheckerError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || !self.has_document_extension(path) {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn has_document_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Checks if a path matches an exclude pattern, either as given or
    /// relative to the root.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.excludes
            .iter()
            .any(|pattern| pattern.matches_path(path) || pattern.matches_path(relative))
    }
}
