//! Check command implementation.

use anyhow::{bail, Context, Result};
use docs_conform_core::{Checker, Config, RuleConfig};
use docs_conform_rules::{all_rules, registry_from_config};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config_resolver::{self, ConfigSource};
use crate::OutputFormat;

/// Arguments of the check command.
pub struct CheckArgs {
    /// File or directory to check.
    pub path: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes to run.
    pub rules: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Parallel documents.
    pub jobs: Option<usize>,
    /// Explicit configuration file.
    pub config: Option<PathBuf>,
}

/// Runs the check command.
pub fn run(args: &CheckArgs) -> Result<ExitCode> {
    let search_dir = args
        .path
        .as_deref()
        .map_or_else(|| PathBuf::from("."), config_search_dir);
    let source = config_resolver::resolve(&search_dir, args.config.as_deref());
    let mut config = load_config(&source)?;

    if let Some(filter) = &args.rules {
        select_rules(&mut config, filter)?;
    }

    let registry = registry_from_config(&config).context("Failed to build rule registry")?;

    let mut builder = Checker::builder()
        .config(config)
        .registry(registry)
        .excludes(args.exclude.iter().cloned());
    if let Some(path) = &args.path {
        builder = builder.root(path);
    }
    if let Some(jobs) = args.jobs {
        builder = builder.parallelism(jobs);
    }
    let checker = builder.build().context("Failed to set up checker")?;

    tracing::info!(
        "Checking {} with {} rules",
        checker.root().display(),
        checker.registry().len()
    );

    let batch = checker.run().context("Check failed")?;

    super::output::print(&batch, args.format)?;

    Ok(if batch.is_passing() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Directory searched for a project config: the path itself, or the parent
/// of a single file.
fn config_search_dir(path: &Path) -> PathBuf {
    if path.is_file() {
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    } else {
        path.to_path_buf()
    }
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            // Invariant: non-Default variants always have a path
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

/// Disables every rule not named in `filter` (names or codes, comma-separated).
fn select_rules(config: &mut Config, filter: &str) -> Result<()> {
    let known = all_rules();
    let mut selected = Vec::new();

    for wanted in filter.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match known
            .iter()
            .find(|r| r.name() == wanted || r.code().eq_ignore_ascii_case(wanted))
        {
            Some(rule) => selected.push(rule.name()),
            None => bail!("Unknown rule: {wanted} (see `docs-conform list-rules`)"),
        }
    }

    for rule in &known {
        if !selected.contains(&rule.name()) {
            config
                .rules
                .entry(rule.name().to_string())
                .or_insert_with(RuleConfig::default)
                .enabled = Some(false);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_rules_accepts_names_and_codes() {
        let mut config = Config::default();
        select_rules(&mut config, "heading-length, DC201").unwrap();
        assert!(config.is_rule_enabled("heading-length"));
        assert!(config.is_rule_enabled("code-block-language"));
        assert!(!config.is_rule_enabled("empty-section"));
        assert!(!config.is_rule_enabled("title-length"));
    }

    #[test]
    fn select_rules_rejects_unknown_names() {
        let err = select_rules(&mut Config::default(), "no-such-rule").unwrap_err();
        assert!(err.to_string().contains("Unknown rule: no-such-rule"));
    }

    #[test]
    fn config_search_dir_uses_parent_of_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("page.md");
        std::fs::write(&file, "").unwrap();
        assert_eq!(config_search_dir(&file), tmp.path());
        assert_eq!(config_search_dir(tmp.path()), tmp.path());
    }
}
