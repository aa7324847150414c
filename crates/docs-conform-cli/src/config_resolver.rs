//! Configuration file lookup.
//!
//! Priority order:
//!
//! 1. `--config` flag (used as given, even if missing)
//! 2. `docs-conform.toml` or `.docs-conform.toml` in the checked directory or
//!    the nearest ancestor, stopping at the repository root (a directory
//!    containing `.git`)
//! 3. `$DOCS_CONFORM_CONFIG_DIR/config.toml`, else `~/.docs-conform/config.toml`
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found next to the documents or in an ancestor directory.
    Project(PathBuf),
    /// Found in the per-user config directory.
    Global(PathBuf),
    /// Nothing found; built-in defaults apply.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config came from the per-user directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Project config file names, in order of preference.
const PROJECT_CONFIG_NAMES: &[&str] = &["docs-conform.toml", ".docs-conform.toml"];

/// File name inside the per-user config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Environment variable overriding the per-user config directory.
const CONFIG_DIR_ENV: &str = "DOCS_CONFORM_CONFIG_DIR";

/// Resolves the configuration for documents under `start_dir`.
#[must_use]
pub fn resolve(start_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(start_dir, explicit, global_config_dir())
}

/// Takes the global directory as a parameter so tests need no env vars.
fn resolve_inner(
    start_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = find_project_config(start_dir) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, |candidate| {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        })
}

/// Walks from `start_dir` up to the repository root looking for a config.
fn find_project_config(start_dir: &Path) -> Option<PathBuf> {
    // "." has no ancestors until made absolute
    let start_dir = if start_dir.is_relative() {
        start_dir.canonicalize().unwrap_or_else(|_| start_dir.to_path_buf())
    } else {
        start_dir.to_path_buf()
    };
    for dir in start_dir.ancestors() {
        let found = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file());
        if found.is_some() {
            return found;
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Per-user config directory: `$DOCS_CONFORM_CONFIG_DIR`, else
/// `~/.docs-conform/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".docs-conform"))
}
