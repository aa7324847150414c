//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Name of the configuration file written by `init`.
const CONFIG_FILE: &str = "docs-conform.toml";

const DEFAULT_CONFIG: &str = r#"# docs-conform configuration

# Rule preset: "recommended" (default), "strict" or "minimal"
preset = "recommended"

[checker]
# Directory to check when no path is given (default: current directory)
# root = "./docs"

# File extensions treated as documentation pages
extensions = ["md", "mdx"]

# Glob patterns to exclude from checking
exclude = [
    "**/node_modules/**",
]

# Respect .gitignore files
respect_gitignore = true

# Documents checked in parallel (default: available CPUs)
# parallelism = 4

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.heading-length]
enabled = true
# severity = "warning"  # Override default severity
h2_max_words = 3
h3_max_words = 6
deep_max_words = 8

[rules.code-line-numbers]
threshold = 10

# [rules.description-length]
# min_chars = 50
# max_chars = 160

# [rules.empty-section]
# enabled = false
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    let path = write_config(Path::new("."), force)?;

    println!("Created {}", path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: docs-conform check");

    Ok(())
}

/// Writes the starter configuration into `dir`.
fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docs_conform_core::Config;

    #[test]
    fn starter_config_builds_a_registry() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        let registry = docs_conform_rules::registry_from_config(&config).unwrap();
        assert_eq!(registry.len(), 10);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_config(tmp.path(), false).unwrap();
        std::fs::write(&path, "preset = \"minimal\"\n").unwrap();

        assert!(write_config(tmp.path(), false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "preset = \"minimal\"\n");

        write_config(tmp.path(), true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
