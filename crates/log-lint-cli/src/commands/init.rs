//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::config_resolver::PROJECT_CONFIG_NAMES;

const DEFAULT_CONFIG: &str = r#"# log-lint configuration

# Rule set: "recommended" (all rules) or "minimal" (only-message-logged)
preset = "recommended"

# Lowest severity that fails the check
fail_on = "error"

[analyzer]
# Directory holding package-structured sources
source_root = "src/main/java"
extension = "java"

# Member that marks a class as able to log
logger_field = "log"

# Package prefixes to check (empty: all)
packages = []

# Glob patterns over qualified class names to skip
exclude = [
    "*.generated.*",
]

# Each rule can be enabled/disabled and have its severity overridden

[rules.only-message-logged]
enabled = true
# severity = "warning"

[rules.log-and-rethrow]
enabled = true

[rules.restricted-log-level]
enabled = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_default(Path::new(PROJECT_CONFIG_NAMES[0]), force)?;

    println!("Created {}", PROJECT_CONFIG_NAMES[0]);
    println!("\nNext steps:");
    println!("  1. Edit {} to configure rules", PROJECT_CONFIG_NAMES[0]);
    println!("  2. Run: log-lint check");

    Ok(())
}

fn write_default(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use log_lint_core::Config;
    use tempfile::TempDir;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        assert!(config.is_rule_enabled("log-and-rethrow"));
        assert_eq!(config.analyzer.logger_field, "log");
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("log-lint.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(write_default(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_default(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
