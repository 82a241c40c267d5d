//! Subcommand implementations.

pub mod check;
pub mod facts;
pub mod init;
pub mod list_rules;
pub mod output;

use log_lint_core::Config;
use log_lint_java::{JavaExtractor, LanguageExtractor};
use std::path::{Path, PathBuf};

/// Source root for a project: the flag, else the configured root, under `project`.
fn source_root(project: &Path, flag: Option<&Path>, config: &Config) -> PathBuf {
    let root = flag.unwrap_or(&config.analyzer.source_root);
    if root.is_absolute() {
        root.to_path_buf()
    } else {
        project.join(root)
    }
}

fn extractors() -> Vec<Box<dyn LanguageExtractor>> {
    vec![Box::new(JavaExtractor::new())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_configured_root() {
        let config = Config::default();
        assert_eq!(
            source_root(Path::new("proj"), None, &config),
            PathBuf::from("proj/src/main/java")
        );
        assert_eq!(
            source_root(Path::new("proj"), Some(Path::new("java")), &config),
            PathBuf::from("proj/java")
        );
        assert_eq!(
            source_root(Path::new("proj"), Some(Path::new("/abs/java")), &config),
            PathBuf::from("/abs/java")
        );
    }
}
