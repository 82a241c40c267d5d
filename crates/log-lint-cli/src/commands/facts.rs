//! Facts command implementation.

use anyhow::{Context, Result};
use log_lint_java::SourceFacts;
use std::path::Path;

use crate::config_resolver::ConfigSource;

/// Runs the facts command, printing the extracted snapshot as JSON.
///
/// The output can be fed back to `check --snapshot`.
pub fn run(path: &Path, source_root: Option<&Path>, source: &ConfigSource) -> Result<()> {
    let config = source.load()?;
    let root = super::source_root(path, source_root, &config);

    let facts = SourceFacts::scan(&root, &super::extractors())
        .with_context(|| format!("Failed to scan sources under {}", root.display()))?;
    if !facts.skipped().is_empty() {
        tracing::warn!("{} file(s) could not be parsed", facts.skipped().len());
    }

    let json = facts
        .into_snapshot()
        .to_json()
        .context("Failed to serialize snapshot")?;
    println!("{json}");

    Ok(())
}
