//! Check command implementation.

use anyhow::{Context, Result};
use log_lint_core::{Analyzer, Config, LintResult, Report, RuleBox, Snapshot};
use log_lint_java::SourceFacts;
use log_lint_rules::{rule_by_name, Preset};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Arguments of the check command.
pub struct CheckArgs<'a> {
    /// Project directory.
    pub path: &'a Path,
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes.
    pub rules: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Snapshot file to read facts from.
    pub snapshot: Option<&'a Path>,
    /// Source root override.
    pub source_root: Option<&'a Path>,
    /// Resolved configuration source.
    pub source: &'a ConfigSource,
}

/// Runs the check command.
pub fn run(args: &CheckArgs<'_>) -> Result<()> {
    let config = args.source.load()?;
    let root = super::source_root(args.path, args.source_root, &config);
    let fail_on = config.fail_on();
    let rules = select_rules(args.rules.as_deref(), &config)?;

    let mut builder = Analyzer::builder().source_root(&root).config(config);
    for pattern in &args.exclude {
        builder = builder.exclude(pattern.clone());
    }
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Checking {:?} with {} rules",
        analyzer.source_root(),
        analyzer.rule_count()
    );

    let result = analyze(&analyzer, &root, args.snapshot)?;

    super::output::print(&result, args.format, fail_on)?;

    if let Err(failure) = Report::new(&result, fail_on).check() {
        tracing::error!("{} rule(s) violated", failure.failed);
        std::process::exit(1);
    }

    Ok(())
}

fn analyze(analyzer: &Analyzer, root: &Path, snapshot: Option<&Path>) -> Result<LintResult> {
    if let Some(file) = snapshot {
        let facts = Snapshot::from_file(file)
            .with_context(|| format!("Failed to load snapshot: {}", file.display()))?;
        return Ok(analyzer.analyze(&facts));
    }

    let facts = SourceFacts::scan(root, &super::extractors())
        .with_context(|| format!("Failed to scan sources under {}", root.display()))?;
    Ok(analyzer.analyze(&facts))
}

/// Rules named by `--rules`, else the configured preset.
fn select_rules(filter: Option<&str>, config: &Config) -> Result<Vec<RuleBox>> {
    if let Some(filter) = filter {
        let rules = filter
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .filter_map(|name| {
                let rule = rule_by_name(name);
                if rule.is_none() {
                    tracing::warn!("Unknown rule: {}", name);
                }
                rule
            })
            .collect();
        return Ok(rules);
    }

    let preset = match config.preset.as_deref() {
        Some(name) => name.parse::<Preset>().map_err(anyhow::Error::msg)?,
        None => Preset::default(),
    };
    Ok(preset.rules())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.code()).collect()
    }

    #[test]
    fn filter_accepts_names_and_codes() {
        let rules = select_rules(Some("LL002, only-message-logged,bogus"), &Config::default())
            .unwrap();
        assert_eq!(names(&rules), vec!["LL002", "LL001"]);
    }

    #[test]
    fn preset_comes_from_config() {
        let config = Config::parse("preset = \"minimal\"\n").unwrap();
        assert_eq!(names(&select_rules(None, &config).unwrap()), vec!["LL001"]);

        let default = select_rules(None, &Config::default()).unwrap();
        assert_eq!(names(&default), vec!["LL001", "LL002", "LL003"]);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let config = Config::parse("preset = \"strict\"\n").unwrap();
        assert!(select_rules(None, &config).is_err());
    }
}
