//! Rule engine: fuses structural facts with source-text checks.

use crate::config::Config;
use crate::facts::{FactProvider, ProgramElement};
use crate::rule::{ElementContext, Rule, RuleBox};
use crate::source::SourceLocator;
use crate::types::{LintResult, RuleSummary, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while building an analyzer.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error resolving the source root.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Glob pattern error.
    #[error("Invalid exclude pattern: {0}")]
    Glob(#[from] glob::PatternError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    source_root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    packages: Vec<String>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory holding package-structured sources.
    #[must_use]
    pub fn source_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern over qualified element names.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Restricts analysis to a package and its subpackages.
    #[must_use]
    pub fn package(mut self, prefix: impl Into<String>) -> Self {
        self.packages.push(prefix.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be resolved or an
    /// exclude pattern is invalid.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self
            .source_root
            .unwrap_or_else(|| config.analyzer.source_root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut packages = self.packages;
        packages.extend(config.analyzer.packages.iter().cloned());

        let exclude = self
            .exclude_patterns
            .iter()
            .chain(&config.analyzer.exclude)
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            locator: SourceLocator::new(root, config.analyzer.extension.clone()),
            logger: config.analyzer.logger_field.clone(),
            rules: self.rules,
            packages,
            exclude,
            config,
        })
    }
}

/// Evaluates rules element by element against their located sources.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    locator: SourceLocator,
    logger: String,
    rules: Vec<RuleBox>,
    packages: Vec<String>,
    exclude: Vec<glob::Pattern>,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the source root being analyzed.
    #[must_use]
    pub fn source_root(&self) -> &Path {
        self.locator.root()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Runs every enabled rule over the elements of `facts`.
    ///
    /// Rules run in registration order, elements in qualified-name order, so
    /// repeated runs over an unchanged tree produce identical results. An
    /// element whose source cannot be read is skipped for that rule only.
    #[must_use]
    pub fn analyze(&self, facts: &dyn FactProvider) -> LintResult {
        let mut elements: Vec<&ProgramElement> = facts
            .elements()
            .iter()
            .filter(|e| self.in_scope(e))
            .collect();
        elements.sort_by_cached_key(|e| e.qualified_name());

        info!(
            "Starting analysis of {} elements under {:?}",
            elements.len(),
            self.locator.root()
        );

        let mut result = LintResult::new();
        result.elements_checked = elements.len();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let (violations, summary) = self.run_rule(rule.as_ref(), &elements);
            result.violations.extend(violations);
            result.rules.push(summary);
        }

        info!(
            "Analysis complete: {} violations across {} rules",
            result.violations.len(),
            result.rules.len()
        );

        result
    }

    fn run_rule(
        &self,
        rule: &dyn Rule,
        elements: &[&ProgramElement],
    ) -> (Vec<Violation>, RuleSummary) {
        let mut summary = RuleSummary {
            code: rule.code().to_string(),
            name: rule.name().to_string(),
            rationale: rule.rationale().to_string(),
            ..RuleSummary::default()
        };
        let mut violations = Vec::new();

        for element in elements {
            let ctx = ElementContext::new(element, self.locator.locate(element), &self.logger);
            if !rule.selects(&ctx) {
                continue;
            }
            summary.selected += 1;
            if !ctx.source.exists() {
                warn!(
                    "{}: skipping {}: no source file at {}",
                    rule.name(),
                    element.qualified_name(),
                    ctx.source.path.display()
                );
                summary.skipped.push(element.qualified_name());
                continue;
            }
            debug!("{}: checking {}", rule.name(), ctx.source.path.display());

            match rule.check(&ctx) {
                Ok(found) => violations.extend(self.apply_severity_override(rule.name(), found)),
                Err(e) => {
                    warn!(
                        "{}: skipping {}: {e}",
                        rule.name(),
                        element.qualified_name()
                    );
                    summary.skipped.push(element.qualified_name());
                }
            }
        }

        (violations, summary)
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Checks package scope and exclude patterns.
    fn in_scope(&self, element: &ProgramElement) -> bool {
        let in_package = self.packages.is_empty()
            || self.packages.iter().any(|prefix| {
                element.package == *prefix || element.package.starts_with(&format!("{prefix}."))
            });
        if !in_package {
            return false;
        }

        let name = element.qualified_name();
        if self.exclude.iter().any(|p| p.matches(&name)) {
            debug!("Excluding: {name}");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::Snapshot;
    use crate::source::SourceError;
    use crate::types::{LineRange, Location, Severity};
    use std::fs;
    use tempfile::TempDir;

    /// Flags every line containing `TODO` in elements that have a logger.
    struct TodoRule;

    impl Rule for TodoRule {
        fn name(&self) -> &'static str {
            "todo"
        }
        fn code(&self) -> &'static str {
            "T001"
        }
        fn rationale(&self) -> &'static str {
            "finish it"
        }
        fn selects(&self, ctx: &ElementContext<'_>) -> bool {
            ctx.has_logger()
        }
        fn check(&self, ctx: &ElementContext<'_>) -> Result<Vec<Violation>, SourceError> {
            let mut out = Vec::new();
            for line in ctx.lines()? {
                let line = line?;
                if line.text.contains("TODO") {
                    out.push(Violation::new(
                        self.code(),
                        self.name(),
                        Severity::Error,
                        ctx.element.qualified_name(),
                        Location::new(ctx.source.path.clone(), LineRange::single(line.number)),
                        format!("todo at line {} in {}", line.number, ctx.file_name()),
                    ));
                }
            }
            Ok(out)
        }
    }

    fn write_source(root: &Path, package: &str, name: &str, body: impl AsRef<[u8]>) {
        let dir = package.split('.').fold(root.to_path_buf(), |p, s| p.join(s));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{name}.java")), body).unwrap();
    }

    fn snapshot() -> Snapshot {
        Snapshot::new(vec![
            ProgramElement::new("com.example", "Present").with_field("log"),
            ProgramElement::new("com.example", "Missing").with_field("log"),
            ProgramElement::new("com.example", "Quiet"),
            ProgramElement::new("org.other", "Outside").with_field("log"),
        ])
    }

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        write_source(tmp.path(), "com.example", "Present", "class Present {\n// TODO one\n// TODO two\n}\n");
        write_source(tmp.path(), "com.example", "Quiet", "// TODO never checked\n");
        write_source(tmp.path(), "org.other", "Outside", "// TODO\n");
        tmp
    }

    #[test]
    fn missing_source_is_skipped_without_stopping_siblings() {
        let tmp = fixture();
        let analyzer = Analyzer::builder()
            .source_root(tmp.path())
            .package("com.example")
            .rule(TodoRule)
            .build()
            .unwrap();

        let result = analyzer.analyze(&snapshot());
        assert_eq!(result.elements_checked, 3);
        assert_eq!(result.violations.len(), 2);
        assert_eq!(result.violations[0].location.lines, Some(LineRange::single(2)));
        assert_eq!(result.violations[1].location.lines, Some(LineRange::single(3)));
        assert_eq!(result.rules.len(), 1);
        assert_eq!(result.rules[0].selected, 2);
        assert_eq!(result.rules[0].skipped, vec!["com.example.Missing".to_string()]);
    }

    #[test]
    fn non_utf8_source_is_still_checked() {
        let tmp = TempDir::new().unwrap();
        write_source(
            tmp.path(),
            "com.example",
            "Present",
            b"class Present {\n// TODO one\n// r\xe9sum\xe9\n// TODO two\n}\n".as_slice(),
        );
        let analyzer = Analyzer::builder()
            .source_root(tmp.path())
            .rule(TodoRule)
            .build()
            .unwrap();

        let facts = Snapshot::new(vec![ProgramElement::new("com.example", "Present").with_field("log")]);
        let result = analyzer.analyze(&facts);
        let lines: Vec<_> = result.violations.iter().map(|v| v.location.lines).collect();
        assert_eq!(lines, vec![Some(LineRange::single(2)), Some(LineRange::single(4))]);
        assert!(result.rules[0].skipped.is_empty());
    }

    #[test]
    fn package_scope_respects_segment_boundary() {
        let analyzer = Analyzer::builder()
            .source_root("/tmp")
            .package("com.ex")
            .build()
            .unwrap();
        assert!(!analyzer.in_scope(&ProgramElement::new("com.example", "A")));
        assert!(analyzer.in_scope(&ProgramElement::new("com.ex.sub", "A")));
    }

    #[test]
    fn exclude_glob_drops_elements() {
        let tmp = fixture();
        let analyzer = Analyzer::builder()
            .source_root(tmp.path())
            .exclude("com.example.*")
            .rule(TodoRule)
            .build()
            .unwrap();

        let result = analyzer.analyze(&snapshot());
        assert_eq!(result.elements_checked, 1);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].element, "org.other.Outside");
    }

    #[test]
    fn invalid_exclude_pattern_fails_build() {
        let err = Analyzer::builder().exclude("[").build();
        assert!(matches!(err, Err(AnalyzerError::Glob(_))));
    }

    #[test]
    fn disabled_rule_is_not_run() {
        let tmp = fixture();
        let config = Config::parse("[rules.todo]\nenabled = false\n").unwrap();
        let analyzer = Analyzer::builder()
            .source_root(tmp.path())
            .config(config)
            .rule(TodoRule)
            .build()
            .unwrap();

        let result = analyzer.analyze(&snapshot());
        assert!(result.violations.is_empty());
        assert!(result.rules.is_empty());
    }

    #[test]
    fn severity_override_applies() {
        let tmp = fixture();
        let config = Config::parse("[rules.todo]\nseverity = \"info\"\n").unwrap();
        let analyzer = Analyzer::builder()
            .source_root(tmp.path())
            .config(config)
            .rule(TodoRule)
            .build()
            .unwrap();

        let result = analyzer.analyze(&snapshot());
        assert!(!result.violations.is_empty());
        assert!(result.violations.iter().all(|v| v.severity == Severity::Info));
        assert!(!result.has_errors());
    }

    #[test]
    fn repeated_runs_are_identical() {
        let tmp = fixture();
        let analyzer = Analyzer::builder()
            .source_root(tmp.path())
            .rule(TodoRule)
            .build()
            .unwrap();

        let first = analyzer.analyze(&snapshot());
        let second = analyzer.analyze(&snapshot());
        assert_eq!(first.violations, second.violations);
        assert_eq!(first.rules, second.rules);
    }

    #[test]
    fn config_supplies_source_root_and_logger() {
        let tmp = fixture();
        let config = Config::parse(&format!(
            "[analyzer]\nsource_root = {:?}\nlogger_field = \"LOGGER\"\n",
            tmp.path().display().to_string()
        ))
        .unwrap();
        let analyzer = Analyzer::builder().config(config).rule(TodoRule).build().unwrap();
        assert_eq!(analyzer.source_root(), tmp.path());

        // No element declares `LOGGER`, so nothing is selected.
        let result = analyzer.analyze(&snapshot());
        assert_eq!(result.rules[0].selected, 0);
    }
}
