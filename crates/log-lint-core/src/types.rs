//! Core types for lint violations and results.

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!(
                "unknown severity `{other}`. Valid values: error, warning, info"
            )),
        }
    }
}

/// An inclusive range of 1-indexed source lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineRange {
    /// First line of the range.
    pub start: usize,
    /// Last line of the range.
    pub end: usize,
}

impl LineRange {
    /// A range covering one line.
    #[must_use]
    pub fn single(line: usize) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    /// A range from `start` to `end`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns true if the range covers exactly one line.
    #[must_use]
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }
}

impl std::fmt::Display for LineRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Source location of a violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Path of the source file the violation was found in.
    pub file: PathBuf,
    /// Offending lines, when the rule can point at them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<LineRange>,
}

impl Location {
    /// Creates a location covering the given lines.
    #[must_use]
    pub fn new(file: PathBuf, lines: LineRange) -> Self {
        Self {
            file,
            lines: Some(lines),
        }
    }

    /// Creates a location that refers to the whole file.
    #[must_use]
    pub fn file(file: PathBuf) -> Self {
        Self { file, lines: None }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.lines {
            Some(lines) => write!(f, "{}:{lines}", self.file.display()),
            None => write!(f, "{}", self.file.display()),
        }
    }
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "LL001").
    pub code: String,
    /// Rule name (e.g., "only-message-logged").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Qualified name of the offending program element.
    pub element: String,
    /// Where the violation was found.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        element: impl Into<String>,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            element: element.into(),
            location,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.location, self.severity, self.code, self.message
        )
    }
}

/// A violation rendered as a miette diagnostic, with the offending lines
/// highlighted in the source text.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("[{code}] {message}")]
pub struct ViolationDiagnostic {
    code: String,
    message: String,
    #[help]
    help: Option<String>,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("{label}")]
    span: Option<SourceSpan>,
    label: String,
}

impl ViolationDiagnostic {
    /// Builds a diagnostic for `violation` against the file's `content`.
    #[must_use]
    pub fn new(violation: &Violation, content: String, help: Option<String>) -> Self {
        let span = violation
            .location
            .lines
            .and_then(|range| line_span(&content, range));
        Self {
            code: violation.code.clone(),
            message: violation.message.clone(),
            help,
            source_code: NamedSource::new(violation.location.file.display().to_string(), content),
            span,
            label: violation.rule.clone(),
        }
    }
}

/// Byte span from the start of `range.start` to the end of `range.end`.
fn line_span(content: &str, range: LineRange) -> Option<SourceSpan> {
    let mut offset = 0;
    let mut start = None;
    for (i, line) in content.split_inclusive('\n').enumerate() {
        let number = i + 1;
        if number == range.start {
            start = Some(offset);
        }
        offset += line.len();
        if number == range.end {
            let begin = start?;
            let end = offset - usize::from(line.ends_with('\n'));
            return Some(SourceSpan::from((begin, end.saturating_sub(begin))));
        }
    }
    None
}

/// Per-rule bookkeeping from one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSummary {
    /// Rule code.
    pub code: String,
    /// Rule name.
    pub name: String,
    /// Why the rule exists.
    pub rationale: String,
    /// Number of elements that passed the structural predicate.
    pub selected: usize,
    /// Qualified names of selected elements whose source could not be read.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found, grouped by rule in evaluation order.
    pub violations: Vec<Violation>,
    /// One entry per evaluated rule, in evaluation order.
    pub rules: Vec<RuleSummary>,
    /// Number of program elements in scope.
    pub elements_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Returns the violations reported by one rule.
    pub fn violations_for<'a>(&'a self, rule: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.violations.iter().filter(move |v| v.rule == rule)
    }

    /// Counts violations by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |s: Severity| self.violations.iter().filter(|v| v.severity == s).count();
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity) -> Violation {
        Violation::new(
            "LL001",
            "only-message-logged",
            severity,
            "com.example.OrderService",
            Location::new(PathBuf::from("src/main/java/com/example/OrderService.java"), LineRange::single(42)),
            "only pass getMessage as parameter is not allowed at line 42 in OrderService.java",
        )
    }

    #[test]
    fn line_range_display() {
        assert_eq!(LineRange::single(7).to_string(), "7");
        assert_eq!(LineRange::new(3, 9).to_string(), "3-9");
    }

    #[test]
    fn violation_display_includes_location_and_code() {
        let v = make_violation(Severity::Error);
        let display = v.to_string();
        assert!(display.starts_with("src/main/java/com/example/OrderService.java:42: error [LL001]"));
    }

    #[test]
    fn location_without_lines_shows_file_only() {
        let loc = Location::file(PathBuf::from("Foo.java"));
        assert_eq!(loc.to_string(), "Foo.java");
    }

    #[test]
    fn severity_parses_from_config_names() {
        assert_eq!("warning".parse::<Severity>(), Ok(Severity::Warning));
        assert!("critical".parse::<Severity>().is_err());
    }

    #[test]
    fn has_violations_at_threshold() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(Severity::Warning));
        assert!(!result.has_violations_at(Severity::Error));
        assert!(result.has_violations_at(Severity::Warning));
        assert!(!result.has_errors());
    }

    #[test]
    fn count_by_severity_splits_levels() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(Severity::Error));
        result.violations.push(make_violation(Severity::Error));
        result.violations.push(make_violation(Severity::Info));
        assert_eq!(result.count_by_severity(), (2, 0, 1));
    }

    #[test]
    fn line_span_covers_whole_lines() {
        let content = "a\nbb\nccc\n";
        let span = line_span(content, LineRange::new(2, 3)).unwrap();
        assert_eq!(span.offset(), 2);
        assert_eq!(span.len(), 6);
    }

    #[test]
    fn line_span_out_of_range_is_none() {
        assert!(line_span("a\n", LineRange::single(5)).is_none());
    }
}
