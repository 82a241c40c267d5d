//! Per-rule aggregation of violations into a pass/fail report.

use std::fmt::Write;

use crate::types::{LintResult, RuleSummary, Severity, Violation};

/// Outcome of one rule.
#[derive(Debug, Clone)]
pub struct RuleReport<'a> {
    /// Bookkeeping for the rule.
    pub summary: &'a RuleSummary,
    /// Every violation the rule produced, in discovery order.
    pub violations: Vec<&'a Violation>,
    /// Whether any violation meets the failure threshold.
    pub failed: bool,
}

/// Raised when at least one rule failed.
#[derive(Debug, thiserror::Error)]
#[error("{failed} rule(s) violated\n{report}")]
pub struct ViolationsFound {
    /// Number of failed rules.
    pub failed: usize,
    /// Rendered report.
    pub report: String,
}

/// Groups a [`LintResult`] by rule.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    rules: Vec<RuleReport<'a>>,
}

impl<'a> Report<'a> {
    /// Builds a report, failing rules with violations at or above `fail_on`.
    #[must_use]
    pub fn new(result: &'a LintResult, fail_on: Severity) -> Self {
        let rules = result
            .rules
            .iter()
            .map(|summary| {
                let violations: Vec<&Violation> = result.violations_for(&summary.name).collect();
                let failed = violations.iter().any(|v| v.severity >= fail_on);
                RuleReport {
                    summary,
                    violations,
                    failed,
                }
            })
            .collect();
        Self { rules }
    }

    /// Per-rule outcomes in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[RuleReport<'a>] {
        &self.rules
    }

    /// Returns true if no rule failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.rules.iter().all(|r| !r.failed)
    }

    /// Number of failed rules.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.rules.iter().filter(|r| r.failed).count()
    }

    /// Renders the report as text.
    #[must_use]
    pub fn format(&self) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            let s = rule.summary;
            if rule.violations.is_empty() {
                let _ = writeln!(
                    out,
                    "Rule '{}' [{}]: all {} selected element(s) satisfy the rule",
                    s.name, s.code, s.selected
                );
            } else {
                let _ = writeln!(
                    out,
                    "Rule '{}' [{}] was violated ({} times), because {}:",
                    s.name,
                    s.code,
                    rule.violations.len(),
                    s.rationale
                );
                for v in &rule.violations {
                    let _ = writeln!(out, "  {}", v.message);
                }
            }
            if !s.skipped.is_empty() {
                let _ = writeln!(
                    out,
                    "  skipped (source unreadable): {}",
                    s.skipped.join(", ")
                );
            }
        }
        out
    }

    /// Converts the report into a check result.
    ///
    /// # Errors
    ///
    /// Returns [`ViolationsFound`] if any rule failed.
    pub fn check(&self) -> Result<(), ViolationsFound> {
        if self.is_success() {
            Ok(())
        } else {
            Err(ViolationsFound {
                failed: self.failed_count(),
                report: self.format(),
            })
        }
    }
}
