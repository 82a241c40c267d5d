//! Rule reserved for restricting which log levels may be used.
//!
//! Selects every element that declares the logger. The allowed-level policy is
//! not defined yet, so the textual check never reports and does not read the
//! source.

use log_lint_core::{ElementContext, Rule, Severity, SourceError, Violation};

/// Rule code for restricted-log-level.
pub const CODE: &str = "LL003";

/// Rule name for restricted-log-level.
pub const NAME: &str = "restricted-log-level";

/// Placeholder for a log-level policy.
#[derive(Debug, Clone)]
pub struct RestrictedLogLevel {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for RestrictedLogLevel {
    fn default() -> Self {
        Self::new()
    }
}

impl RestrictedLogLevel {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for RestrictedLogLevel {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Restricts the log levels code may use (no levels are restricted yet)"
    }

    fn rationale(&self) -> &'static str {
        "only agreed log levels should be used"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn selects(&self, ctx: &ElementContext<'_>) -> bool {
        ctx.has_logger()
    }

    fn check(&self, _ctx: &ElementContext<'_>) -> Result<Vec<Violation>, SourceError> {
        Ok(Vec::new())
    }
}
