//! Rule to forbid logging an exception's message and nothing else.
//!
//! # Rationale
//!
//! `log.error(e.getMessage())` drops the stack trace and says nothing about
//! what the code was doing when it failed. The log line should carry context.
//!
//! # Detected Patterns
//!
//! ```text
//! // BAD
//! log.error(e.getMessage());
//!
//! // GOOD
//! log.error("failed to place order {}", orderId, e);
//! log.error("context: " + e.getMessage());
//! ```
//!
//! Only elements that declare the logger and call `getMessage()` somewhere
//! are scanned.

use log_lint_core::{ElementContext, LineRange, Location, Rule, Severity, SourceError, Violation};

use crate::patterns;

/// Rule code for only-message-logged.
pub const CODE: &str = "LL001";

/// Rule name for only-message-logged.
pub const NAME: &str = "only-message-logged";

/// Forbids `log.error(<ex>.getMessage());`.
#[derive(Debug, Clone)]
pub struct OnlyMessageLogged {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for OnlyMessageLogged {
    fn default() -> Self {
        Self::new()
    }
}

impl OnlyMessageLogged {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for OnlyMessageLogged {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids logging only an exception's getMessage() without context"
    }

    fn rationale(&self) -> &'static str {
        "a log message should carry more context than the exception message"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn selects(&self, ctx: &ElementContext<'_>) -> bool {
        ctx.has_logger()
            && ctx
                .element
                .method_calls()
                .any(|target| target.contains(patterns::GET_MESSAGE_CALL))
    }

    fn check(&self, ctx: &ElementContext<'_>) -> Result<Vec<Violation>, SourceError> {
        let pattern = patterns::message_only_error_call(ctx.logger);
        let file_name = ctx.file_name();
        let mut violations = Vec::new();

        for line in ctx.lines()? {
            let line = line?;
            if !pattern.is_match(&line.text) {
                continue;
            }
            violations.push(Violation::new(
                CODE,
                NAME,
                self.severity,
                ctx.element.qualified_name(),
                Location::new(ctx.source.path.clone(), LineRange::single(line.number)),
                format!(
                    "only pass getMessage as parameter is not allowed at line {} in {file_name}",
                    line.number
                ),
            ));
        }

        Ok(violations)
    }
}
