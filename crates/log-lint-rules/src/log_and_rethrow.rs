//! Rule to forbid logging an exception and then throwing a new one.
//!
//! # Rationale
//!
//! When a catch block both logs and rethrows, the same failure is reported
//! once here and again by whoever handles the new exception. Either handle
//! the error (and log it) or propagate it.
//!
//! # Detected Patterns
//!
//! ```text
//! // BAD
//! } catch (IOException e) {
//!     log.error("write failed", e);
//!     throw new StorageException(e);
//! }
//!
//! // GOOD
//! } catch (IOException e) {
//!     throw new StorageException("write failed", e);
//! }
//! ```
//!
//! Only elements that declare the logger and construct an exception-named type
//! are scanned. Catch bodies are found by brace counting from the catch
//! header, including bodies written on the header line itself.

use log_lint_core::{
    BlockExtractor, ElementContext, LineRange, Location, Rule, Severity, SourceError, Violation,
};

use crate::patterns;
use tracing::debug;

/// Rule code for log-and-rethrow.
pub const CODE: &str = "LL002";

/// Rule name for log-and-rethrow.
pub const NAME: &str = "log-and-rethrow";

/// Forbids catch blocks that both log and throw a new exception.
#[derive(Debug, Clone)]
pub struct LogAndRethrow {
    /// Custom severity.
    pub severity: Severity,
    catch_blocks: BlockExtractor,
}

impl Default for LogAndRethrow {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAndRethrow {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
            catch_blocks: BlockExtractor::new(patterns::compile(patterns::CATCH_CLAUSE)),
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for LogAndRethrow {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids logging an exception and throwing a new one in the same catch block"
    }

    fn rationale(&self) -> &'static str {
        "an exception should be either logged or rethrown, not both"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn selects(&self, ctx: &ElementContext<'_>) -> bool {
        ctx.has_logger()
            && ctx
                .element
                .constructor_calls()
                .any(patterns::constructs_exception)
    }

    fn check(&self, ctx: &ElementContext<'_>) -> Result<Vec<Violation>, SourceError> {
        let logger_call = patterns::logger_call(ctx.logger);
        let needles = [patterns::THROW_NEW, logger_call.as_str()];
        let file_name = ctx.file_name();

        let blocks = self.catch_blocks.extract(ctx.lines()?)?;
        debug!("{NAME}: {} catch block(s) in {file_name}", blocks.len());

        let violations = blocks
            .into_iter()
            .filter(|block| block.contains_all(&needles))
            .map(|block| {
                // A body closed on its header line yields end < start.
                let end = block.end_line.max(block.start_line);
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.element.qualified_name(),
                    Location::new(
                        ctx.source.path.clone(),
                        LineRange::new(block.start_line, end),
                    ),
                    format!(
                        "print log and throw exception at once is not allowed from line {} to line {} in {file_name}",
                        block.start_line, end
                    ),
                )
            })
            .collect();

        Ok(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log_lint_core::{ProgramElement, SourceLocator};
    use std::fs;
    use tempfile::TempDir;

    const CREATES_EXCEPTION: &str = "Method <com.example.Repo.save()> calls constructor <com.example.StorageException.<init>(java.lang.Throwable)> in (Repo.java:9)";

    fn element() -> ProgramElement {
        ProgramElement::new("com.example", "Repo")
            .with_field("log")
            .with_constructor_call(CREATES_EXCEPTION)
    }

    fn check_code(element: &ProgramElement, code: &str) -> (bool, Vec<Violation>) {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("com").join("example");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.java", element.name)), code).unwrap();

        let source = SourceLocator::new(tmp.path(), "java").locate(element);
        let ctx = ElementContext::new(element, source, "log");
        let rule = LogAndRethrow::new();
        (rule.selects(&ctx), rule.check(&ctx).unwrap())
    }

    #[test]
    fn test_detects_log_then_throw() {
        let (selected, violations) = check_code(
            &element(),
            r#"class Repo {
    void save() {
        try {
            write();
        } catch (IOException e) {
            log.error("write failed", e);
            throw new StorageException(e);
        }
    }
}
"#,
        );
        assert!(selected);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.lines, Some(LineRange::new(6, 7)));
        assert_eq!(
            violations[0].message,
            "print log and throw exception at once is not allowed from line 6 to line 7 in Repo.java"
        );
    }

    #[test]
    fn test_allows_throw_only() {
        let (_, violations) = check_code(
            &element(),
            r"class Repo {
    void save() {
        try {
            write();
        } catch (IOException e) {
            throw new StorageException(e);
        }
    }
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_allows_log_only() {
        let (_, violations) = check_code(
            &element(),
            r#"class Repo {
    void save() {
        try {
            write();
        } catch (IOException e) {
            log.error("write failed", e);
        }
        throw new StorageException("later");
    }
}
"#,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_checks_each_catch_separately() {
        let (_, violations) = check_code(
            &element(),
            r#"class Repo {
    void save() {
        try {
            write();
        } catch (IOException e) {
            log.warn("retrying", e);
        } catch (RuntimeException e) {
            throw new StorageException(e);
        }
    }
}
"#,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_nested_braces_stay_in_block() {
        let (_, violations) = check_code(
            &element(),
            r#"class Repo {
    void save() {
        try {
            write();
        } catch (IOException e) {
            if (retry) {
                log.info("giving up");
            }
            throw new StorageException(e);
        }
    }
}
"#,
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.lines, Some(LineRange::new(6, 9)));
    }

    #[test]
    fn test_detects_single_line_catch() {
        let (selected, violations) = check_code(
            &element(),
            r#"class Repo {
    void save() {
        try { write(); } catch (IOException e) { log.error("x", e); throw new StorageException(e); }
    }
}
"#,
        );
        assert!(selected);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.lines, Some(LineRange::new(4, 4)));
        assert_eq!(
            violations[0].message,
            "print log and throw exception at once is not allowed from line 4 to line 4 in Repo.java"
        );
    }

    #[test]
    fn test_single_line_catch_that_only_throws() {
        let (_, violations) = check_code(
            &element(),
            r#"class Repo {
    void save() {
        log.info("saving");
        try { write(); } catch (IOException e) { throw new StorageException(e); }
    }
}
"#,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_not_selected_without_exception_construction() {
        let plain = ProgramElement::new("com.example", "Repo").with_field("log");
        let (selected, _) = check_code(&plain, "");
        assert!(!selected);
    }

    #[test]
    fn test_not_selected_without_logger() {
        let silent =
            ProgramElement::new("com.example", "Repo").with_constructor_call(CREATES_EXCEPTION);
        let (selected, _) = check_code(&silent, "");
        assert!(!selected);
    }
}
