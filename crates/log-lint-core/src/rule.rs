//! Rule trait for defining lint rules.

use crate::facts::ProgramElement;
use crate::source::{LineScanner, SourceError, SourceFile};
use crate::types::{Severity, Violation};

/// Everything a rule sees about one program element.
#[derive(Debug, Clone)]
pub struct ElementContext<'a> {
    /// The element under evaluation.
    pub element: &'a ProgramElement,
    /// The element's located source file.
    pub source: SourceFile,
    /// Name of the member that marks a logging capability (e.g., `log`).
    pub logger: &'a str,
}

impl<'a> ElementContext<'a> {
    /// Creates a new element context.
    #[must_use]
    pub fn new(element: &'a ProgramElement, source: SourceFile, logger: &'a str) -> Self {
        Self {
            element,
            source,
            logger,
        }
    }

    /// Whether the element declares the logging member.
    #[must_use]
    pub fn has_logger(&self) -> bool {
        self.element.has_logging_capability(self.logger)
    }

    /// Opens the element's source for a fresh pass.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Unavailable`] if the file cannot be opened.
    pub fn lines(&self) -> Result<LineScanner, SourceError> {
        self.source.lines()
    }

    /// Source file name as shown in messages, e.g. `OrderService.java`.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.source.file_name()
    }
}

/// A logging-convention rule.
///
/// A rule pairs a structural predicate ([`Rule::selects`]) over the element's
/// facts with a textual condition ([`Rule::check`]) over its source lines.
/// The engine only calls `check` for selected elements.
///
/// # Example
///
/// ```ignore
/// use log_lint_core::{ElementContext, Rule, SourceError, Violation};
///
/// pub struct NoSystemOut;
///
/// impl Rule for NoSystemOut {
///     fn name(&self) -> &'static str { "no-system-out" }
///     fn code(&self) -> &'static str { "LL100" }
///     fn rationale(&self) -> &'static str { "use the logger" }
///
///     fn selects(&self, ctx: &ElementContext) -> bool {
///         ctx.element.method_calls().any(|c| c.contains("println"))
///     }
///
///     fn check(&self, ctx: &ElementContext) -> Result<Vec<Violation>, SourceError> {
///         let mut violations = Vec::new();
///         for line in ctx.lines()? {
///             let line = line?;
///             // ...
///         }
///         Ok(violations)
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "only-message-logged").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "LL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Why the convention matters; shown when the rule fails.
    fn rationale(&self) -> &'static str;

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Structural predicate: should this element be checked at all?
    fn selects(&self, ctx: &ElementContext<'_>) -> bool;

    /// Textual condition: scans the element's source and returns violations.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the source cannot be read; the engine
    /// skips the element for this rule.
    fn check(&self, ctx: &ElementContext<'_>) -> Result<Vec<Violation>, SourceError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
