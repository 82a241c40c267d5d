//! Textual patterns the rules match against.
//!
//! Everything the rules know about source syntax lives here, so a stricter
//! matcher can replace these without touching the rule logic.

use regex::Regex;
use std::sync::OnceLock;

/// Substring of a method-call target that reads an exception's message.
pub const GET_MESSAGE_CALL: &str = "getMessage()";

/// Constructor-call description of creating an exception-named type.
pub const EXCEPTION_CONSTRUCTION: &str = r"Method.+calls constructor.+Exception\.<init>";

/// Opening of a catch clause for an exception-named type.
pub const CATCH_CLAUSE: &str = r"catch\s*\([A-Za-z]*Exception";

/// Substring marking a newly constructed exception being thrown.
pub const THROW_NEW: &str = "throw new";

/// Matches `<logger>.error(<identifier>.getMessage());`.
#[must_use]
pub fn message_only_error_call(logger: &str) -> Regex {
    compile(&format!(
        r"{}\.error\([A-Za-z0-9]+\.getMessage\(\)\);",
        regex::escape(logger)
    ))
}

/// Substring marking any call on the logger.
#[must_use]
pub fn logger_call(logger: &str) -> String {
    format!("{logger}.")
}

/// Whether a constructor-call description creates an exception.
#[must_use]
pub fn constructs_exception(description: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(EXCEPTION_CONSTRUCTION))
        .is_match(description)
}

/// Compiles a pattern built from constants and escaped input.
#[allow(clippy::expect_used)]
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern is valid")
}
