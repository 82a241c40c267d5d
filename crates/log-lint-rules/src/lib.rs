//! # log-lint-rules
//!
//! Built-in logging-convention rules for log-lint.
//!
//! Each rule narrows the elements it looks at with a structural predicate
//! over their facts, then scans the located source text.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | LL001 | `only-message-logged` | Forbids `log.error(e.getMessage());` without context |
//! | LL002 | `log-and-rethrow` | Forbids logging and throwing a new exception in one catch block |
//! | LL003 | `restricted-log-level` | Reserved for a log-level policy; never reports |
//!
//! ## Usage
//!
//! ```ignore
//! use log_lint_core::Analyzer;
//! use log_lint_rules::{LogAndRethrow, OnlyMessageLogged};
//!
//! let analyzer = Analyzer::builder()
//!     .source_root("src/main/java")
//!     .rule(OnlyMessageLogged::new())
//!     .rule(LogAndRethrow::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod log_and_rethrow;
pub mod only_message_logged;
pub mod patterns;
mod presets;
pub mod restricted_log_level;

pub use log_and_rethrow::LogAndRethrow;
pub use only_message_logged::OnlyMessageLogged;
pub use presets::{all_rules, minimal_rules, recommended_rules, rule_by_name, Preset};
pub use restricted_log_level::RestrictedLogLevel;

/// Re-export core types for convenience.
pub use log_lint_core::{Rule, Severity, Violation};
