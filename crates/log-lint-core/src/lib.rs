//! # log-lint-core
//!
//! Core engine for logging-convention linting.
//!
//! Rules combine two views of a codebase:
//!
//! - structural facts about program elements ([`ProgramElement`], supplied
//!   by a [`FactProvider`]), used to pick which elements a rule applies to
//! - the raw source text of those elements, re-read line by line with a
//!   [`LineScanner`] and sliced into blocks by a [`BlockExtractor`]
//!
//! The [`Analyzer`] runs each [`Rule`] over every element in scope and
//! collects [`Violation`]s; [`Report`] turns the result into per-rule
//! pass/fail outcomes.
//!
//! ## Example
//!
//! ```ignore
//! use log_lint_core::{Analyzer, Report, Severity, Snapshot};
//!
//! let facts = Snapshot::from_file("facts.json".as_ref())?;
//! let analyzer = Analyzer::builder()
//!     .source_root("src/main/java")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze(&facts);
//! Report::new(&result, Severity::Error).check()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod block;
mod config;
mod facts;
mod report;
mod rule;
mod source;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use block::{BlockExtractor, TextBlock};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use facts::{FactProvider, ProgramElement, Snapshot, SnapshotError};
pub use report::{Report, RuleReport, ViolationsFound};
pub use rule::{ElementContext, Rule, RuleBox};
pub use source::{LineScanner, SourceError, SourceFile, SourceLine, SourceLocator};
pub use types::{
    LineRange, LintResult, Location, RuleSummary, Severity, Violation, ViolationDiagnostic,
};
