//! # log-lint-java
//!
//! Tree-sitter based fact extraction for Java sources.
//!
//! This crate lets log-lint run straight from a source tree instead of a
//! snapshot produced by an external analyzer. It reuses `log-lint-core`
//! types (`ProgramElement`, `FactProvider`) and adds:
//!
//! - [`LanguageExtractor`] trait for pluggable language support
//! - [`JavaExtractor`] for Java types, fields, and call sites
//! - [`SourceFacts`], a [`FactProvider`](log_lint_core::FactProvider) built
//!   by walking a source root

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod extractor;
pub mod java;
pub mod scan;

pub use extractor::{ExtractError, LanguageExtractor};
pub use java::JavaExtractor;
pub use scan::SourceFacts;
