//! Language-agnostic extraction trait and errors.
//!
//! `LanguageExtractor` is the extension point for adding new languages.
//! Implement it to turn a source file into the [`ProgramElement`]s the rule
//! engine filters on.

use log_lint_core::ProgramElement;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while extracting facts from source.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {source}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Underlying error.
        source: tree_sitter::LanguageError,
    },

    /// The parser returned no tree.
    #[error("parser produced no tree")]
    NoTree,

    /// The source does not parse cleanly.
    #[error("syntax error at line {line}")]
    Syntax {
        /// First line with an error node.
        line: usize,
    },

    /// A source file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("failed to walk source tree: {0}")]
    Walk(#[from] ignore::Error),
}

/// Trait for language-specific Tree-sitter extraction.
///
/// The extractor receives raw source text and returns one element per
/// top-level type declared in it.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"java"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Extracts program elements from `source`.
    ///
    /// `file_name` is the bare file name used in call descriptions.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or the source has
    /// syntax errors.
    fn extract(&self, source: &str, file_name: &str) -> Result<Vec<ProgramElement>, ExtractError>;
}
