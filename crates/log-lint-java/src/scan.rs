//! Source-tree scanning into a fact provider.

use log_lint_core::{FactProvider, ProgramElement, Snapshot};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::extractor::{ExtractError, LanguageExtractor};

/// Facts derived directly from a source tree.
#[derive(Debug, Default)]
pub struct SourceFacts {
    elements: Vec<ProgramElement>,
    skipped: Vec<PathBuf>,
}

impl SourceFacts {
    /// Walks `root` and extracts elements from every file an extractor handles.
    ///
    /// Files that cannot be read or parsed are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory walk itself fails, e.g. when `root`
    /// does not exist.
    pub fn scan(
        root: &Path,
        extractors: &[Box<dyn LanguageExtractor>],
    ) -> Result<Self, ExtractError> {
        let files = discover_files(root, extractors)?;
        info!("Extracting facts from {} files under {:?}", files.len(), root);

        let mut facts = Self::default();
        for path in files {
            let Some(extractor) = extractor_for(&path, extractors) else {
                continue;
            };
            match extract_file(&path, extractor) {
                Ok(elements) => {
                    debug!("{}: {} element(s)", path.display(), elements.len());
                    facts.elements.extend(elements);
                }
                Err(e) => {
                    warn!("Skipping {}: {e}", path.display());
                    facts.skipped.push(path);
                }
            }
        }

        Ok(facts)
    }

    /// Files that could not be read or parsed.
    #[must_use]
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }

    /// Converts the facts into a serializable snapshot.
    #[must_use]
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot::new(self.elements)
    }
}

impl FactProvider for SourceFacts {
    fn elements(&self) -> &[ProgramElement] {
        &self.elements
    }
}

fn extractor_for<'a>(
    path: &Path,
    extractors: &'a [Box<dyn LanguageExtractor>],
) -> Option<&'a dyn LanguageExtractor> {
    let ext = path.extension().and_then(|e| e.to_str())?;
    extractors
        .iter()
        .find(|e| e.extensions().contains(&ext))
        .map(|e| &**e)
}

fn extract_file(
    path: &Path,
    extractor: &dyn LanguageExtractor,
) -> Result<Vec<ProgramElement>, ExtractError> {
    let bytes = std::fs::read(path).map_err(|e| ExtractError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let source = String::from_utf8_lossy(&bytes);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    extractor.extract(&source, &file_name)
}

fn discover_files(
    root: &Path,
    extractors: &[Box<dyn LanguageExtractor>],
) -> Result<Vec<PathBuf>, ExtractError> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(true)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        if extractor_for(path, extractors).is_some() {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}
