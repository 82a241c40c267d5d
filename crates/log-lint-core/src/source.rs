//! Locating and scanning the source text behind a program element.

use crate::facts::ProgramElement;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Errors while reading an element's source text.
///
/// Both variants are recoverable: the engine skips the element for the
/// current rule and carries on with the rest.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The file does not exist or cannot be opened.
    #[error("source unavailable: {path}: {source}")]
    Unavailable {
        /// Path that failed to open.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
    /// The file opened but a line could not be read.
    #[error("failed to read {path} at line {line}: {source}")]
    Read {
        /// Path being read.
        path: PathBuf,
        /// Line number that failed.
        line: usize,
        /// IO error.
        source: std::io::Error,
    },
}

/// Logical view of the file backing a program element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Resolved path.
    pub path: PathBuf,
}

impl SourceFile {
    /// Whether the resolved path is an existing file.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// File name component, e.g. `OrderService.java`.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Opens a fresh line scanner over this file.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Unavailable`] if the file cannot be opened.
    pub fn lines(&self) -> Result<LineScanner, SourceError> {
        LineScanner::open(&self.path)
    }
}

/// Maps element identity to `<root>/<package dirs>/<Name>.<ext>`.
#[derive(Debug, Clone)]
pub struct SourceLocator {
    root: PathBuf,
    extension: String,
}

impl SourceLocator {
    /// Creates a locator rooted at `root` for files with `extension` (without the dot).
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// Source root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Source file extension.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Resolves the source file for an element without touching the filesystem.
    ///
    /// Every `.` in the package becomes a platform directory separator.
    #[must_use]
    pub fn locate(&self, element: &ProgramElement) -> SourceFile {
        let mut path = self.root.clone();
        for segment in element.package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.{}", element.name, self.extension));
        SourceFile { path }
    }
}

/// One line of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-indexed line number.
    pub number: usize,
    /// Line text without the trailing newline.
    pub text: String,
}

/// Forward-only iterator over the lines of a file.
///
/// Bytes that are not valid UTF-8 decode to U+FFFD instead of failing the
/// line. `\n` and `\r\n` terminators are stripped. The file handle is released when the scanner is dropped, whether it was
/// exhausted or abandoned midway. Re-open the path to restart.
#[derive(Debug)]
pub struct LineScanner {
    path: PathBuf,
    reader: BufReader<File>,
    buf: Vec<u8>,
    number: usize,
    failed: bool,
}

impl LineScanner {
    /// Opens `path` for scanning.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Unavailable`] if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|e| SourceError::Unavailable {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            buf: Vec::new(),
            number: 0,
            failed: false,
        })
    }

    /// Path being scanned.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for LineScanner {
    type Item = Result<SourceLine, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.buf.clear();
        let read = self.reader.read_until(b'\n', &mut self.buf);
        self.number += 1;
        match read {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(SourceLine {
                    number: self.number,
                    text: String::from_utf8_lossy(&self.buf).into_owned(),
                }))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(SourceError::Read {
                    path: self.path.clone(),
                    line: self.number,
                    source: e,
                }))
            }
        }
    }
}
