//! Structural facts about program elements.
//!
//! Facts describe the *shape* of a class-like unit (which members it declares,
//! which calls it makes) as seen by an analyzer that never re-reads the source
//! text. Rules use them as a cheap structural pre-filter before scanning files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// A class-like unit of a program.
///
/// Immutable once built; owned by a snapshot for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramElement {
    /// Dotted package path (e.g., `com.example.service`). Empty for the default package.
    #[serde(default)]
    pub package: String,
    /// Simple name (e.g., `OrderService`).
    pub name: String,
    /// Declared member names.
    #[serde(default)]
    pub fields: BTreeSet<String>,
    /// Fully-qualified targets of method calls made from this element.
    #[serde(default)]
    pub method_calls: BTreeSet<String>,
    /// Descriptions of constructor calls made from this element.
    #[serde(default)]
    pub constructor_calls: BTreeSet<String>,
}

impl ProgramElement {
    /// Creates an element with no members and no calls.
    #[must_use]
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            fields: BTreeSet::new(),
            method_calls: BTreeSet::new(),
            constructor_calls: BTreeSet::new(),
        }
    }

    /// Adds a declared member.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into());
        self
    }

    /// Adds a method-call target.
    #[must_use]
    pub fn with_method_call(mut self, target: impl Into<String>) -> Self {
        self.method_calls.insert(target.into());
        self
    }

    /// Adds a constructor-call description.
    #[must_use]
    pub fn with_constructor_call(mut self, description: impl Into<String>) -> Self {
        self.constructor_calls.insert(description.into());
        self
    }

    /// Fully-qualified name (`package.Name`, or just `Name` in the default package).
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    /// Whether the element declares the named logging member.
    ///
    /// An absent member is an ordinary `false`.
    #[must_use]
    pub fn has_logging_capability(&self, member: &str) -> bool {
        self.fields.contains(member)
    }

    /// Targets of method calls originating in this element.
    pub fn method_calls(&self) -> impl Iterator<Item = &str> {
        self.method_calls.iter().map(String::as_str)
    }

    /// Descriptions of constructor calls originating in this element.
    pub fn constructor_calls(&self) -> impl Iterator<Item = &str> {
        self.constructor_calls.iter().map(String::as_str)
    }
}

/// A read-only source of program elements.
///
/// Implemented by the JSON [`Snapshot`] and by language frontends that derive
/// facts from source trees.
pub trait FactProvider {
    /// All elements known to this provider.
    fn elements(&self) -> &[ProgramElement];
}

/// Errors when loading a fact snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Failed to read the snapshot file.
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
    /// Snapshot JSON is malformed.
    #[error("invalid snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A serialized set of program elements produced by an external analyzer.
///
/// ```json
/// {
///   "elements": [
///     {
///       "package": "com.example.service",
///       "name": "OrderService",
///       "fields": ["log"],
///       "method_calls": ["java.lang.Throwable.getMessage()"],
///       "constructor_calls": []
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Elements, kept sorted by qualified name.
    #[serde(default)]
    pub elements: Vec<ProgramElement>,
}

impl Snapshot {
    /// Builds a snapshot, sorting elements by qualified name.
    #[must_use]
    pub fn new(mut elements: Vec<ProgramElement>) -> Self {
        elements.sort_by_key(ProgramElement::qualified_name);
        Self { elements }
    }

    /// Loads a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn parse(content: &str) -> Result<Self, SnapshotError> {
        let raw: Self = serde_json::from_str(content)?;
        Ok(Self::new(raw.elements))
    }

    /// Serializes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FactProvider for Snapshot {
    fn elements(&self) -> &[ProgramElement] {
        &self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_name_joins_package() {
        let e = ProgramElement::new("com.example", "Foo");
        assert_eq!(e.qualified_name(), "com.example.Foo");
    }

    #[test]
    fn qualified_name_in_default_package() {
        let e = ProgramElement::new("", "Foo");
        assert_eq!(e.qualified_name(), "Foo");
    }

    #[test]
    fn missing_logger_is_plain_false() {
        let e = ProgramElement::new("com.example", "Foo").with_field("repository");
        assert!(!e.has_logging_capability("log"));
        assert!(e.has_logging_capability("repository"));
    }

    #[test]
    fn parse_snapshot_with_defaults() {
        let json = r#"{"elements":[{"package":"a.b","name":"Z","fields":["log"]},{"name":"A"}]}"#;
        let snapshot = Snapshot::parse(json).expect("parse failed");
        assert_eq!(snapshot.elements.len(), 2);
        // sorted by qualified name: "A" < "a.b.Z"
        assert_eq!(snapshot.elements[0].name, "A");
        assert!(snapshot.elements[1].has_logging_capability("log"));
        assert!(snapshot.elements[1].method_calls.is_empty());
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(matches!(
            Snapshot::parse("{\"elements\": 3}"),
            Err(SnapshotError::Parse(_))
        ));
    }

    #[test]
    fn json_output_parses_back() {
        let snapshot = Snapshot::new(vec![ProgramElement::new("p", "C")
            .with_field("log")
            .with_method_call("e.getMessage()")]);
        let json = snapshot.to_json().expect("serialize failed");
        assert_eq!(Snapshot::parse(&json).expect("parse failed"), snapshot);
    }

    #[test]
    fn from_file_reports_missing_path() {
        let err = Snapshot::from_file(Path::new("/nonexistent/facts.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/facts.json"));
    }
}
