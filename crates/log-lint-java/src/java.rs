//! Java language extractor using Tree-sitter.
//!
//! Each top-level type becomes one [`ProgramElement`]. Nested and anonymous
//! types are folded into the enclosing top-level element, since they share
//! its source file.

use log_lint_core::ProgramElement;
use tree_sitter::{Language, Node, Parser};

use crate::extractor::{ExtractError, LanguageExtractor};

const TYPE_DECLARATIONS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

/// Lombok annotations that generate a logger field.
const LOMBOK_LOGGERS: &[&str] = &[
    "Slf4j",
    "XSlf4j",
    "Log",
    "Log4j",
    "Log4j2",
    "CommonsLog",
    "JBossLog",
    "Flogger",
    "CustomLog",
];

/// Name of the field Lombok generates.
const LOMBOK_FIELD: &str = "log";

/// Where a call is made from.
struct CallSite<'a> {
    owner: &'a str,
    method: String,
    file_name: &'a str,
}

impl CallSite<'_> {
    fn enter(&self, method: String) -> CallSite<'_> {
        CallSite {
            owner: self.owner,
            method,
            file_name: self.file_name,
        }
    }
}

/// Extracts program elements from Java source.
pub struct JavaExtractor {
    language: Language,
}

impl JavaExtractor {
    /// Creates a new Java extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        node.utf8_text(src).unwrap_or("")
    }

    /// Collapses runs of whitespace so multi-line expressions render on one line.
    fn flat(node: &Node<'_>, src: &[u8]) -> String {
        Self::text(node, src)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn field_text(node: &Node<'_>, field: &str, src: &[u8]) -> String {
        node.child_by_field_name(field)
            .map(|n| Self::flat(&n, src))
            .unwrap_or_default()
    }

    /// One `?` per argument or parameter, comments excluded.
    fn placeholders(list: Option<Node<'_>>) -> String {
        let Some(list) = list else {
            return String::new();
        };
        let mut cursor = list.walk();
        let count = list
            .named_children(&mut cursor)
            .filter(|n| !n.kind().ends_with("comment"))
            .count();
        vec!["?"; count].join(", ")
    }

    fn extract_package(root: &Node<'_>, src: &[u8]) -> String {
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if child.kind() != "package_declaration" {
                continue;
            }
            let mut inner = child.walk();
            for part in child.named_children(&mut inner) {
                if matches!(part.kind(), "scoped_identifier" | "identifier") {
                    return Self::text(&part, src).to_owned();
                }
            }
        }
        String::new()
    }

    fn modifiers<'t>(node: &Node<'t>) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        let found = node
            .named_children(&mut cursor)
            .find(|c| c.kind() == "modifiers");
        found
    }

    fn has_lombok_logger(node: &Node<'_>, src: &[u8]) -> bool {
        let Some(modifiers) = Self::modifiers(node) else {
            return false;
        };
        let mut cursor = modifiers.walk();
        let found = modifiers.named_children(&mut cursor).any(|annotation| {
            matches!(annotation.kind(), "marker_annotation" | "annotation")
                && annotation
                    .child_by_field_name("name")
                    .map(|n| Self::text(&n, src))
                    .and_then(|name| name.rsplit('.').next())
                    .is_some_and(|simple| LOMBOK_LOGGERS.contains(&simple))
        });
        found
    }

    fn is_static(node: &Node<'_>) -> bool {
        let Some(modifiers) = Self::modifiers(node) else {
            return false;
        };
        let mut cursor = modifiers.walk();
        let found = modifiers
            .children(&mut cursor)
            .any(|c| c.kind() == "static");
        found
    }

    /// Adds the names declared by direct member fields of a type body.
    fn collect_fields(body: &Node<'_>, src: &[u8], element: &mut ProgramElement) {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "field_declaration" => {
                    let mut inner = member.walk();
                    for declarator in member.children_by_field_name("declarator", &mut inner) {
                        if let Some(name) = declarator.child_by_field_name("name") {
                            element.fields.insert(Self::text(&name, src).to_owned());
                        }
                    }
                }
                "enum_body_declarations" => Self::collect_fields(&member, src, element),
                _ => {}
            }
        }
    }

    fn render_invocation(node: &Node<'_>, src: &[u8]) -> String {
        let name = Self::field_text(node, "name", src);
        let args = Self::placeholders(node.child_by_field_name("arguments"));
        match node.child_by_field_name("object") {
            Some(object) => format!("{}.{name}({args})", Self::flat(&object, src)),
            None => format!("{name}({args})"),
        }
    }

    fn render_construction(node: &Node<'_>, src: &[u8], site: &CallSite<'_>) -> String {
        let created = node
            .child_by_field_name("type")
            .map(|ty| {
                if ty.kind() == "generic_type" {
                    ty.named_child(0).unwrap_or(ty)
                } else {
                    ty
                }
            })
            .map(|ty| Self::flat(&ty, src))
            .unwrap_or_default();
        let args = Self::placeholders(node.child_by_field_name("arguments"));
        format!(
            "Method <{}.{}> calls constructor <{created}.<init>({args})> in ({}:{})",
            site.owner,
            site.method,
            site.file_name,
            node.start_position().row + 1
        )
    }

    /// Records every call under `node`, tracking the enclosing method.
    fn collect_calls(
        node: Node<'_>,
        src: &[u8],
        site: &CallSite<'_>,
        element: &mut ProgramElement,
    ) {
        let entered = match node.kind() {
            "method_declaration" => {
                let name = Self::field_text(&node, "name", src);
                let params = Self::placeholders(node.child_by_field_name("parameters"));
                Some(site.enter(format!("{name}({params})")))
            }
            "constructor_declaration" | "compact_constructor_declaration" => {
                let params = Self::placeholders(node.child_by_field_name("parameters"));
                Some(site.enter(format!("<init>({params})")))
            }
            "static_initializer" => Some(site.enter("<clinit>()".to_owned())),
            "field_declaration" if Self::is_static(&node) => {
                Some(site.enter("<clinit>()".to_owned()))
            }
            "method_invocation" => {
                element
                    .method_calls
                    .insert(Self::render_invocation(&node, src));
                None
            }
            "object_creation_expression" => {
                element
                    .constructor_calls
                    .insert(Self::render_construction(&node, src, site));
                None
            }
            _ => None,
        };
        let site = entered.as_ref().unwrap_or(site);

        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        for child in children {
            Self::collect_calls(child, src, site, element);
        }
    }

    fn extract_type(
        node: &Node<'_>,
        src: &[u8],
        package: &str,
        file_name: &str,
    ) -> Option<ProgramElement> {
        let name = Self::text(&node.child_by_field_name("name")?, src).to_owned();
        let mut element = ProgramElement::new(package, name);

        if Self::has_lombok_logger(node, src) {
            element.fields.insert(LOMBOK_FIELD.to_owned());
        }

        if let Some(body) = node.child_by_field_name("body") {
            Self::collect_fields(&body, src, &mut element);

            let owner = element.qualified_name();
            let site = CallSite {
                owner: &owner,
                method: "<init>()".to_owned(),
                file_name,
            };
            Self::collect_calls(body, src, &site, &mut element);
        }

        Some(element)
    }

    fn first_error_line(node: Node<'_>) -> Option<usize> {
        if node.is_error() || node.is_missing() {
            return Some(node.start_position().row + 1);
        }
        if !node.has_error() {
            return None;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        children.into_iter().find_map(Self::first_error_line)
    }
}

impl Default for JavaExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for JavaExtractor {
    fn language_id(&self) -> &'static str {
        "java"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["java"]
    }

    fn extract(&self, source: &str, file_name: &str) -> Result<Vec<ProgramElement>, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|source| ExtractError::Language {
                language: self.language_id(),
                source,
            })?;

        let src = source.as_bytes();
        let tree = parser.parse(src, None).ok_or(ExtractError::NoTree)?;
        let root = tree.root_node();

        if let Some(line) = Self::first_error_line(root) {
            return Err(ExtractError::Syntax { line });
        }

        let package = Self::extract_package(&root, src);

        let mut cursor = root.walk();
        let elements = root
            .named_children(&mut cursor)
            .filter(|node| TYPE_DECLARATIONS.contains(&node.kind()))
            .filter_map(|node| Self::extract_type(&node, src, &package, file_name))
            .collect();

        Ok(elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(src: &str) -> Vec<ProgramElement> {
        JavaExtractor::new().extract(src, "Sample.java").unwrap()
    }

    fn single(src: &str) -> ProgramElement {
        let mut elements = extract(src);
        assert_eq!(elements.len(), 1);
        elements.remove(0)
    }

    #[test]
    fn extracts_package_and_name() {
        let e = single("package com.example.order;\n\npublic class OrderService {}\n");
        assert_eq!(e.package, "com.example.order");
        assert_eq!(e.name, "OrderService");
        assert_eq!(e.qualified_name(), "com.example.order.OrderService");
    }

    #[test]
    fn default_package_is_empty() {
        let e = single("class Main {}\n");
        assert_eq!(e.package, "");
    }

    #[test]
    fn extracts_declared_fields() {
        let e = single(
            "package a;\nclass A {\n  private static final Logger log = LoggerFactory.getLogger(A.class);\n  private int x, y;\n}\n",
        );
        let fields: Vec<_> = e.fields.iter().map(String::as_str).collect();
        assert_eq!(fields, vec!["log", "x", "y"]);
    }

    #[test]
    fn lombok_annotation_synthesizes_logger() {
        let e = single("package a;\n@Slf4j\npublic class A {}\n");
        assert!(e.has_logging_capability("log"));

        let qualified = single("package a;\n@lombok.extern.log4j.Log4j2\nclass B {}\n");
        assert!(qualified.has_logging_capability("log"));

        let other = single("package a;\n@Service\nclass C {}\n");
        assert!(!other.has_logging_capability("log"));
    }

    #[test]
    fn renders_method_calls() {
        let e = single(
            r#"package a;
class A {
    void run() {
        try {
            work();
        } catch (Exception ex) {
            log.error("failed", ex);
            log.error(ex.getMessage());
        }
    }
}
"#,
        );
        let calls: Vec<_> = e.method_calls().collect();
        assert_eq!(
            calls,
            vec!["ex.getMessage()", "log.error(?)", "log.error(?, ?)", "work()"]
        );
    }

    #[test]
    fn renders_constructor_calls_with_enclosing_method() {
        let e = single(
            r"package com.example;
class Repo {
    private final List<String> names = new ArrayList<>();

    Repo(int size) {
        cache = new HashMap<String, Object>(size);
    }

    void save(String name, int id) {
        throw new StorageException(name);
    }
}
",
        );
        let calls: Vec<_> = e.constructor_calls().collect();
        assert_eq!(
            calls,
            vec![
                "Method <com.example.Repo.<init>()> calls constructor <ArrayList.<init>()> in (Sample.java:3)",
                "Method <com.example.Repo.<init>(?)> calls constructor <HashMap.<init>(?)> in (Sample.java:6)",
                "Method <com.example.Repo.save(?, ?)> calls constructor <StorageException.<init>(?)> in (Sample.java:10)",
            ]
        );
    }

    #[test]
    fn static_initializers_use_clinit() {
        let e = single(
            "package a;\nclass A {\n  static final Map<String, String> M = new HashMap<>();\n}\n",
        );
        let calls: Vec<_> = e.constructor_calls().collect();
        assert_eq!(
            calls,
            vec!["Method <a.A.<clinit>()> calls constructor <HashMap.<init>()> in (Sample.java:3)"]
        );
    }

    #[test]
    fn nested_types_fold_into_top_level() {
        let e = single(
            r"package a;
class Outer {
    static class Inner {
        void go() { helper.run(); }
    }
}
",
        );
        assert_eq!(e.name, "Outer");
        assert!(e.method_calls.contains("helper.run()"));
    }

    #[test]
    fn multiple_top_level_types() {
        let elements = extract("package a;\nclass A {}\ninterface B {}\nenum C { X; }\n");
        let names: Vec<_> = elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn enum_fields_are_collected() {
        let e = single("package a;\nenum Level { LOW, HIGH; private final Logger log = null; }\n");
        assert!(e.has_logging_capability("log"));
    }

    #[test]
    fn syntax_error_is_reported() {
        let err = JavaExtractor::new()
            .extract("package a;\nclass A {\n  void x( {\n}\n", "A.java")
            .unwrap_err();
        assert!(matches!(err, ExtractError::Syntax { .. }));
    }

    #[test]
    fn empty_source() {
        assert!(extract("").is_empty());
    }
}
