//! Lenient XML access shared by the descriptor parsers.
//!
//! Element lookups compare local names only, so `<Project xmlns="...">` and
//! prefixed tags are read the same way as un-namespaced ones.

use once_cell::sync::Lazy;
use regex::Regex;
use roxmltree::{Document, Node, ParsingOptions};

static DEFAULT_XMLNS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\s*xmlns\s*=\s*"[^"]*""#).expect("valid xmlns pattern"));

fn parsing_options() -> ParsingOptions {
    ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    }
}

/// Parse `text` and hand its root element to `read`.
///
/// A document that fails to parse is retried once with every default
/// `xmlns="..."` declaration removed. The error of the retry is returned.
pub fn with_root<T>(
    text: &str,
    read: impl FnOnce(Node<'_, '_>) -> T,
) -> Result<T, roxmltree::Error> {
    let text = text.trim_start_matches('\u{feff}');
    match Document::parse_with_options(text, parsing_options()) {
        Ok(doc) => Ok(read(doc.root_element())),
        Err(first) => {
            tracing::debug!(error = %first, "retrying XML parse without default namespace");
            let stripped = DEFAULT_XMLNS_RE.replace_all(text, "");
            let doc = Document::parse_with_options(&stripped, parsing_options())?;
            Ok(read(doc.root_element()))
        }
    }
}

/// Element children of `node` whose local name is `name`.
pub fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}

/// First element child named `name`.
pub fn child<'a, 'input: 'a>(node: Node<'a, 'input>, name: &'static str) -> Option<Node<'a, 'input>> {
    children(node, name).next()
}

/// Trimmed text of `node`; `None` when empty.
pub fn text_of(node: Node<'_, '_>) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Trimmed text of the first child named `name`.
pub fn child_text(node: Node<'_, '_>, name: &'static str) -> Option<String> {
    child(node, name).and_then(text_of)
}

/// Trimmed, non-empty attribute value.
pub fn attr(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_names_ignore_namespace() {
        let xml = r#"<project xmlns="http://maven.apache.org/POM/4.0.0"><groupId> com.acme </groupId></project>"#;
        let group = with_root(xml, |root| child_text(root, "groupId")).unwrap();
        assert_eq!(group.as_deref(), Some("com.acme"));
    }

    #[test]
    fn test_retry_without_default_namespace() {
        // binding the default namespace to the reserved xmlns URI is rejected
        let xml = r#"<Project xmlns="http://www.w3.org/2000/xmlns/"><PropertyGroup/></Project>"#;
        let count = with_root(xml, |root| children(root, "PropertyGroup").count()).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_unrecoverable_document_is_error() {
        assert!(with_root("<Project><PropertyGroup></Project>", |_| ()).is_err());
        assert!(with_root("", |_| ()).is_err());
    }

    #[test]
    fn test_empty_text_is_none() {
        let xml = "<a><b>   </b><c>x</c></a>";
        let (b, c) = with_root(xml, |root| (child_text(root, "b"), child_text(root, "c"))).unwrap();
        assert_eq!(b, None);
        assert_eq!(c.as_deref(), Some("x"));
    }
}
