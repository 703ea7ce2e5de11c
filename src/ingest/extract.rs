//! Language-independent declaration extraction.
//!
//! A [`Grammar`] recognises raw headers (types, methods, constructors) in
//! sanitized text. [`extract_source`] turns those headers into a
//! [`FileSummary`]: it attaches leading attributes, resolves each member to
//! its owning type through an [`OwnershipMap`], and drops matches that are
//! statements or object creations rather than declarations.

use regex::{Captures, Regex};

use super::modifiers::{collect_leading, inside_attribute};
use super::params::split_params;
use super::position::{LineIndex, OwnershipMap};
use super::sanitize::{sanitize, SanitizeRules};
use super::{Constructor, FileSummary, Language, Method, Parameter, TypeDeclaration, TypeKind};
use crate::common::normalize_ws;

/// A type header found in sanitized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHeader {
    /// Byte offset of the first modifier (or the kind keyword)
    pub start: usize,
    pub kind: TypeKind,
    pub name: String,
    pub modifiers: Vec<String>,
    pub type_params: Option<String>,
    pub base_types: Vec<String>,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
    pub permits: Vec<String>,
    /// Raw text between the parentheses of a positional record header
    pub components: Option<String>,
}

/// A method or constructor header found in sanitized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberHeader {
    pub start: usize,
    pub name: String,
    pub modifiers: Vec<String>,
    pub type_params: Option<String>,
    /// `None` for constructors
    pub return_type: Option<String>,
    /// Raw text between the parameter parentheses
    pub params: String,
    pub throws: Vec<String>,
}

/// Words that start statements or expressions. A "method" whose name is one
/// of these, or whose return type contains one, is a call or control-flow
/// construct.
const STATEMENT_WORDS: &[&str] = &[
    "if", "else", "for", "foreach", "while", "do", "switch", "case", "catch", "try", "finally",
    "using", "lock", "fixed", "return", "throw", "new", "await", "yield", "goto", "typeof",
    "sizeof", "nameof", "checked", "unchecked", "synchronized", "assert", "delegate", "class",
    "interface", "struct", "enum", "record", "operator",
];

/// Pattern set for one language front-end.
pub trait Grammar: Send + Sync {
    fn language(&self) -> Language;

    fn sanitize_rules(&self) -> SanitizeRules;

    /// First character of an attribute / annotation line.
    fn attribute_marker(&self) -> char;

    /// Words the method pattern accepts as modifiers.
    fn method_modifiers(&self) -> &'static [&'static str];

    /// The file's namespace / package declaration, if any.
    fn scope(&self, text: &str) -> Option<String>;

    /// Type headers in text order.
    fn type_headers(&self, text: &str) -> Vec<TypeHeader>;

    /// Method headers in text order.
    fn method_headers(&self, text: &str) -> Vec<MemberHeader>;

    /// Constructor-shaped headers in text order.
    fn constructor_headers(&self, text: &str) -> Vec<MemberHeader>;

    /// Parse one raw parameter (already split at top-level commas).
    fn parse_parameter(&self, raw: &str) -> Parameter;

    /// Human-readable prototype:
    /// `modifiers typeparams returnType name(params) [throws ...]`.
    fn prototype(&self, header: &MemberHeader) -> String {
        let mut parts: Vec<String> = Vec::new();
        if !header.modifiers.is_empty() {
            parts.push(header.modifiers.join(" "));
        }
        if let Some(tp) = &header.type_params {
            parts.push(tp.clone());
        }
        if let Some(rt) = &header.return_type {
            parts.push(rt.clone());
        }
        parts.push(format!("{}({})", header.name, normalize_ws(&header.params)));
        if !header.throws.is_empty() {
            parts.push(format!("throws {}", header.throws.join(", ")));
        }
        parts.join(" ")
    }
}

/// Run `grammar` over raw source text.
///
/// Pure function: same input, same output. Never fails; unrecognised text
/// simply produces fewer declarations.
pub fn extract_source(grammar: &dyn Grammar, path: &str, raw: &str) -> FileSummary {
    let sanitized = sanitize(raw, grammar.sanitize_rules());
    let lines = LineIndex::new(&sanitized);
    let marker = grammar.attribute_marker();

    let namespace = grammar.scope(&sanitized);
    let headers = grammar.type_headers(&sanitized);
    let ownership = OwnershipMap::new(headers.iter().map(|h| h.start));

    let mut types: Vec<TypeDeclaration> = headers
        .into_iter()
        .map(|header| build_type(grammar, header, &sanitized, &lines))
        .collect();

    if !ownership.is_empty() {
        for header in grammar.method_headers(&sanitized) {
            if is_statement_like(&header, grammar.method_modifiers()) {
                continue;
            }
            let Some(owner) = ownership.owner_of(header.start) else {
                continue;
            };
            let method = Method {
                prototype: grammar.prototype(&header),
                attributes: collect_leading(&sanitized, header.start, marker),
                parameters: parse_parameters(grammar, &header.params),
                line: lines.line_of(header.start),
                name: header.name,
                modifiers: header.modifiers,
                type_params: header.type_params,
                return_type: header.return_type.unwrap_or_default(),
                throws: header.throws,
            };
            types[owner].methods.push(method);
        }

        for header in grammar.constructor_headers(&sanitized) {
            let Some(owner) = ownership.owner_of(header.start) else {
                continue;
            };
            // A constructor must be named after its owning type
            if header.name != types[owner].name || is_object_creation(&sanitized, header.start) {
                continue;
            }
            let ctor = Constructor {
                prototype: grammar.prototype(&header),
                attributes: collect_leading(&sanitized, header.start, marker),
                parameters: parse_parameters(grammar, &header.params),
                line: lines.line_of(header.start),
                name: header.name,
                modifiers: header.modifiers,
                type_params: header.type_params,
                throws: header.throws,
            };
            types[owner].constructors.push(ctor);
        }
    }

    FileSummary {
        path: path.to_string(),
        language: grammar.language(),
        namespace,
        types,
        error: None,
    }
}

/// Member matches of `re` in `text`, in text order.
///
/// A candidate that starts inside an attribute or annotation (`[HttpGet]`,
/// `@Override`) is discarded and the search resumes one character later, so
/// the declaration that follows on the same line is still found.
pub(crate) fn member_captures<'t>(re: &Regex, text: &'t str) -> Vec<Captures<'t>> {
    let mut found = Vec::new();
    let mut pos = 0;
    while pos <= text.len() {
        let Some(caps) = re.captures_at(text, pos) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };
        if inside_attribute(text, whole.start()) {
            pos = next_boundary(text, whole.start());
            continue;
        }
        pos = if whole.end() > whole.start() {
            whole.end()
        } else {
            next_boundary(text, whole.end())
        };
        found.push(caps);
    }
    found
}

fn next_boundary(text: &str, pos: usize) -> usize {
    let mut next = pos + 1;
    while next < text.len() && !text.is_char_boundary(next) {
        next += 1;
    }
    next
}

fn build_type(
    grammar: &dyn Grammar,
    header: TypeHeader,
    sanitized: &str,
    lines: &LineIndex,
) -> TypeDeclaration {
    let record_components = header
        .components
        .as_deref()
        .map(|c| parse_parameters(grammar, c))
        .unwrap_or_default();

    TypeDeclaration {
        attributes: collect_leading(sanitized, header.start, grammar.attribute_marker()),
        line: lines.line_of(header.start),
        kind: header.kind,
        name: header.name,
        modifiers: header.modifiers,
        type_params: header.type_params,
        base_types: header.base_types,
        extends: header.extends,
        implements: header.implements,
        permits: header.permits,
        record_components,
        methods: Vec::new(),
        constructors: Vec::new(),
    }
}

fn parse_parameters(grammar: &dyn Grammar, block: &str) -> Vec<Parameter> {
    split_params(block)
        .iter()
        .map(|p| grammar.parse_parameter(p))
        .collect()
}

/// Calls, control flow and modifier-only "return types" (`public Foo()` read
/// as return type `public`) are not method declarations.
fn is_statement_like(header: &MemberHeader, method_modifiers: &[&str]) -> bool {
    if STATEMENT_WORDS.contains(&header.name.as_str()) {
        return true;
    }
    let Some(return_type) = &header.return_type else {
        return false;
    };
    let words: Vec<&str> = return_type.split_whitespace().collect();
    words.is_empty()
        || words.iter().any(|w| STATEMENT_WORDS.contains(w))
        || words.iter().all(|w| method_modifiers.contains(w))
}

/// Words that cannot directly precede a constructor name.
const NON_CTOR_PREFIXES: &[&str] = &[
    "new", "return", "throw", "await", "class", "struct", "interface", "enum", "record",
];

/// `new Foo(...)`, `x.Foo(...)` and positional record headers (`record Foo(...)`)
/// look like constructors but are not.
fn is_object_creation(text: &str, start: usize) -> bool {
    let before = text[..start].trim_end();
    if before.ends_with('.') {
        return true;
    }
    let word_start = before
        .char_indices()
        .rev()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
        .map(|(idx, c)| idx + c.len_utf8())
        .unwrap_or(0);
    NON_CTOR_PREFIXES.contains(&&before[word_start..])
}
