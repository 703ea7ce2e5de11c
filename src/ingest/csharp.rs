//! C# front-end: patterns for namespaces, types, methods and constructors.
//!
//! Recognition is pattern-based over sanitized text. Generic method type
//! parameters follow the name (`T Get<T>(int id)`), `where` constraints are
//! skipped, and constructors may chain to `base(...)` / `this(...)`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::extract::{member_captures, Grammar, MemberHeader, TypeHeader};
use super::params::{split_clause, strip_default_value};
use super::sanitize::SanitizeRules;
use super::{Language, Parameter, TypeKind};
use crate::common::{normalize_ws, split_words};

static NAMESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*namespace\s+([A-Za-z_][\w.]*)\s*(?:;|\{)").expect("valid namespace pattern")
});

static TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?P<mods>(?:\b(?:public|internal|protected|private|static|abstract|sealed|partial|readonly|ref|unsafe|new|file)\s+)*)",
        r"\b(?P<kind>class|interface|struct|enum|record(?:\s+(?:class|struct))?)\s+",
        r"(?P<name>[A-Za-z_]\w*)",
        r"(?P<tparams>\s*<[^{}();]+?>)?",
        r"(?:\s*\((?P<components>[^)]*)\))?",
        r"(?:\s*:\s*(?P<bases>[^{;]+?))?",
        r"(?:\s+where\s+[^{;]+?)?",
        r"\s*(?P<open>\{|;)",
    ))
    .expect("valid type pattern")
});

static METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?P<mods>(?:\b(?:public|internal|protected|private|static|virtual|abstract|override|sealed|async|extern|unsafe|new|partial|readonly)\s+)*)",
        r"\b(?P<rettype>[A-Za-z_][\w.\[\]<>,? \t]*?)\s+",
        r"(?P<name>[A-Za-z_]\w*)",
        r"(?P<tparams>\s*<[^{}();=]+?>)?",
        r"\s*\((?P<params>(?:[^()]|\([^()]*\))*)\)",
        r"(?:\s*where\s+[^{;=]+?)?",
        r"\s*(?:\{|=>|;)",
    ))
    .expect("valid method pattern")
});

static CTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?P<mods>(?:\b(?:public|internal|protected|private|static|extern|unsafe)\s+)*)",
        r"\b(?P<name>[A-Za-z_]\w*)",
        r"\s*\((?P<params>(?:[^()]|\([^()]*\))*)\)",
        r"(?:\s*:\s*(?:base|this)\s*\((?:[^()]|\([^()]*\))*\))?",
        r"\s*(?:\{|=>|;)",
    ))
    .expect("valid constructor pattern")
});

const METHOD_MODIFIERS: &[&str] = &[
    "public", "internal", "protected", "private", "static", "virtual", "abstract", "override",
    "sealed", "async", "extern", "unsafe", "new", "partial", "readonly",
];

const PARAM_MODIFIERS: &[&str] = &["this", "ref", "out", "in", "params", "scoped", "readonly"];

/// Grammar for `.cs` files.
///
/// Pure function: Input (sanitized text) → Output headers.
/// No filesystem access. No global state besides compiled patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpParser;

impl Grammar for CSharpParser {
    fn language(&self) -> Language {
        Language::CSharp
    }

    fn sanitize_rules(&self) -> SanitizeRules {
        SanitizeRules::CSHARP
    }

    fn attribute_marker(&self) -> char {
        '['
    }

    fn method_modifiers(&self) -> &'static [&'static str] {
        METHOD_MODIFIERS
    }

    fn scope(&self, text: &str) -> Option<String> {
        NAMESPACE_RE
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn type_headers(&self, text: &str) -> Vec<TypeHeader> {
        TYPE_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let components = group(&caps, "components");
                // `record P(int X);` has no body; anything else ending in `;` is not a declaration
                if group(&caps, "open") == Some(";") && components.is_none() {
                    return None;
                }
                let kind_word = group(&caps, "kind")?.split_whitespace().next()?;
                Some(TypeHeader {
                    start: caps.get(0)?.start(),
                    kind: TypeKind::from_keyword(kind_word)?,
                    name: group(&caps, "name")?.to_string(),
                    modifiers: split_words(group(&caps, "mods").unwrap_or_default()),
                    type_params: group(&caps, "tparams").map(normalize_ws),
                    base_types: split_clause(group(&caps, "bases")),
                    extends: Vec::new(),
                    implements: Vec::new(),
                    permits: Vec::new(),
                    components: components.map(str::to_string),
                })
            })
            .collect()
    }

    fn method_headers(&self, text: &str) -> Vec<MemberHeader> {
        member_captures(&METHOD_RE, text)
            .iter()
            .filter_map(|caps| {
                Some(MemberHeader {
                    start: caps.get(0)?.start(),
                    name: group(caps, "name")?.to_string(),
                    modifiers: split_words(group(caps, "mods").unwrap_or_default()),
                    type_params: group(caps, "tparams").map(normalize_ws),
                    return_type: group(caps, "rettype").map(normalize_ws),
                    params: group(caps, "params").unwrap_or_default().to_string(),
                    throws: Vec::new(),
                })
            })
            .collect()
    }

    fn constructor_headers(&self, text: &str) -> Vec<MemberHeader> {
        member_captures(&CTOR_RE, text)
            .iter()
            .filter_map(|caps| {
                Some(MemberHeader {
                    start: caps.get(0)?.start(),
                    name: group(caps, "name")?.to_string(),
                    modifiers: split_words(group(caps, "mods").unwrap_or_default()),
                    type_params: None,
                    return_type: None,
                    params: group(caps, "params").unwrap_or_default().to_string(),
                    throws: Vec::new(),
                })
            })
            .collect()
    }

    fn parse_parameter(&self, raw: &str) -> Parameter {
        let raw = raw.trim();
        let mut param = Parameter::raw_only(raw);

        let (attributes, rest) = take_leading_attributes(raw);
        param.attributes = attributes;

        let mut tokens: Vec<&str> = strip_default_value(rest).split_whitespace().collect();
        while let Some(first) = tokens.first() {
            if !PARAM_MODIFIERS.contains(first) {
                break;
            }
            param.modifiers.push(first.to_string());
            tokens.remove(0);
        }
        param.variadic = param.modifiers.iter().any(|m| m == "params");

        if let Some((name, type_tokens)) = tokens.split_last() {
            param.name = Some(name.to_string());
            if !type_tokens.is_empty() {
                param.type_name = Some(type_tokens.join(" "));
            }
        }
        param
    }

    fn prototype(&self, header: &MemberHeader) -> String {
        let mut parts: Vec<String> = Vec::new();
        if !header.modifiers.is_empty() {
            parts.push(header.modifiers.join(" "));
        }
        if let Some(rt) = &header.return_type {
            parts.push(rt.clone());
        }
        parts.push(format!(
            "{}{}({})",
            header.name,
            header.type_params.as_deref().unwrap_or_default(),
            normalize_ws(&header.params)
        ));
        parts.join(" ")
    }
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> Option<&'t str> {
    caps.name(name).map(|m| m.as_str())
}

/// Split `[Attr] [Other(x)] rest` into its bracketed prefix groups and the rest.
fn take_leading_attributes(text: &str) -> (Vec<String>, &str) {
    let mut attributes = Vec::new();
    let mut rest = text.trim_start();
    while rest.starts_with('[') {
        let mut depth = 0usize;
        let mut close = None;
        for (idx, ch) in rest.char_indices() {
            match ch {
                '[' => depth += 1,
                ']' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(idx);
                        break;
                    }
                }
                _ => {}
            }
        }
        let Some(close) = close else {
            break;
        };
        attributes.push(rest[..=close].to_string());
        rest = rest[close + 1..].trim_start();
    }
    (attributes, rest)
}
