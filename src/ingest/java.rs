//! Java front-end: patterns for packages, types, methods and constructors.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::extract::{member_captures, Grammar, MemberHeader, TypeHeader};
use super::params::split_clause;
use super::sanitize::SanitizeRules;
use super::{Language, Parameter, TypeKind};
use crate::common::{normalize_ws, split_words};

static PACKAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*package\s+([A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*)\s*;")
        .expect("valid package pattern")
});

static TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?P<mods>(?:\b(?:public|protected|private|abstract|final|static|sealed|non-sealed|strictfp)\s+)*)",
        r"(?P<kind>@interface|\b(?:interface|enum|record|class))\s+",
        r"(?P<name>[A-Za-z_]\w*)",
        r"(?P<tparams>\s*<[^{}();]+?>)?",
        r"(?:\s*\((?P<components>[^)]*)\))?",
        r"(?:\s+extends\s+(?P<extends>[^{;]+?))?",
        r"(?:\s+implements\s+(?P<implements>[^{;]+?))?",
        r"(?:\s+permits\s+(?P<permits>[^{;]+?))?",
        r"\s*\{",
    ))
    .expect("valid type pattern")
});

static METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?P<mods>(?:\b(?:public|protected|private|static|abstract|final|synchronized|native|strictfp|default)\s+)*)",
        r"(?P<tparams><[^{}();=]+?>\s*)?",
        r"\b(?P<rettype>[A-Za-z_][\w.\[\]<>?,& \t]*?)\s+",
        r"(?P<name>[A-Za-z_]\w*)",
        r"\s*\((?P<params>(?:[^()]|\([^()]*\))*)\)",
        r"(?:\s*throws\s+(?P<throws>[^;{]+?))?",
        r"\s*(?:\{|;)",
    ))
    .expect("valid method pattern")
});

static CTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?P<mods>(?:\b(?:public|protected|private)\s+)*)",
        r"(?P<tparams><[^{}();=]+?>\s*)?",
        r"\b(?P<name>[A-Za-z_]\w*)",
        r"\s*\((?P<params>(?:[^()]|\([^()]*\))*)\)",
        r"(?:\s*throws\s+(?P<throws>[^;{]+?))?",
        r"\s*\{",
    ))
    .expect("valid constructor pattern")
});

static ANNOTATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@[A-Za-z_][\w.]*(?:\s*\((?:[^()]|\([^()]*\))*\))?").expect("valid annotation pattern")
});

const METHOD_MODIFIERS: &[&str] = &[
    "public", "protected", "private", "static", "abstract", "final", "synchronized", "native",
    "strictfp", "default",
];

/// Grammar for `.java` files.
///
/// Pure function: Input (sanitized text) → Output headers.
/// No filesystem access.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaParser;

impl Grammar for JavaParser {
    fn language(&self) -> Language {
        Language::Java
    }

    fn sanitize_rules(&self) -> SanitizeRules {
        SanitizeRules::JAVA
    }

    fn attribute_marker(&self) -> char {
        '@'
    }

    fn method_modifiers(&self) -> &'static [&'static str] {
        METHOD_MODIFIERS
    }

    fn scope(&self, text: &str) -> Option<String> {
        PACKAGE_RE
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn type_headers(&self, text: &str) -> Vec<TypeHeader> {
        TYPE_RE
            .captures_iter(text)
            .filter_map(|caps| {
                Some(TypeHeader {
                    start: caps.get(0)?.start(),
                    kind: TypeKind::from_keyword(group(&caps, "kind")?)?,
                    name: group(&caps, "name")?.to_string(),
                    modifiers: split_words(group(&caps, "mods").unwrap_or_default()),
                    type_params: group(&caps, "tparams").map(normalize_ws),
                    base_types: Vec::new(),
                    extends: split_clause(group(&caps, "extends")),
                    implements: split_clause(group(&caps, "implements")),
                    permits: split_clause(group(&caps, "permits")),
                    components: group(&caps, "components").map(str::to_string),
                })
            })
            .collect()
    }

    fn method_headers(&self, text: &str) -> Vec<MemberHeader> {
        member_captures(&METHOD_RE, text)
            .iter()
            .filter_map(|caps| member_header(caps, true))
            .collect()
    }

    fn constructor_headers(&self, text: &str) -> Vec<MemberHeader> {
        member_captures(&CTOR_RE, text)
            .iter()
            .filter_map(|caps| member_header(caps, false))
            .collect()
    }

    fn parse_parameter(&self, raw: &str) -> Parameter {
        let raw = raw.trim();
        let mut param = Parameter::raw_only(raw);

        param.attributes = ANNOTATION_RE
            .find_iter(raw)
            .map(|m| normalize_ws(m.as_str()))
            .collect();
        let rest = ANNOTATION_RE.replace_all(raw, " ");

        let mut tokens: Vec<String> = Vec::new();
        for token in rest.split_whitespace() {
            if token == "final" {
                param.modifiers.push(token.to_string());
            } else {
                tokens.push(token.to_string());
            }
        }

        // `String...args` written without a space
        if tokens.len() == 1 {
            if let Some((ty, name)) = tokens[0].clone().split_once("...") {
                tokens = vec![format!("{ty}..."), name.to_string()];
            }
        }

        let Some(mut name) = tokens.pop() else {
            return param;
        };
        if let Some(stripped) = name.strip_prefix("...") {
            name = stripped.to_string();
            if let Some(last) = tokens.last_mut() {
                last.push_str("...");
            }
        }
        param.name = Some(name);

        if !tokens.is_empty() {
            let mut type_name = tokens.join(" ");
            if let Some(element) = type_name.strip_suffix("...") {
                param.variadic = true;
                type_name = format!("{}[]", element.trim_end());
            }
            param.type_name = Some(type_name);
        }
        param
    }
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> Option<&'t str> {
    caps.name(name).map(|m| m.as_str())
}

fn member_header(caps: &Captures<'_>, with_return: bool) -> Option<MemberHeader> {
    Some(MemberHeader {
        start: caps.get(0)?.start(),
        name: group(caps, "name")?.to_string(),
        modifiers: split_words(group(caps, "mods").unwrap_or_default()),
        type_params: group(caps, "tparams").map(normalize_ws),
        return_type: if with_return {
            group(caps, "rettype").map(normalize_ws)
        } else {
            None
        },
        params: group(caps, "params").unwrap_or_default().to_string(),
        throws: split_clause(group(caps, "throws")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{extract_source, FileSummary};

    const REPOSITORY: &str = r#"package com.acme.store;

import java.util.List;

/**
 * class Ghost {}
 */
@Repository
@Transactional(readOnly = true)
public abstract class UserRepository<T extends Entity<T>> extends BaseRepository<T, Long> implements Closeable, Iterable<T> {

    private static final String QUERY = "select u from User u where u.id = :id";

    @Inject
    public UserRepository(DataSource source, @Named("cache") Cache cache) throws IOException {
        super(source);
        this.cache = new Cache(source);
    }

    @Override
    public List<T> findAll() {
        if (cache.isEmpty()) {
            return load(QUERY);
        }
        return cache.values();
    }

    public <R> R map(final Function<T, R> fn, String... keys) throws IOException, SQLException {
        return fn.apply(find(keys[0]));
    }

    @Override public void close() { }

    protected abstract T find(String key);

    static class Cache {
        Cache(DataSource source) { }

        void clear() { }
    }
}

public sealed interface Shape permits Circle, Square {
    default double area() { return 0.0; }
}

public record Point(int x, int y) implements Shape { }

public @interface Audited {
    String value();
}

enum Color { RED, GREEN }
"#;

    fn parse(source: &str) -> FileSummary {
        extract_source(&JavaParser, "UserRepository.java", source)
    }

    fn method_names(summary: &FileSummary, type_name: &str) -> Vec<String> {
        summary
            .types
            .iter()
            .find(|t| t.name == type_name)
            .map(|t| t.methods.iter().map(|m| m.name.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_package_and_types() {
        let summary = parse(REPOSITORY);
        assert_eq!(summary.namespace.as_deref(), Some("com.acme.store"));
        let kinds: Vec<(TypeKind, &str)> = summary
            .types
            .iter()
            .map(|t| (t.kind, t.name.as_str()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (TypeKind::Class, "UserRepository"),
                (TypeKind::Class, "Cache"),
                (TypeKind::Interface, "Shape"),
                (TypeKind::Record, "Point"),
                (TypeKind::AnnotationType, "Audited"),
                (TypeKind::Enum, "Color"),
            ]
        );
    }

    #[test]
    fn test_type_clauses() {
        let summary = parse(REPOSITORY);
        let repo = &summary.types[0];
        assert_eq!(repo.modifiers, vec!["public", "abstract"]);
        assert_eq!(repo.type_params.as_deref(), Some("<T extends Entity<T>>"));
        assert_eq!(repo.extends, vec!["BaseRepository<T, Long>"]);
        assert_eq!(repo.implements, vec!["Closeable", "Iterable<T>"]);
        assert_eq!(repo.attributes[0], "@Repository");
        assert!(repo.attributes[1].starts_with("@Transactional("));

        let shape = &summary.types[2];
        assert_eq!(shape.modifiers, vec!["public", "sealed"]);
        assert_eq!(shape.permits, vec!["Circle", "Square"]);

        let point = &summary.types[3];
        assert_eq!(point.implements, vec!["Shape"]);
        assert_eq!(point.record_components.len(), 2);
        assert_eq!(point.record_components[1].type_name.as_deref(), Some("int"));
        assert_eq!(point.record_components[1].name.as_deref(), Some("y"));
    }

    #[test]
    fn test_methods_and_statement_rejection() {
        let summary = parse(REPOSITORY);
        assert_eq!(
            method_names(&summary, "UserRepository"),
            vec!["findAll", "map", "close", "find"]
        );
        assert_eq!(method_names(&summary, "Shape"), vec!["area"]);
        assert_eq!(method_names(&summary, "Audited"), vec!["value"]);
    }

    #[test]
    fn test_method_details() {
        let summary = parse(REPOSITORY);
        let repo = &summary.types[0];

        let find_all = &repo.methods[0];
        assert_eq!(find_all.return_type, "List<T>");
        assert_eq!(find_all.attributes, vec!["@Override"]);
        assert_eq!(find_all.prototype, "public List<T> findAll()");

        let map = &repo.methods[1];
        assert_eq!(map.type_params.as_deref(), Some("<R>"));
        assert_eq!(map.return_type, "R");
        assert_eq!(map.throws, vec!["IOException", "SQLException"]);
        assert_eq!(map.parameters[0].modifiers, vec!["final"]);
        assert_eq!(map.parameters[0].type_name.as_deref(), Some("Function<T, R>"));
        assert!(map.parameters[1].variadic);
        assert_eq!(map.parameters[1].type_name.as_deref(), Some("String[]"));
        assert_eq!(
            map.prototype,
            "public <R> R map(final Function<T, R> fn, String... keys) throws IOException, SQLException"
        );

        let find = &repo.methods[3];
        assert_eq!(find.modifiers, vec!["protected", "abstract"]);
        assert_eq!(find.return_type, "T");
    }

    #[test]
    fn test_constructors() {
        let summary = parse(REPOSITORY);
        let repo = &summary.types[0];
        assert_eq!(repo.constructors.len(), 1);
        let ctor = &repo.constructors[0];
        assert_eq!(ctor.attributes, vec!["@Inject"]);
        assert_eq!(ctor.throws, vec!["IOException"]);
        assert_eq!(ctor.parameters.len(), 2);
        assert_eq!(ctor.parameters[1].type_name.as_deref(), Some("Cache"));
        assert_eq!(ctor.parameters[1].attributes.len(), 1);

        // Nested type is a sibling: its constructor lands on Cache
        let cache = &summary.types[1];
        assert_eq!(cache.constructors.len(), 1);
        assert!(cache.constructors[0].modifiers.is_empty());
        assert_eq!(method_names(&summary, "Cache"), vec!["clear"]);
    }

    #[test]
    fn test_annotation_on_same_line_is_skipped() {
        let summary = parse(REPOSITORY);
        let close = &summary.types[0].methods[2];
        assert_eq!(close.name, "close");
        assert_eq!(close.modifiers, vec!["public"]);
        assert_eq!(close.return_type, "void");
    }

    #[test]
    fn test_no_package_is_default_scope() {
        let summary = parse("class A { void run() { } }");
        assert_eq!(summary.namespace, None);
        assert_eq!(summary.scope_key(), "(default)");
        assert_eq!(method_names(&summary, "A"), vec!["run"]);
    }

    #[test]
    fn test_parse_parameter_variants() {
        let p = JavaParser.parse_parameter("@NotNull final Map<String, List<Integer>> index");
        assert_eq!(p.attributes, vec!["@NotNull"]);
        assert_eq!(p.modifiers, vec!["final"]);
        assert_eq!(p.type_name.as_deref(), Some("Map<String, List<Integer>>"));
        assert_eq!(p.name.as_deref(), Some("index"));

        let p = JavaParser.parse_parameter("Object ...args");
        assert!(p.variadic);
        assert_eq!(p.type_name.as_deref(), Some("Object[]"));
        assert_eq!(p.name.as_deref(), Some("args"));

        let p = JavaParser.parse_parameter("int...xs");
        assert!(p.variadic);
        assert_eq!(p.type_name.as_deref(), Some("int[]"));
        assert_eq!(p.name.as_deref(), Some("xs"));

        let p = JavaParser.parse_parameter("count");
        assert_eq!(p.name.as_deref(), Some("count"));
        assert_eq!(p.type_name, None);
        assert!(!p.variadic);
    }
}
