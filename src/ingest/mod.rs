//! Source scanning and structural extraction.
//!
//! Each supported language gets a front-end ([`csharp::CSharpParser`],
//! [`java::JavaParser`]) that supplies patterns to the shared engine in
//! [`extract`]. The engine works on the sanitized mirror of a file produced
//! by [`sanitize`], so nothing inside comments or literals can be mistaken
//! for a declaration.
//!
//! All facts here are textual approximations. Nothing is compiler-verified
//! and malformed input yields partial records rather than errors.

pub mod csharp;
pub mod detect;
pub mod extract;
pub mod java;
pub mod modifiers;
pub mod params;
pub mod position;
pub mod sanitize;

pub use detect::{detect_language, Language};
pub use extract::{extract_source, Grammar, MemberHeader, TypeHeader};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::common::read_text_lossy;

fn is_false(b: &bool) -> bool {
    !*b
}

/// Kind of a type declaration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
    Record,
    /// Java `@interface`
    AnnotationType,
}

impl TypeKind {
    /// Map a declaration keyword to its kind.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(TypeKind::Class),
            "interface" => Some(TypeKind::Interface),
            "struct" => Some(TypeKind::Struct),
            "enum" => Some(TypeKind::Enum),
            "record" => Some(TypeKind::Record),
            "@interface" => Some(TypeKind::AnnotationType),
            _ => None,
        }
    }

    /// Keyword as written in source.
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Struct => "struct",
            TypeKind::Enum => "enum",
            TypeKind::Record => "record",
            TypeKind::AnnotationType => "@interface",
        }
    }
}

/// One parameter of a method, constructor or record header.
///
/// `raw` is always kept; `type_name` and `name` are best-effort.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Parameter {
    pub raw: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `T...` (Java) or `params T[]` (C#)
    #[serde(default, skip_serializing_if = "is_false")]
    pub variadic: bool,
    /// Parameter modifiers such as `ref`, `out`, `this`, `final`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
    /// Per-parameter attributes / annotations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
}

impl Parameter {
    /// A parameter that only has its raw text.
    pub fn raw_only(raw: &str) -> Self {
        Parameter {
            raw: raw.to_string(),
            ..Default::default()
        }
    }
}

/// A method declared inside a type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub modifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_params: Option<String>,
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub throws: Vec<String>,
    pub attributes: Vec<String>,
    pub prototype: String,
    /// 1-indexed line of the declaration start
    pub line: usize,
}

/// A constructor; its name always equals the owning type's name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Constructor {
    pub name: String,
    pub modifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_params: Option<String>,
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub throws: Vec<String>,
    pub attributes: Vec<String>,
    pub prototype: String,
    pub line: usize,
}

/// A type declaration with the members attributed to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub kind: TypeKind,
    pub name: String,
    pub modifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_params: Option<String>,
    /// C# `: A, B` list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub base_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permits: Vec<String>,
    /// Positional record header (`record P(int X, int Y)`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub record_components: Vec<Parameter>,
    pub attributes: Vec<String>,
    pub methods: Vec<Method>,
    pub constructors: Vec<Constructor>,
    pub line: usize,
}

/// Extraction result for one source file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileSummary {
    pub path: String,
    pub language: Language,
    /// Namespace (C#) or package (Java); `None` is the global/default scope
    pub namespace: Option<String>,
    pub types: Vec<TypeDeclaration>,
    /// Read failure; the file then contributes no types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileSummary {
    /// Record for a file that could not be processed.
    pub fn failed(path: &str, language: Language, error: String) -> Self {
        FileSummary {
            path: path.to_string(),
            language,
            namespace: None,
            types: Vec::new(),
            error: Some(error),
        }
    }

    /// Scope key used when grouping files: the namespace, or the language's
    /// placeholder for the global/default scope.
    pub fn scope_key(&self) -> String {
        self.namespace
            .clone()
            .unwrap_or_else(|| self.language.default_scope_key().to_string())
    }
}

/// The grammar for `language`.
pub fn grammar_for(language: Language) -> &'static dyn Grammar {
    match language {
        Language::CSharp => &csharp::CSharpParser,
        Language::Java => &java::JavaParser,
    }
}

/// Extract declarations from in-memory source.
///
/// Pure function: same input, same output. No filesystem access.
pub fn extract_text(language: Language, path: &str, source: &str) -> FileSummary {
    extract_source(grammar_for(language), path, source)
}

/// Read `path` and extract its declarations.
///
/// A read failure is returned as a [`FileSummary`] with `error` set, never
/// as a panic or an `Err`.
pub fn extract_file(language: Language, path: &Path) -> FileSummary {
    let path_str = path.to_string_lossy().to_string();
    match read_text_lossy(path) {
        Ok(source) => extract_text(language, &path_str, &source),
        Err(err) => {
            tracing::warn!(path = %path_str, error = %err, "failed to read source file");
            FileSummary::failed(&path_str, language, err.to_string())
        }
    }
}
