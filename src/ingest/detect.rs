//! Language detection by file extension.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source languages with a front-end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    #[serde(rename = "csharp")]
    CSharp,
    #[serde(rename = "java")]
    Java,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::CSharp => "csharp",
            Language::Java => "java",
        }
    }

    /// Source file extension (without the dot).
    pub fn extension(&self) -> &'static str {
        match self {
            Language::CSharp => "cs",
            Language::Java => "java",
        }
    }

    /// Grouping key for files without a namespace/package declaration.
    pub fn default_scope_key(&self) -> &'static str {
        match self {
            Language::CSharp => "(global)",
            Language::Java => "(default)",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the language of `path` from its extension.
///
/// Extensions are compared case-insensitively (`.CS` files show up in trees
/// produced by older Windows tooling).
pub fn detect_language(path: &Path) -> Option<Language> {
    let ext = path.extension()?.to_str()?;
    match ext.to_ascii_lowercase().as_str() {
        "cs" => Some(Language::CSharp),
        "java" => Some(Language::Java),
        _ => None,
    }
}
