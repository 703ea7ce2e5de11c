//! Build-unit descriptors (`.csproj`, `pom.xml`).
//!
//! Each ecosystem has its own descriptor shape; [`ProjectDescriptor`] wraps
//! them behind one tagged enum so the scan driver and the graph builder can
//! treat projects uniformly. Reference resolution is deferred to
//! [`crate::graph::build_graph`].

pub mod csproj;
pub mod pom;
pub mod xml;

pub use csproj::{CsprojProject, PackageReference, ProjectReference};
pub use pom::{PomDependency, PomParent, PomProject};

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::common::read_text_lossy;
use crate::error_codes;
use crate::ingest::Language;

/// Build ecosystem of a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Dotnet,
    Maven,
}

impl Ecosystem {
    pub const ALL: [Ecosystem; 2] = [Ecosystem::Dotnet, Ecosystem::Maven];

    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Dotnet => "dotnet",
            Ecosystem::Maven => "maven",
        }
    }

    /// Parse a CLI value (`dotnet`, `maven`).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dotnet" | ".net" | "csharp" => Some(Ecosystem::Dotnet),
            "maven" | "java" => Some(Ecosystem::Maven),
            _ => None,
        }
    }

    /// Whether `file_name` is a descriptor of this ecosystem.
    pub fn is_descriptor(&self, file_name: &str) -> bool {
        match self {
            Ecosystem::Dotnet => file_name.to_ascii_lowercase().ends_with(".csproj"),
            Ecosystem::Maven => file_name == "pom.xml",
        }
    }

    /// Source language compiled by this ecosystem.
    pub fn language(&self) -> Language {
        match self {
            Ecosystem::Dotnet => Language::CSharp,
            Ecosystem::Maven => Language::Java,
        }
    }

    /// Source roots relative to the project directory; empty means the
    /// whole directory.
    pub fn source_roots(&self) -> &'static [&'static str] {
        match self {
            Ecosystem::Dotnet => &[],
            Ecosystem::Maven => &["src/main/java", "src/test/java"],
        }
    }

    /// Build-output directory names skipped anywhere below a project.
    pub fn output_dirs(&self) -> &'static [&'static str] {
        match self {
            Ecosystem::Dotnet => &["bin", "obj"],
            Ecosystem::Maven => &[],
        }
    }
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors for a single descriptor. None of them abort a scan.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("cannot read descriptor {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed descriptor {path}: {message}")]
    Malformed { path: String, message: String },
}

impl DescriptorError {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            DescriptorError::Read { .. } => error_codes::MER_XML_002_UNREADABLE,
            DescriptorError::Malformed { .. } => error_codes::MER_XML_001_MALFORMED,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            DescriptorError::Read { path, .. } | DescriptorError::Malformed { path, .. } => path,
        }
    }
}

/// A parsed descriptor of either ecosystem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "ecosystem", rename_all = "lowercase")]
pub enum ProjectDescriptor {
    Dotnet(CsprojProject),
    Maven(PomProject),
}

impl ProjectDescriptor {
    pub fn ecosystem(&self) -> Ecosystem {
        match self {
            ProjectDescriptor::Dotnet(_) => Ecosystem::Dotnet,
            ProjectDescriptor::Maven(_) => Ecosystem::Maven,
        }
    }

    /// Path of the descriptor file.
    pub fn descriptor_path(&self) -> &str {
        match self {
            ProjectDescriptor::Dotnet(p) => &p.csproj_path,
            ProjectDescriptor::Maven(p) => &p.pom_path,
        }
    }

    /// Directory containing the descriptor.
    pub fn dir(&self) -> &str {
        match self {
            ProjectDescriptor::Dotnet(p) => &p.dir,
            ProjectDescriptor::Maven(p) => &p.dir,
        }
    }

    /// Short label for human output.
    pub fn display_name(&self) -> String {
        match self {
            ProjectDescriptor::Dotnet(p) => p
                .assembly_name
                .clone()
                .unwrap_or_else(|| file_stem(&p.csproj_path)),
            ProjectDescriptor::Maven(p) => p
                .gav
                .clone()
                .or_else(|| p.artifact_id.clone())
                .unwrap_or_else(|| p.dir.clone()),
        }
    }
}

fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Read and parse the descriptor at `path`.
pub fn parse_descriptor(ecosystem: Ecosystem, path: &Path) -> Result<ProjectDescriptor, DescriptorError> {
    let text = read_text_lossy(path).map_err(|source| DescriptorError::Read {
        path: path.to_string_lossy().to_string(),
        source,
    })?;
    tracing::debug!(path = %path.display(), %ecosystem, "parsing descriptor");
    match ecosystem {
        Ecosystem::Dotnet => csproj::parse_csproj(path, &text).map(ProjectDescriptor::Dotnet),
        Ecosystem::Maven => pom::parse_pom(path, &text).map(ProjectDescriptor::Maven),
    }
}

/// Directory of a descriptor as a string (empty for a bare file name).
pub(crate) fn parent_dir(path: &Path) -> String {
    path.parent()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_descriptor_file_matching() {
        assert!(Ecosystem::Dotnet.is_descriptor("App.csproj"));
        assert!(Ecosystem::Dotnet.is_descriptor("Legacy.CSPROJ"));
        assert!(!Ecosystem::Dotnet.is_descriptor("App.vbproj"));
        assert!(Ecosystem::Maven.is_descriptor("pom.xml"));
        assert!(!Ecosystem::Maven.is_descriptor("POM.xml"));
        assert!(!Ecosystem::Maven.is_descriptor("pom.xml.bak"));
    }

    #[test]
    fn test_ecosystem_from_str() {
        assert_eq!(Ecosystem::from_str("dotnet"), Some(Ecosystem::Dotnet));
        assert_eq!(Ecosystem::from_str("Maven"), Some(Ecosystem::Maven));
        assert_eq!(Ecosystem::from_str("gradle"), None);
    }

    #[test]
    fn test_parse_descriptor_missing_file() {
        let err = parse_descriptor(Ecosystem::Maven, Path::new("/no/such/pom.xml")).unwrap_err();
        assert!(matches!(err, DescriptorError::Read { .. }));
        assert_eq!(err.code(), "MER-XML-002");
        assert_eq!(err.path(), "/no/such/pom.xml");
    }

    #[test]
    fn test_parse_descriptor_malformed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Broken.csproj");
        fs::write(&path, "<Project><PropertyGroup></Project>").unwrap();
        let err = parse_descriptor(Ecosystem::Dotnet, &path).unwrap_err();
        assert!(matches!(err, DescriptorError::Malformed { .. }));
        assert_eq!(err.code(), "MER-XML-001");
    }

    #[test]
    fn test_descriptor_serializes_with_ecosystem_tag() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pom.xml");
        fs::write(
            &path,
            "<project><groupId>g</groupId><artifactId>a</artifactId><version>1</version></project>",
        )
        .unwrap();
        let descriptor = parse_descriptor(Ecosystem::Maven, &path).unwrap();
        assert_eq!(descriptor.ecosystem(), Ecosystem::Maven);
        assert_eq!(descriptor.display_name(), "g:a:1");

        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["ecosystem"], "maven");
        assert_eq!(json["groupId"], "g");
        assert_eq!(json["gav"], "g:a:1");
    }
}
