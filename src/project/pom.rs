//! `pom.xml` descriptor parsing.
//!
//! Reads the project's own coordinates, its `<parent>`, `<modules>` and the
//! project-level `<dependencies>`. Properties are not interpolated and
//! `dependencyManagement` is ignored.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::xml::{child, child_text, children, text_of, with_root};
use super::{parent_dir, DescriptorError};

const DEFAULT_PACKAGING: &str = "jar";
const DEFAULT_SCOPE: &str = "compile";
const DEFAULT_TYPE: &str = "jar";

/// `group:artifact`, only when both parts are present.
pub fn ga_key(group: Option<&str>, artifact: Option<&str>) -> Option<String> {
    Some(format!("{}:{}", group?, artifact?))
}

/// `group:artifact:version`, only when all parts are present.
pub fn gav_key(group: Option<&str>, artifact: Option<&str>, version: Option<&str>) -> Option<String> {
    Some(format!("{}:{}:{}", group?, artifact?, version?))
}

/// The `<parent>` block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PomParent {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub relative_path: Option<String>,
}

impl PomParent {
    pub fn gav(&self) -> Option<String> {
        gav_key(
            self.group_id.as_deref(),
            self.artifact_id.as_deref(),
            self.version.as_deref(),
        )
    }
}

/// One `<dependency>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PomDependency {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub scope: String,
    #[serde(rename = "type")]
    pub dep_type: String,
    pub optional: bool,
    pub ga: Option<String>,
    pub gav: Option<String>,
}

/// Fields read from one `pom.xml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PomProject {
    pub pom_path: String,
    pub dir: String,
    #[serde(rename = "groupId")]
    pub group_id: Option<String>,
    #[serde(rename = "artifactId")]
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub name: Option<String>,
    pub packaging: String,
    pub parent: Option<PomParent>,
    pub modules: Vec<String>,
    pub dependencies: Vec<PomDependency>,
    pub ga: Option<String>,
    pub gav: Option<String>,
}

/// Parse `pom.xml` text read from `path`.
///
/// `groupId` and `version` fall back to the parent's when the project omits
/// them.
pub fn parse_pom(path: &Path, text: &str) -> Result<PomProject, DescriptorError> {
    let path_str = path.to_string_lossy().to_string();
    let dir = parent_dir(path);

    with_root(text, |root| {
        let parent = child(root, "parent").map(|p| PomParent {
            group_id: child_text(p, "groupId"),
            artifact_id: child_text(p, "artifactId"),
            version: child_text(p, "version"),
            relative_path: child_text(p, "relativePath"),
        });

        let mut group_id = child_text(root, "groupId");
        let mut version = child_text(root, "version");
        if let Some(parent) = &parent {
            group_id = group_id.or_else(|| parent.group_id.clone());
            version = version.or_else(|| parent.version.clone());
        }
        let artifact_id = child_text(root, "artifactId");

        let modules = children(root, "modules")
            .flat_map(|m| children(m, "module"))
            .filter_map(text_of)
            .collect();

        let dependencies = children(root, "dependencies")
            .flat_map(|d| children(d, "dependency"))
            .map(|dep| {
                let group_id = child_text(dep, "groupId");
                let artifact_id = child_text(dep, "artifactId");
                let version = child_text(dep, "version");
                PomDependency {
                    ga: ga_key(group_id.as_deref(), artifact_id.as_deref()),
                    gav: gav_key(group_id.as_deref(), artifact_id.as_deref(), version.as_deref()),
                    scope: child_text(dep, "scope").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
                    dep_type: child_text(dep, "type").unwrap_or_else(|| DEFAULT_TYPE.to_string()),
                    optional: child_text(dep, "optional").as_deref() == Some("true"),
                    group_id,
                    artifact_id,
                    version,
                }
            })
            .collect();

        PomProject {
            pom_path: path_str.clone(),
            dir,
            ga: ga_key(group_id.as_deref(), artifact_id.as_deref()),
            gav: gav_key(group_id.as_deref(), artifact_id.as_deref(), version.as_deref()),
            group_id,
            artifact_id,
            version,
            name: child_text(root, "name"),
            packaging: child_text(root, "packaging").unwrap_or_else(|| DEFAULT_PACKAGING.to_string()),
            parent,
            modules,
            dependencies,
        }
    })
    .map_err(|err| DescriptorError::Malformed {
        path: path_str.clone(),
        message: err.to_string(),
    })
}
