//! `.csproj` descriptor parsing.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use super::xml::{attr, child_text, children, text_of, with_root};
use super::{parent_dir, DescriptorError};

/// `<ProjectReference Include="..\Lib\Lib.csproj">`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectReference {
    /// Include path exactly as written
    pub include: String,
    pub name: Option<String>,
    pub project_guid: Option<String>,
}

/// `<PackageReference Include="Lib" Version="1.0" />`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageReference {
    pub name: String,
    pub version: Option<String>,
    pub include: String,
}

/// Fields read from one `.csproj` file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CsprojProject {
    pub csproj_path: String,
    pub dir: String,
    pub assembly_name: Option<String>,
    pub root_namespace: Option<String>,
    /// Deduplicated and sorted
    pub target_frameworks: Vec<String>,
    pub output_type: Option<String>,
    pub project_references: Vec<ProjectReference>,
    pub package_references: Vec<PackageReference>,
}

/// Parse `.csproj` text read from `path`.
///
/// Properties are merged across every top-level `PropertyGroup`; the first
/// non-empty value of a property wins.
pub fn parse_csproj(path: &Path, text: &str) -> Result<CsprojProject, DescriptorError> {
    let path_str = path.to_string_lossy().to_string();
    let dir = parent_dir(path);

    with_root(text, |root| {
        let mut props: HashMap<String, String> = HashMap::new();
        for group in children(root, "PropertyGroup") {
            for prop in group.children().filter(|n| n.is_element()) {
                if let Some(value) = text_of(prop) {
                    props
                        .entry(prop.tag_name().name().to_string())
                        .or_insert(value);
                }
            }
        }

        let mut frameworks: BTreeSet<String> = BTreeSet::new();
        if let Some(tf) = props.get("TargetFramework") {
            frameworks.insert(tf.clone());
        }
        if let Some(tfs) = props.get("TargetFrameworks") {
            frameworks.extend(
                tfs.split(';')
                    .map(str::trim)
                    .filter(|tf| !tf.is_empty())
                    .map(str::to_string),
            );
        }

        let mut project_references = Vec::new();
        let mut package_references = Vec::new();
        for items in children(root, "ItemGroup") {
            for reference in children(items, "ProjectReference") {
                let Some(include) = attr(reference, "Include") else {
                    continue;
                };
                project_references.push(ProjectReference {
                    include,
                    name: child_text(reference, "Name"),
                    project_guid: child_text(reference, "Project"),
                });
            }
            for package in children(items, "PackageReference") {
                let Some(include) = attr(package, "Include") else {
                    continue;
                };
                package_references.push(PackageReference {
                    name: include.clone(),
                    version: attr(package, "Version").or_else(|| child_text(package, "Version")),
                    include,
                });
            }
        }

        CsprojProject {
            csproj_path: path_str.clone(),
            dir,
            assembly_name: props.remove("AssemblyName"),
            root_namespace: props.remove("RootNamespace"),
            target_frameworks: frameworks.into_iter().collect(),
            output_type: props.remove("OutputType"),
            project_references,
            package_references,
        }
    })
    .map_err(|err| DescriptorError::Malformed {
        path: path_str.clone(),
        message: err.to_string(),
    })
}
