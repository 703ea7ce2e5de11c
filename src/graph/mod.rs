//! Cross-project relationship graph.
//!
//! The graph is a plain, descriptive edge list: references that cannot be
//! resolved still produce an edge (to the literal path or coordinate), and
//! no cycle detection or ordering validation is performed.

pub mod index;

pub use index::ProjectIndex;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::project::{CsprojProject, PomProject, ProjectDescriptor};
use crate::validation::resolve_include;

const EXTERNAL: &str = "external";

/// `from` references the project (or path) `to`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectReferenceEdge {
    pub from: String,
    pub to: String,
    /// `to` is a parsed project of this scan
    pub resolved: bool,
    pub name: Option<String>,
    pub project_guid: Option<String>,
}

/// `from` depends on the package or project `to`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    pub version: Option<String>,
    pub scope: Option<String>,
    /// `to` is a project of this scan rather than an external package
    pub internal: bool,
}

/// Maven `<parent>` relation, both sides as full GAVs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParentChildEdge {
    pub parent: String,
    pub child: String,
}

/// Maven `<module>` listed by an aggregator POM.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleInclusionEdge {
    pub aggregator: Option<String>,
    pub module_path: String,
}

/// All edges of one scan, in project order then declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelationshipGraph {
    pub project_references: Vec<ProjectReferenceEdge>,
    pub dependencies: Vec<DependencyEdge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parent_child: Vec<ParentChildEdge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub module_inclusion: Vec<ModuleInclusionEdge>,
}

impl RelationshipGraph {
    pub fn edge_count(&self) -> usize {
        self.project_references.len()
            + self.dependencies.len()
            + self.parent_child.len()
            + self.module_inclusion.len()
    }
}

/// Build the graph over every successfully parsed project.
///
/// Must run after all descriptors are parsed: references are resolved
/// against the complete project set.
pub fn build_graph(projects: &[ProjectDescriptor]) -> RelationshipGraph {
    let index = ProjectIndex::new(projects);
    let mut graph = RelationshipGraph::default();

    for project in projects {
        match project {
            ProjectDescriptor::Dotnet(csproj) => add_dotnet_edges(&mut graph, &index, csproj),
            ProjectDescriptor::Maven(pom) => add_maven_edges(&mut graph, &index, pom),
        }
    }

    tracing::debug!(
        projects = projects.len(),
        edges = graph.edge_count(),
        "relationship graph built"
    );
    graph
}

fn add_dotnet_edges(graph: &mut RelationshipGraph, index: &ProjectIndex<'_>, project: &CsprojProject) {
    let base_dir = Path::new(&project.dir);

    for reference in &project.project_references {
        let target = resolve_include(base_dir, &reference.include);
        let (to, resolved) = match index.by_path(&target) {
            Some(found) => (found.descriptor_path().to_string(), true),
            None => (target.to_string_lossy().to_string(), false),
        };
        graph.project_references.push(ProjectReferenceEdge {
            from: project.csproj_path.clone(),
            to,
            resolved,
            name: reference.name.clone(),
            project_guid: reference.project_guid.clone(),
        });
    }

    for package in &project.package_references {
        graph.dependencies.push(DependencyEdge {
            from: project.csproj_path.clone(),
            to: package.name.clone(),
            version: package.version.clone(),
            scope: None,
            internal: false,
        });
    }
}

fn add_maven_edges(graph: &mut RelationshipGraph, index: &ProjectIndex<'_>, project: &PomProject) {
    if let (Some(parent), Some(child)) = (project.parent.as_ref().and_then(|p| p.gav()), &project.gav) {
        graph.parent_child.push(ParentChildEdge {
            parent,
            child: child.clone(),
        });
    }

    let base_dir = Path::new(&project.dir);
    for module in &project.modules {
        graph.module_inclusion.push(ModuleInclusionEdge {
            aggregator: project.gav.clone(),
            module_path: resolve_include(base_dir, module).to_string_lossy().to_string(),
        });
    }

    // Dependencies need a full identity on the declaring side
    let Some(from) = &project.gav else {
        return;
    };
    for dep in &project.dependencies {
        let exact = dep.gav.as_deref().and_then(|gav| index.by_gav(gav).map(|t| (gav, t)));
        let (to, version, internal) = if let Some((gav, target)) = exact {
            (gav.to_string(), target.version.clone(), true)
        } else if let Some(target) = dep.ga.as_deref().and_then(|ga| index.by_ga(ga)) {
            // Same group:artifact, other version: link to the project as it is
            let to = target
                .gav
                .clone()
                .or_else(|| dep.ga.clone())
                .unwrap_or_else(|| EXTERNAL.to_string());
            (to, target.version.clone(), true)
        } else {
            let to = dep.ga.clone().unwrap_or_else(|| EXTERNAL.to_string());
            (to, dep.version.clone(), false)
        };
        graph.dependencies.push(DependencyEdge {
            from: from.clone(),
            to,
            version,
            scope: Some(dep.scope.clone()),
            internal,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{csproj::parse_csproj, pom::parse_pom};

    fn csproj(path: &str, body: &str) -> ProjectDescriptor {
        let text = format!("<Project><ItemGroup>{body}</ItemGroup></Project>");
        ProjectDescriptor::Dotnet(parse_csproj(Path::new(path), &text).unwrap())
    }

    fn pom(path: &str, body: &str) -> ProjectDescriptor {
        let text = format!("<project>{body}</project>");
        ProjectDescriptor::Maven(parse_pom(Path::new(path), &text).unwrap())
    }

    #[test]
    fn test_project_reference_resolution() {
        let projects = vec![
            csproj("/w/A/A.csproj", ""),
            csproj(
                "/w/B/B.csproj",
                r#"<ProjectReference Include="..\A\A.csproj"><Name>A</Name></ProjectReference>
                   <ProjectReference Include="../A" />
                   <ProjectReference Include="..\Gone\Gone.csproj" />
                   <PackageReference Include="Lib" Version="1.0" />"#,
            ),
        ];
        let graph = build_graph(&projects);

        let refs = &graph.project_references;
        assert_eq!(refs.len(), 3);
        assert!(refs.iter().all(|r| r.from == "/w/B/B.csproj"));

        assert_eq!(refs[0].to, "/w/A/A.csproj");
        assert!(refs[0].resolved);
        assert_eq!(refs[0].name.as_deref(), Some("A"));

        // a directory include resolves through the directory index
        assert_eq!(refs[1].to, "/w/A/A.csproj");
        assert!(refs[1].resolved);

        assert_eq!(refs[2].to, "/w/Gone/Gone.csproj");
        assert!(!refs[2].resolved);

        assert_eq!(
            graph.dependencies,
            vec![DependencyEdge {
                from: "/w/B/B.csproj".into(),
                to: "Lib".into(),
                version: Some("1.0".into()),
                scope: None,
                internal: false,
            }]
        );
        assert!(graph.parent_child.is_empty());
        assert!(graph.module_inclusion.is_empty());
    }

    #[test]
    fn test_maven_dependency_classification() {
        let projects = vec![
            pom(
                "/m/core/pom.xml",
                "<groupId>acme</groupId><artifactId>core</artifactId><version>2.0</version>",
            ),
            pom(
                "/m/app/pom.xml",
                r#"<groupId>acme</groupId><artifactId>app</artifactId><version>2.0</version>
                <dependencies>
                  <dependency><groupId>acme</groupId><artifactId>core</artifactId><version>2.0</version></dependency>
                  <dependency><groupId>acme</groupId><artifactId>core</artifactId><version>1.5</version><scope>test</scope></dependency>
                  <dependency><groupId>org.slf4j</groupId><artifactId>slf4j-api</artifactId><version>2.0.9</version></dependency>
                  <dependency><artifactId>orphan</artifactId></dependency>
                </dependencies>"#,
            ),
        ];
        let graph = build_graph(&projects);
        let deps = &graph.dependencies;
        assert_eq!(deps.len(), 4);
        assert!(deps.iter().all(|d| d.from == "acme:app:2.0"));

        assert_eq!(deps[0].to, "acme:core:2.0");
        assert!(deps[0].internal);

        // group:artifact match reclassifies with the project's own version
        assert_eq!(deps[1].to, "acme:core:2.0");
        assert_eq!(deps[1].version.as_deref(), Some("2.0"));
        assert_eq!(deps[1].scope.as_deref(), Some("test"));
        assert!(deps[1].internal);

        assert_eq!(deps[2].to, "org.slf4j:slf4j-api");
        assert_eq!(deps[2].version.as_deref(), Some("2.0.9"));
        assert!(!deps[2].internal);

        assert_eq!(deps[3].to, "external");
        assert_eq!(deps[3].scope.as_deref(), Some("compile"));
    }

    #[test]
    fn test_maven_project_without_gav_emits_no_dependencies() {
        let projects = vec![pom(
            "/m/x/pom.xml",
            "<artifactId>x</artifactId><dependencies><dependency><groupId>g</groupId>\
             <artifactId>a</artifactId></dependency></dependencies>",
        )];
        assert!(build_graph(&projects).dependencies.is_empty());
    }

    #[test]
    fn test_parent_child_and_modules() {
        let projects = vec![
            pom(
                "/m/pom.xml",
                "<groupId>acme</groupId><artifactId>parent</artifactId><version>1</version>\
                 <modules><module>core</module><module>../shared/util</module></modules>",
            ),
            pom(
                "/m/core/pom.xml",
                "<parent><groupId>acme</groupId><artifactId>parent</artifactId><version>1</version></parent>\
                 <artifactId>core</artifactId>",
            ),
        ];
        let graph = build_graph(&projects);
        assert_eq!(
            graph.parent_child,
            vec![ParentChildEdge {
                parent: "acme:parent:1".into(),
                child: "acme:core:1".into(),
            }]
        );
        let modules: Vec<&str> = graph.module_inclusion.iter().map(|m| m.module_path.as_str()).collect();
        assert_eq!(modules, vec!["/m/core", "/shared/util"]);
        assert!(graph
            .module_inclusion
            .iter()
            .all(|m| m.aggregator.as_deref() == Some("acme:parent:1")));
    }

    #[test]
    fn test_empty_maven_lists_not_serialized() {
        let graph = build_graph(&[csproj("/w/A/A.csproj", "")]);
        let json = serde_json::to_value(&graph).unwrap();
        assert!(json.get("parent_child").is_none());
        assert!(json.get("module_inclusion").is_none());
        assert_eq!(json["project_references"], serde_json::json!([]));
    }

    #[test]
    fn test_no_projects_no_edges() {
        let graph = build_graph(&[]);
        assert_eq!(graph.edge_count(), 0);
    }
}
