//! Lookup tables over every parsed project.
//!
//! Built once after all descriptors are parsed and read-only afterwards.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::project::{PomProject, ProjectDescriptor};
use crate::validation::normalize_path;

/// Path and coordinate indices used to resolve references.
#[derive(Debug, Default)]
pub struct ProjectIndex<'a> {
    by_descriptor: HashMap<PathBuf, &'a ProjectDescriptor>,
    by_dir: HashMap<PathBuf, &'a ProjectDescriptor>,
    by_gav: HashMap<String, &'a PomProject>,
    by_ga: HashMap<String, &'a PomProject>,
}

impl<'a> ProjectIndex<'a> {
    /// Index `projects`.
    ///
    /// Descriptor paths are unique. When two projects share a directory the
    /// first one keeps it. Coordinate keys keep the last project declaring
    /// them.
    pub fn new(projects: &'a [ProjectDescriptor]) -> Self {
        let mut index = ProjectIndex::default();
        for project in projects {
            index
                .by_descriptor
                .insert(normalize_path(Path::new(project.descriptor_path())), project);
            index
                .by_dir
                .entry(normalize_path(Path::new(project.dir())))
                .or_insert(project);

            if let ProjectDescriptor::Maven(pom) = project {
                if let Some(gav) = &pom.gav {
                    index.by_gav.insert(gav.clone(), pom);
                }
                if let Some(ga) = &pom.ga {
                    index.by_ga.insert(ga.clone(), pom);
                }
            }
        }
        index
    }

    /// Project whose descriptor path, or else whose directory, is `path`.
    pub fn by_path(&self, path: &Path) -> Option<&'a ProjectDescriptor> {
        self.by_descriptor
            .get(path)
            .or_else(|| self.by_dir.get(path))
            .copied()
    }

    pub fn by_gav(&self, gav: &str) -> Option<&'a PomProject> {
        self.by_gav.get(gav).copied()
    }

    pub fn by_ga(&self, ga: &str) -> Option<&'a PomProject> {
        self.by_ga.get(ga).copied()
    }
}
