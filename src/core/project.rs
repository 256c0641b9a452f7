//! The host build graph, as seen by a module.
//!
//! A module only ever appends search paths to the current project and to
//! the projects that depend on it. [`ProjectGraph`] is a small in-memory
//! host used by the CLI and by tests.

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::Serialize;

/// Receiver of include and library search paths.
pub trait PathSink {
    /// Append an include directory (-I).
    fn add_include(&mut self, dir: &Path);

    /// Append a library directory (-L).
    fn add_libpath(&mut self, dir: &Path);
}

/// The project a lifecycle call runs for.
pub trait Application: PathSink {
    /// Root directory of the project.
    fn project_dir(&self) -> &Path;

    /// Every project that depends on this one, directly or transitively.
    fn revendencies(&mut self) -> Vec<&mut dyn PathSink>;
}

/// A project node with append-only search path lists.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub name: String,
    pub dir: PathBuf,
    pub include_dirs: Vec<PathBuf>,
    pub lib_dirs: Vec<PathBuf>,
}

impl Project {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Project {
            name: name.into(),
            dir: dir.into(),
            include_dirs: Vec::new(),
            lib_dirs: Vec::new(),
        }
    }
}

impl PathSink for Project {
    fn add_include(&mut self, dir: &Path) {
        self.include_dirs.push(dir.to_path_buf());
    }

    fn add_libpath(&mut self, dir: &Path) {
        self.lib_dirs.push(dir.to_path_buf());
    }
}

/// Projects and their dependency edges.
///
/// An edge `a -> b` means "a depends on b".
#[derive(Debug, Default)]
pub struct ProjectGraph {
    graph: DiGraph<Project, ()>,
}

impl ProjectGraph {
    pub fn new() -> Self {
        ProjectGraph::default()
    }

    /// Add a project to the graph.
    pub fn add_project(&mut self, project: Project) -> NodeIndex {
        self.graph.add_node(project)
    }

    /// Record that `dependent` depends on `dependency`.
    pub fn add_dependency(&mut self, dependent: NodeIndex, dependency: NodeIndex) {
        if !self.graph.contains_edge(dependent, dependency) {
            self.graph.add_edge(dependent, dependency, ());
        }
    }

    pub fn project(&self, idx: NodeIndex) -> &Project {
        &self.graph[idx]
    }

    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.graph.node_weights()
    }

    /// Find a project by name.
    pub fn find(&self, name: &str) -> Option<NodeIndex> {
        self.graph
            .node_indices()
            .find(|&idx| self.graph[idx].name == name)
    }

    /// All projects that depend on `idx`, nearest first. Excludes `idx`.
    pub fn reverse_dependents(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut visited = HashSet::from([idx]);
        let mut queue = VecDeque::from([idx]);
        let mut order = Vec::new();

        while let Some(current) = queue.pop_front() {
            for dependent in self.graph.neighbors_directed(current, Direction::Incoming) {
                if visited.insert(dependent) {
                    order.push(dependent);
                    queue.push_back(dependent);
                }
            }
        }

        order
    }

    /// View `idx` as the current application of a lifecycle call.
    pub fn application(&mut self, idx: NodeIndex) -> ProjectApp<'_> {
        ProjectApp { graph: self, idx }
    }
}

/// A [`ProjectGraph`] node acting as the current [`Application`].
pub struct ProjectApp<'g> {
    graph: &'g mut ProjectGraph,
    idx: NodeIndex,
}

impl PathSink for ProjectApp<'_> {
    fn add_include(&mut self, dir: &Path) {
        self.graph.graph[self.idx].add_include(dir);
    }

    fn add_libpath(&mut self, dir: &Path) {
        self.graph.graph[self.idx].add_libpath(dir);
    }
}

impl Application for ProjectApp<'_> {
    fn project_dir(&self) -> &Path {
        &self.graph.graph[self.idx].dir
    }

    fn revendencies(&mut self) -> Vec<&mut dyn PathSink> {
        let dependents: HashSet<usize> = self
            .graph
            .reverse_dependents(self.idx)
            .into_iter()
            .map(NodeIndex::index)
            .collect();

        self.graph
            .graph
            .node_weights_mut()
            .enumerate()
            .filter(|(i, _)| dependents.contains(i))
            .map(|(_, project)| project as &mut dyn PathSink)
            .collect()
    }
}
