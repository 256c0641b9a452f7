//! Command implementations

pub mod init;
pub mod link;
pub mod pack;
pub mod requires;
pub mod toolchain;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use harbour_conan::core::project::{Project, ProjectGraph};
use harbour_conan::util::config::{load_node, project_node_path};
use harbour_conan::util::fs::normalize_path;
use harbour_conan::{Module, ModuleRegistry, Settings};

/// State shared by every command.
pub struct CommandContext {
    pub settings: Settings,
    pub color: bool,
}

impl CommandContext {
    /// Instantiate the conan module.
    pub fn conan_module(&self) -> Result<Box<dyn Module>> {
        ModuleRegistry::with_defaults().create("conan", &self.settings)
    }
}

/// Resolve the project directory argument, defaulting to the cwd.
pub fn project_dir(path: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match path {
        Some(path) => path,
        None => std::env::current_dir().context("failed to get current directory")?,
    };
    Ok(normalize_path(&dir))
}

/// Load the module configuration node stored in the project.
pub fn project_node(project_dir: &Path) -> Result<toml::Table> {
    load_node(&project_node_path(project_dir))
}

/// A project named after its directory.
pub fn project(dir: &Path) -> Project {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());
    Project::new(name, dir)
}

/// A graph holding only the project at `dir`.
pub fn single_project(dir: &Path) -> (ProjectGraph, petgraph::graph::NodeIndex) {
    let mut graph = ProjectGraph::new();
    let idx = graph.add_project(project(dir));
    (graph, idx)
}
