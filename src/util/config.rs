//! Configuration for the conan module.
//!
//! Two layers:
//! - [`Settings`]: process-wide values chosen by the host (python
//!   interpreter, package store location). The host reads the environment
//!   once and passes them in.
//! - [`ModuleConfig`]: the per-project configuration node handed to every
//!   lifecycle call, stored by the CLI host in `.harbour/conan.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::error::ConanError;
use crate::ops::install::ArtifactStrategy;

/// Default python interpreter used to run conan.
pub const DEFAULT_PYTHON: &str = "python";

/// Toolchain file written by `conan install`, relative to the project root.
pub const TOOLCHAIN_FILE: &str = "build/generators/conan_toolchain.cmake";

/// Keys a configuration node must define. The conan module has none.
pub const REQUIRED_KEYS: &[&str] = &[];

/// Process-wide module settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Python interpreter that has conan installed
    pub python: String,

    /// Root of the conan package store (`~/.conan/data`)
    pub package_store: PathBuf,

    /// Toolchain file location, relative to the project root
    pub toolchain_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            python: DEFAULT_PYTHON.to_string(),
            package_store: default_package_store(),
            toolchain_file: PathBuf::from(TOOLCHAIN_FILE),
        }
    }
}

impl Settings {
    /// Override the python interpreter. `None` or empty keeps the default.
    pub fn with_python(mut self, python: Option<String>) -> Self {
        if let Some(python) = python.filter(|p| !p.is_empty()) {
            self.python = python;
        }
        self
    }

    /// Override the package store root.
    pub fn with_package_store(mut self, root: impl Into<PathBuf>) -> Self {
        self.package_store = root.into();
        self
    }

    /// Toolchain file of a given project.
    pub fn toolchain_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.toolchain_file)
    }
}

/// Get the per-user conan package store (~/.conan/data).
pub fn default_package_store() -> PathBuf {
    directories::BaseDirs::new()
        .map(|b| b.home_dir().join(".conan").join("data"))
        .unwrap_or_else(|| PathBuf::from(".conan").join("data"))
}

/// The module configuration node of one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModuleConfig {
    /// Extra argument for `conan install` (e.g. `--profile=release`)
    pub install: Option<String>,

    /// Which install artifact to read paths from
    pub strategy: ArtifactStrategy,

    /// Pass `--build=missing` to `conan install`
    pub build_missing: bool,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        ModuleConfig {
            install: None,
            strategy: ArtifactStrategy::default(),
            build_missing: true,
        }
    }
}

impl ModuleConfig {
    /// Validate a configuration node.
    ///
    /// Missing required keys, unknown keys and mistyped values are rejected.
    pub fn from_node(node: &toml::Table) -> Result<Self, ConanError> {
        check_required(node, REQUIRED_KEYS)?;

        toml::Value::Table(node.clone())
            .try_into()
            .map_err(|e: toml::de::Error| ConanError::ConfigValidation {
                message: e.message().to_string(),
            })
    }

    /// The install profile argument, if one is configured.
    pub fn install_profile(&self) -> Option<&str> {
        self.install.as_deref().filter(|s| !s.trim().is_empty())
    }
}

fn check_required(node: &toml::Table, required: &[&str]) -> Result<(), ConanError> {
    match required.iter().find(|key| !node.contains_key(**key)) {
        Some(key) => Err(ConanError::ConfigValidation {
            message: format!("missing required key `{}`", key),
        }),
        None => Ok(()),
    }
}

/// Get the project configuration node path (.harbour/conan.toml).
pub fn project_node_path(project_root: &Path) -> PathBuf {
    project_root.join(".harbour").join("conan.toml")
}

/// Load a configuration node, or an empty one if the file doesn't exist.
pub fn load_node(path: &Path) -> Result<toml::Table> {
    if !path.exists() {
        return Ok(toml::Table::new());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    contents
        .parse::<toml::Table>()
        .with_context(|| format!("failed to parse config file: {}", path.display()))
}
