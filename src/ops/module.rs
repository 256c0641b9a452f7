//! Build-tool modules and the conan module.
//!
//! A host drives a module through three lifecycle calls per project:
//! `init` (before compiling), `link` and `pack`. Each call receives the
//! current project and the module's configuration node for that project.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::artifact::{read_toolchain_file, PackageStore, ToolchainArtifact};
use crate::core::error::ConanError;
use crate::core::project::Application;
use crate::core::record::ManifestCache;
use crate::core::requirement::{read_requirements, Requirement, MANIFEST_NAME};
use crate::ops::install::{decide, install_command, run_install, ArtifactStrategy};
use crate::ops::propagate::propagate;
use crate::util::config::{ModuleConfig, Settings};
use crate::util::process::{Executor, SystemExecutor};

/// A build-tool extension with lifecycle hooks.
pub trait Module {
    /// Registry name of the module.
    fn name(&self) -> &str;

    fn init(&mut self, app: &mut dyn Application, node: &toml::Table) -> Result<()>;

    fn link(&mut self, app: &mut dyn Application, node: &toml::Table) -> Result<()>;

    fn pack(&mut self, app: &mut dyn Application, node: &toml::Table) -> Result<()>;
}

/// Installs `conanfile.txt` requirements and exposes their search paths.
pub struct ConanModule {
    settings: Settings,
    manifests: ManifestCache,
    executor: Box<dyn Executor>,
}

impl ConanModule {
    pub fn new(settings: Settings) -> Self {
        ConanModule::with_executor(settings, Box::new(SystemExecutor))
    }

    /// Create a module that runs `conan install` through `executor`.
    pub fn with_executor(settings: Settings, executor: Box<dyn Executor>) -> Self {
        ConanModule {
            settings,
            manifests: ManifestCache::new(),
            executor,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn manifests(&self) -> &ManifestCache {
        &self.manifests
    }

    /// `conanfile.txt` of the project, if it has one.
    fn locate_manifest(project_dir: &Path) -> Option<PathBuf> {
        let path = project_dir.join(MANIFEST_NAME);
        if path.is_file() {
            Some(path)
        } else {
            tracing::debug!("no {} in {}", MANIFEST_NAME, project_dir.display());
            None
        }
    }

    /// Read the paths from the artifact chosen by the install decision.
    fn read_artifact(
        strategy: ArtifactStrategy,
        toolchain: &Path,
        store: &PackageStore,
        requirements: &[Requirement],
    ) -> Result<Option<ToolchainArtifact>> {
        match strategy {
            ArtifactStrategy::PackageStore => store.read(requirements).map(Some),
            ArtifactStrategy::ToolchainFile | ArtifactStrategy::Auto => {
                if !toolchain.is_file() {
                    tracing::warn!(
                        "conan toolchain file not found: {}",
                        toolchain.display()
                    );
                    return Ok(None);
                }
                read_toolchain_file(toolchain).map(Some)
            }
        }
    }

    /// Shared prologue of `link` and `pack`.
    fn touch(&mut self, phase: &str, app: &dyn Application, node: &toml::Table) -> Result<()> {
        ModuleConfig::from_node(node)?;

        let Some(manifest) = Self::locate_manifest(app.project_dir()) else {
            return Ok(());
        };
        let record = self.manifests.get_or_create(&manifest);
        tracing::debug!(
            "{}: {} (installed this run: {})",
            phase,
            record.path().display(),
            record.installed()
        );

        Ok(())
    }
}

impl Module for ConanModule {
    fn name(&self) -> &str {
        "conan"
    }

    fn init(&mut self, app: &mut dyn Application, node: &toml::Table) -> Result<()> {
        let config = ModuleConfig::from_node(node)?;

        let project_dir = app.project_dir().to_path_buf();
        let Some(manifest) = Self::locate_manifest(&project_dir) else {
            return Ok(());
        };
        self.manifests.get_or_create(&manifest);

        let requirements = read_requirements(&manifest)?;
        if requirements.is_empty() {
            tracing::debug!("nothing required by {}", manifest.display());
            return Ok(());
        }

        let toolchain = self.settings.toolchain_path(&project_dir);
        let store = PackageStore::new(&self.settings.package_store);
        let decision = decide(config.strategy, &toolchain, &store, &requirements);

        if decision.install {
            let cmd = install_command(&self.settings.python, &project_dir, &config);
            run_install(self.executor.as_mut(), &cmd)?;
            self.manifests.get_or_create(&manifest).mark_installed();
        }

        let Some(artifact) =
            Self::read_artifact(decision.strategy, &toolchain, &store, &requirements)?
        else {
            return Ok(());
        };

        let summary = propagate(app, &artifact);
        tracing::info!(
            "conan: {} include dir(s), {} lib dir(s) for {}",
            summary.include_dirs,
            summary.lib_dirs,
            project_dir.display()
        );

        Ok(())
    }

    fn link(&mut self, app: &mut dyn Application, node: &toml::Table) -> Result<()> {
        self.touch("link", app, node)
    }

    fn pack(&mut self, app: &mut dyn Application, node: &toml::Table) -> Result<()> {
        self.touch("pack", app, node)
    }
}

type ModuleFactory = Box<dyn Fn(&Settings) -> Box<dyn Module>>;

/// Named module factories.
pub struct ModuleRegistry {
    factories: BTreeMap<String, ModuleFactory>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ModuleRegistry {
            factories: BTreeMap::new(),
        }
    }

    /// Registry with the built-in `conan` module.
    pub fn with_defaults() -> Self {
        let mut registry = ModuleRegistry::new();
        registry.register("conan", |settings| {
            Box::new(ConanModule::new(settings.clone()))
        });
        registry
    }

    /// Register a factory, replacing any previous one with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&Settings) -> Box<dyn Module> + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Instantiate a registered module.
    pub fn create(&self, name: &str, settings: &Settings) -> Result<Box<dyn Module>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ConanError::UnknownModule {
                name: name.to_string(),
            })?;
        Ok(factory(settings))
    }

    /// Registered module names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl Default for ModuleRegistry {
    /// Same as [`ModuleRegistry::new`]: no modules registered.
    fn default() -> Self {
        Self::new()
    }
}
