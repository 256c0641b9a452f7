//! Deciding whether `conan install` must run, and running it.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::artifact::PackageStore;
use crate::core::error::ConanError;
use crate::core::requirement::Requirement;
use crate::util::config::ModuleConfig;
use crate::util::process::{Executor, ProcessBuilder};

/// Which install artifact the include/library paths are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactStrategy {
    /// `build/generators/conan_toolchain.cmake` in the project
    #[default]
    ToolchainFile,
    /// `<store>/<name>/<version>/package/<hash>` per requirement
    PackageStore,
    /// Use whichever artifact exists; the toolchain file wins if both do
    Auto,
}

impl fmt::Display for ArtifactStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactStrategy::ToolchainFile => write!(f, "toolchain-file"),
            ArtifactStrategy::PackageStore => write!(f, "package-store"),
            ArtifactStrategy::Auto => write!(f, "auto"),
        }
    }
}

impl FromStr for ArtifactStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "toolchain-file" => Ok(ArtifactStrategy::ToolchainFile),
            "package-store" => Ok(ArtifactStrategy::PackageStore),
            "auto" => Ok(ArtifactStrategy::Auto),
            other => Err(format!(
                "unknown strategy `{}` (expected toolchain-file, package-store or auto)",
                other
            )),
        }
    }
}

/// Outcome of [`decide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallDecision {
    /// Artifact to read after the (optional) install. Never `Auto`.
    pub strategy: ArtifactStrategy,
    /// Whether `conan install` has to run first.
    pub install: bool,
}

/// Decide whether an install is needed from what is already on disk.
pub fn decide(
    strategy: ArtifactStrategy,
    toolchain_file: &Path,
    store: &PackageStore,
    requirements: &[Requirement],
) -> InstallDecision {
    let missing_package = || requirements.iter().find(|r| !store.has_package(r));

    let decision = match strategy {
        ArtifactStrategy::ToolchainFile => InstallDecision {
            strategy,
            install: !toolchain_file.is_file(),
        },
        ArtifactStrategy::PackageStore => InstallDecision {
            strategy,
            install: missing_package().is_some(),
        },
        ArtifactStrategy::Auto => {
            if toolchain_file.is_file() {
                InstallDecision {
                    strategy: ArtifactStrategy::ToolchainFile,
                    install: false,
                }
            } else if !requirements.is_empty() && missing_package().is_none() {
                InstallDecision {
                    strategy: ArtifactStrategy::PackageStore,
                    install: false,
                }
            } else {
                InstallDecision {
                    strategy: ArtifactStrategy::ToolchainFile,
                    install: true,
                }
            }
        }
    };

    tracing::debug!(
        "strategy {} -> {} (install: {})",
        strategy,
        decision.strategy,
        decision.install
    );

    decision
}

/// Build `<python> -m conans.conan install [<profile>] . [--build=missing]`.
///
/// The child runs in the project root.
pub fn install_command(python: &str, project_dir: &Path, config: &ModuleConfig) -> ProcessBuilder {
    let mut cmd = ProcessBuilder::new(python).args(["-m", "conans.conan", "install"]);

    if let Some(profile) = config.install_profile() {
        cmd = cmd.args(profile.split_whitespace());
    }

    cmd = cmd.arg(".");
    if config.build_missing {
        cmd = cmd.arg("--build=missing");
    }

    cmd.cwd(project_dir)
}

/// Run the install command and wait for it to finish.
pub fn run_install(executor: &mut dyn Executor, cmd: &ProcessBuilder) -> Result<()> {
    let command = cmd.display_command();
    tracing::info!("Installing conan dependencies: {}", command);

    let outcome = executor
        .run(cmd)
        .map_err(|source| ConanError::InstallSpawn {
            command: command.clone(),
            source,
        })?;

    for line in outcome.stdout.lines() {
        tracing::debug!("conan: {}", line);
    }

    if !outcome.success() {
        return Err(ConanError::InstallFailed {
            command,
            code: outcome.code,
            stderr: outcome.stderr,
        }
        .into());
    }

    Ok(())
}
