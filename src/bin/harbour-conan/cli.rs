//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use harbour_conan::ops::install::ArtifactStrategy;
use harbour_conan::Settings;

/// harbour-conan - conan dependency installation for Harbour projects
#[derive(Parser)]
#[command(name = "harbour-conan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Python interpreter with conan installed
    #[arg(long, env = "PYTHON", global = true)]
    pub python: Option<String>,

    /// Root of the conan package store (defaults to ~/.conan/data)
    #[arg(long, global = true)]
    pub package_store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Process-wide settings from the global flags.
    pub fn settings(&self) -> Settings {
        let settings = Settings::default().with_python(self.python.clone());
        match &self.package_store {
            Some(root) => settings.with_package_store(root),
            None => settings,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install conan requirements and propagate their search paths
    Init(InitArgs),

    /// Run the link step of the conan module
    Link(ProjectArgs),

    /// Run the pack step of the conan module
    Pack(ProjectArgs),

    /// List the requirements of conanfile.txt
    Requires(ProjectArgs),

    /// Show the paths listed in the generated toolchain file
    Toolchain(ProjectArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Project directory (defaults to current directory)
    pub path: Option<PathBuf>,

    /// Directory of a project that depends on this one (repeatable)
    #[arg(long = "dependent", value_name = "DIR")]
    pub dependents: Vec<PathBuf>,

    /// Extra argument for `conan install` (e.g. --profile=release)
    #[arg(long, value_name = "PROFILE", allow_hyphen_values = true)]
    pub install: Option<String>,

    /// Artifact to read paths from: toolchain-file, package-store or auto
    #[arg(long)]
    pub strategy: Option<ArtifactStrategy>,

    /// Do not pass --build=missing to conan
    #[arg(long)]
    pub no_build_missing: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ProjectArgs {
    /// Project directory (defaults to current directory)
    pub path: Option<PathBuf>,
}
