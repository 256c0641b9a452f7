//! `harbour-conan toolchain` command

use anyhow::Result;

use super::{project_dir, CommandContext};
use crate::cli::ProjectArgs;
use harbour_conan::core::artifact::read_toolchain_file;
use harbour_conan::util::diagnostic::{emit, Diagnostic};

pub fn execute(args: ProjectArgs, ctx: &CommandContext) -> Result<()> {
    let project_dir = project_dir(args.path)?;
    let path = ctx.settings.toolchain_path(&project_dir);

    if !path.is_file() {
        let warning = Diagnostic::warning("conan toolchain file not found")
            .with_location(&path)
            .with_suggestion("Run `harbour-conan init` to install the requirements");
        emit(&warning, ctx.color);
        return Ok(());
    }

    let artifact = read_toolchain_file(&path)?;

    println!("Toolchain: {}", path.display());
    println!();
    for dir in &artifact.include_dirs {
        println!("  include: {}", dir.display());
    }
    for dir in &artifact.lib_dirs {
        println!("  lib:     {}", dir.display());
    }

    Ok(())
}
