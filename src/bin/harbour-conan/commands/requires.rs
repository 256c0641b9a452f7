//! `harbour-conan requires` command

use anyhow::Result;

use super::{project_dir, CommandContext};
use crate::cli::ProjectArgs;
use harbour_conan::core::requirement::{read_requirements, MANIFEST_NAME};
use harbour_conan::util::diagnostic::{emit, Diagnostic};

pub fn execute(args: ProjectArgs, ctx: &CommandContext) -> Result<()> {
    let project_dir = project_dir(args.path)?;
    let manifest = project_dir.join(MANIFEST_NAME);

    if !manifest.is_file() {
        emit(
            &Diagnostic::warning(format!("no {} in this project", MANIFEST_NAME))
                .with_location(&project_dir),
            ctx.color,
        );
        return Ok(());
    }

    for req in read_requirements(&manifest)? {
        println!("{}", req);
    }

    Ok(())
}
