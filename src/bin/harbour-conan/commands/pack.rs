//! `harbour-conan pack` command

use anyhow::Result;

use super::{project_dir, project_node, single_project, CommandContext};
use crate::cli::ProjectArgs;

pub fn execute(args: ProjectArgs, ctx: &CommandContext) -> Result<()> {
    let project_dir = project_dir(args.path)?;
    let node = project_node(&project_dir)?;
    let (mut graph, app) = single_project(&project_dir);

    let mut module = ctx.conan_module()?;
    module.pack(&mut graph.application(app), &node)?;

    println!("pack: {}", project_dir.display());
    Ok(())
}
