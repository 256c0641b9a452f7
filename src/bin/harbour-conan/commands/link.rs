//! `harbour-conan link` command

use anyhow::Result;

use super::{project_dir, project_node, single_project, CommandContext};
use crate::cli::ProjectArgs;

pub fn execute(args: ProjectArgs, ctx: &CommandContext) -> Result<()> {
    let project_dir = project_dir(args.path)?;
    let node = project_node(&project_dir)?;
    let (mut graph, app) = single_project(&project_dir);

    let mut module = ctx.conan_module()?;
    module.link(&mut graph.application(app), &node)?;

    println!("link: {}", project_dir.display());
    Ok(())
}
