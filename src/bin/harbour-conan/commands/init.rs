//! `harbour-conan init` command

use anyhow::Result;

use super::{project, project_dir, project_node, CommandContext};
use crate::cli::InitArgs;
use harbour_conan::core::project::ProjectGraph;
use harbour_conan::util::diagnostic::{emit, suggestions, Diagnostic};
use harbour_conan::util::process::find_executable;

pub fn execute(args: InitArgs, ctx: &CommandContext) -> Result<()> {
    let project_dir = project_dir(args.path)?;

    let mut node = project_node(&project_dir)?;
    if let Some(install) = args.install {
        node.insert("install".to_string(), toml::Value::String(install));
    }
    if let Some(strategy) = args.strategy {
        node.insert("strategy".to_string(), toml::Value::String(strategy.to_string()));
    }
    if args.no_build_missing {
        node.insert("build_missing".to_string(), toml::Value::Boolean(false));
    }

    // Only matters if conan has to run
    if !ctx.settings.toolchain_path(&project_dir).exists()
        && find_executable(&ctx.settings.python).is_none()
    {
        let warning = Diagnostic::warning(format!(
            "python interpreter `{}` not found in PATH",
            ctx.settings.python
        ))
        .with_suggestion(suggestions::PYTHON_NOT_FOUND);
        emit(&warning, ctx.color);
    }

    let mut graph = ProjectGraph::new();
    let app = graph.add_project(project(&project_dir));
    for dir in args.dependents {
        let dir = super::project_dir(Some(dir))?;
        let dependent = graph.add_project(project(&dir));
        graph.add_dependency(dependent, app);
    }

    let mut module = ctx.conan_module()?;
    module.init(&mut graph.application(app), &node)?;

    if args.json {
        let projects: Vec<_> = graph.projects().collect();
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    for project in graph.projects() {
        println!("{} ({})", project.name, project.dir.display());
        for dir in &project.include_dirs {
            println!("  include: {}", dir.display());
        }
        for dir in &project.lib_dirs {
            println!("  lib:     {}", dir.display());
        }
    }

    Ok(())
}
