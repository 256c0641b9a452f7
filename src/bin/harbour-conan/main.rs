//! harbour-conan CLI - install conan dependencies for Harbour projects

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use harbour_conan::util::diagnostic::emit;
use harbour_conan::ConanError;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::CommandContext;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        match e.downcast_ref::<ConanError>() {
            Some(err) => emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("harbour_conan=debug")
    } else {
        EnvFilter::new("harbour_conan=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let ctx = CommandContext {
        settings: cli.settings(),
        color,
    };

    // Execute command
    match cli.command {
        Commands::Init(args) => commands::init::execute(args, &ctx),
        Commands::Link(args) => commands::link::execute(args, &ctx),
        Commands::Pack(args) => commands::pack::execute(args, &ctx),
        Commands::Requires(args) => commands::requires::execute(args, &ctx),
        Commands::Toolchain(args) => commands::toolchain::execute(args, &ctx),
    }
}
