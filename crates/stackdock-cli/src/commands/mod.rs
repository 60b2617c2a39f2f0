//! CLI command definitions and dispatch.

pub mod build;
pub mod info;
pub mod list;

use clap::{Parser, Subcommand};

/// stackdock — compose a service stack from the template catalog.
#[derive(Parser, Debug)]
#[command(name = "sdock", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compose the selected services and write the generated artifacts.
    Build(build::BuildArgs),
    /// List the cataloged service templates.
    List(list::ListArgs),
    /// Show help links, ports, and helper commands for one service.
    Info(info::InfoArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Build(args) => build::execute(args),
        Command::List(args) => list::execute(args),
        Command::Info(args) => info::execute(args),
    }
}
