mod build;
mod check;
mod completions;

use std::path::Path;

use build::BuildCommand;
use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use flowc_compiler::CycleError;
use flowc_dialect::Project;

use crate::{
    ops,
    reports::{Output, Report},
};

/// Extension trait for exiting on input errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for flowc_dialect::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Open the project at `root`, exiting with a rendered diagnostic when its
/// flowc.toml is missing or invalid.
pub(crate) fn open_project(root: &Path) -> Project {
    Project::open(root).unwrap_or_exit()
}

/// Render what a stopped cycle recorded, then every file error through
/// miette.
pub(crate) fn report_cycle_error(err: CycleError, out: &mut dyn Output) {
    ops::failure(&err).render(out);
    eprintln!("{:?}", miette::Report::new(err));
}

#[derive(Parser)]
#[command(name = "flowc")]
#[command(version)]
#[command(about = "Compile declarative application specifications")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Build(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build every target the selector implies, optionally watching for changes
    Build(BuildCommand),

    /// Parse and merge specification files without generating anything
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
