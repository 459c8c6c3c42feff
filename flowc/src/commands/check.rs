use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{open_project, report_cycle_error};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Project root containing flowc.toml (defaults to the current directory)
    #[arg(short, long, default_value = ".")]
    pub project: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let project = open_project(&self.project);
        let mut out = TerminalOutput::new();

        match ops::check(&project) {
            Ok(report) => {
                report.render(&mut out);
                if !report.is_valid() {
                    std::process::exit(1);
                }
                Ok(())
            }
            Err(err) => {
                report_cycle_error(err, &mut out);
                std::process::exit(1);
            }
        }
    }
}
