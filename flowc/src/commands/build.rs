use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use flowc_compiler::{
    BuildOrchestrator, BuildRequest, Environment, ServiceOutcome, Target, Watch, run_build_service,
    watch::WatchMessage,
};
use flowc_dialect::Project;

use super::{open_project, report_cycle_error};
use crate::{
    generators, ops,
    reports::{Output, Report, TerminalOutput},
};

#[derive(Args)]
pub struct BuildCommand {
    /// Project root containing flowc.toml (defaults to the current directory)
    #[arg(short, long, default_value = ".")]
    pub project: PathBuf,

    /// Target selector: all, backend, frontend, mobile, ios, android,
    /// desktop, windows, macos or linux
    #[arg(short, long, default_value_t = Target::All)]
    pub target: Target,

    /// Build environment: development or production
    #[arg(short, long, default_value_t = Environment::Development)]
    pub env: Environment,

    /// Rebuild whenever a specification file changes
    #[arg(short, long)]
    pub watch: bool,

    /// Skip the external build service even if one is configured
    #[arg(long)]
    pub no_service: bool,
}

impl BuildCommand {
    /// Run the build command
    pub fn run(&self) -> Result<()> {
        let project = open_project(&self.project);
        let request = BuildRequest {
            target: self.target,
            env: self.env,
        };
        let mut out = TerminalOutput::new();

        if !self.no_service && self.run_service(&project, request, &mut out) {
            return Ok(());
        }

        let orchestrator = generators::orchestrator();
        let first = build_once(&project, &orchestrator, request, &mut out);

        if !self.watch {
            if first.is_err() {
                std::process::exit(1);
            }
            return Ok(());
        }

        out.newline();
        Self::watch(&project, &orchestrator, request)
    }

    /// Run the project's build service if it has one. Returns true when the
    /// service completed and replaces the in-process pipeline.
    fn run_service(&self, project: &Project, request: BuildRequest, out: &mut dyn Output) -> bool {
        match run_build_service(project, request, self.watch) {
            ServiceOutcome::Completed { service, stdout } => {
                out.key_value("build service", &service.display().to_string());
                if !stdout.trim().is_empty() {
                    out.preformatted(stdout.trim_end());
                }
                true
            }
            ServiceOutcome::Failed { service, reason } => {
                out.warning(&format!(
                    "build service {} failed ({}); using the built-in pipeline",
                    service.display(),
                    reason
                ));
                false
            }
            ServiceOutcome::Missing(_) | ServiceOutcome::NotConfigured => false,
        }
    }

    fn watch(
        project: &Project,
        orchestrator: &BuildOrchestrator,
        request: BuildRequest,
    ) -> Result<()> {
        let watch = Watch::new(project.flows_dir(), project.debounce());
        let interrupt = watch.sender();
        ctrlc::set_handler(move || {
            // The loop may already be gone; nothing left to stop then.
            let _ = interrupt.send(WatchMessage::Interrupt);
        })
        .wrap_err("failed to install the Ctrl-C handler")?;

        println!(
            "watching {} (press Ctrl-C to stop)",
            watch.flows_dir().display()
        );
        let summary = watch.run(
            || build_once(project, orchestrator, request, &mut TerminalOutput::new()),
            |line| println!("{}", line),
        )?;

        println!(
            "stopped after {} rebuild{} ({} failed)",
            summary.cycles,
            if summary.cycles == 1 { "" } else { "s" },
            summary.failures
        );
        Ok(())
    }
}

/// Run one cycle and render its report. A cycle that stopped before
/// generation, or left any target failed, is an error.
fn build_once(
    project: &Project,
    orchestrator: &BuildOrchestrator,
    request: BuildRequest,
    out: &mut dyn Output,
) -> Result<()> {
    match ops::build(project, orchestrator, request) {
        Ok(report) => {
            report.render(out);
            if !report.is_success() {
                eyre::bail!("{} target(s) failed", report.failed_count());
            }
            Ok(())
        }
        Err(err) => {
            let reason = err.to_string();
            report_cycle_error(err, out);
            Err(eyre::eyre!(reason))
        }
    }
}
