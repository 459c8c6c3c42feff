//! One build cycle: Discovery → Parse → Merge → Orchestrate.

use flowc_dialect::Project;
use flowc_ir::ProjectIR;

use crate::{
    error::CycleError,
    merge::Synthesis,
    orchestrator::{BuildOrchestrator, Environment, Target, TargetOutcome},
    pipeline::{Diagnostic, Pipeline},
    status::{Stage, StatusLine},
};

/// Per-invocation build settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildRequest {
    pub target: Target,
    pub env: Environment,
}

/// Entity counts kept after the cycle's IR has been dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IrSummary {
    pub categories: Vec<(&'static str, usize)>,
    pub sections: Vec<&'static str>,
}

impl IrSummary {
    pub fn of(ir: &ProjectIR) -> Self {
        Self {
            categories: ir.category_counts(),
            sections: ir.configured_sections(),
        }
    }

    /// Categories holding at least one entity.
    pub fn non_empty(&self) -> impl Iterator<Item = &(&'static str, usize)> {
        self.categories.iter().filter(|(_, count)| *count > 0)
    }
}

/// What a completed cycle did.
#[derive(Debug)]
pub struct CycleReport {
    pub request: BuildRequest,
    pub status: Vec<StatusLine>,
    pub diagnostics: Vec<Diagnostic>,
    pub synthesis: Synthesis,
    pub summary: IrSummary,
    /// One entry per generator the target implied. Empty when there was
    /// nothing to build.
    pub outcomes: Vec<TargetOutcome>,
}

impl CycleReport {
    /// True when every generator that ran succeeded.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(TargetOutcome::is_ok)
    }

    pub fn failed_targets(&self) -> impl Iterator<Item = &TargetOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }
}

/// Run one full build cycle against a fresh IR.
///
/// The IR is built, handed read-only to each generator in turn and dropped
/// before this returns.
///
/// # Errors
///
/// Returns [`CycleError::Parse`] when any specification file fails to parse;
/// no generator runs in that case. Generator failures are not errors here:
/// they are reported per target in [`CycleReport::outcomes`].
pub fn run_cycle(
    project: &Project,
    pipeline: &Pipeline,
    orchestrator: &BuildOrchestrator,
    request: BuildRequest,
) -> Result<CycleReport, CycleError> {
    tracing::info!(project = project.name(), target = %request.target, env = %request.env, "build cycle started");

    let compiled = pipeline.run(project.clone())?.finish()?;
    let mut status = compiled.status;

    let outcomes = if compiled.sources.is_empty() {
        status.push(StatusLine::skipped(
            Stage::Generate,
            request.target.as_str(),
            "no specification files found",
        ));
        Vec::new()
    } else {
        let outcomes = orchestrator.orchestrate(project, &compiled.ir, request.target, request.env);
        status.extend(outcomes.iter().map(TargetOutcome::status_line));
        outcomes
    };

    let report = CycleReport {
        request,
        status,
        diagnostics: compiled.diagnostics,
        synthesis: compiled.synthesis,
        summary: IrSummary::of(&compiled.ir),
        outcomes,
    };
    tracing::info!(
        succeeded = report.outcomes.iter().filter(|o| o.is_ok()).count(),
        failed = report.failed_targets().count(),
        "build cycle finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Recorder, TestProject};

    fn orchestrator(recorder: &Recorder) -> BuildOrchestrator {
        recorder
            .generators()
            .into_iter()
            .fold(BuildOrchestrator::new(), BuildOrchestrator::register)
    }

    #[test]
    fn test_empty_project_builds_nothing() {
        let fixture = TestProject::new("app");
        let recorder = Recorder::new();

        let report = run_cycle(
            &fixture.project(),
            &Pipeline::new(),
            &orchestrator(&recorder),
            BuildRequest::default(),
        )
        .unwrap();

        assert!(report.outcomes.is_empty());
        assert!(recorder.calls().is_empty());
        insta::assert_snapshot!(
            report.status.last().unwrap().to_string(),
            @"[generate] all: skipped (no specification files found)"
        );
    }

    #[test]
    fn test_target_subset() {
        let fixture = TestProject::new("app").flow("todo.flow", "model:\n  name: Todo\n");
        let recorder = Recorder::new();

        let report = run_cycle(
            &fixture.project(),
            &Pipeline::new(),
            &orchestrator(&recorder),
            BuildRequest {
                target: Target::Mobile,
                env: Environment::Production,
            },
        )
        .unwrap();

        assert!(report.is_success());
        assert_eq!(report.outcomes.len(), 2);
        let log = recorder.log();
        assert!(log.iter().all(|c| c.env == Environment::Production));
        assert!(log[0].ir.models.contains_key("Todo"));
        assert_eq!(report.summary.sections, Vec::<&str>::new());
        assert_eq!(report.synthesis.inserted.len(), 4);
    }
}
