//! Build operation - one full cycle against the registered generators.

use flowc_compiler::{
    BuildOrchestrator, BuildRequest, CycleError, Pipeline, TargetOutcome, run_cycle,
};
use flowc_dialect::Project;

use crate::reports::{BuildReport, DiagnosticLines, FailureReport, TargetSummary};

/// Execute one build cycle.
///
/// Generator failures are reported per target inside the returned report.
///
/// # Errors
///
/// Returns the [`CycleError`] when the cycle stopped before generation.
pub fn build(
    project: &Project,
    orchestrator: &BuildOrchestrator,
    request: BuildRequest,
) -> Result<BuildReport, CycleError> {
    let cycle = run_cycle(project, &Pipeline::new(), orchestrator, request)?;

    Ok(BuildReport {
        project_name: project.name().to_string(),
        project_version: project.config().project.version.to_string(),
        request: cycle.request,
        diagnostics: DiagnosticLines::from_diagnostics(&cycle.diagnostics),
        status: cycle.status,
        summary: cycle.summary,
        synthesized: cycle.synthesis.inserted,
        targets: cycle.outcomes.iter().map(target_summary).collect(),
        output_dir: project.config().build.output_dir.display().to_string(),
    })
}

/// What was recorded before `err` stopped the cycle.
pub fn failure(err: &CycleError) -> FailureReport {
    FailureReport {
        status: err.status().to_vec(),
        diagnostics: DiagnosticLines::from_diagnostics(err.diagnostics()),
    }
}

fn target_summary(outcome: &TargetOutcome) -> TargetSummary {
    match &outcome.result {
        Ok(result) => TargetSummary {
            kind: outcome.kind,
            written: result.written.len(),
            unchanged: result.unchanged.len(),
            error: None,
        },
        Err(err) => TargetSummary {
            kind: outcome.kind,
            written: 0,
            unchanged: 0,
            error: Some(format!("{:#}", err)),
        },
    }
}
