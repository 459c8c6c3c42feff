//! Check operation - parse, merge and synthesize without generating.

use flowc_compiler::{CycleError, IrSummary, Pipeline};
use flowc_dialect::Project;

use crate::reports::{CheckReport, DiagnosticLines};

/// Execute the check operation.
///
/// # Errors
///
/// Returns the [`CycleError`] when any specification file fails to parse.
pub fn check(project: &Project) -> Result<CheckReport, CycleError> {
    let compiled = Pipeline::new().run(project.clone())?.finish()?;

    Ok(CheckReport {
        project_name: project.name().to_string(),
        files: compiled.sources.len(),
        diagnostics: DiagnosticLines::from_diagnostics(&compiled.diagnostics),
        summary: IrSummary::of(&compiled.ir),
        synthesized: compiled.synthesis.inserted,
        status: compiled.status,
    })
}

#[cfg(test)]
mod tests {
    use flowc_compiler::testing::TestProject;

    use super::*;

    #[test]
    fn test_check_generates_nothing() {
        let project = TestProject::new("todo")
            .flow("todo.flow", "model:\n  name: Todo\n")
            .flow("live.liveflow", "websocket:\n  path: /ws\n");

        let report = check(&project.project()).unwrap();

        assert!(report.is_valid());
        assert_eq!(report.files, 2);
        assert!(report.summary.non_empty().any(|(c, n)| *c == "websockets" && *n == 1));
        assert!(!project.project().output_dir().exists());
    }

    #[test]
    fn test_check_parse_failure() {
        let project = TestProject::new("todo").flow("todo.flow", "- a\n- b\n");
        assert!(matches!(
            check(&project.project()),
            Err(CycleError::Parse { .. })
        ));
    }
}
