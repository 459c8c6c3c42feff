//! Merge phase - folds parsed documents into a fresh IR.

use eyre::Result;

use crate::{
    merge::fold_documents,
    pipeline::{CompilationContext, Diagnostic, Phase},
    status::{Stage, StatusLine},
};

/// Merges documents in discovery order. Skipped entirely when any file
/// failed to parse: a half-merged IR is never produced.
pub struct MergePhase;

impl Phase for MergePhase {
    fn name(&self) -> &'static str {
        "merge"
    }

    fn description(&self) -> &'static str {
        "Fold documents into the project IR"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        if !ctx.parse_errors.is_empty() {
            let reason = format!("{} file(s) failed to parse", ctx.parse_errors.len());
            ctx.report(StatusLine::skipped(Stage::Merge, "ir", reason));
            return Ok(());
        }

        let step = fold_documents(&ctx.documents);
        for conflict in &step.conflicts {
            ctx.add_diagnostic(Diagnostic::conflict(conflict));
        }
        for warning in step.warnings {
            ctx.add_warning(self.name(), warning);
        }

        tracing::debug!(
            documents = ctx.documents.len(),
            conflicts = step.conflicts.len(),
            "merged documents"
        );
        ctx.report(StatusLine::ok(
            Stage::Merge,
            format!("{} document(s)", ctx.documents.len()),
        ));
        ctx.conflicts = step.conflicts;
        ctx.ir = Some(step.ir);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use flowc_dialect::{Dialect, Project, ProjectConfig, parse_str};

    use super::*;
    use crate::status::Outcome;

    fn context() -> CompilationContext {
        CompilationContext::new(Project::from_config("/app", ProjectConfig::named("app")))
    }

    #[test]
    fn test_skipped_after_parse_failure() {
        let mut ctx = context();
        let err = parse_str("page: [", "x.flow", Dialect::Flow).unwrap_err();
        ctx.parse_errors.push(*err);

        MergePhase.run(&mut ctx).unwrap();

        assert!(ctx.ir.is_none());
        assert!(matches!(ctx.status[0].outcome, Outcome::Skipped(_)));
    }

    #[test]
    fn test_conflicts_become_info() {
        let mut ctx = context();
        ctx.documents = vec![
            parse_str("model:\n  name: Todo\n", "a.flow", Dialect::Flow).unwrap(),
            parse_str("model:\n  name: Todo\n", "b.flow", Dialect::Flow).unwrap(),
        ];

        MergePhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.conflicts.len(), 1);
        assert!(!ctx.has_errors());
        assert_eq!(ctx.diagnostics.len(), 1);
        assert_eq!(ctx.ir.as_ref().unwrap().models.len(), 1);
    }
}
