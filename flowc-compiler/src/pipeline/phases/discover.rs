//! Discover phase - finds specification files under the flows directory.

use eyre::Result;

use crate::{
    discovery::discover_in,
    pipeline::{CompilationContext, Diagnostic, Phase},
    status::{Stage, StatusLine},
};

pub struct DiscoverPhase;

impl Phase for DiscoverPhase {
    fn name(&self) -> &'static str {
        "discover"
    }

    fn description(&self) -> &'static str {
        "Find specification files in the flows directory"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let flows_dir = ctx.project.flows_dir();
        let subject = ctx.display_path(&flows_dir);
        let discovery = discover_in(&flows_dir)?;

        if discovery.missing_dir {
            ctx.add_diagnostic(
                Diagnostic::warning(self.name(), "flows directory not found").at(subject.as_str()),
            );
        }

        let line = match discovery.files.len() {
            0 => StatusLine::skipped(Stage::Discover, subject, "no specification files found"),
            n => StatusLine::ok(Stage::Discover, format!("{} ({} files)", subject, n)),
        };
        ctx.report(line);
        ctx.sources = discovery.files;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use flowc_dialect::{Project, ProjectConfig};

    use super::*;
    use crate::status::Outcome;

    #[test]
    fn test_missing_flows_dir() {
        let dir = tempfile::tempdir().unwrap();
        let project = Project::from_config(dir.path(), ProjectConfig::named("app"));
        let mut ctx = CompilationContext::new(project);

        DiscoverPhase.run(&mut ctx).unwrap();

        assert!(ctx.sources.is_empty());
        assert_eq!(ctx.warning_count(), 1);
        assert_eq!(
            ctx.status[0].outcome,
            Outcome::Skipped("no specification files found".into())
        );
        assert_eq!(ctx.status[0].subject, "src/flows");
    }

    #[test]
    fn test_finds_files() {
        let dir = tempfile::tempdir().unwrap();
        let flows = dir.path().join("src/flows");
        std::fs::create_dir_all(&flows).unwrap();
        std::fs::write(flows.join("todo.flow"), "model: {name: Todo}\n").unwrap();

        let project = Project::from_config(dir.path(), ProjectConfig::named("app"));
        let mut ctx = CompilationContext::new(project);
        DiscoverPhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.sources.len(), 1);
        assert_eq!(ctx.status[0].to_string(), "[discover] src/flows (1 files): ok");
    }
}
