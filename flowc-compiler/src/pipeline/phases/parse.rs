//! Parse phase - runs the DialectParser over every discovered file.

use std::error::Error as _;

use eyre::Result;
use flowc_dialect::parse_document;

use crate::{
    pipeline::{CompilationContext, Diagnostic, Phase},
    status::{Stage, StatusLine},
};

/// Parses every source. A failing file does not stop the others from being
/// parsed, so a single run reports all broken files.
pub struct ParsePhase;

impl Phase for ParsePhase {
    fn name(&self) -> &'static str {
        "parse"
    }

    fn description(&self) -> &'static str {
        "Parse specification files into tagged documents"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let sources = std::mem::take(&mut ctx.sources);

        for source in &sources {
            let subject = ctx.display_path(&source.path);
            match parse_document(&source.path, source.dialect) {
                Ok(document) => {
                    ctx.report(StatusLine::ok(Stage::Parse, subject));
                    ctx.documents.push(document);
                }
                Err(err) => {
                    let err = *err;
                    let reason = err
                        .source()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| err.to_string());
                    tracing::debug!(file = %subject, %reason, "specification file failed to parse");
                    ctx.add_diagnostic(
                        Diagnostic::error(self.name(), err.to_string()).at(subject.as_str()),
                    );
                    ctx.report(StatusLine::failed(Stage::Parse, subject, reason));
                    ctx.parse_errors.push(err);
                }
            }
        }

        ctx.sources = sources;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use flowc_dialect::{Dialect, Project, ProjectConfig};

    use super::*;
    use crate::discovery::SourceFile;

    #[test]
    fn test_collects_every_failure() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, content: &str| {
            let path = dir.path().join(name);
            std::fs::write(&path, content).unwrap();
            SourceFile {
                path,
                dialect: Dialect::from_path(std::path::Path::new(name)).unwrap(),
            }
        };
        let sources = vec![
            write("a.flow", "model: [broken\n"),
            write("b.flow", "model:\n  name: Ok\n"),
            write("c.jobflow", "- not a mapping\n"),
        ];

        let project = Project::from_config(dir.path(), ProjectConfig::named("app"));
        let mut ctx = CompilationContext::new(project);
        ctx.sources = sources;
        ParsePhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.documents.len(), 1);
        assert_eq!(ctx.parse_errors.len(), 2);
        assert_eq!(ctx.error_count(), 2);
        assert_eq!(ctx.sources.len(), 3);

        let outcomes: Vec<_> = ctx.status.iter().map(|s| s.outcome.is_failed()).collect();
        assert_eq!(outcomes, vec![true, false, true]);
        assert_eq!(ctx.status[1].subject, "b.flow");
    }
}
