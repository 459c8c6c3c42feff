//! Build command report data structures.

use flowc_compiler::{BuildRequest, GeneratorKind, IrSummary, StatusLine};

use super::{
    diagnostics::DiagnosticLines,
    output::{Output, Report},
    summary::render_ir,
};

/// Report data from one build cycle.
#[derive(Debug)]
pub struct BuildReport {
    /// Project name from flowc.toml.
    pub project_name: String,
    /// Project version from flowc.toml.
    pub project_version: String,
    pub request: BuildRequest,
    /// Per-stage status lines, in the order they were recorded.
    pub status: Vec<StatusLine>,
    pub diagnostics: DiagnosticLines,
    pub summary: IrSummary,
    /// Paths of synthesized default pages.
    pub synthesized: Vec<String>,
    /// One entry per generator the target implied.
    pub targets: Vec<TargetSummary>,
    /// Output root, relative to the project root.
    pub output_dir: String,
}

/// What one generator did.
#[derive(Debug)]
pub struct TargetSummary {
    pub kind: GeneratorKind,
    pub written: usize,
    pub unchanged: usize,
    /// The generator's failure, if it failed.
    pub error: Option<String>,
}

impl BuildReport {
    /// True when every generator that ran succeeded.
    pub fn is_success(&self) -> bool {
        self.targets.iter().all(|t| t.error.is_none())
    }

    pub fn failed_count(&self) -> usize {
        self.targets.iter().filter(|t| t.error.is_some()).count()
    }
}

impl Report for BuildReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&format!("{} v{}", self.project_name, self.project_version));
        out.key_value("target", self.request.target.as_str());
        out.key_value("env", self.request.env.as_str());
        out.newline();

        for line in &self.status {
            out.preformatted(&line.to_string());
        }

        if !self.diagnostics.is_empty() {
            out.newline();
            self.diagnostics.render(out);
        }

        render_ir(out, &self.summary, &self.synthesized);

        if !self.targets.is_empty() {
            out.newline();
            out.section("Targets");
            for target in &self.targets {
                match &target.error {
                    None => out.added_item(&format!(
                        "{} ({} written, {} unchanged)",
                        target.kind, target.written, target.unchanged
                    )),
                    Some(err) => out.failed_item(&format!("{}: {}", target.kind, err)),
                }
            }
            out.newline();
            out.key_value("Output", &format!("{}/", self.output_dir));
        }
    }
}

#[cfg(test)]
mod tests {
    use flowc_compiler::{Environment, Stage, Target};

    use super::*;
    use crate::reports::output::BufferOutput;

    fn report() -> BuildReport {
        BuildReport {
            project_name: "todo".into(),
            project_version: "0.1.0".into(),
            request: BuildRequest {
                target: Target::All,
                env: Environment::Production,
            },
            status: vec![
                StatusLine::ok(Stage::Discover, "src/flows (1 files)"),
                StatusLine::ok(Stage::Parse, "src/flows/todo.flow"),
                StatusLine::ok(Stage::Generate, "backend"),
                StatusLine::failed(Stage::Generate, "frontend", "disk full"),
            ],
            diagnostics: DiagnosticLines::default(),
            summary: IrSummary {
                categories: vec![("models", 1), ("pages", 4), ("endpoints", 0)],
                sections: vec!["payments"],
            },
            synthesized: vec!["/todos".into(), "/todos/create".into()],
            targets: vec![
                TargetSummary {
                    kind: GeneratorKind::Backend,
                    written: 1,
                    unchanged: 0,
                    error: None,
                },
                TargetSummary {
                    kind: GeneratorKind::Frontend,
                    written: 0,
                    unchanged: 0,
                    error: Some("disk full".into()),
                },
            ],
            output_dir: "dist".into(),
        }
    }

    #[test]
    fn test_render() {
        insta::assert_snapshot!(BufferOutput::render(&report()), @r"
        todo v0.1.0
        ===========
        target: all
        env: production

        [discover] src/flows (1 files): ok
        [parse] src/flows/todo.flow: ok
        [generate] backend: ok
        [generate] frontend: failed (disk full)

        IR:
          models: 1
          pages: 4
          sections: payments

        Default pages:
          - /todos
          - /todos/create

        Targets:
          + backend (1 written, 0 unchanged)
          ✗ frontend: disk full

        Output: dist/
        ");
    }

    #[test]
    fn test_failed_count() {
        let report = report();
        assert!(!report.is_success());
        assert_eq!(report.failed_count(), 1);
    }
}
