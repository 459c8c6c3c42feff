//! Check command report data structures.

use flowc_compiler::{IrSummary, StatusLine};

use super::{
    diagnostics::DiagnosticLines,
    output::{Output, Report},
    summary::render_ir,
};

/// Report data from a generation-free pass over the project.
#[derive(Debug)]
pub struct CheckReport {
    pub project_name: String,
    /// Number of specification files discovered.
    pub files: usize,
    pub status: Vec<StatusLine>,
    pub diagnostics: DiagnosticLines,
    pub summary: IrSummary,
    pub synthesized: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.diagnostics.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for line in &self.status {
            out.preformatted(&line.to_string());
        }

        if !self.diagnostics.is_empty() {
            out.newline();
            self.diagnostics.render(out);
        }

        if self.is_valid() {
            out.newline();
            out.preformatted(&format!(
                "✓ {} is valid ({} file{})",
                self.project_name,
                self.files,
                if self.files == 1 { "" } else { "s" }
            ));
        }

        render_ir(out, &self.summary, &self.synthesized);
    }
}

#[cfg(test)]
mod tests {
    use flowc_compiler::{Stage, pipeline::Diagnostic};

    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_empty_project() {
        let report = CheckReport {
            project_name: "todo".into(),
            files: 0,
            status: vec![StatusLine::skipped(
                Stage::Discover,
                "src/flows",
                "flows directory not found",
            )],
            diagnostics: DiagnosticLines::from_diagnostics(&[Diagnostic::warning(
                "discover",
                "flows directory not found",
            )
            .at("src/flows")]),
            summary: IrSummary::default(),
            synthesized: Vec::new(),
        };

        insta::assert_snapshot!(BufferOutput::render(&report), @r"
        [discover] src/flows: skipped (flows directory not found)

        warning: flows directory not found
          --> src/flows

        ✓ todo is valid (0 files)
        ");
    }
}
