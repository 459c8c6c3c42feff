//! Report for a cycle that stopped before generation.

use flowc_compiler::StatusLine;

use super::{
    diagnostics::DiagnosticLines,
    output::{Output, Report},
};

/// Status lines and diagnostics recorded before a cycle was abandoned. The
/// per-file errors themselves are rendered separately through miette.
#[derive(Debug)]
pub struct FailureReport {
    pub status: Vec<StatusLine>,
    pub diagnostics: DiagnosticLines,
}

impl Report for FailureReport {
    fn render(&self, out: &mut dyn Output) {
        for line in &self.status {
            out.preformatted(&line.to_string());
        }
        if !self.diagnostics.is_empty() {
            out.newline();
            self.diagnostics.render(out);
        }
    }
}
