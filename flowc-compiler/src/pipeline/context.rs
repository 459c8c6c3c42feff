//! Compilation context passed through pipeline phases.

use std::path::Path;

use flowc_dialect::{Document, Project};
use flowc_ir::ProjectIR;

use super::diagnostic::{Diagnostic, Severity};
use crate::{
    discovery::SourceFile,
    error::CycleError,
    merge::{MergeConflict, Synthesis},
    status::StatusLine,
};

/// Context passed through all pipeline phases.
///
/// One context belongs to one build cycle. The IR it builds is never reused
/// by a later cycle.
#[derive(Debug)]
pub struct CompilationContext {
    pub project: Project,
    /// Discovered files in merge order (populated by DiscoverPhase).
    pub sources: Vec<SourceFile>,
    /// Successfully parsed documents, in merge order.
    pub documents: Vec<Document>,
    /// Every file that failed to parse in this cycle.
    pub parse_errors: Vec<flowc_dialect::Error>,
    /// The merged IR (populated by MergePhase unless a file failed to parse).
    pub ir: Option<ProjectIR>,
    pub conflicts: Vec<MergeConflict>,
    pub synthesis: Option<Synthesis>,
    pub diagnostics: Vec<Diagnostic>,
    pub status: Vec<StatusLine>,
}

/// A cycle's front half that completed without parse errors.
#[derive(Debug)]
pub struct Compiled {
    pub ir: ProjectIR,
    pub sources: Vec<SourceFile>,
    pub conflicts: Vec<MergeConflict>,
    pub synthesis: Synthesis,
    pub diagnostics: Vec<Diagnostic>,
    pub status: Vec<StatusLine>,
}

impl CompilationContext {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            sources: Vec::new(),
            documents: Vec::new(),
            parse_errors: Vec::new(),
            ir: None,
            conflicts: Vec::new(),
            synthesis: None,
            diagnostics: Vec::new(),
            status: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Record a status line and mirror it to the log.
    pub fn report(&mut self, line: StatusLine) {
        tracing::debug!(stage = %line.stage, subject = %line.subject, outcome = %line.outcome, "status");
        self.status.push(line);
    }

    /// `path` relative to the project root, for status lines.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(self.project.root())
            .unwrap_or(path)
            .display()
            .to_string()
    }

    /// Close the front half of the cycle.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::Parse`] carrying every file error if any file
    /// failed to parse, so that no partial IR reaches a generator.
    pub fn finish(self) -> Result<Compiled, CycleError> {
        if !self.parse_errors.is_empty() {
            return Err(CycleError::Parse {
                errors: self.parse_errors,
                status: self.status,
                diagnostics: self.diagnostics,
            });
        }

        let ir = self
            .ir
            .ok_or_else(|| eyre::eyre!("IR not set - did MergePhase run?"))?;

        Ok(Compiled {
            ir,
            sources: self.sources,
            conflicts: self.conflicts,
            synthesis: self.synthesis.unwrap_or_default(),
            diagnostics: self.diagnostics,
            status: self.status,
        })
    }
}
