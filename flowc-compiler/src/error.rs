use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::{pipeline::Diagnostic, status::StatusLine};

/// Why a build cycle produced no IR.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum CycleError {
    /// At least one specification file failed to parse. Nothing was merged
    /// and no generator ran, so the previous output is untouched.
    #[error("{} specification file(s) failed to parse; generation skipped", .errors.len())]
    #[diagnostic(
        code(flowc::cycle::parse),
        help("fix the files above; the previous build output was left untouched")
    )]
    Parse {
        #[related]
        errors: Vec<flowc_dialect::Error>,
        status: Vec<StatusLine>,
        diagnostics: Vec<Diagnostic>,
    },

    #[error("build cycle failed: {0:#}")]
    #[diagnostic(code(flowc::cycle::pipeline))]
    Pipeline(eyre::Report),
}

impl CycleError {
    /// Status lines recorded before the cycle stopped.
    pub fn status(&self) -> &[StatusLine] {
        match self {
            CycleError::Parse { status, .. } => status,
            CycleError::Pipeline(_) => &[],
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            CycleError::Parse { diagnostics, .. } => diagnostics,
            CycleError::Pipeline(_) => &[],
        }
    }
}

impl From<eyre::Report> for CycleError {
    fn from(report: eyre::Report) -> Self {
        CycleError::Pipeline(report)
    }
}
