//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod build;
mod check;
mod diagnostics;
mod failure;
mod output;
mod summary;

pub use build::{BuildReport, TargetSummary};
pub use check::CheckReport;
pub use diagnostics::DiagnosticLines;
pub use failure::FailureReport;
pub use output::{Output, Report, TerminalOutput};
