//! The flowc build pipeline.
//!
//! ```text
//! discover → parse (flowc-dialect) → merge → synthesize → orchestrate
//!                                   ↑                          │
//!                     watch: rebuild on change ←───────────────┘
//! ```
//!
//! - [`discovery`] finds specification files in merge order.
//! - [`merge`] is the IRMerger: a pure fold of documents into a
//!   [`ProjectIR`](flowc_ir::ProjectIR), plus default-page synthesis.
//! - [`pipeline`] runs those steps as phases with plugin hooks and
//!   diagnostics.
//! - [`orchestrator`] dispatches a target selector to generators, isolating
//!   failures per target.
//! - [`cycle`] ties one full build together; [`watch`] repeats it on change.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod build_service;
pub mod cycle;
pub mod discovery;
mod error;
pub mod merge;
pub mod orchestrator;
pub mod pipeline;
pub mod status;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod watch;

pub use build_service::{ServiceOutcome, run_build_service};
pub use cycle::{BuildRequest, CycleReport, IrSummary, run_cycle};
pub use discovery::{Discovery, SourceFile, discover};
pub use error::CycleError;
pub use merge::{MergeConflict, MergeStep, fold_documents, merge};
pub use orchestrator::{
    BuildOrchestrator, Environment, GenerateResult, Generator, GeneratorKind, Target, TargetOutcome,
};
pub use pipeline::{CompilationContext, Compiled, Pipeline};
pub use status::{Outcome, Stage, StatusLine};
pub use watch::{CycleOutcome, Watch, WatchScheduler, WatchSummary};
