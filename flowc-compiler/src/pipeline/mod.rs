//! The build cycle's front half as a pipeline of phases.
//!
//! [`Pipeline`] runs discover → parse → merge → synthesize over a fresh
//! [`CompilationContext`], calling plugin hooks around each phase:
//!
//! - Explicit phase boundaries, each emitting status lines
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection
//!
//! # Example
//!
//! ```ignore
//! use flowc_compiler::pipeline::Pipeline;
//!
//! let ctx = Pipeline::new().run(project)?;
//! let compiled = ctx.finish()?; // CycleError::Parse if any file failed
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;

pub use context::{CompilationContext, Compiled};
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
