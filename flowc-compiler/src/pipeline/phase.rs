//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;

/// Information about a pipeline phase.
#[derive(Debug, Clone)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A phase in the compilation pipeline.
///
/// Phases run in order against one [`CompilationContext`]. Built-in phases:
/// - `DiscoverPhase` - finds specification files under the flows directory
/// - `ParsePhase` - parses every discovered file, collecting all failures
/// - `MergePhase` - folds the documents into a fresh IR
/// - `SynthesizePhase` - adds default pages for unreferenced models
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Run this phase on the compilation context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Per-file problems are
    /// recorded in the context instead.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
