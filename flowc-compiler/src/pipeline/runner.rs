//! Pipeline runner.

use eyre::Result;
use flowc_dialect::Project;

use super::{
    CompilationContext, Phase, Plugin,
    phases::{DiscoverPhase, MergePhase, ParsePhase, SynthesizePhase},
};

/// The compilation pipeline.
///
/// Runs the built-in phases (discover, parse, merge, synthesize) followed by
/// any user phases, calling plugin hooks before and after each phase. A
/// pipeline holds no state between runs and can drive any number of cycles.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(MyPlugin);
/// let ctx = pipeline.run(project)?;
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run every phase against a fresh context for `project`.
    ///
    /// File-level parse failures do not make this return an error; they are
    /// collected in the context and surface from
    /// [`CompilationContext::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if a phase or plugin fails fatally (for example the
    /// flows directory cannot be read).
    pub fn run(&self, project: Project) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(project);

        let builtin_phases: Vec<Box<dyn Phase>> = vec![
            Box::new(DiscoverPhase),
            Box::new(ParsePhase),
            Box::new(MergePhase),
            Box::new(SynthesizePhase),
        ];

        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();
        tracing::trace!(phase = phase_name, "running phase");

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
