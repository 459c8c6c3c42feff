//! Built-in pipeline phases.
//!
//! - [`DiscoverPhase`] - finds specification files
//! - [`ParsePhase`] - parses every file, collecting failures
//! - [`MergePhase`] - folds documents into the IR
//! - [`SynthesizePhase`] - adds default pages

mod discover;
mod merge;
mod parse;
mod synthesize;

pub use discover::DiscoverPhase;
pub use merge::MergePhase;
pub use parse::ParsePhase;
pub use synthesize::SynthesizePhase;
