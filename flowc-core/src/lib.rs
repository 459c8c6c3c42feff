//! Core utilities and types for the flowc specification compiler.
//!
//! This crate provides the small pieces shared by every other flowc crate:
//! generated-file writing rules, project versions and helpers for reading
//! loosely-typed YAML values.

mod file;
mod version;
mod yaml;

// File operations
pub use file::{File, WriteResult};
pub use version::Version;
// YAML value helpers
pub use yaml::{lookup, scalar_to_string, string_or};
