//! Specification dialect parsing and project configuration for flowc.
//!
//! This crate owns everything read from disk before merging: the four
//! specification dialects, the DialectParser that turns one file into a
//! tagged [`Document`], and the `flowc.toml` project configuration.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod dialect;
mod document;
mod error;
mod project;

pub use dialect::Dialect;
pub use document::{Document, parse_document, parse_str, strip_comments};
pub use error::{Error, Result, SourceContext};
pub use project::{BuildConfig, CONFIG_FILE, Project, ProjectConfig, ProjectMeta};
