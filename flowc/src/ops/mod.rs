//! Core operations.
//!
//! This module contains the business logic for flowc commands,
//! separated from CLI argument parsing and output rendering.

pub mod build;
pub mod check;

pub use build::{build, failure};
pub use check::check;
