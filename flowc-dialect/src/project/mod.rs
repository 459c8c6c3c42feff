//! Project configuration for flowc.toml files.

mod file;
mod parse;

use std::{path::PathBuf, time::Duration};

use flowc_core::Version;
use serde::Deserialize;

pub use file::{CONFIG_FILE, Project};

/// Root configuration for flowc.toml
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectConfig {
    pub project: ProjectMeta,

    #[serde(default)]
    pub build: BuildConfig,
}

/// `[project]` table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectMeta {
    pub name: String,

    #[serde(default)]
    pub version: Version,

    pub description: Option<String>,
}

/// `[build]` table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Directory holding specification files, relative to the project root.
    pub flows_dir: PathBuf,

    /// Root directory for generator output, relative to the project root.
    pub output_dir: PathBuf,

    /// Minimum time between accepted watch triggers, in milliseconds.
    pub debounce_ms: u64,

    /// External build service executable, relative to the project root.
    pub service: Option<PathBuf>,
}

impl BuildConfig {
    pub const DEFAULT_FLOWS_DIR: &'static str = "src/flows";
    pub const DEFAULT_OUTPUT_DIR: &'static str = "dist";
    pub const MIN_DEBOUNCE_MS: u64 = 1000;

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            flows_dir: PathBuf::from(Self::DEFAULT_FLOWS_DIR),
            output_dir: PathBuf::from(Self::DEFAULT_OUTPUT_DIR),
            debounce_ms: Self::MIN_DEBOUNCE_MS,
            service: None,
        }
    }
}

impl ProjectConfig {
    /// A configuration with the given name and every other setting defaulted.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            project: ProjectMeta {
                name: name.into(),
                version: Version::default(),
                description: None,
            },
            build: BuildConfig::default(),
        }
    }
}
