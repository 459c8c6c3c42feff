use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use super::ProjectConfig;
use crate::{Error, Result};

/// Name of the configuration file at every project root.
pub const CONFIG_FILE: &str = "flowc.toml";

/// An opened project: its root directory plus parsed flowc.toml.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: ProjectConfig,
}

impl Project {
    /// Open the project rooted at `root` by reading its flowc.toml.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let path = root.join(CONFIG_FILE);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::ConfigIo {
                path: path.clone(),
                source: e,
            })
        })?;
        let config = ProjectConfig::from_str_with_filename(&content, &path.display().to_string())?;

        tracing::debug!(root = %root.display(), name = %config.project.name, "opened project");
        Ok(Self { root, config })
    }

    /// Build a project handle from an already-parsed configuration.
    pub fn from_config(root: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.project.name
    }

    /// Absolute (root-joined) directory holding specification files.
    pub fn flows_dir(&self) -> PathBuf {
        self.root.join(&self.config.build.flows_dir)
    }

    /// Absolute (root-joined) generator output root.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.config.build.output_dir)
    }

    pub fn debounce(&self) -> Duration {
        self.config.build.debounce()
    }

    /// Root-joined path of the external build service, if one is configured.
    pub fn service(&self) -> Option<PathBuf> {
        self.config.build.service.as_ref().map(|p| self.root.join(p))
    }
}
