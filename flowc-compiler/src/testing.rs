//! Test utilities for the build pipeline.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use eyre::Result;
use flowc_core::{File, WriteResult};
use flowc_dialect::{BuildConfig, CONFIG_FILE, Project};
use flowc_ir::ProjectIR;
use tempfile::TempDir;

use crate::orchestrator::{Environment, GenerateResult, Generator, GeneratorKind};

/// A throwaway project directory with a `flowc.toml` and an empty flows
/// directory.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new(name: &str) -> Self {
        Self::with_config(&format!("[project]\nname = \"{}\"\n", name))
    }

    /// Create a project from a complete `flowc.toml`. The default flows
    /// directory is created either way.
    pub fn with_config(config: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        std::fs::write(dir.path().join(CONFIG_FILE), config).expect("failed to write flowc.toml");
        std::fs::create_dir_all(dir.path().join(BuildConfig::DEFAULT_FLOWS_DIR))
            .expect("failed to create flows dir");
        Self { dir }
    }

    /// Add a specification file to the flows directory.
    pub fn flow(self, file_name: &str, content: &str) -> Self {
        self.write(file_name, content);
        self
    }

    /// Write (or overwrite) a specification file in place.
    pub fn write(&self, file_name: &str, content: &str) {
        std::fs::write(self.flows_dir().join(file_name), content)
            .unwrap_or_else(|e| panic!("failed to write {}: {}", file_name, e));
    }

    pub fn remove(&self, file_name: &str) {
        std::fs::remove_file(self.flows_dir().join(file_name))
            .unwrap_or_else(|e| panic!("failed to remove {}: {}", file_name, e));
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn flows_dir(&self) -> PathBuf {
        self.project().flows_dir()
    }

    /// Open the project, panicking if its configuration is invalid.
    pub fn project(&self) -> Project {
        Project::open(self.root()).unwrap_or_else(|e| panic!("invalid test project: {:?}", e))
    }

    /// Read a file relative to the output directory.
    pub fn read_output(&self, relative: &str) -> Option<String> {
        std::fs::read_to_string(self.project().output_dir().join(relative)).ok()
    }
}

/// One recorded generator invocation.
#[derive(Debug, Clone)]
pub struct Call {
    pub kind: GeneratorKind,
    pub env: Environment,
    /// The IR snapshot the generator received.
    pub ir: ProjectIR,
}

/// Shared log behind a set of [`RecordingGenerator`]s.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// One recording generator per contract, all sharing this log.
    pub fn generators(&self) -> Vec<RecordingGenerator> {
        GeneratorKind::ALL
            .into_iter()
            .map(|kind| self.generator(kind))
            .collect()
    }

    pub fn generator(&self, kind: GeneratorKind) -> RecordingGenerator {
        RecordingGenerator {
            kind,
            calls: Arc::clone(&self.calls),
        }
    }

    /// Generator kinds in invocation order.
    pub fn calls(&self) -> Vec<GeneratorKind> {
        self.log().iter().map(|c| c.kind).collect()
    }

    pub fn log(&self) -> Vec<Call> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }
}

/// Records each call and writes `<output_dir>/<kind>.txt` listing the
/// model names it saw.
pub struct RecordingGenerator {
    kind: GeneratorKind,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Generator for RecordingGenerator {
    fn kind(&self) -> GeneratorKind {
        self.kind
    }

    fn generate(
        &self,
        project: &Project,
        ir: &ProjectIR,
        env: Environment,
    ) -> Result<GenerateResult> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(Call {
                kind: self.kind,
                env,
                ir: ir.clone(),
            });
        }

        let models: Vec<&str> = ir.models.keys().map(String::as_str).collect();
        let file = File::new(
            project.output_dir().join(format!("{}.txt", self.kind)),
            models.join("\n"),
        );
        let mut result = GenerateResult::default();
        match file.write()? {
            WriteResult::Unchanged => result.unchanged.push(file.path().to_path_buf()),
            WriteResult::Written => result.written.push(file.path().to_path_buf()),
        }
        Ok(result)
    }
}

/// Writes `<output_dir>/<kind>.partial` and then fails.
pub struct FailingGenerator {
    kind: GeneratorKind,
}

impl FailingGenerator {
    pub fn new(kind: GeneratorKind) -> Self {
        Self { kind }
    }
}

impl Generator for FailingGenerator {
    fn kind(&self) -> GeneratorKind {
        self.kind
    }

    fn generate(&self, project: &Project, _ir: &ProjectIR, _env: Environment) -> Result<GenerateResult> {
        File::new(
            project.output_dir().join(format!("{}.partial", self.kind)),
            "partial",
        )
        .write()?;
        eyre::bail!("{} generator exploded", self.kind)
    }
}
