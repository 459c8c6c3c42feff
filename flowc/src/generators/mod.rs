//! Built-in generators.
//!
//! Each generator writes a deterministic JSON inventory of the IR slice its
//! contract consumes to `<output_dir>/<target>/inventory.json`. Writes go
//! through [`File`] with the default overwrite rule, so an unchanged IR
//! leaves the file untouched.

mod backend;
mod desktop;
mod frontend;
mod mobile;

use backend::BackendGenerator;
use desktop::DesktopGenerator;
use eyre::{Context, Result};
use flowc_compiler::{BuildOrchestrator, Environment, GenerateResult, GeneratorKind};
use flowc_core::{File, Version, WriteResult};
use flowc_dialect::Project;
use frontend::FrontendGenerator;
use mobile::MobileGenerator;
use serde::Serialize;

/// File name every generator writes inside its target directory.
pub const INVENTORY_FILE: &str = "inventory.json";

/// An orchestrator with one built-in generator per contract.
pub fn orchestrator() -> BuildOrchestrator {
    BuildOrchestrator::new()
        .register(BackendGenerator)
        .register(FrontendGenerator)
        .register(MobileGenerator::ios())
        .register(MobileGenerator::android())
        .register(DesktopGenerator)
}

/// Header shared by every inventory.
#[derive(Serialize)]
struct Inventory<'a, T> {
    project: &'a str,
    version: &'a Version,
    target: GeneratorKind,
    env: Environment,
    #[serde(flatten)]
    body: T,
}

/// Serialize `body` under the common header and write it for `kind`.
fn write_inventory<T: Serialize>(
    project: &Project,
    kind: GeneratorKind,
    env: Environment,
    body: T,
) -> Result<GenerateResult> {
    let inventory = Inventory {
        project: project.name(),
        version: &project.config().project.version,
        target: kind,
        env,
        body,
    };
    let mut content = serde_json::to_string_pretty(&inventory)
        .wrap_err_with(|| format!("failed to serialize {} inventory", kind))?;
    content.push('\n');

    let file = File::new(
        project.output_dir().join(kind.as_str()).join(INVENTORY_FILE),
        content,
    );
    let mut result = GenerateResult::default();
    match file.write()? {
        WriteResult::Unchanged => result.unchanged.push(file.path().to_path_buf()),
        WriteResult::Written => result.written.push(file.path().to_path_buf()),
    }
    tracing::debug!(generator = %kind, path = %file.path().display(), "inventory written");
    Ok(result)
}
