use eyre::Result;
use flowc_compiler::{Environment, GenerateResult, Generator, GeneratorKind};
use flowc_dialect::Project;
use flowc_ir::{DesktopConfig, Entities, ProjectIR};
use serde::Serialize;

use super::write_inventory;

/// Desktop shell slice. The `windows`, `macos` and `linux` selectors all
/// land here.
pub struct DesktopGenerator;

#[derive(Serialize)]
struct DesktopInventory<'a> {
    pages: &'a Entities,
    #[serde(skip_serializing_if = "Option::is_none")]
    desktop: Option<&'a DesktopConfig>,
}

impl Generator for DesktopGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Desktop
    }

    fn generate(&self, project: &Project, ir: &ProjectIR, env: Environment) -> Result<GenerateResult> {
        let inventory = DesktopInventory {
            pages: &ir.pages,
            desktop: ir.desktop.as_ref(),
        };
        write_inventory(project, self.kind(), env, inventory)
    }
}
