use eyre::Result;
use flowc_compiler::{Environment, GenerateResult, Generator, GeneratorKind};
use flowc_dialect::Project;
use flowc_ir::{Entities, I18nConfig, IconsConfig, Mapping, ProjectIR, SmartForm};
use serde::Serialize;

use super::write_inventory;

/// Web client slice: pages and everything they render with.
pub struct FrontendGenerator;

#[derive(Serialize)]
struct FrontendInventory<'a> {
    pages: &'a Entities,
    theme: &'a Mapping,
    smart_forms: &'a [SmartForm],
    webrtc_streams: &'a Entities,
    lazy_imports: &'a Entities,
    #[serde(skip_serializing_if = "Option::is_none")]
    i18n: Option<&'a I18nConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icons: Option<&'a IconsConfig>,
}

impl Generator for FrontendGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Frontend
    }

    fn generate(&self, project: &Project, ir: &ProjectIR, env: Environment) -> Result<GenerateResult> {
        let inventory = FrontendInventory {
            pages: &ir.pages,
            theme: &ir.theme,
            smart_forms: &ir.smart_forms,
            webrtc_streams: &ir.webrtc_streams,
            lazy_imports: &ir.lazy_imports,
            i18n: ir.i18n.as_ref(),
            icons: ir.icons.as_ref(),
        };
        write_inventory(project, self.kind(), env, inventory)
    }
}
