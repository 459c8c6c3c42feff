use eyre::Result;
use flowc_compiler::{Environment, GenerateResult, Generator, GeneratorKind};
use flowc_dialect::Project;
use flowc_ir::{Entities, Mapping, ProjectIR, PushNotificationsConfig};
use serde::Serialize;

use super::write_inventory;

/// One generator type serves both mobile contracts.
pub struct MobileGenerator {
    kind: GeneratorKind,
    platform: &'static str,
}

impl MobileGenerator {
    pub fn ios() -> Self {
        Self {
            kind: GeneratorKind::MobileIos,
            platform: "ios",
        }
    }

    pub fn android() -> Self {
        Self {
            kind: GeneratorKind::MobileAndroid,
            platform: "android",
        }
    }
}

#[derive(Serialize)]
struct MobileInventory<'a> {
    platform: &'static str,
    pages: &'a Entities,
    theme: &'a Mapping,
    #[serde(skip_serializing_if = "Option::is_none")]
    push_notifications: Option<&'a PushNotificationsConfig>,
}

impl Generator for MobileGenerator {
    fn kind(&self) -> GeneratorKind {
        self.kind
    }

    fn generate(&self, project: &Project, ir: &ProjectIR, env: Environment) -> Result<GenerateResult> {
        let inventory = MobileInventory {
            platform: self.platform,
            pages: &ir.pages,
            theme: &ir.theme,
            push_notifications: ir.push_notifications.as_ref(),
        };
        write_inventory(project, self.kind, env, inventory)
    }
}
