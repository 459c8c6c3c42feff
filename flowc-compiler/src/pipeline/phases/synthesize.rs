//! Synthesize phase - default pages for models without one.

use eyre::Result;

use crate::{
    merge::synthesize_default_pages,
    pipeline::{CompilationContext, Phase},
    status::{Stage, StatusLine},
};

pub struct SynthesizePhase;

impl Phase for SynthesizePhase {
    fn name(&self) -> &'static str {
        "synthesize"
    }

    fn description(&self) -> &'static str {
        "Propose default pages for unreferenced models"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let Some(ir) = ctx.ir.as_mut() else {
            ctx.report(StatusLine::skipped(
                Stage::Synthesize,
                "default pages",
                "no IR",
            ));
            return Ok(());
        };

        let synthesis = synthesize_default_pages(ir);
        for path in &synthesis.kept {
            ctx.add_info(self.name(), format!("kept authored page at '{}'", path));
        }
        ctx.report(StatusLine::ok(
            Stage::Synthesize,
            format!("{} default page(s)", synthesis.inserted.len()),
        ));
        ctx.synthesis = Some(synthesis);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use flowc_dialect::{Project, ProjectConfig};
    use flowc_ir::{ProjectIR, Value};

    use super::*;

    #[test]
    fn test_inserts_pages() {
        let mut ctx =
            CompilationContext::new(Project::from_config("/app", ProjectConfig::named("app")));
        let mut ir = ProjectIR::new();
        ir.models.insert("Todo".into(), Value::Null);
        ir.pages.insert("/todos".into(), Value::Null);
        ctx.ir = Some(ir);

        SynthesizePhase.run(&mut ctx).unwrap();

        let ir = ctx.ir.as_ref().unwrap();
        assert_eq!(ir.pages.len(), 4);
        assert_eq!(ir.pages["/todos"], Value::Null);
        assert_eq!(ctx.status[0].subject, "3 default page(s)");
        assert_eq!(ctx.diagnostics.len(), 1);
    }
}
