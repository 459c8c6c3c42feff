//! IR summary rendering shared by `build` and `check`.

use flowc_compiler::IrSummary;

use super::output::Output;

/// Render non-empty categories, configured sections and synthesized pages.
pub(super) fn render_ir(out: &mut dyn Output, summary: &IrSummary, synthesized: &[String]) {
    let mut categories = summary.non_empty().peekable();
    if categories.peek().is_some() || !summary.sections.is_empty() {
        out.newline();
        out.section("IR");
        for (category, count) in categories {
            out.key_value_indented(category, &count.to_string());
        }
        if !summary.sections.is_empty() {
            out.key_value_indented("sections", &summary.sections.join(", "));
        }
    }

    if !synthesized.is_empty() {
        out.newline();
        out.section("Default pages");
        for path in synthesized {
            out.list_item(path);
        }
    }
}
