//! Diagnostics grouped by severity for rendering.

use flowc_compiler::pipeline::{Diagnostic, Severity};

use super::output::Output;

/// Pipeline diagnostics split by severity, each pre-formatted with its
/// location.
#[derive(Debug, Default)]
pub struct DiagnosticLines {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
}

impl DiagnosticLines {
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        let mut lines = Self::default();
        for diag in diagnostics {
            let msg = if let Some(loc) = &diag.location {
                format!("{}\n  --> {}", diag.message, loc)
            } else {
                diag.message.clone()
            };

            match diag.severity {
                Severity::Error => lines.errors.push(msg),
                Severity::Warning => lines.warnings.push(msg),
                Severity::Info => lines.infos.push(msg),
            }
        }
        lines
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty() && self.infos.is_empty()
    }

    pub fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }
        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_by_severity() {
        let lines = DiagnosticLines::from_diagnostics(&[
            Diagnostic::warning("discover", "flows directory not found").at("src/flows"),
            Diagnostic::info("merge", "model 'Todo' redefined by b.flow"),
        ]);

        assert!(lines.errors.is_empty());
        assert_eq!(lines.warnings, vec!["flows directory not found\n  --> src/flows"]);
        assert_eq!(lines.infos.len(), 1);
    }
}
