//! BuildOrchestrator: target selection and per-target generator dispatch.

use std::{
    any::Any,
    fmt,
    panic::{self, AssertUnwindSafe},
    path::PathBuf,
    str::FromStr,
};

use eyre::Result;
use flowc_dialect::Project;
use flowc_ir::ProjectIR;
use serde::Serialize;
use thiserror::Error;

use crate::status::{Stage, StatusLine};

/// A `--target` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    All,
    Backend,
    Frontend,
    Mobile,
    Ios,
    Android,
    Desktop,
    Windows,
    Macos,
    Linux,
}

impl Target {
    pub const ALL: [Target; 10] = [
        Target::All,
        Target::Backend,
        Target::Frontend,
        Target::Mobile,
        Target::Ios,
        Target::Android,
        Target::Desktop,
        Target::Windows,
        Target::Macos,
        Target::Linux,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::All => "all",
            Target::Backend => "backend",
            Target::Frontend => "frontend",
            Target::Mobile => "mobile",
            Target::Ios => "ios",
            Target::Android => "android",
            Target::Desktop => "desktop",
            Target::Windows => "windows",
            Target::Macos => "macos",
            Target::Linux => "linux",
        }
    }

    /// The generators this selector implies, in invocation order.
    pub fn generators(&self) -> &'static [GeneratorKind] {
        use GeneratorKind::*;
        match self {
            Target::All => &GeneratorKind::ALL,
            Target::Backend => &[Backend],
            Target::Frontend => &[Frontend],
            Target::Mobile => &[MobileIos, MobileAndroid],
            Target::Ios => &[MobileIos],
            Target::Android => &[MobileAndroid],
            Target::Desktop | Target::Windows | Target::Macos | Target::Linux => &[Desktop],
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseSelectorError {
    kind: &'static str,
    value: String,
    expected: String,
}

impl FromStr for Target {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Target::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSelectorError {
                kind: "target",
                value: s.to_string(),
                expected: Target::ALL.map(|t| t.as_str()).join(", "),
            })
    }
}

/// The build environment handed to every generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ParseSelectorError {
                kind: "environment",
                value: s.to_string(),
                expected: "development, production".into(),
            }),
        }
    }
}

/// A generator contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorKind {
    Backend,
    Frontend,
    MobileIos,
    MobileAndroid,
    Desktop,
}

impl GeneratorKind {
    /// Every contract, in invocation order.
    pub const ALL: [GeneratorKind; 5] = [
        GeneratorKind::Backend,
        GeneratorKind::Frontend,
        GeneratorKind::MobileIos,
        GeneratorKind::MobileAndroid,
        GeneratorKind::Desktop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorKind::Backend => "backend",
            GeneratorKind::Frontend => "frontend",
            GeneratorKind::MobileIos => "mobile-ios",
            GeneratorKind::MobileAndroid => "mobile-android",
            GeneratorKind::Desktop => "desktop",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Files a generator touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateResult {
    pub written: Vec<PathBuf>,
    /// Files whose content already matched.
    pub unchanged: Vec<PathBuf>,
}

/// A per-target code generator.
///
/// Generators read the IR and never modify it. Output must be idempotent
/// for a given IR: the next successful run overwrites whatever a failed run
/// left behind.
pub trait Generator: Send + Sync {
    fn kind(&self) -> GeneratorKind;

    /// Generate this target's artifacts.
    ///
    /// # Errors
    ///
    /// Any error is reported against this generator's target only.
    fn generate(&self, project: &Project, ir: &ProjectIR, env: Environment)
    -> Result<GenerateResult>;
}

/// The result of one generator invocation. `Err` is a generator failure,
/// isolated to this target.
#[derive(Debug)]
pub struct TargetOutcome {
    pub kind: GeneratorKind,
    pub result: Result<GenerateResult>,
}

impl TargetOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn status_line(&self) -> StatusLine {
        match &self.result {
            Ok(_) => StatusLine::ok(Stage::Generate, self.kind.as_str()),
            Err(err) => StatusLine::failed(Stage::Generate, self.kind.as_str(), format!("{:#}", err)),
        }
    }
}

/// Dispatches a target selector to registered generators.
#[derive(Default)]
pub struct BuildOrchestrator {
    generators: Vec<Box<dyn Generator>>,
}

impl BuildOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generator. A later registration for the same contract
    /// replaces the earlier one.
    pub fn register(mut self, generator: impl Generator + 'static) -> Self {
        let kind = generator.kind();
        self.generators.retain(|g| g.kind() != kind);
        self.generators.push(Box::new(generator));
        self
    }

    pub fn generator(&self, kind: GeneratorKind) -> Option<&dyn Generator> {
        self.generators
            .iter()
            .find(|g| g.kind() == kind)
            .map(|g| g.as_ref())
    }

    /// Invoke every generator `target` implies, sequentially, in contract
    /// order. A failing generator never stops its siblings and there is no
    /// rollback of its partial output.
    pub fn orchestrate(
        &self,
        project: &Project,
        ir: &ProjectIR,
        target: Target,
        env: Environment,
    ) -> Vec<TargetOutcome> {
        target
            .generators()
            .iter()
            .map(|&kind| {
                let result = match self.generator(kind) {
                    Some(generator) => {
                        tracing::info!(generator = %kind, %env, "running generator");
                        panic::catch_unwind(AssertUnwindSafe(|| generator.generate(project, ir, env)))
                            .unwrap_or_else(|payload| {
                                Err(eyre::eyre!("generator panicked: {}", panic_message(&*payload)))
                            })
                    }
                    None => Err(eyre::eyre!("no generator registered for {}", kind)),
                };
                if let Err(err) = &result {
                    tracing::warn!(generator = %kind, "generator failed: {:#}", err);
                }
                TargetOutcome { kind, result }
            })
            .collect()
    }
}

/// The message carried by a panic payload, if it has one.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
mod tests {
    use flowc_dialect::ProjectConfig;

    use super::*;
    use crate::testing::{FailingGenerator, Recorder, TestProject};

    fn project() -> Project {
        Project::from_config("/app", ProjectConfig::named("app"))
    }

    #[test]
    fn test_target_expansion() {
        assert_eq!(Target::All.generators(), &GeneratorKind::ALL);
        assert_eq!(
            Target::Mobile.generators(),
            &[GeneratorKind::MobileIos, GeneratorKind::MobileAndroid]
        );
        assert_eq!(Target::Ios.generators(), &[GeneratorKind::MobileIos]);
        assert_eq!(Target::Macos.generators(), &[GeneratorKind::Desktop]);
    }

    #[test]
    fn test_parse_selectors() {
        assert_eq!("IOS".parse::<Target>().unwrap(), Target::Ios);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);

        let err = "web".parse::<Target>().unwrap_err();
        assert!(err.to_string().starts_with("unknown target 'web'"));
    }

    #[test]
    fn test_failure_is_isolated() {
        let recording = Recorder::new();
        let mut orchestrator = BuildOrchestrator::new();
        for generator in recording.generators() {
            orchestrator = orchestrator.register(generator);
        }
        let orchestrator = orchestrator.register(FailingGenerator::new(GeneratorKind::Backend));

        let fixture = TestProject::new("app");
        let outcomes = orchestrator.orchestrate(
            &fixture.project(),
            &ProjectIR::new(),
            Target::All,
            Environment::Development,
        );

        let ok: Vec<_> = outcomes.iter().map(TargetOutcome::is_ok).collect();
        assert_eq!(ok, vec![false, true, true, true, true]);
        assert!(fixture.read_output("backend.partial").is_some());
        assert_eq!(
            recording.calls(),
            vec![
                GeneratorKind::Frontend,
                GeneratorKind::MobileIos,
                GeneratorKind::MobileAndroid,
                GeneratorKind::Desktop,
            ]
        );
    }

    struct PanickingGenerator;

    impl Generator for PanickingGenerator {
        fn kind(&self) -> GeneratorKind {
            GeneratorKind::Backend
        }

        fn generate(&self, _: &Project, _: &ProjectIR, _: Environment) -> Result<GenerateResult> {
            panic!("template index out of range")
        }
    }

    #[test]
    fn test_panic_is_isolated() {
        let recording = Recorder::new();
        let orchestrator = recording
            .generators()
            .into_iter()
            .fold(BuildOrchestrator::new(), BuildOrchestrator::register)
            .register(PanickingGenerator);

        let fixture = TestProject::new("app");
        let outcomes = orchestrator.orchestrate(
            &fixture.project(),
            &ProjectIR::new(),
            Target::All,
            Environment::Development,
        );

        let ok: Vec<_> = outcomes.iter().map(TargetOutcome::is_ok).collect();
        assert_eq!(ok, vec![false, true, true, true, true]);
        assert_eq!(recording.calls().len(), 4);
        insta::assert_snapshot!(
            outcomes[0].status_line().to_string(),
            @"[generate] backend: failed (generator panicked: template index out of range)"
        );
    }

    #[test]
    fn test_missing_generator_fails_its_target() {
        let outcomes = BuildOrchestrator::new().orchestrate(
            &project(),
            &ProjectIR::new(),
            Target::Backend,
            Environment::Production,
        );
        assert_eq!(outcomes.len(), 1);
        insta::assert_snapshot!(
            outcomes[0].status_line().to_string(),
            @"[generate] backend: failed (no generator registered for backend)"
        );
    }
}
