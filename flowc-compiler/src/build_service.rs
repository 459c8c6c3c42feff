//! External out-of-process build service.
//!
//! A project may name an executable in `build.service`. When it exists,
//! `flowc build` runs it once, blocking, instead of the in-process pipeline.
//! If it cannot be spawned or exits non-zero, the caller falls back to the
//! in-process pipeline. The two never run side by side.

use std::{path::PathBuf, process::Command};

use flowc_dialect::Project;

use crate::cycle::BuildRequest;

/// Environment variables passed to the service.
pub const ENV_TARGET: &str = "FLOWC_TARGET";
pub const ENV_ENV: &str = "FLOWC_ENV";
pub const ENV_WATCH: &str = "FLOWC_WATCH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceOutcome {
    /// No `build.service` in flowc.toml.
    NotConfigured,
    /// Configured, but nothing exists at the path.
    Missing(PathBuf),
    /// The service ran and exited successfully; it replaced the pipeline.
    Completed { service: PathBuf, stdout: String },
    /// The service could not be spawned or exited non-zero.
    Failed { service: PathBuf, reason: String },
}

impl ServiceOutcome {
    /// True when the in-process pipeline must not run.
    pub fn replaces_pipeline(&self) -> bool {
        matches!(self, ServiceOutcome::Completed { .. })
    }
}

/// Detect and run the project's build service.
pub fn run_build_service(project: &Project, request: BuildRequest, watch: bool) -> ServiceOutcome {
    let Some(service) = project.service() else {
        return ServiceOutcome::NotConfigured;
    };
    if !service.is_file() {
        tracing::debug!(service = %service.display(), "build service not found");
        return ServiceOutcome::Missing(service);
    }

    let mut command = Command::new(&service);
    command
        .arg(project.root())
        .current_dir(project.root())
        .env(ENV_TARGET, request.target.as_str())
        .env(ENV_ENV, request.env.as_str())
        .env(ENV_WATCH, if watch { "1" } else { "0" });
    if watch {
        command.arg("--watch");
    }

    tracing::info!(service = %service.display(), "running external build service");
    match command.output() {
        Ok(output) if output.status.success() => ServiceOutcome::Completed {
            service,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        },
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("exited with {}", output.status),
                stderr => format!("exited with {}: {}", output.status, stderr),
            };
            tracing::warn!(service = %service.display(), %reason, "build service failed");
            ServiceOutcome::Failed { service, reason }
        }
        Err(err) => {
            tracing::warn!(service = %service.display(), "failed to spawn build service: {}", err);
            ServiceOutcome::Failed {
                service,
                reason: format!("failed to spawn: {}", err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestProject;

    fn with_service(service: &str) -> TestProject {
        TestProject::with_config(&format!(
            "[project]\nname = \"app\"\n\n[build]\nservice = \"{}\"\n",
            service
        ))
    }

    #[test]
    fn test_not_configured() {
        let fixture = TestProject::new("app");
        let outcome = run_build_service(&fixture.project(), BuildRequest::default(), false);
        assert_eq!(outcome, ServiceOutcome::NotConfigured);
        assert!(!outcome.replaces_pipeline());
    }

    #[test]
    fn test_missing_executable() {
        let fixture = with_service("bin/build-service");
        let outcome = run_build_service(&fixture.project(), BuildRequest::default(), false);
        assert!(matches!(outcome, ServiceOutcome::Missing(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_service_replaces_pipeline() {
        let fixture = with_service("/bin/echo");
        let outcome = run_build_service(&fixture.project(), BuildRequest::default(), true);
        match &outcome {
            ServiceOutcome::Completed { stdout, .. } => {
                assert!(stdout.contains("--watch"));
                assert!(stdout.contains(&fixture.root().display().to_string()));
            }
            other => panic!("expected completion, got {other:?}"),
        }
        assert!(outcome.replaces_pipeline());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_service_falls_back() {
        let fixture = with_service("/bin/false");
        let outcome = run_build_service(&fixture.project(), BuildRequest::default(), false);
        assert!(matches!(outcome, ServiceOutcome::Failed { .. }));
        assert!(!outcome.replaces_pipeline());
    }
}
