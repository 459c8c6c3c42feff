//! Structured per-stage status lines.

use std::fmt;

use serde::Serialize;

/// A stage of the build cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Discover,
    Parse,
    Merge,
    Synthesize,
    Generate,
    Watch,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Discover => "discover",
            Stage::Parse => "parse",
            Stage::Merge => "merge",
            Stage::Synthesize => "synthesize",
            Stage::Generate => "generate",
            Stage::Watch => "watch",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum Outcome {
    Ok,
    Skipped(String),
    Failed(String),
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ok => f.write_str("ok"),
            Outcome::Skipped(reason) => write!(f, "skipped ({})", reason),
            Outcome::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

/// One line of user-visible progress: a stage, the file or target it
/// concerns, and how it went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub stage: Stage,
    pub subject: String,
    pub outcome: Outcome,
}

impl StatusLine {
    pub fn new(stage: Stage, subject: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            stage,
            subject: subject.into(),
            outcome,
        }
    }

    pub fn ok(stage: Stage, subject: impl Into<String>) -> Self {
        Self::new(stage, subject, Outcome::Ok)
    }

    pub fn skipped(stage: Stage, subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(stage, subject, Outcome::Skipped(reason.into()))
    }

    pub fn failed(stage: Stage, subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(stage, subject, Outcome::Failed(reason.into()))
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.subject, self.outcome)
    }
}
