//! Specification dialects.

use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

/// The four kinds of specification file, distinguished by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `.flow`: models, pages, endpoints and integrations
    Flow,
    /// `.liveflow`: websockets, realtime events and data streams
    LiveFlow,
    /// `.jobflow`: background jobs, queues and schedules
    JobFlow,
    /// `.testflow`: test suites and smart forms
    TestFlow,
}

impl Dialect {
    /// Every dialect, in discovery-pattern order.
    pub const ALL: [Dialect; 4] = [
        Dialect::Flow,
        Dialect::LiveFlow,
        Dialect::JobFlow,
        Dialect::TestFlow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Flow => "flow",
            Dialect::LiveFlow => "liveflow",
            Dialect::JobFlow => "jobflow",
            Dialect::TestFlow => "testflow",
        }
    }

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Resolve the dialect of a file from its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ALL.into_iter().find(|d| d.extension() == ext)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix('.').unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown dialect '{}', expected one of: flow, liveflow, jobflow, testflow",
                    s
                )
            })
    }
}
