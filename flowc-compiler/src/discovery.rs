//! Specification file discovery.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use flowc_dialect::{Dialect, Project};

/// A specification file found during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub dialect: Dialect,
}

impl SourceFile {
    /// Path relative to `root`, falling back to the full path.
    pub fn display_path(&self, root: &Path) -> String {
        self.path
            .strip_prefix(root)
            .unwrap_or(&self.path)
            .display()
            .to_string()
    }
}

/// Result of scanning a flows directory.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Files in merge order: ascending by file name, ties broken by full path.
    pub files: Vec<SourceFile>,
    /// The flows directory does not exist.
    pub missing_dir: bool,
}

/// Discover specification files under the project's flows directory.
pub fn discover(project: &Project) -> Result<Discovery> {
    discover_in(&project.flows_dir())
}

/// Discover specification files directly inside `flows_dir` (not recursive).
pub fn discover_in(flows_dir: &Path) -> Result<Discovery> {
    if !flows_dir.is_dir() {
        tracing::debug!(dir = %flows_dir.display(), "flows directory missing");
        return Ok(Discovery {
            files: Vec::new(),
            missing_dir: true,
        });
    }

    let base = glob::Pattern::escape(&flows_dir.to_string_lossy());
    let mut files = Vec::new();

    for dialect in Dialect::ALL {
        let pattern = format!("{}/*.{}", base, dialect.extension());
        let entries =
            glob::glob(&pattern).wrap_err_with(|| format!("invalid glob pattern '{}'", pattern))?;

        for entry in entries {
            let path = entry.wrap_err("failed to read flows directory entry")?;
            if path.is_file() {
                files.push(SourceFile { path, dialect });
            }
        }
    }

    files.sort_by(|a, b| {
        a.path
            .file_name()
            .cmp(&b.path.file_name())
            .then_with(|| a.path.cmp(&b.path))
    });

    tracing::debug!(dir = %flows_dir.display(), count = files.len(), "discovered specification files");
    Ok(Discovery {
        files,
        missing_dir: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "").unwrap();
    }

    fn names(discovery: &Discovery) -> Vec<String> {
        discovery
            .files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_sorted_by_file_name_across_dialects() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.flow");
        touch(dir.path(), "a.testflow");
        touch(dir.path(), "chat.liveflow");
        touch(dir.path(), "a.flow");
        touch(dir.path(), "nightly.jobflow");

        let discovery = discover_in(dir.path()).unwrap();
        assert_eq!(
            names(&discovery),
            vec![
                "a.flow",
                "a.testflow",
                "b.flow",
                "chat.liveflow",
                "nightly.jobflow"
            ]
        );
        assert_eq!(discovery.files[1].dialect, Dialect::TestFlow);
        assert!(!discovery.missing_dir);
    }

    #[test]
    fn test_ignores_other_files_and_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "notes.md");
        touch(dir.path(), "todo.flow.bak");
        std::fs::create_dir(dir.path().join("nested.flow")).unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        touch(&dir.path().join("sub"), "deep.flow");

        let discovery = discover_in(dir.path()).unwrap();
        assert!(discovery.files.is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let discovery = discover_in(&dir.path().join("src/flows")).unwrap();
        assert!(discovery.missing_dir);
        assert!(discovery.files.is_empty());
    }

    #[test]
    fn test_display_path_is_root_relative() {
        let file = SourceFile {
            path: PathBuf::from("/work/app/src/flows/todo.flow"),
            dialect: Dialect::Flow,
        };
        assert_eq!(
            file.display_path(Path::new("/work/app")),
            "src/flows/todo.flow"
        );
        assert_eq!(
            file.display_path(Path::new("/elsewhere")),
            "/work/app/src/flows/todo.flow"
        );
    }
}
