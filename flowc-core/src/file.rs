use std::path::{Path, PathBuf};

use eyre::{Context, Result};

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write '{}'", path.display()))
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already held identical content
    Unchanged,
}

/// A file produced by a generator.
///
/// Writing only touches the disk when the content differs, so a rebuild
/// with identical results leaves file timestamps alone.
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given path and content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the file unless it already holds this content
    pub fn write(&self) -> Result<WriteResult> {
        if let Ok(existing) = std::fs::read_to_string(&self.path)
            && existing == self.content
        {
            return Ok(WriteResult::Unchanged);
        }
        write_file(&self.path, &self.content)?;
        Ok(WriteResult::Written)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dist").join("backend").join("inventory.json");

        let result = File::new(&path, "{}").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_unreadable_existing_file_is_replaced() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("inventory.json");
        fs::write(&path, [0xff, 0xfe]).unwrap();

        assert_eq!(File::new(&path, "{}").write().unwrap(), WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_identical_content_is_unchanged() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("inventory.json");

        assert_eq!(File::new(&path, "a").write().unwrap(), WriteResult::Written);
        assert_eq!(
            File::new(&path, "a").write().unwrap(),
            WriteResult::Unchanged
        );
        assert_eq!(File::new(&path, "b").write().unwrap(), WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "b");
    }
}
