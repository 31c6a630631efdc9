//! Run settings (repository root, registry file, commit date)

use std::path::{Path, PathBuf};

use crate::registry::REGISTRY_FILE;

/// Settings for one updater run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Repository root; document paths are resolved against it
    pub workspace_root: PathBuf,
    /// Registry file name, relative to the root
    pub registry_file: String,
    /// Trimmed, never empty
    pub last_commit_date: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workspace_root: PathBuf::from("."),
            registry_file: REGISTRY_FILE.to_string(),
            last_commit_date: None,
        }
    }
}

impl Settings {
    /// Settings rooted at `workspace_root`
    pub fn new<P: AsRef<Path>>(workspace_root: P) -> Self {
        Self {
            workspace_root: workspace_root.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Set the commit date; blank values count as unset
    pub fn with_last_commit_date(mut self, date: Option<&str>) -> Self {
        self.last_commit_date = date
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        self
    }

    pub fn with_registry_file(mut self, registry_file: impl Into<String>) -> Self {
        self.registry_file = registry_file.into();
        self
    }

    /// Full path of the registry file
    pub fn registry_path(&self) -> PathBuf {
        self.workspace_root.join(&self.registry_file)
    }
}
