//! template-registry: keep a `templates.json` catalog in sync with
//! template READMEs
//!
//! Each template folder carries a README whose front-matter describes the
//! template. This crate parses that front-matter and merges it into the
//! registry file at the repository root, keyed by folder name.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod registry;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use commands::update::UpdateOutcome;
pub use error::RegistryError;

/// A repository holding templates and their registry
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Run settings
    pub settings: config::Settings,
}

impl Workspace {
    /// Create a workspace from settings
    pub fn new(settings: config::Settings) -> Self {
        Self { settings }
    }

    /// Path of the registry file
    pub fn registry_path(&self) -> PathBuf {
        self.settings.registry_path()
    }

    /// Merge one README's front-matter into the registry
    pub fn update<P: AsRef<Path>>(&self, doc_path: P) -> Result<UpdateOutcome> {
        Ok(commands::update::run(self, doc_path.as_ref())?)
    }
}
