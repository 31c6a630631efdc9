//! Template registry (templates.json)
//!
//! The registry is a single JSON object keyed by template identifier.
//! It is loaded whole, changed in memory and written back whole. There is
//! no locking: one invocation is assumed to own the file while it runs.

use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{RegistryError, Result};

/// Default registry file name, relative to the repository root
pub const REGISTRY_FILE: &str = "templates.json";

/// In-memory copy of the registry file
#[derive(Debug, Clone)]
pub struct Registry {
    path: PathBuf,
    /// Entries in file order; new templates are appended
    entries: Map<String, Value>,
}

impl Registry {
    /// Create an empty registry that will be saved to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            entries: Map::new(),
        }
    }

    /// Load the registry from disk, or start empty if the file is missing
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No registry at {:?}, starting empty", path);
                return Ok(Self::new(path));
            }
            Err(source) => {
                return Err(RegistryError::ReadRegistry {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let value: Value =
            serde_json::from_str(&content).map_err(|source| RegistryError::MalformedRegistry {
                path: path.to_path_buf(),
                source,
            })?;

        match value {
            Value::Object(entries) => {
                tracing::debug!("Loaded {} templates from {:?}", entries.len(), path);
                Ok(Self {
                    path: path.to_path_buf(),
                    entries,
                })
            }
            _ => Err(RegistryError::RegistryNotObject {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Set the entry for a template, replacing any previous one wholesale
    pub fn insert(
        &mut self,
        template: impl Into<String>,
        entry: Map<String, Value>,
    ) -> Option<Value> {
        self.entries.insert(template.into(), Value::Object(entry))
    }

    pub fn get(&self, template: &str) -> Option<&Value> {
        self.entries.get(template)
    }

    pub fn contains(&self, template: &str) -> bool {
        self.entries.contains_key(template)
    }

    /// Template identifiers in file order
    pub fn template_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render as 2-space indented JSON with a trailing newline.
    /// Non-ASCII text is written as-is.
    pub fn to_json_string(&self) -> Result<String> {
        let mut content = serde_json::to_string_pretty(&self.entries)?;
        content.push('\n');
        Ok(content)
    }

    /// Save the registry to disk, overwriting the file
    pub fn save(&self) -> Result<()> {
        let content = self.to_json_string()?;
        fs::write(&self.path, content).map_err(|source| RegistryError::WriteRegistry {
            path: self.path.clone(),
            source,
        })
    }
}
