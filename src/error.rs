//! Error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions while updating the registry
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("README file not found: {}", path.display())]
    DocumentNotFound { path: PathBuf },

    #[error("Failed to read {}", path.display())]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read registry {}", path.display())]
    ReadRegistry {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed registry {}", path.display())]
    MalformedRegistry {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Registry {} must contain a JSON object", path.display())]
    RegistryNotObject { path: PathBuf },

    #[error("Failed to write registry {}", path.display())]
    WriteRegistry {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize registry")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
