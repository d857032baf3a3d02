//! Error kinds raised while registering, looking up and loading assets.

use std::path::PathBuf;

use thiserror::Error;

use crate::resources::ResourceKind;

/// Every failure the loading subsystem can report.
///
/// None of these are recoverable mid-load: any error aborts the boot sequence.
/// `LoadFailure` names the stage and the asset so the caller can surface a
/// useful diagnostic before terminating.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AssetError {
    /// A name was registered twice in the same registry.
    #[error("{kind} `{name}` is already registered")]
    DuplicateKey { kind: ResourceKind, name: String },

    /// A lookup for a name that was never registered (or was released).
    #[error("{kind} `{name}` is not registered")]
    NotFound { kind: ResourceKind, name: String },

    /// The engine could not load an asset file.
    #[error("{stage} stage could not load {kind} `{name}` from {}", .path.display())]
    LoadFailure {
        stage: String,
        kind: ResourceKind,
        name: String,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// The catalog contains a record that can never load.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("could not read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

impl AssetError {
    /// Stage label and asset name of a load failure, if this is one.
    pub fn failed_asset(&self) -> Option<(&str, &str)> {
        match self {
            AssetError::LoadFailure { stage, name, .. } => Some((stage, name)),
            _ => None,
        }
    }
}
