//! Error types for artifact loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while resolving or parsing tool artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The artifact file does not exist.
    #[error("artifact not found: {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Reading the artifact failed for another reason.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Source [`std::io::Error`].
        #[source]
        source: io::Error,
    },

    /// The artifact is not valid YAML or lacks required keys.
    #[error("failed to parse {}: {source}", path.display())]
    Yaml {
        /// Path being parsed.
        path: PathBuf,
        /// Source [`serde_yaml::Error`].
        #[source]
        source: serde_yaml::Error,
    },

    /// The manifest parsed but carries invalid values.
    #[error("invalid manifest: {reason}")]
    InvalidManifest {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// A Dockerfile line could not be parsed.
    #[error("invalid Dockerfile at line {line}: {reason}")]
    InvalidDockerfile {
        /// One-based line number of the offending instruction.
        line: usize,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// The tool source path cannot anchor an install directory.
    #[error("invalid tool source path {}: {reason}", path.display())]
    InvalidSourcePath {
        /// The supplied path.
        path: PathBuf,
        /// Human-readable reason for rejection.
        reason: String,
    },
}

impl ArtifactError {
    pub(crate) fn read(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}

/// Result type alias for artifact operations.
pub type ArtifactResult<T> = Result<T, ArtifactError>;
