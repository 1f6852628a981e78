//! Per-tool artifacts stored next to a tool's source.
//!
//! Every tool ships three well-known files in its install directory: a YAML
//! manifest, a Dockerfile and a requirements list. [`ArtifactLoader`]
//! resolves their paths from the tool's source location and parses them on
//! demand.

#![warn(missing_docs, clippy::pedantic)]

mod dockerfile;
mod error;
mod loader;
mod manifest;

pub use dockerfile::{Dockerfile, Instruction};
pub use error::{ArtifactError, ArtifactResult};
pub use loader::{ArtifactLoader, DOCKERFILE_FILE, MANIFEST_FILE, REQUIREMENTS_FILE};
pub use manifest::{REQUIRED_MANIFEST_KEYS, ToolManifest};
