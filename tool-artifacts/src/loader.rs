//! Path resolution and loading of tool artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::dockerfile::Dockerfile;
use crate::error::{ArtifactError, ArtifactResult};
use crate::manifest::ToolManifest;

/// File name of the tool manifest.
pub const MANIFEST_FILE: &str = "manifest.yml";
/// File name of the container build descriptor.
pub const DOCKERFILE_FILE: &str = "Dockerfile";
/// File name of the dependency list.
pub const REQUIREMENTS_FILE: &str = "requirements.txt";

/// Resolves and reads the artifacts stored next to a tool's source file.
///
/// Paths are anchored at the tool's own source location, never at the
/// caller's working directory. Files are read on every call; a missing file
/// is reported as [`ArtifactError::NotFound`] and no default is synthesised.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArtifactLoader {
    abs_file_path: PathBuf,
    abs_dir_path: PathBuf,
}

impl ArtifactLoader {
    /// Anchors a loader at the tool's source file.
    ///
    /// Relative paths are made absolute against the current directory once,
    /// here; later lookups do not depend on it.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::InvalidSourcePath`] when the path is empty,
    /// cannot be made absolute, or has no parent directory.
    pub fn new(source_path: impl AsRef<Path>) -> ArtifactResult<Self> {
        let source_path = source_path.as_ref();
        let invalid = |reason: String| ArtifactError::InvalidSourcePath {
            path: source_path.to_path_buf(),
            reason,
        };

        if source_path.as_os_str().is_empty() {
            return Err(invalid("path is empty".into()));
        }

        let abs_file_path = std::path::absolute(source_path).map_err(|err| invalid(err.to_string()))?;
        let abs_dir_path = abs_file_path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| invalid("path has no parent directory".into()))?;

        Ok(Self {
            abs_file_path,
            abs_dir_path,
        })
    }

    /// Returns the absolute path of the tool's source file.
    #[must_use]
    pub fn abs_file_path(&self) -> &Path {
        &self.abs_file_path
    }

    /// Returns the directory containing the tool's source file.
    #[must_use]
    pub fn abs_dir_path(&self) -> &Path {
        &self.abs_dir_path
    }

    /// Returns the manifest location.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.abs_dir_path.join(MANIFEST_FILE)
    }

    /// Returns the Dockerfile location.
    #[must_use]
    pub fn dockerfile_path(&self) -> PathBuf {
        self.abs_dir_path.join(DOCKERFILE_FILE)
    }

    /// Returns the requirements list location.
    #[must_use]
    pub fn requirements_path(&self) -> PathBuf {
        self.abs_dir_path.join(REQUIREMENTS_FILE)
    }

    /// Reads and parses the manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::NotFound`] when the file is absent,
    /// [`ArtifactError::Io`] for other read failures and
    /// [`ArtifactError::Yaml`] when the file is not a YAML mapping. Missing
    /// keys are not an error here; see [`ToolManifest::validate`].
    pub fn manifest(&self) -> ArtifactResult<ToolManifest> {
        let path = self.manifest_path();
        let text = read(&path)?;
        ToolManifest::from_yaml_str(&text).map_err(|source| ArtifactError::Yaml { path, source })
    }

    /// Reads and parses the Dockerfile.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::NotFound`] when the file is absent,
    /// [`ArtifactError::Io`] for other read failures and
    /// [`ArtifactError::InvalidDockerfile`] when parsing fails.
    pub fn dockerfile(&self) -> ArtifactResult<Dockerfile> {
        Dockerfile::parse(&read(&self.dockerfile_path())?)
    }

    /// Reads the requirements list, one entry per non-empty, non-comment line.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::NotFound`] when the file is absent and
    /// [`ArtifactError::Io`] for other read failures.
    pub fn requirements(&self) -> ArtifactResult<Vec<String>> {
        let text = read(&self.requirements_path())?;
        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_owned)
            .collect())
    }
}

fn read(path: &Path) -> ArtifactResult<String> {
    debug!(path = %path.display(), "reading tool artifact");
    fs::read_to_string(path).map_err(|source| ArtifactError::read(path.to_path_buf(), source))
}
