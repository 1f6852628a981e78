//! Tool manifest advertised alongside each tool.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{ArtifactError, ArtifactResult};

/// Keys every published manifest must carry.
pub const REQUIRED_MANIFEST_KEYS: [&str; 5] = [
    "version",
    "name",
    "description",
    "contact_email",
    "legal_info_url",
];

/// Contents of a tool's `manifest.yml`, exactly as parsed.
///
/// Parsing accepts any YAML mapping; whether the documented keys are present
/// is checked by [`ToolManifest::validate`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolManifest(Mapping);

impl ToolManifest {
    /// Parses a manifest from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`serde_yaml::Error`] when the text is not a YAML mapping.
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Checks that every required key holds a non-empty scalar and that the
    /// contact address looks like an email.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::InvalidManifest`] naming the first offending key.
    pub fn validate(&self) -> ArtifactResult<()> {
        for key in REQUIRED_MANIFEST_KEYS {
            let reason = match self.0.get(key) {
                None | Some(Value::Null) => format!("missing required key `{key}`"),
                Some(Value::String(text)) if text.trim().is_empty() => {
                    format!("`{key}` cannot be empty")
                }
                Some(Value::String(_) | Value::Number(_) | Value::Bool(_)) => continue,
                Some(_) => format!("`{key}` must be a scalar value"),
            };
            return Err(ArtifactError::InvalidManifest { reason });
        }

        if !self.str_value("contact_email").is_some_and(|email| email.contains('@')) {
            return Err(ArtifactError::InvalidManifest {
                reason: "`contact_email` must be an email address".into(),
            });
        }
        Ok(())
    }

    /// Returns the raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the parsed mapping.
    #[must_use]
    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }

    /// Returns the tool display name, if declared as a string.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str_value("name")
    }

    /// Returns the tool description, if declared as a string.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.str_value("description")
    }

    /// Returns the maintainer contact address, if declared as a string.
    #[must_use]
    pub fn contact_email(&self) -> Option<&str> {
        self.str_value("contact_email")
    }

    /// Returns the URL of the legal notice, if declared as a string.
    #[must_use]
    pub fn legal_info_url(&self) -> Option<&str> {
        self.str_value("legal_info_url")
    }

    fn str_value(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Mapping> for ToolManifest {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}
