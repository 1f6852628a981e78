//! Identifier types for activities and environment fields.

use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MAX_NAME_LEN: usize = 64;

/// Stable identifier used to look an activity up within a tool.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActivityName(String);

impl ActivityName {
    /// Creates a new activity name after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidActivityName`] if the supplied name is empty,
    /// too long, does not start with a letter, or contains characters other
    /// than ASCII alphanumerics, dash, or underscore.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_activity_name(&name)?;
        Ok(Self(name))
    }

    /// Returns the activity name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ActivityName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ActivityName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ActivityName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ActivityName {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ActivityName> for String {
    fn from(value: ActivityName) -> Self {
        value.0
    }
}

fn validate_activity_name(name: &str) -> Result<()> {
    let reject = |reason: &str| Error::InvalidActivityName {
        name: name.into(),
        reason: reason.into(),
    };

    if name.is_empty() {
        return Err(reject("name cannot be empty"));
    }

    if name.len() > MAX_NAME_LEN {
        return Err(reject(&format!("name length must be <= {MAX_NAME_LEN}")));
    }

    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(reject("name must start with an ASCII letter"));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
    {
        return Err(reject(
            "name must contain ASCII alphanumeric, dash, or underscore",
        ));
    }

    Ok(())
}

/// Environment-style identifier derived from a field name (e.g. `TEST_FIELD`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EnvKey(String);

impl EnvKey {
    /// Derives an environment key from a declared field name.
    ///
    /// ASCII letters are uppercased and every other non-alphanumeric
    /// character becomes `_`, so `test-field` and `test.field` both map to
    /// `TEST_FIELD`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEnvKey`] when the field name contains no
    /// alphanumeric characters at all.
    pub fn from_field(field: &str) -> Result<Self> {
        let key: String = field
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        Self::new(key)
    }

    /// Wraps an explicit environment key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEnvKey`] if the key is empty, lacks any
    /// alphanumeric character, or contains `=` or NUL.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if !key.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::InvalidEnvKey {
                key,
                reason: "key must contain at least one alphanumeric character".into(),
            });
        }
        if key.contains(['=', '\0']) {
            return Err(Error::InvalidEnvKey {
                key,
                reason: "key cannot contain `=` or NUL".into(),
            });
        }
        Ok(Self(key))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EnvKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EnvKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EnvKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<EnvKey> for String {
    fn from(value: EnvKey) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_name_accepts_identifiers() {
        let name = ActivityName::new("fetch_page").expect("name");
        assert_eq!(name.as_str(), "fetch_page");
        assert_eq!(name.to_string(), "fetch_page");
    }

    #[test]
    fn activity_name_rejects_bad_input() {
        assert!(ActivityName::new("").is_err());
        assert!(ActivityName::new("1st").is_err());
        assert!(ActivityName::new("has space").is_err());
        assert!(ActivityName::new("a".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn env_key_normalizes_separators() {
        assert_eq!(EnvKey::from_field("test_field").unwrap().as_str(), "TEST_FIELD");
        assert_eq!(EnvKey::from_field("api-key.v2").unwrap().as_str(), "API_KEY_V2");
    }

    #[test]
    fn env_key_requires_alphanumerics() {
        let err = EnvKey::from_field("--").expect_err("should fail");
        assert!(matches!(err, Error::InvalidEnvKey { .. }));
        assert!(EnvKey::new("A=B").is_err());
    }

    #[test]
    fn env_key_deserialization_is_validated() {
        let key: EnvKey = serde_json::from_str("\"TEST_FIELD\"").unwrap();
        assert_eq!(key.as_str(), "TEST_FIELD");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"TEST_FIELD\"");

        assert!(serde_json::from_str::<EnvKey>("\"A=B\"").is_err());
        assert!(serde_json::from_str::<EnvKey>("\"__\"").is_err());
    }
}
