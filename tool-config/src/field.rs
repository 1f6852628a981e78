//! Declared configuration fields and the record built from them.

use std::collections::HashMap;

use tool_primitives::{EnvKey, FieldValue};

use crate::error::{ConfigError, ConfigResult};

/// Declaration of a single configuration field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    name: String,
    env_visible: bool,
    env_key: Option<String>,
    default: Option<FieldValue>,
}

impl FieldSpec {
    /// Declares a field that is not visible through the environment.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            env_visible: false,
            env_key: None,
            default: None,
        }
    }

    /// Declares an environment-visible field whose key is derived from its name.
    #[must_use]
    pub fn env(name: impl Into<String>) -> Self {
        Self {
            env_visible: true,
            ..Self::new(name)
        }
    }

    /// Overrides the derived environment key and marks the field environment-visible.
    #[must_use]
    pub fn with_env_key(mut self, key: impl Into<String>) -> Self {
        self.env_visible = true;
        self.env_key = Some(key.into());
        self
    }

    /// Sets the value used when construction supplies none.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Returns the declared field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the field is exposed through the environment.
    #[must_use]
    pub const fn is_env_visible(&self) -> bool {
        self.env_visible
    }

    fn resolve_env_key(&self) -> ConfigResult<Option<EnvKey>> {
        if !self.env_visible {
            return Ok(None);
        }
        let key = match &self.env_key {
            Some(explicit) => EnvKey::new(explicit.clone())?,
            None => EnvKey::from_field(&self.name)?,
        };
        Ok(Some(key))
    }
}

/// A declared field together with its resolved key and value.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigField {
    name: String,
    env_key: Option<EnvKey>,
    value: Option<FieldValue>,
}

impl ConfigField {
    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the environment key for environment-visible fields.
    #[must_use]
    pub fn env_key(&self) -> Option<&EnvKey> {
        self.env_key.as_ref()
    }

    /// Returns the declared value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&FieldValue> {
        self.value.as_ref()
    }
}

/// Typed configuration record of a tool instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToolConfig {
    fields: Vec<ConfigField>,
}

impl ToolConfig {
    /// Builds the record from the tool's declarations and the values supplied
    /// at construction. Declared defaults fill in missing values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateField`] when a field is declared or
    /// supplied twice, [`ConfigError::UnknownField`] when a value targets an
    /// undeclared field, and [`ConfigError::DuplicateEnvKey`] when two
    /// environment-visible fields resolve to the same key.
    pub fn new(
        specs: Vec<FieldSpec>,
        values: Vec<(String, FieldValue)>,
    ) -> ConfigResult<Self> {
        let mut supplied: HashMap<String, FieldValue> = HashMap::with_capacity(values.len());
        for (name, value) in values {
            if supplied.contains_key(&name) {
                return Err(ConfigError::DuplicateField { name });
            }
            supplied.insert(name, value);
        }

        let mut fields: Vec<ConfigField> = Vec::with_capacity(specs.len());
        let mut claimed: HashMap<EnvKey, String> = HashMap::new();
        for spec in specs {
            if fields.iter().any(|field| field.name == spec.name) {
                return Err(ConfigError::DuplicateField { name: spec.name });
            }

            let env_key = spec.resolve_env_key()?;
            if let Some(key) = &env_key {
                if let Some(first) = claimed.get(key) {
                    return Err(ConfigError::DuplicateEnvKey {
                        key: key.to_string(),
                        first: first.clone(),
                        second: spec.name,
                    });
                }
                claimed.insert(key.clone(), spec.name.clone());
            }

            let value = supplied.remove(&spec.name).or(spec.default);
            fields.push(ConfigField {
                name: spec.name,
                env_key,
                value,
            });
        }

        if let Some(name) = supplied.into_keys().min() {
            return Err(ConfigError::UnknownField { name });
        }

        Ok(Self { fields })
    }

    /// Returns every declared field in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[ConfigField] {
        &self.fields
    }

    /// Returns the value of the named field, if declared and set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .and_then(ConfigField::value)
    }

    /// Returns the environment-visible fields in declaration order.
    #[must_use]
    pub fn env_fields(&self) -> Vec<&ConfigField> {
        self.fields
            .iter()
            .filter(|field| field.env_key.is_some())
            .collect()
    }

    /// Returns the environment-visible field registered under `key`.
    #[must_use]
    pub fn env_field(&self, key: &str) -> Option<&ConfigField> {
        self.fields
            .iter()
            .find(|field| field.env_key.as_ref().is_some_and(|k| k.as_str() == key))
    }
}
