//! Environment-style lookups over environment-visible configuration fields.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use tool_primitives::{EnvKey, FieldValue};
use tracing::debug;

use crate::field::{ConfigField, ToolConfig};

/// Read-only source of environment variables.
pub trait EnvSource {
    /// Returns the raw value stored under `key`, if any.
    fn var(&self, key: &str) -> Option<String>;
}

/// The process-wide environment, read on every lookup.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// Resolves environment-visible fields against an [`EnvSource`].
///
/// Nothing is cached: two calls may disagree if the source changed in
/// between, which is how runtime overrides take effect.
#[derive(Debug)]
pub struct EnvironmentResolver<'a, S = ProcessEnv> {
    config: &'a ToolConfig,
    source: S,
}

impl<'a> EnvironmentResolver<'a, ProcessEnv> {
    /// Creates a resolver backed by the process environment.
    #[must_use]
    pub fn new(config: &'a ToolConfig) -> Self {
        Self::with_source(config, ProcessEnv)
    }
}

impl<'a, S: EnvSource> EnvironmentResolver<'a, S> {
    /// Creates a resolver backed by a custom source.
    #[must_use]
    pub fn with_source(config: &'a ToolConfig, source: S) -> Self {
        Self { config, source }
    }

    /// Returns the environment-visible fields.
    #[must_use]
    pub fn env_fields(&self) -> Vec<&'a ConfigField> {
        self.config.env_fields()
    }

    /// Resolves a single key.
    ///
    /// A non-empty value in the source wins and is coerced with
    /// [`FieldValue::coerce`]; otherwise the field's declared value is
    /// returned. Keys that no environment-visible field declares resolve to
    /// `None` even when the source holds them.
    #[must_use]
    pub fn env_value(&self, key: &str) -> Option<FieldValue> {
        let field = self.config.env_field(key)?;
        match self.source.var(key).filter(|raw| !raw.is_empty()) {
            Some(raw) => {
                debug!(key, field = field.name(), "environment override applied");
                Some(FieldValue::coerce(&raw))
            }
            None => field.value().cloned(),
        }
    }

    /// Resolves every environment-visible field, omitting those without a value.
    #[must_use]
    pub fn env(&self) -> BTreeMap<EnvKey, FieldValue> {
        self.config
            .env_fields()
            .into_iter()
            .filter_map(|field| {
                let key = field.env_key()?;
                let value = self.env_value(key.as_str())?;
                Some((key.clone(), value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSpec;

    fn config() -> ToolConfig {
        ToolConfig::new(
            vec![
                FieldSpec::env("test_field"),
                FieldSpec::env("test_int"),
                FieldSpec::env("unset"),
                FieldSpec::new("hidden").with_default("x"),
            ],
            vec![
                ("test_field".into(), "hello".into()),
                ("test_int".into(), 5.into()),
            ],
        )
        .unwrap()
    }

    #[test]
    fn falls_back_to_declared_values() {
        let config = config();
        let source: HashMap<String, String> = HashMap::new();
        let resolver = EnvironmentResolver::with_source(&config, &source);

        assert_eq!(resolver.env_value("TEST_FIELD"), Some(FieldValue::from("hello")));
        assert_eq!(resolver.env_value("TEST_INT"), Some(FieldValue::Int(5)));
        assert_eq!(resolver.env_value("NO_TEST_FIELD"), None);
        assert_eq!(resolver.env_value("HIDDEN"), None);
        assert_eq!(resolver.env_fields().len(), 3);
    }

    #[test]
    fn source_overrides_are_seen_on_every_call() {
        let config = config();
        let mut source: HashMap<String, String> = HashMap::new();

        let before = EnvironmentResolver::with_source(&config, &source).env_value("TEST_INT");
        assert_eq!(before, Some(FieldValue::Int(5)));

        source.insert("TEST_INT".into(), "1".into());
        source.insert("NO_TEST_FIELD".into(), "1".into());
        let resolver = EnvironmentResolver::with_source(&config, &source);
        assert_eq!(resolver.env_value("TEST_INT"), Some(FieldValue::Int(1)));
        assert_eq!(resolver.env_value("NO_TEST_FIELD"), None);
    }

    #[test]
    fn empty_override_is_ignored() {
        let config = config();
        let source = HashMap::from([("TEST_FIELD".to_owned(), String::new())]);
        let resolver = EnvironmentResolver::with_source(&config, source);
        assert_eq!(resolver.env_value("TEST_FIELD"), Some(FieldValue::from("hello")));
    }

    #[test]
    fn env_map_covers_fields_with_values() {
        let config = config();
        let source = HashMap::from([("UNSET".to_owned(), "2.5".to_owned())]);
        let env = EnvironmentResolver::with_source(&config, source).env();

        let keys: Vec<_> = env.keys().map(EnvKey::as_str).collect();
        assert_eq!(keys, ["TEST_FIELD", "TEST_INT", "UNSET"]);
        assert_eq!(env.get("UNSET"), Some(&FieldValue::Float(2.5)));

        let env = EnvironmentResolver::with_source(&config, HashMap::<String, String>::new()).env();
        assert_eq!(env.len(), 2);
        assert_eq!(env.get("TEST_FIELD"), Some(&FieldValue::from("hello")));
    }
}
