//! Declared activities and their configuration.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tool_primitives::ActivityName;

use crate::error::{ActivityError, ActivityResult};
use crate::schema::InputSchema;

const RESERVED_KEYS: [&str; 3] = ["name", "description", "schema"];

/// Configuration record declared alongside an activity.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActivityConfig {
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<InputSchema>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl ActivityConfig {
    /// Returns the raw description template.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the declared input schema, if any.
    #[must_use]
    pub fn schema(&self) -> Option<&InputSchema> {
        self.schema.as_ref()
    }

    /// Returns a custom config value declared by the tool author.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Returns every custom config value.
    #[must_use]
    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }
}

/// A single capability declared by a tool.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Activity {
    name: ActivityName,
    config: ActivityConfig,
}

impl Activity {
    /// Starts declaring an activity with the supplied name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ActivityBuilder {
        ActivityBuilder {
            name: name.into(),
            description: None,
            schema: None,
            extra: BTreeMap::new(),
        }
    }

    /// Returns the stable identifier used for lookup.
    #[must_use]
    pub fn name(&self) -> &ActivityName {
        &self.name
    }

    /// Returns the declared configuration.
    #[must_use]
    pub fn config(&self) -> &ActivityConfig {
        &self.config
    }

    /// Renders the declared schema as a JSON Schema document.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::MissingSchema`] if the activity declared no
    /// schema.
    pub fn json_schema(&self, id: &str) -> ActivityResult<Value> {
        self.config
            .schema
            .as_ref()
            .map(|schema| schema.json_schema(id))
            .ok_or_else(|| ActivityError::MissingSchema {
                activity: self.name.to_string(),
            })
    }
}

/// Builder for [`Activity`].
#[derive(Debug)]
pub struct ActivityBuilder {
    name: String,
    description: Option<String>,
    schema: Option<InputSchema>,
    extra: BTreeMap<String, Value>,
}

impl ActivityBuilder {
    /// Sets the description template. Required.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the input schema.
    #[must_use]
    pub fn schema(mut self, schema: InputSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Adds a custom config key.
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Finalises the declaration.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::Primitive`] for an invalid name,
    /// [`ActivityError::MissingConfigKey`] when no description was declared
    /// and [`ActivityError::ReservedConfigKey`] when a custom key shadows a
    /// built-in one.
    pub fn build(self) -> ActivityResult<Activity> {
        let name = ActivityName::new(self.name)?;

        let description = self.description.ok_or_else(|| ActivityError::MissingConfigKey {
            activity: name.to_string(),
            key: "description",
        })?;

        if let Some(key) = self.extra.keys().find(|key| RESERVED_KEYS.contains(&key.as_str())) {
            return Err(ActivityError::ReservedConfigKey {
                activity: name.to_string(),
                key: key.clone(),
            });
        }

        Ok(Activity {
            name,
            config: ActivityConfig {
                description,
                schema: self.schema,
                extra: self.extra,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PropertyType;

    #[test]
    fn builds_activity_with_custom_config() {
        let activity = Activity::builder("test")
            .description("test description")
            .extra("foo", "bar")
            .build()
            .unwrap();

        assert_eq!(activity.name().as_str(), "test");
        assert_eq!(activity.config().get("foo"), Some(&Value::from("bar")));
        assert!(activity.config().schema().is_none());
    }

    #[test]
    fn description_is_required() {
        let err = Activity::builder("test")
            .schema(InputSchema::builder().build().unwrap())
            .build()
            .expect_err("missing description");

        assert_eq!(
            err,
            ActivityError::MissingConfigKey {
                activity: "test".into(),
                key: "description",
            }
        );
    }

    #[test]
    fn reserved_keys_are_rejected() {
        let err = Activity::builder("test")
            .description("d")
            .extra("schema", "oops")
            .build()
            .expect_err("reserved key");
        assert!(matches!(err, ActivityError::ReservedConfigKey { key, .. } if key == "schema"));
    }

    #[test]
    fn json_schema_requires_declaration() {
        let bare = Activity::builder("bare").description("d").build().unwrap();
        assert!(matches!(
            bare.json_schema("ToolInputSchema"),
            Err(ActivityError::MissingSchema { .. })
        ));

        let typed = Activity::builder("typed")
            .description("d")
            .schema(
                InputSchema::builder()
                    .required("value", PropertyType::String, "")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let schema = typed.json_schema("ToolInputSchema").unwrap();
        assert_eq!(schema["required"], serde_json::json!(["value"]));
    }
}
