//! Input schemas attached to activities.

use std::fmt;

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error::{ActivityError, ActivityResult};

const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// JSON type of a declared input property.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PropertyType {
    /// JSON string.
    String,
    /// JSON integer.
    Integer,
    /// Any JSON number.
    Number,
    /// JSON boolean.
    Boolean,
    /// JSON array.
    Array,
    /// JSON object.
    Object,
}

impl PropertyType {
    /// Returns the JSON Schema type keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object-shaped schema describing the input an activity accepts.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InputSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    body: Map<String, Value>,
}

impl InputSchema {
    /// Starts building a schema from an explicit property list.
    #[must_use]
    pub fn builder() -> InputSchemaBuilder {
        InputSchemaBuilder::default()
    }

    /// Derives a schema from a Rust type.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::InvalidSchema`] if the type does not describe
    /// a JSON object.
    pub fn for_type<T: JsonSchema>() -> ActivityResult<Self> {
        let value = serde_json::to_value(schemars::schema_for!(T))
            .map_err(|err| ActivityError::invalid_schema(err.to_string()))?;
        Self::from_value(value)
    }

    /// Wraps an existing JSON Schema document.
    ///
    /// Any `$schema`, `$id` and `title` keys are dropped; they are supplied
    /// again when the schema is rendered. A top-level `description` becomes
    /// the schema description.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::InvalidSchema`] unless the document is an
    /// object with `"type": "object"`.
    pub fn from_value(value: Value) -> ActivityResult<Self> {
        let Value::Object(mut body) = value else {
            return Err(ActivityError::invalid_schema("schema must be a JSON object"));
        };
        if body.get("type").and_then(Value::as_str) != Some("object") {
            return Err(ActivityError::invalid_schema(
                "schema must describe an object (`\"type\": \"object\"`)",
            ));
        }
        body.remove("$schema");
        body.remove("$id");
        body.remove("title");
        let description = match body.remove("description") {
            Some(Value::String(text)) => Some(text),
            Some(_) => {
                return Err(ActivityError::invalid_schema("description must be a string"));
            }
            None => None,
        };
        Ok(Self { description, body })
    }

    /// Returns the schema description, if declared.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Renders the schema as a standalone JSON Schema document.
    #[must_use]
    pub fn json_schema(&self, id: &str) -> Value {
        let mut document = Map::with_capacity(self.body.len() + 3);
        document.insert("$id".into(), Value::String(id.into()));
        document.insert("$schema".into(), Value::String(DRAFT_07.into()));
        if let Some(description) = &self.description {
            document.insert("description".into(), Value::String(description.clone()));
        }
        for (key, value) in &self.body {
            document.insert(key.clone(), value.clone());
        }
        Value::Object(document)
    }

    /// Returns a one-line structural summary such as
    /// `query: string (required), limit: integer (optional)`.
    #[must_use]
    pub fn summary(&self) -> String {
        let Some(properties) = self.body.get("properties").and_then(Value::as_object) else {
            return "no input".into();
        };
        if properties.is_empty() {
            return "no input".into();
        }

        let required: Vec<&str> = self
            .body
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        properties
            .iter()
            .map(|(name, property)| {
                let kind = property_kind(property);
                let presence = if required.contains(&name.as_str()) {
                    "required"
                } else {
                    "optional"
                };
                format!("{name}: {kind} ({presence})")
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn property_kind(property: &Value) -> String {
    match property.get("type") {
        Some(Value::String(kind)) => kind.clone(),
        Some(Value::Array(kinds)) => kinds
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" | "),
        _ if property.get("$ref").is_some() => "object".into(),
        _ => "any".into(),
    }
}

#[derive(Debug)]
struct Property {
    name: String,
    kind: PropertyType,
    description: String,
    required: bool,
}

/// Builder for [`InputSchema`].
#[derive(Debug, Default)]
pub struct InputSchemaBuilder {
    description: Option<String>,
    properties: Vec<Property>,
}

impl InputSchemaBuilder {
    /// Sets the schema description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a required property. An empty description is omitted.
    #[must_use]
    pub fn required(
        self,
        name: impl Into<String>,
        kind: PropertyType,
        description: impl Into<String>,
    ) -> Self {
        self.property(name.into(), kind, description.into(), true)
    }

    /// Adds an optional property. An empty description is omitted.
    #[must_use]
    pub fn optional(
        self,
        name: impl Into<String>,
        kind: PropertyType,
        description: impl Into<String>,
    ) -> Self {
        self.property(name.into(), kind, description.into(), false)
    }

    fn property(mut self, name: String, kind: PropertyType, description: String, required: bool) -> Self {
        self.properties.push(Property {
            name,
            kind,
            description,
            required,
        });
        self
    }

    /// Finalises the schema.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::InvalidSchema`] if a property name is empty
    /// or declared twice.
    pub fn build(self) -> ActivityResult<InputSchema> {
        let mut properties = Map::with_capacity(self.properties.len());
        let mut required = Vec::new();

        for property in self.properties {
            if property.name.trim().is_empty() {
                return Err(ActivityError::invalid_schema("property name cannot be empty"));
            }
            if properties.contains_key(&property.name) {
                return Err(ActivityError::invalid_schema(format!(
                    "property `{}` is declared more than once",
                    property.name
                )));
            }

            let mut definition = json!({ "type": property.kind.as_str() });
            if !property.description.is_empty() {
                definition["description"] = Value::String(property.description);
            }
            if property.required {
                required.push(Value::String(property.name.clone()));
            }
            properties.insert(property.name, definition);
        }

        let mut body = Map::new();
        body.insert("type".into(), Value::String("object".into()));
        body.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            body.insert("required".into(), Value::Array(required));
        }
        body.insert("additionalProperties".into(), Value::Bool(false));

        Ok(InputSchema {
            description: self.description,
            body,
        })
    }
}
