//! Activity description templates with `{{slot}}` substitution.

use std::collections::HashMap;

use serde_json::Value;

use crate::activity::Activity;

/// Slot replaced with the activity name.
pub const ACTIVITY_SLOT: &str = "activity";
/// Slot replaced with the owning tool's name.
pub const TOOL_SLOT: &str = "tool";
/// Slot replaced with the structural summary of the input schema.
pub const SCHEMA_SLOT: &str = "schema";

/// Description template declared by a tool author.
///
/// Slots use `{{name}}` syntax. Slots without a binding render as an empty
/// string, so the output never carries text the author did not declare.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use tool_activities::description::DescriptionTemplate;
///
/// let template = DescriptionTemplate::new("Use {{activity}} to search.");
/// let vars = HashMap::from([("activity".to_owned(), "search".to_owned())]);
/// assert_eq!(template.render(&vars), "Use search to search.");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DescriptionTemplate<'a> {
    template: &'a str,
}

impl<'a> DescriptionTemplate<'a> {
    /// Wraps the raw template text.
    #[must_use]
    pub const fn new(template: &'a str) -> Self {
        Self { template }
    }

    /// Returns the slot names referenced by the template, in order of appearance.
    #[must_use]
    pub fn slots(&self) -> Vec<String> {
        extract_slots(self.template)
    }

    /// Renders the template with the supplied bindings.
    #[must_use]
    pub fn render(&self, vars: &HashMap<String, String>) -> String {
        let mut result = String::with_capacity(self.template.len());
        let mut rest = self.template;

        while let Some(start) = rest.find("{{") {
            let Some(len) = rest[start + 2..].find("}}") else {
                break;
            };
            result.push_str(&rest[..start]);
            let slot = rest[start + 2..start + 2 + len].trim();
            if let Some(value) = vars.get(slot) {
                result.push_str(value);
            }
            rest = &rest[start + 2 + len + 2..];
        }

        result.push_str(rest);
        result
    }
}

/// Builds the slot bindings for an activity.
///
/// Besides the built-in slots, every scalar custom config key is bound under
/// its own name.
#[must_use]
pub fn bindings(activity: &Activity, tool_name: &str) -> HashMap<String, String> {
    let config = activity.config();
    let mut vars: HashMap<String, String> = config
        .extra()
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(text) => text.clone(),
                Value::Number(number) => number.to_string(),
                Value::Bool(flag) => flag.to_string(),
                _ => return None,
            };
            Some((key.clone(), text))
        })
        .collect();

    vars.insert(ACTIVITY_SLOT.into(), activity.name().to_string());
    vars.insert(TOOL_SLOT.into(), tool_name.into());
    vars.insert(
        SCHEMA_SLOT.into(),
        config.schema().map(|schema| schema.summary()).unwrap_or_default(),
    );
    vars
}

/// Renders the activity's description for the named tool.
///
/// The author's template is rendered first and then framed as
/// `"{activity}: {text}"`, followed by `"\nInput: {summary}"` when the
/// activity declares a schema. The name and the schema summary therefore
/// appear whether or not the template references them.
#[must_use]
pub fn render_description(activity: &Activity, tool_name: &str) -> String {
    let text = DescriptionTemplate::new(activity.config().description())
        .render(&bindings(activity, tool_name));
    let mut description = format!("{}: {text}", activity.name());
    if let Some(schema) = activity.config().schema() {
        description.push_str("\nInput: ");
        description.push_str(&schema.summary());
    }
    description
}

/// Renders the description followed by the raw input schema, if any.
#[must_use]
pub fn render_full_description(activity: &Activity, tool_name: &str, schema_id: &str) -> String {
    let description = render_description(activity, tool_name);
    match activity.config().schema() {
        Some(schema) => format!(
            "{description}\n\nInput schema: {}",
            schema.json_schema(schema_id)
        ),
        None => description,
    }
}

fn extract_slots(template: &str) -> Vec<String> {
    let mut slots = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start + 2..].find("}}") else {
            break;
        };
        let slot = rest[start + 2..start + 2 + len].trim();
        if !slot.is_empty() {
            slots.push(slot.to_owned());
        }
        rest = &rest[start + 2 + len + 2..];
    }

    slots
}
