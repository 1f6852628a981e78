//! The assembled tool and its builder.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tool_activities::description::{render_description, render_full_description};
use tool_activities::{Activity, ActivityRegistry, ActivityResult};
use tool_artifacts::{ArtifactError, ArtifactLoader, Dockerfile, ToolManifest};
use tool_config::{ConfigField, EnvSource, EnvironmentResolver, FieldSpec, ToolConfig};
use tool_middleware::{Middleware, MiddlewareGroup, MiddlewarePipeline};
use tool_primitives::{ActivityName, EnvKey, FieldValue};
use tracing::debug;

use crate::definition::{ToolDefinition, declared_activities};
use crate::error::{ToolError, ToolResult};

/// Identifier stamped on rendered activity input schemas.
pub const TOOL_INPUT_SCHEMA_ID: &str = "ToolInputSchema";

/// A fully assembled tool.
///
/// Everything except the environment view and the artifacts is fixed once
/// [`ToolBuilder::build`] succeeds. Environment lookups consult the process
/// environment on each call and artifacts are re-read on each access.
#[derive(Debug)]
pub struct BaseTool {
    name: String,
    class_name: &'static str,
    config: ToolConfig,
    activities: ActivityRegistry,
    middleware: MiddlewarePipeline,
    artifacts: ArtifactLoader,
}

impl BaseTool {
    /// Starts assembling a tool of type `T` whose source lives at
    /// `source_path`. Artifacts are looked up next to that file.
    #[must_use]
    pub fn builder<T: ToolDefinition>(source_path: impl Into<PathBuf>) -> ToolBuilder {
        ToolBuilder {
            class_name: T::CLASS_NAME,
            declare_fields: T::fields,
            declare_activities: declared_activities::<T>,
            source_path: source_path.into(),
            name: None,
            values: Vec::new(),
            middleware: Vec::new(),
        }
    }

    /// Returns the tool name: the override if one was supplied, else the class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the identity of the tool type, regardless of any name override.
    #[must_use]
    pub fn class_name(&self) -> &str {
        self.class_name
    }

    /// Returns the configuration record.
    #[must_use]
    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Returns the value of any declared field.
    #[must_use]
    pub fn config_value(&self, field: &str) -> Option<&FieldValue> {
        self.config.get(field)
    }

    /// Returns the environment-visible fields.
    #[must_use]
    pub fn env_fields(&self) -> Vec<&ConfigField> {
        self.config.env_fields()
    }

    /// Resolves every environment-visible field against the process environment.
    #[must_use]
    pub fn env(&self) -> BTreeMap<EnvKey, FieldValue> {
        EnvironmentResolver::new(&self.config).env()
    }

    /// Resolves one environment key against the process environment.
    #[must_use]
    pub fn env_value(&self, key: &str) -> Option<FieldValue> {
        EnvironmentResolver::new(&self.config).env_value(key)
    }

    /// Returns a resolver reading from a custom environment source.
    #[must_use]
    pub fn env_resolver<S: EnvSource>(&self, source: S) -> EnvironmentResolver<'_, S> {
        EnvironmentResolver::with_source(&self.config, source)
    }

    /// Returns the declared activities in declaration order.
    #[must_use]
    pub fn activities(&self) -> &[Activity] {
        self.activities.activities()
    }

    /// Returns the activity with exactly the supplied name.
    #[must_use]
    pub fn find_activity(&self, name: &str) -> Option<&Activity> {
        self.activities.find(name)
    }

    /// Returns the identifier used to look `activity` up.
    #[must_use]
    pub fn activity_name<'a>(&self, activity: &'a Activity) -> &'a ActivityName {
        activity.name()
    }

    /// Renders the activity's input schema as a JSON Schema document.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Activity`] wrapping
    /// [`tool_activities::ActivityError::MissingSchema`] when the activity
    /// declared no schema.
    pub fn activity_schema(&self, activity: &Activity) -> ToolResult<Value> {
        Ok(activity.json_schema(TOOL_INPUT_SCHEMA_ID)?)
    }

    /// Renders the activity's description template for this tool.
    #[must_use]
    pub fn activity_description(&self, activity: &Activity) -> String {
        render_description(activity, &self.name)
    }

    /// Renders the description followed by the raw input schema.
    #[must_use]
    pub fn full_activity_description(&self, activity: &Activity) -> String {
        render_full_description(activity, &self.name, TOOL_INPUT_SCHEMA_ID)
    }

    /// Returns the middleware mapping exactly as supplied.
    #[must_use]
    pub fn middleware(&self) -> &BTreeMap<String, MiddlewareGroup> {
        self.middleware.middleware()
    }

    /// Returns the validated middleware pipeline.
    #[must_use]
    pub fn middleware_pipeline(&self) -> &MiddlewarePipeline {
        &self.middleware
    }

    /// Returns the artifact loader anchored at the tool's source.
    #[must_use]
    pub fn artifacts(&self) -> &ArtifactLoader {
        &self.artifacts
    }

    /// Returns the absolute path of the tool's source file.
    #[must_use]
    pub fn abs_file_path(&self) -> &Path {
        self.artifacts.abs_file_path()
    }

    /// Returns the directory containing the tool's source file.
    #[must_use]
    pub fn abs_dir_path(&self) -> &Path {
        self.artifacts.abs_dir_path()
    }

    /// Returns the manifest location.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.artifacts.manifest_path()
    }

    /// Returns the Dockerfile location.
    #[must_use]
    pub fn dockerfile_path(&self) -> PathBuf {
        self.artifacts.dockerfile_path()
    }

    /// Returns the requirements list location.
    #[must_use]
    pub fn requirements_path(&self) -> PathBuf {
        self.artifacts.requirements_path()
    }

    /// Reads and parses the manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Artifact`] when the file is missing or malformed.
    pub fn manifest(&self) -> ToolResult<ToolManifest> {
        Ok(self.artifacts.manifest()?)
    }

    /// Reads and parses the Dockerfile.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Artifact`] when the file is missing or malformed.
    pub fn dockerfile(&self) -> ToolResult<Dockerfile> {
        Ok(self.artifacts.dockerfile()?)
    }

    /// Reads the requirements list.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Artifact`] when the file is missing or unreadable.
    pub fn requirements(&self) -> ToolResult<Vec<String>> {
        Ok(self.artifacts.requirements()?)
    }

    /// Checks the tool's structural well-formedness.
    ///
    /// The activity check re-asserts the registry invariant that every listed
    /// activity resolves by name to that same entry; `build` already
    /// guarantees it, so a failure there means the registry was corrupted.
    /// The requirements file must exist and the manifest must carry every
    /// required key with a non-empty value. The middleware pipeline was
    /// already validated by the builder.
    ///
    /// # Errors
    ///
    /// Returns the first failed check.
    pub fn validate(&self) -> ToolResult<()> {
        for activity in self.activities() {
            let resolved = self
                .find_activity(activity.name().as_str())
                .is_some_and(|found| std::ptr::eq(found, activity));
            if !resolved {
                return Err(ToolError::UnresolvableActivity {
                    name: activity.name().to_string(),
                });
            }
        }

        let requirements = self.requirements_path();
        if !requirements.is_file() {
            return Err(ArtifactError::NotFound { path: requirements }.into());
        }

        self.manifest()?.validate()?;
        debug!(tool = %self.name, "tool validated");
        Ok(())
    }
}

/// Builder for [`BaseTool`], obtained from [`BaseTool::builder`].
#[derive(Debug)]
pub struct ToolBuilder {
    class_name: &'static str,
    declare_fields: fn() -> Vec<FieldSpec>,
    declare_activities: fn() -> ActivityResult<Vec<Activity>>,
    source_path: PathBuf,
    name: Option<String>,
    values: Vec<(String, FieldValue)>,
    middleware: Vec<(String, MiddlewareGroup)>,
}

impl ToolBuilder {
    /// Overrides the tool name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Supplies a value for a declared field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.push((name.into(), value.into()));
        self
    }

    /// Attaches a whole middleware group.
    #[must_use]
    pub fn middleware(mut self, group: impl Into<String>, entries: MiddlewareGroup) -> Self {
        self.middleware.push((group.into(), entries));
        self
    }

    /// Appends one middleware to a group, creating the group if needed.
    #[must_use]
    pub fn add_middleware<M>(mut self, group: impl Into<String>, middleware: M) -> Self
    where
        M: Middleware + 'static,
    {
        let group = group.into();
        let entry: Arc<dyn Middleware> = Arc::new(middleware);
        match self.middleware.iter_mut().find(|(name, _)| *name == group) {
            Some((_, entries)) => entries.push(entry),
            None => self.middleware.push((group, vec![entry])),
        }
        self
    }

    /// Assembles the tool.
    ///
    /// Nothing is returned unless every step succeeds.
    ///
    /// # Errors
    ///
    /// - [`ToolError::Activity`] for malformed or duplicate activity declarations.
    /// - [`ToolError::Config`] for undeclared or repeated field values.
    /// - [`ToolError::InvalidName`] for an empty name override.
    /// - [`ToolError::Artifact`] when the source path cannot anchor artifacts.
    /// - [`ToolError::Middleware`] when a group repeats a middleware name.
    pub fn build(self) -> ToolResult<BaseTool> {
        let activities = ActivityRegistry::from_activities((self.declare_activities)()?)?;
        let config = ToolConfig::new((self.declare_fields)(), self.values)?;

        let name = match self.name {
            Some(name) if name.trim().is_empty() => {
                return Err(ToolError::InvalidName {
                    reason: "name override cannot be empty".into(),
                });
            }
            Some(name) => name,
            None => self.class_name.to_owned(),
        };

        let artifacts = ArtifactLoader::new(&self.source_path)?;
        let middleware = MiddlewarePipeline::from_groups(self.middleware)?;

        debug!(
            tool = %name,
            class = self.class_name,
            activities = activities.len(),
            middleware_groups = middleware.middleware().len(),
            dir = %artifacts.abs_dir_path().display(),
            "tool assembled"
        );

        Ok(BaseTool {
            name,
            class_name: self.class_name,
            config,
            activities,
            middleware,
            artifacts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tool_activities::ActivityError;
    use tool_middleware::{MemoryStorageDriver, MiddlewareError, StorageMiddleware};

    struct Echo;

    impl ToolDefinition for Echo {
        const CLASS_NAME: &'static str = "Echo";

        fn fields() -> Vec<FieldSpec> {
            vec![FieldSpec::env("prefix").with_default(">")]
        }

        fn activities() -> ActivityResult<Vec<Activity>> {
            Ok(vec![
                Activity::builder("echo")
                    .description("Repeats input from {{tool}}")
                    .build()?,
            ])
        }
    }

    struct Twice;

    impl ToolDefinition for Twice {
        const CLASS_NAME: &'static str = "Twice";

        fn activities() -> ActivityResult<Vec<Activity>> {
            let echo = Activity::builder("echo").description("a").build()?;
            Ok(vec![echo.clone(), echo])
        }
    }

    static COUNTED_CALLS: AtomicUsize = AtomicUsize::new(0);

    struct Counted;

    impl ToolDefinition for Counted {
        const CLASS_NAME: &'static str = "Counted";

        fn activities() -> ActivityResult<Vec<Activity>> {
            COUNTED_CALLS.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Activity::builder("count").description("Counts").build()?])
        }
    }

    fn storage(name: &str) -> StorageMiddleware {
        StorageMiddleware::new(name, Arc::new(MemoryStorageDriver::new()))
    }

    #[test]
    fn name_defaults_to_class_name() {
        let tool = BaseTool::builder::<Echo>("/tools/echo/tool.rs").build().unwrap();
        assert_eq!(tool.name(), "Echo");
        assert_eq!(tool.class_name(), "Echo");
        assert_eq!(tool.config_value("prefix"), Some(&FieldValue::from(">")));
    }

    #[test]
    fn name_override_keeps_class_name() {
        let tool = BaseTool::builder::<Echo>("/tools/echo/tool.rs")
            .name("Parrot")
            .build()
            .unwrap();
        assert_eq!(tool.name(), "Parrot");
        assert_eq!(tool.class_name(), "Echo");

        let echo = tool.find_activity("echo").unwrap();
        assert_eq!(tool.activity_description(echo), "echo: Repeats input from Parrot");
    }

    #[test]
    fn empty_name_override_is_rejected() {
        let err = BaseTool::builder::<Echo>("/tools/echo/tool.rs")
            .name("  ")
            .build()
            .expect_err("empty name");
        assert!(matches!(err, ToolError::InvalidName { .. }));
    }

    #[test]
    fn duplicate_activity_names_fail_build() {
        let err = BaseTool::builder::<Twice>("/tools/twice/tool.rs")
            .build()
            .expect_err("duplicate activity");
        assert!(matches!(
            err,
            ToolError::Activity(ActivityError::DuplicateActivity { .. })
        ));
    }

    #[test]
    fn add_middleware_appends_in_order() {
        let tool = BaseTool::builder::<Echo>("/tools/echo/tool.rs")
            .add_middleware("echo", storage("First"))
            .add_middleware("echo", storage("Second"))
            .build()
            .unwrap();

        let names: Vec<_> = tool.middleware()["echo"].iter().map(|m| m.name()).collect();
        assert_eq!(names, ["First", "Second"]);
    }

    #[test]
    fn add_middleware_duplicates_fail_build() {
        let err = BaseTool::builder::<Echo>("/tools/echo/tool.rs")
            .add_middleware("echo", storage("Same"))
            .add_middleware("echo", storage("Same"))
            .build()
            .expect_err("duplicate middleware");
        assert!(matches!(
            err,
            ToolError::Middleware(MiddlewareError::DuplicateName { .. })
        ));
    }

    #[test]
    fn activity_schema_requires_declaration() {
        let tool = BaseTool::builder::<Echo>("/tools/echo/tool.rs").build().unwrap();
        let echo = tool.find_activity("echo").unwrap();
        assert!(matches!(
            tool.activity_schema(echo),
            Err(ToolError::Activity(ActivityError::MissingSchema { .. }))
        ));
        assert_eq!(
            tool.full_activity_description(echo),
            tool.activity_description(echo)
        );
    }

    #[test]
    fn activity_declarations_are_evaluated_once() {
        for name in ["first", "second", "third"] {
            let tool = BaseTool::builder::<Counted>("/tools/counted/tool.rs")
                .name(name)
                .build()
                .unwrap();
            assert!(tool.find_activity("count").is_some());
        }
        assert_eq!(COUNTED_CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn declaration_errors_are_reported_on_every_build() {
        for _ in 0..2 {
            let err = BaseTool::builder::<Twice>("/tools/twice/tool.rs")
                .build()
                .expect_err("duplicate activity");
            assert!(matches!(err, ToolError::Activity(ActivityError::DuplicateActivity { .. })));
        }
    }
}
