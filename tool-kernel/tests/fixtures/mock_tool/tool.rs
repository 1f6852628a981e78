//! Mock tool shared by the integration tests. Its artifacts sit next to
//! this file.

use std::path::PathBuf;

use tool_activities::{Activity, ActivityResult, InputSchema, PropertyType};
use tool_config::FieldSpec;
use tool_kernel::ToolDefinition;

pub struct MockTool;

impl MockTool {
    pub fn source_path() -> PathBuf {
        PathBuf::from(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/mock_tool/tool.rs"
        ))
    }
}

impl ToolDefinition for MockTool {
    const CLASS_NAME: &'static str = "MockTool";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::env("test_field"),
            FieldSpec::env("test_int"),
            FieldSpec::new("test_str").with_default("foo"),
        ]
    }

    fn activities() -> ActivityResult<Vec<Activity>> {
        let schema = InputSchema::builder()
            .description("Test input")
            .required("test", PropertyType::String, "")
            .build()?;

        Ok(vec![
            Activity::builder("test")
                .description("test description: {{foo}}")
                .schema(schema)
                .extra("foo", "bar")
                .build()?,
        ])
    }
}
