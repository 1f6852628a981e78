use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use tempfile::TempDir;
use toolsmith::middleware::{MemoryStorageDriver, StorageMiddleware};
use toolsmith::prelude::*;

struct Weather;

impl ToolDefinition for Weather {
    const CLASS_NAME: &'static str = "Weather";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::env("api_key"),
            FieldSpec::env("timeout_secs").with_default(30),
            FieldSpec::new("units").with_default("metric"),
        ]
    }

    fn activities() -> ActivityResult<Vec<Activity>> {
        let schema = InputSchema::builder()
            .description("Forecast request")
            .required("city", PropertyType::String, "City to look up")
            .optional("days", PropertyType::Integer, "Forecast horizon")
            .build()?;

        Ok(vec![
            Activity::builder("forecast")
                .description("{{tool}} forecast for up to {{max_days}} days. Input: {{schema}}")
                .schema(schema)
                .extra("max_days", 7)
                .build()?,
            Activity::builder("current")
                .description("Current conditions")
                .build()?,
        ])
    }
}

fn write_artifacts(dir: &TempDir) {
    fs::write(
        dir.path().join("manifest.yml"),
        "version: v1\n\
         name: Weather\n\
         description: Weather lookups.\n\
         contact_email: ops@example.com\n\
         legal_info_url: https://example.com/legal\n",
    )
    .unwrap();
    fs::write(dir.path().join("Dockerfile"), "FROM python:3.12-slim\nCOPY . /app\n").unwrap();
    fs::write(dir.path().join("requirements.txt"), "httpx\n").unwrap();
}

#[test]
fn declared_tool_round_trips_through_facade() {
    let _ = toolsmith::telemetry::init_tracing(Some("warn"));

    let dir = TempDir::new().unwrap();
    write_artifacts(&dir);

    let tool = BaseTool::builder::<Weather>(dir.path().join("weather.rs"))
        .field("api_key", "secret")
        .add_middleware(
            "forecast",
            StorageMiddleware::new("cache", Arc::new(MemoryStorageDriver::new())),
        )
        .build()
        .unwrap();

    tool.validate().unwrap();
    assert_eq!(tool.manifest().unwrap().name(), Some("Weather"));
    assert_eq!(tool.dockerfile().unwrap().base_image(), Some("python:3.12-slim"));
    assert_eq!(tool.requirements().unwrap(), ["httpx"]);

    let forecast = tool.find_activity("forecast").unwrap();
    assert_eq!(
        tool.activity_description(forecast),
        "forecast: Weather forecast for up to 7 days. Input: city: string (required), days: integer (optional)\n\
         Input: city: string (required), days: integer (optional)"
    );

    let env = tool
        .env_resolver(HashMap::from([("TIMEOUT_SECS".to_owned(), "5".to_owned())]))
        .env();
    assert_eq!(env.get("API_KEY"), Some(&FieldValue::from("secret")));
    assert_eq!(env.get("TIMEOUT_SECS"), Some(&FieldValue::Int(5)));
    assert!(!env.contains_key("UNITS"));

    assert_eq!(tool.middleware()["forecast"][0].name(), "cache");
}
