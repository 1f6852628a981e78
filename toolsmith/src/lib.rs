//! Declarative tool abstraction facade.
//!
//! Depend on this crate via `cargo add toolsmith`. It bundles the internal
//! crates behind feature flags so downstream users can enable or disable
//! components as needed for their tools.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use tool_primitives as primitives;

/// Tool assembly and validation (enabled by `kernel` feature).
#[cfg(feature = "kernel")]
pub use tool_kernel as kernel;

/// Typed configuration and environment resolution (enabled by `config` feature).
#[cfg(feature = "config")]
pub use tool_config as config;

/// Activity declarations, schemas and descriptions (enabled by `activities` feature).
#[cfg(feature = "activities")]
pub use tool_activities as activities;

/// Middleware pipelines (enabled by `middleware` feature).
#[cfg(feature = "middleware")]
pub use tool_middleware as middleware;

/// Manifest, Dockerfile and requirements loading (enabled by `artifacts` feature).
#[cfg(feature = "artifacts")]
pub use tool_artifacts as artifacts;

/// Tracing bootstrap (enabled by `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use tool_telemetry as telemetry;

/// Items needed to declare and assemble a tool.
#[cfg(feature = "kernel")]
pub mod prelude {
    pub use tool_activities::{Activity, ActivityResult, InputSchema, PropertyType};
    pub use tool_config::FieldSpec;
    pub use tool_kernel::{BaseTool, ToolDefinition, ToolError, ToolResult};
    pub use tool_middleware::{Middleware, MiddlewareGroup};
    pub use tool_primitives::FieldValue;
}
