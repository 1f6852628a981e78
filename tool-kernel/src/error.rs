//! Errors surfaced by tool assembly and validation.

use thiserror::Error;
use tool_activities::ActivityError;
use tool_artifacts::ArtifactError;
use tool_config::ConfigError;
use tool_middleware::MiddlewareError;

/// Result alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors produced while building, validating or querying a tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// An activity declaration is malformed, or a schema was requested from
    /// an activity without one.
    #[error(transparent)]
    Activity(#[from] ActivityError),

    /// Supplied field values do not match the declared fields.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The middleware pipeline failed validation.
    #[error(transparent)]
    Middleware(#[from] MiddlewareError),

    /// An artifact could not be resolved, read or parsed.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// The tool name override is unusable.
    #[error("invalid tool name: {reason}")]
    InvalidName {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// A listed activity cannot be found again by its name.
    #[error("activity `{name}` cannot be resolved by name")]
    UnresolvableActivity {
        /// Name of the activity.
        name: String,
    },
}
