//! Errors raised while declaring or querying activities.

use thiserror::Error;

/// Result alias for activity operations.
pub type ActivityResult<T> = Result<T, ActivityError>;

/// Errors produced by activity declaration and schema rendering.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ActivityError {
    /// A required configuration key was not declared.
    #[error("activity `{activity}` is missing required config key `{key}`")]
    MissingConfigKey {
        /// Name of the offending activity.
        activity: String,
        /// The missing key.
        key: &'static str,
    },

    /// A custom configuration key collides with a built-in one.
    #[error("activity `{activity}` cannot use reserved config key `{key}`")]
    ReservedConfigKey {
        /// Name of the offending activity.
        activity: String,
        /// The reserved key.
        key: String,
    },

    /// The declared input schema is malformed.
    #[error("invalid input schema: {reason}")]
    InvalidSchema {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Two activities of the same tool share a name.
    #[error("activity `{name}` is declared more than once")]
    DuplicateActivity {
        /// Name of the repeated activity.
        name: String,
    },

    /// A schema was requested for an activity that declared none.
    #[error("activity `{activity}` does not declare an input schema")]
    MissingSchema {
        /// Name of the activity.
        activity: String,
    },

    /// The activity name failed validation.
    #[error(transparent)]
    Primitive(#[from] tool_primitives::Error),
}

impl ActivityError {
    /// Creates an invalid schema error from the supplied reason.
    #[must_use]
    pub fn invalid_schema(reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            reason: reason.into(),
        }
    }
}
