//! Error types for tool configuration.

use thiserror::Error;

/// Errors emitted while assembling a tool configuration record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A value was supplied for a field the tool never declared.
    #[error("unknown configuration field `{name}`")]
    UnknownField {
        /// Name of the undeclared field.
        name: String,
    },

    /// Two field declarations (or two supplied values) share a name.
    #[error("configuration field `{name}` is declared more than once")]
    DuplicateField {
        /// Name of the repeated field.
        name: String,
    },

    /// Two environment-visible fields map to the same environment key.
    #[error("environment key `{key}` is claimed by both `{first}` and `{second}`")]
    DuplicateEnvKey {
        /// The contested key.
        key: String,
        /// Field that claimed the key first.
        first: String,
        /// Field that attempted to claim it again.
        second: String,
    },

    /// A field name could not be turned into an environment key.
    #[error(transparent)]
    Primitive(#[from] tool_primitives::Error),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
