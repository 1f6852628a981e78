//! Shared error definitions for tool primitives.

use thiserror::Error;

/// Result alias used throughout the tool primitives.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing primitive identifiers.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Activity identifier failed validation.
    #[error("invalid activity name `{name}`: {reason}")]
    InvalidActivityName {
        /// The offending identifier string.
        name: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Environment key could not be derived or failed validation.
    #[error("invalid environment key `{key}`: {reason}")]
    InvalidEnvKey {
        /// The offending key string.
        key: String,
        /// Human-readable reason for rejection.
        reason: String,
    },
}
