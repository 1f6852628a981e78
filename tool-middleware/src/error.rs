//! Error types for middleware pipelines.

use thiserror::Error;

/// Errors emitted while assembling a middleware pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MiddlewareError {
    /// Two entries of the same group share a name.
    #[error("middleware `{name}` appears more than once in group `{group}`")]
    DuplicateName {
        /// Group containing the collision.
        group: String,
        /// The repeated middleware name.
        name: String,
    },

    /// The same group key was supplied twice.
    #[error("middleware group `{group}` is declared more than once")]
    DuplicateGroup {
        /// The repeated group key.
        group: String,
    },

    /// A middleware reported an empty name.
    #[error("middleware in group `{group}` has an empty name")]
    EmptyName {
        /// Group containing the nameless entry.
        group: String,
    },
}

/// Result type alias for middleware operations.
pub type MiddlewareResult<T> = Result<T, MiddlewareError>;
