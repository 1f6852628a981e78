//! Core shared types for toolsmith tools.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod ids;
mod value;

/// Error type and result alias shared across the workspace.
pub use error::{Error, Result};
/// Identifiers for activities and environment-visible fields.
pub use ids::{ActivityName, EnvKey};
/// Scalar configuration values with environment coercion.
pub use value::FieldValue;
