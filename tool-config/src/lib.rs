//! Configuration management for tools.
//!
//! A tool declares its configuration fields up front as [`FieldSpec`]s. Each
//! field can be flagged as environment-visible, in which case it is exposed
//! through an [`EnvironmentResolver`] under an environment-style key and may
//! be overridden at runtime by the process environment.

#![warn(missing_docs, clippy::pedantic)]

mod env;
mod error;
mod field;

pub use env::{EnvSource, EnvironmentResolver, ProcessEnv};
pub use error::{ConfigError, ConfigResult};
pub use field::{ConfigField, FieldSpec, ToolConfig};
