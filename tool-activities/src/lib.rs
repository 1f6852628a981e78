//! Activity declaration and discovery utilities.
//!
//! A tool lists its activities explicitly through [`Activity::builder`]. The
//! modules exposed here validate those declarations, derive JSON input
//! schemas and descriptions from them, and index them by name for lookup.

#![warn(missing_docs, clippy::pedantic)]

pub mod activity;
pub mod description;
pub mod error;
pub mod registry;
pub mod schema;

pub use activity::{Activity, ActivityBuilder, ActivityConfig};
pub use error::{ActivityError, ActivityResult};
pub use registry::ActivityRegistry;
pub use schema::{InputSchema, InputSchemaBuilder, PropertyType};
