//! Tool composition root.
//!
//! This crate wires the building blocks of a tool together: declared
//! activities, the typed configuration record with its environment view, the
//! middleware pipeline and the on-disk artifacts. A tool author implements
//! [`ToolDefinition`] and obtains a usable [`BaseTool`] through
//! [`BaseTool::builder`].

#![warn(missing_docs, clippy::pedantic)]

mod definition;
mod error;
mod tool;

pub use definition::ToolDefinition;
pub use error::{ToolError, ToolResult};
pub use tool::{BaseTool, TOOL_INPUT_SCHEMA_ID, ToolBuilder};
