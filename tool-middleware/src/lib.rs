//! Middleware attached to tool activities.
//!
//! A tool owns a [`MiddlewarePipeline`]: for each activity group, an ordered
//! sequence of named [`Middleware`] objects. The pipeline only validates and
//! exposes the declarations; running the wrapped behaviour is left to the
//! executor that consumes the tool.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod pipeline;
mod storage;

pub use error::{MiddlewareError, MiddlewareResult};
pub use pipeline::{Middleware, MiddlewareGroup, MiddlewarePipeline};
pub use storage::{MemoryStorageDriver, StorageDriver, StorageKey, StorageMiddleware};
