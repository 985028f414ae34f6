//! Tool catalogue and dispatch.
//!
//! - [`schema`]: record definitions and the schema flattener
//! - [`registry`]: tool descriptors, handler traits, and the name index
//! - [`invoker`]: name-based dispatch with outcome normalization
//! - [`catalogue`]: public projection of the registry

pub mod catalogue;
pub mod error;
pub mod invoker;
pub mod registry;
pub mod schema;

pub use error::{InvocationError, RegistryError, ToolError};
pub use invoker::{InvocationResult, ToolInvoker};
pub use registry::{ToolDescriptor, ToolHandler, ToolParams, ToolRegistry, Typed, TypedTool};
pub use schema::{ParameterSchema, SchemaFlattener};
