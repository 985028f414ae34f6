//! Property Tools
//!
//! An HTTP service that advertises a catalogue of callable tools and invokes
//! them by name. The bundled tools answer real-estate investment questions
//! over a caller-supplied list of property listings.
//!
//! # Architecture
//!
//! - **Server**: Axum router exposing the tool catalogue and the invocation endpoint
//! - **Tools**: schema flattening, registry, dispatch and catalogue projection
//! - **Investment**: filtering, cost comparison and detail views over listings
//!
//! # Modules
//!
//! - [`config`]: layered configuration (defaults, file, environment, CLI)
//! - [`tools`]: tool-serving core
//! - [`investment`]: domain tools
//! - [`server`]: HTTP boundary

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::implicit_hasher)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::unused_async)]

pub mod config;
pub mod investment;
pub mod server;
pub mod tools;

use crate::config::AppConfig;
use std::sync::Arc;
use tools::{ToolInvoker, ToolRegistry};

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Immutable tool registry, built once at startup.
    pub registry: Arc<ToolRegistry>,
    /// Dispatcher over `registry`.
    pub invoker: ToolInvoker,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}
