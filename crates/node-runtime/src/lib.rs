//! # Node Runtime Library
//!
//! Exposes the node's wiring for the binary and for integration tests.
//!
//! ## Modular Structure
//!
//! - `container/` - Configuration and dependency injection
//! - `adapters/` - Storage backends and channel bridges to the peer and chain layers
//! - `handlers/` - Async loops for inbound peer traffic
//! - `runtime` - Startup and shutdown sequencing

pub mod adapters;
pub mod container;
pub mod handlers;
pub mod runtime;

pub use container::{ConfigError, NodeConfig, NodeContainer};
pub use runtime::NodeRuntime;
