//! # Node Container
//!
//! Configuration and dependency injection for the node's services.

pub mod config;
pub mod node;

pub use config::{ConfigError, NodeConfig, StorageBackend};
pub use node::{NodeContainer, NodeProofOfWork, NodeSporkManager};
