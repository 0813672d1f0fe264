//! Adapters for the outbound ports.
//!
//! In-memory implementations for tests, tools and nodes that keep the
//! block index resident.

pub mod memory_chain;
pub mod static_params;

pub use memory_chain::InMemoryChainIndex;
pub use static_params::StaticNetworkParameters;
