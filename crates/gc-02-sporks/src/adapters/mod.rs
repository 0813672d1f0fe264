//! Adapters bundled with the crate.

mod memory;

pub use memory::InMemoryKVStore;
