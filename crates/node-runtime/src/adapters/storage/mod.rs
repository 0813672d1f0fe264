//! # Storage Adapters
//!
//! Backends for the spork store, selected at startup by
//! [`StorageBackend`](crate::container::config::StorageBackend).
//!
//! Enable the `rocksdb` feature to make RocksDB available:
//!
//! ```toml
//! node-runtime = { path = "...", features = ["rocksdb"] }
//! ```

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;
pub mod sled_adapter;

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbStore};
pub use sled_adapter::SledStore;

use crate::container::config::{ConfigError, StorageBackend};
use gc_02_sporks::adapters::InMemoryKVStore;
use gc_02_sporks::{KVStoreError, KeyValueStore};
use std::path::Path;

/// Store chosen by configuration.
pub enum NodeStore {
    Memory(InMemoryKVStore),
    Sled(SledStore),
    #[cfg(feature = "rocksdb")]
    RocksDb(RocksDbStore),
}

/// Failure to open the configured store.
#[derive(Debug, thiserror::Error)]
pub enum OpenStoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] KVStoreError),
    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl NodeStore {
    /// Open `backend` at `path`, creating the directory if needed.
    pub fn open(backend: StorageBackend, path: &Path) -> Result<Self, OpenStoreError> {
        if backend != StorageBackend::Memory {
            std::fs::create_dir_all(path).map_err(|source| OpenStoreError::CreateDir {
                path: path.display().to_string(),
                source,
            })?;
        }
        match backend {
            StorageBackend::Memory => Ok(NodeStore::Memory(InMemoryKVStore::new())),
            StorageBackend::Sled => Ok(NodeStore::Sled(SledStore::open(path)?)),
            #[cfg(feature = "rocksdb")]
            StorageBackend::RocksDb => Ok(NodeStore::RocksDb(RocksDbStore::open(
                RocksDbConfig::new(path),
            )?)),
            #[cfg(not(feature = "rocksdb"))]
            StorageBackend::RocksDb => Err(ConfigError::BackendUnavailable(backend).into()),
        }
    }

    fn inner(&self) -> &dyn KeyValueStore {
        match self {
            NodeStore::Memory(store) => store,
            NodeStore::Sled(store) => store,
            #[cfg(feature = "rocksdb")]
            NodeStore::RocksDb(store) => store,
        }
    }
}

impl KeyValueStore for NodeStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.inner().get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.inner().put(key, value)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        self.inner().exists(key)
    }

    fn flush(&self) -> Result<(), KVStoreError> {
        self.inner().flush()
    }
}
