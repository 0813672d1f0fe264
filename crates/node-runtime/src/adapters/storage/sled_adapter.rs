//! # Sled Storage Adapter
//!
//! Default durable backend for the spork store. Sled is an embedded,
//! thread-safe tree, so no extra locking is needed around it.

use gc_02_sporks::{KVStoreError, KeyValueStore};
use std::path::Path;

/// Sled-backed key-value store.
#[derive(Clone)]
pub struct SledStore {
    db: sled::Db,
}

fn io_error(operation: &str, e: sled::Error) -> KVStoreError {
    KVStoreError::IOError {
        message: format!("sled {operation} failed: {e}"),
    }
}

impl SledStore {
    /// Open or create a database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, KVStoreError> {
        let db = sled::open(path.as_ref()).map_err(|e| io_error("open", e))?;
        Ok(Self { db })
    }

    /// Database removed when the last handle is dropped.
    pub fn temporary() -> Result<Self, KVStoreError> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .map_err(|e| io_error("open", e))?;
        Ok(Self { db })
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.db
            .get(key)
            .map(|value| value.map(|v| v.to_vec()))
            .map_err(|e| io_error("get", e))
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.db
            .insert(key, value)
            .map(|_| ())
            .map_err(|e| io_error("insert", e))
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        self.db
            .contains_key(key)
            .map_err(|e| io_error("contains_key", e))
    }

    fn flush(&self) -> Result<(), KVStoreError> {
        self.db.flush().map(|_| ()).map_err(|e| io_error("flush", e))
    }
}
