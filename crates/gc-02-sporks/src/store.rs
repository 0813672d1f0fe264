//! # Spork Store
//!
//! Durable copy of the latest accepted message per spork.
//!
//! ```text
//! key   = spork id as i32 little-endian
//! value = SporkMessage wire encoding
//! ```

use crate::domain::{KVStoreError, SporkMessage, SporkResult};
use crate::ports::KeyValueStore;

/// Typed view of a [`KeyValueStore`] holding spork messages.
#[derive(Debug)]
pub struct SporkDb<S> {
    store: S,
}

impl<S: KeyValueStore> SporkDb<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn key(spork_id: i32) -> [u8; 4] {
        spork_id.to_le_bytes()
    }

    /// Persist `message`, replacing any record for the same spork.
    pub fn write(&self, message: &SporkMessage) -> SporkResult<()> {
        self.store
            .put(&Self::key(message.spork_id()), &message.encode())?;
        Ok(())
    }

    /// Stored message for `spork_id`.
    pub fn read(&self, spork_id: i32) -> SporkResult<Option<SporkMessage>> {
        match self.store.get(&Self::key(spork_id))? {
            Some(bytes) => SporkMessage::decode(&bytes).map(Some).map_err(|e| {
                KVStoreError::CorruptionError {
                    message: format!("spork {spork_id}: {e}"),
                }
                .into()
            }),
            None => Ok(None),
        }
    }

    /// Whether a record exists for `spork_id`.
    pub fn exists(&self, spork_id: i32) -> SporkResult<bool> {
        Ok(self.store.exists(&Self::key(spork_id))?)
    }

    /// Flush the backing store.
    pub fn flush(&self) -> SporkResult<()> {
        Ok(self.store.flush()?)
    }

    /// Backing store.
    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
