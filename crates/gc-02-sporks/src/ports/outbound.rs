//! Driven ports (Outbound dependencies)

use crate::domain::{KVStoreError, SporkMessage};
use shared_types::{InventoryItem, PeerId};

/// Byte-keyed durable storage.
///
/// Production: sled or RocksDB adapters in `node-runtime`.
/// Testing: [`crate::adapters::InMemoryKVStore`].
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair, replacing any previous value.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;

    /// Make previous writes durable.
    fn flush(&self) -> Result<(), KVStoreError> {
        Ok(())
    }
}

/// Outbound side of the peer network.
pub trait SporkRelay: Send + Sync {
    /// Announce an inventory item to every peer.
    fn relay_inventory(&self, item: InventoryItem);

    /// Send a full spork message to one peer.
    fn send_spork(&self, peer: PeerId, message: &SporkMessage);

    /// Add `score` to a peer's misbehaviour counter.
    fn penalize(&self, peer: PeerId, score: u32);
}

/// Chain-layer hook used by `SPORK_12_RECONSIDER_BLOCKS`.
pub trait BlockReprocessor: Send + Sync {
    /// Re-validate the last `blocks` blocks of the active chain.
    fn reprocess_blocks(&self, blocks: u32) -> Result<(), String>;
}

/// Clock abstraction.
pub trait TimeSource: Send + Sync {
    /// Local unix time in seconds.
    fn now(&self) -> i64;

    /// Network-adjusted unix time in seconds.
    fn adjusted_time(&self) -> i64 {
        self.now()
    }
}

/// Default time source using system time with an optional peer offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource {
    offset_secs: i64,
}

impl SystemTimeSource {
    /// Apply a fixed offset to adjusted time.
    pub fn with_offset(offset_secs: i64) -> Self {
        Self { offset_secs }
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default()
    }

    fn adjusted_time(&self) -> i64 {
        self.now() + self.offset_secs
    }
}
