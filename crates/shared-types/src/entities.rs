//! # Core Domain Entities
//!
//! Primitive values exchanged between the chain, network and consensus
//! layers.

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

/// A 32-byte hash in internal (little-endian) byte order.
pub type Hash = [u8; 32];

/// Renders a hash the way users see it: most significant byte first.
pub fn hash_to_hex(hash: &Hash) -> String {
    let mut reversed = *hash;
    reversed.reverse();
    hex::encode(reversed)
}

/// Interprets a hash as an unsigned 256-bit integer.
///
/// Internal byte order is little-endian, so byte 31 is the most significant.
pub fn hash_to_u256(hash: &Hash) -> U256 {
    U256::from_little_endian(hash)
}

/// Inverse of [`hash_to_u256`].
pub fn u256_to_hash(value: &U256) -> Hash {
    let mut out = [0u8; 32];
    value.to_little_endian(&mut out);
    out
}

/// Connection-scoped identifier the network layer assigns to a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeerId(pub u64);

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "peer={}", self.0)
    }
}

/// Kinds of inventory announced to peers.
///
/// Discriminants are the on-wire inventory type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum InventoryKind {
    /// A transaction.
    Transaction = 1,
    /// A block.
    Block = 2,
    /// A signed network parameter update.
    Spork = 6,
}

/// An `(kind, hash)` announcement relayed to peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryItem {
    /// What the hash refers to.
    pub kind: InventoryKind,
    /// Identity of the announced object.
    pub hash: Hash,
}

impl InventoryItem {
    /// Inventory item announcing a spork message.
    pub fn spork(hash: Hash) -> Self {
        Self {
            kind: InventoryKind::Spork,
            hash,
        }
    }
}

impl fmt::Display for InventoryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.kind, hash_to_hex(&self.hash))
    }
}
