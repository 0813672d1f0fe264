//! In-memory block index.

use crate::domain::{BlockIndexEntry, CompactTarget};
use crate::ports::ChainIndex;
use parking_lot::RwLock;
use shared_types::Hash;
use std::collections::HashMap;

#[derive(Default)]
struct Inner {
    blocks: HashMap<Hash, BlockIndexEntry>,
    tip: Option<Hash>,
}

/// Block index held in a hash map, with a tracked best tip.
///
/// Supports side branches: any entry whose parent is known can be inserted.
#[derive(Default)]
pub struct InMemoryChainIndex {
    inner: RwLock<Inner>,
}

impl InMemoryChainIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry and make it the tip if it is the highest seen.
    pub fn insert(&self, entry: BlockIndexEntry) {
        let mut inner = self.inner.write();
        let higher = inner
            .tip
            .and_then(|t| inner.blocks.get(&t))
            .map_or(true, |tip| entry.height > tip.height);
        if higher {
            inner.tip = Some(entry.hash);
        }
        inner.blocks.insert(entry.hash, entry);
    }

    /// Extend the tip with a synthetic block and return it.
    pub fn append(&self, version: i32, time: i64, bits: CompactTarget) -> BlockIndexEntry {
        let parent = self.tip();
        let height = parent.map_or(0, |p| p.height + 1);

        let mut hash = [0u8; 32];
        hash[..8].copy_from_slice(&height.to_le_bytes());
        hash[8..16].copy_from_slice(&time.to_le_bytes());
        hash[16..20].copy_from_slice(&version.to_le_bytes());
        hash[20..24].copy_from_slice(&bits.0.to_le_bytes());
        if let Some(p) = parent {
            hash[24..].copy_from_slice(&p.hash[..8]);
        }

        let entry = BlockIndexEntry {
            hash,
            prev_hash: parent.map(|p| p.hash),
            height,
            version,
            time,
            bits,
        };
        self.insert(entry);
        entry
    }

    /// Current best tip.
    pub fn tip(&self) -> Option<BlockIndexEntry> {
        let inner = self.inner.read();
        inner.tip.and_then(|t| inner.blocks.get(&t).copied())
    }

    pub fn get(&self, hash: &Hash) -> Option<BlockIndexEntry> {
        self.inner.read().blocks.get(hash).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.read().blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().blocks.is_empty()
    }

    /// Copy of the newest `count` blocks of the best chain, without their
    /// ancestors.
    pub fn top(&self, count: u64) -> Self {
        let out = Self::new();
        let mut cursor = self.tip();
        let mut entries = Vec::new();
        while let Some(block) = cursor {
            if entries.len() as u64 >= count {
                break;
            }
            entries.push(block);
            cursor = self.previous(&block);
        }
        for entry in entries.into_iter().rev() {
            out.insert(entry);
        }
        out
    }
}

impl ChainIndex for InMemoryChainIndex {
    fn previous(&self, block: &BlockIndexEntry) -> Option<BlockIndexEntry> {
        let prev = block.prev_hash?;
        self.get(&prev)
    }
}
