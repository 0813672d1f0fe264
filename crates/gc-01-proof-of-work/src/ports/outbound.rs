//! Driven ports (Outbound dependencies)
//!
//! Retargeting runs on the block-validation path. Implementations must
//! answer from memory: no I/O, no blocking.

use crate::domain::{Algorithm, BlockIndexEntry};

/// Read access to the block index.
pub trait ChainIndex: Send + Sync {
    /// Parent of `block`, `None` at genesis or if unknown.
    fn previous(&self, block: &BlockIndexEntry) -> Option<BlockIndexEntry>;

    /// Ancestor of `block` at `height` on the same branch.
    fn ancestor(&self, block: &BlockIndexEntry, height: u64) -> Option<BlockIndexEntry> {
        if height > block.height {
            return None;
        }
        let mut cursor = *block;
        while cursor.height > height {
            cursor = self.previous(&cursor)?;
        }
        Some(cursor)
    }
}

/// Runtime-tunable parameters that feed retargeting.
///
/// Values follow the spork conventions: heights and forces are plain
/// integers and "disabled" is a far-future height.
pub trait NetworkParameters: Send + Sync {
    /// First height at which handbrake forces apply.
    fn handbrake_height(&self) -> i64;

    /// Braking force for blocks of `algorithm`.
    fn handbrake_force(&self, algorithm: Algorithm) -> i64;

    /// Runtime override of the spacing-fix activation height.
    fn spacing_fix_height(&self) -> Option<i64>;
}
