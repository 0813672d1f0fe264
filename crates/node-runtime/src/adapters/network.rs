//! # Network and Chain Bridges
//!
//! The spork manager calls its relay and reprocessor ports synchronously.
//! These adapters turn each call into an [`OutboundMessage`] on an unbounded
//! channel drained by the peer and chain layers.

use gc_02_sporks::{BlockReprocessor, SporkMessage, SporkRelay};
use shared_types::{InventoryItem, PeerId};
use tokio::sync::mpsc;
use tracing::warn;

/// Work leaving the spork subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    /// Announce to every peer.
    Inventory(InventoryItem),
    /// Send a `spork` message to one peer.
    Spork { peer: PeerId, payload: Vec<u8> },
    /// Raise a peer's misbehaviour score.
    Penalize { peer: PeerId, score: u32 },
    /// Ask the chain layer to re-validate recent blocks.
    ReconsiderBlocks(u32),
}

/// Sender side shared by [`ChannelRelay`] and [`ChannelReprocessor`].
pub type OutboundSender = mpsc::UnboundedSender<OutboundMessage>;

/// [`SporkRelay`] over a channel.
#[derive(Clone)]
pub struct ChannelRelay {
    tx: OutboundSender,
}

impl ChannelRelay {
    pub fn new(tx: OutboundSender) -> Self {
        Self { tx }
    }

    fn send(&self, message: OutboundMessage) {
        if let Err(e) = self.tx.send(message) {
            warn!(message = ?e.0, "Outbound channel closed, dropping message");
        }
    }
}

impl SporkRelay for ChannelRelay {
    fn relay_inventory(&self, item: InventoryItem) {
        self.send(OutboundMessage::Inventory(item));
    }

    fn send_spork(&self, peer: PeerId, message: &SporkMessage) {
        self.send(OutboundMessage::Spork {
            peer,
            payload: message.encode(),
        });
    }

    fn penalize(&self, peer: PeerId, score: u32) {
        self.send(OutboundMessage::Penalize { peer, score });
    }
}

/// [`BlockReprocessor`] over a channel.
#[derive(Clone)]
pub struct ChannelReprocessor {
    tx: OutboundSender,
}

impl ChannelReprocessor {
    pub fn new(tx: OutboundSender) -> Self {
        Self { tx }
    }
}

impl BlockReprocessor for ChannelReprocessor {
    fn reprocess_blocks(&self, blocks: u32) -> Result<(), String> {
        self.tx
            .send(OutboundMessage::ReconsiderBlocks(blocks))
            .map_err(|_| "chain layer is not listening".to_string())
    }
}
