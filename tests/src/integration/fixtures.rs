//! Shared fixtures: recording ports and a spork authority with its key.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use gc_02_sporks::{
    BlockReprocessor, KeyValueStore, SporkManager, SporkMessage, SporkNetworkConfig, SporkRelay,
    SporkSigner, TimeSource, MESSAGE_MAGIC,
};
use shared_crypto::Secp256k1KeyPair;
use shared_types::{InventoryItem, PeerId};

/// Clock start used by every fixture.
pub const NOW: i64 = 1_700_000_000;

/// Relay that remembers every call.
#[derive(Default)]
pub struct RecordingRelay {
    pub inventory: Mutex<Vec<InventoryItem>>,
    pub sent: Mutex<Vec<(PeerId, SporkMessage)>>,
    pub penalties: Mutex<Vec<(PeerId, u32)>>,
}

impl SporkRelay for RecordingRelay {
    fn relay_inventory(&self, item: InventoryItem) {
        self.inventory.lock().push(item);
    }

    fn send_spork(&self, peer: PeerId, message: &SporkMessage) {
        self.sent.lock().push((peer, message.clone()));
    }

    fn penalize(&self, peer: PeerId, score: u32) {
        self.penalties.lock().push((peer, score));
    }
}

/// Reprocessor that remembers requested depths.
#[derive(Default)]
pub struct RecordingReprocessor {
    pub calls: Mutex<Vec<u32>>,
}

impl BlockReprocessor for RecordingReprocessor {
    fn reprocess_blocks(&self, blocks: u32) -> Result<(), String> {
        self.calls.lock().push(blocks);
        Ok(())
    }
}

/// Manually advanced clock.
pub struct ManualClock(AtomicI64);

impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self(AtomicI64::new(now))
    }

    pub fn advance(&self, secs: i64) {
        self.0.fetch_add(secs, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// A spork authority key and the network config that trusts it.
pub struct Authority {
    pub key: Secp256k1KeyPair,
}

impl Authority {
    pub fn generate() -> Self {
        Self {
            key: Secp256k1KeyPair::generate(false),
        }
    }

    pub fn network_config(&self) -> SporkNetworkConfig {
        SporkNetworkConfig::regtest().with_spork_pubkey(hex::encode(self.key.public_key().to_bytes()))
    }

    pub fn signed(&self, spork_id: i32, value: i64, time: i64) -> SporkMessage {
        let mut message = SporkMessage::new(spork_id, value, time);
        message
            .sign(&SporkSigner::new(self.key.clone(), MESSAGE_MAGIC))
            .expect("signing with a generated key");
        message
    }
}

/// Manager type used by the fixtures.
pub type TestManager<S> = SporkManager<S, RecordingRelay, RecordingReprocessor>;

/// Manager over `store` trusting `authority`, with recording ports.
pub fn manager<S: KeyValueStore>(
    authority: &Authority,
    store: S,
) -> (TestManager<S>, Arc<RecordingRelay>, Arc<ManualClock>) {
    let relay = Arc::new(RecordingRelay::default());
    let clock = Arc::new(ManualClock::new(NOW));
    let manager = SporkManager::new(
        authority.network_config(),
        store,
        Arc::clone(&relay),
        Arc::new(RecordingReprocessor::default()),
    )
    .expect("fixture network config is valid")
    .with_clock(clock.clone());
    (manager, relay, clock)
}
