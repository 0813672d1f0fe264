//! # Spork Manager
//!
//! Holds the latest verified message for each spork and answers value
//! queries from block validation, mining and RPC.
//!
//! ## Freshness Rule
//!
//! A message replaces the cached one for its spork only if its signed time
//! is strictly newer. Older or equal messages are dropped before their
//! signature is checked, so replays cost nothing and delivery order does not
//! change the final state.
//!
//! ## Locking
//!
//! One coarse mutex guards both the active map and the hash index. Readers
//! never see an update applied to one without the other.

use crate::domain::{
    spork_name, GovernorConfig, ReconsiderDecision, ReconsiderGovernor, SporkAuthority,
    SporkError, SporkId, SporkMessage, SporkNetworkConfig, SporkResult, SporkSigner, SPORK_OFF,
    UNKNOWN_SPORK_VALUE,
};
use crate::ports::{
    BlockReprocessor, KeyValueStore, ProcessOutcome, SporkApi, SporkRelay, SystemTimeSource,
    TimeSource,
};
use crate::store::SporkDb;
use gc_01_proof_of_work::{Algorithm, NetworkParameters};
use parking_lot::{Mutex, RwLock};
use shared_types::{hash_to_hex, Hash, InventoryItem, PeerId};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Misbehaviour score for a peer that relays a badly signed spork.
pub const INVALID_SIGNATURE_PENALTY: u32 = 100;

/// Values above this are activation timestamps rather than plain numbers.
const TIMESTAMP_THRESHOLD: i64 = 1_000_000;

#[derive(Default)]
struct SporkState {
    active: BTreeMap<i32, SporkMessage>,
    by_hash: HashMap<Hash, SporkMessage>,
}

impl SporkState {
    fn insert(&mut self, message: SporkMessage) {
        self.by_hash.insert(message.hash(), message.clone());
        self.active.insert(message.spork_id(), message);
    }
}

/// Spork manager.
///
/// ## Type Parameters
///
/// - `S`: Key-value store backing the spork database
/// - `R`: Peer relay
/// - `B`: Chain reprocessing hook
pub struct SporkManager<S, R, B>
where
    S: KeyValueStore,
    R: SporkRelay + ?Sized,
    B: BlockReprocessor + ?Sized,
{
    network_config: SporkNetworkConfig,
    authority: SporkAuthority,
    db: SporkDb<S>,
    relay: Arc<R>,
    reprocessor: Arc<B>,
    clock: Arc<dyn TimeSource>,
    governor: ReconsiderGovernor,
    state: Mutex<SporkState>,
    signer: RwLock<Option<SporkSigner>>,
}

impl<S, R, B> SporkManager<S, R, B>
where
    S: KeyValueStore,
    R: SporkRelay + ?Sized,
    B: BlockReprocessor + ?Sized,
{
    /// Build a manager for the network described by `network_config`.
    ///
    /// Fails if the configured authority key cannot be parsed.
    pub fn new(
        network_config: SporkNetworkConfig,
        store: S,
        relay: Arc<R>,
        reprocessor: Arc<B>,
    ) -> SporkResult<Self> {
        let authority = SporkAuthority::from_config(&network_config)?;
        Ok(Self {
            network_config,
            authority,
            db: SporkDb::new(store),
            relay,
            reprocessor,
            clock: Arc::new(SystemTimeSource::default()),
            governor: ReconsiderGovernor::default(),
            state: Mutex::new(SporkState::default()),
            signer: RwLock::new(None),
        })
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the reconsider-blocks limits.
    pub fn with_governor(mut self, config: GovernorConfig) -> Self {
        self.governor = ReconsiderGovernor::new(config);
        self
    }

    /// Spork database.
    pub fn db(&self) -> &SporkDb<S> {
        &self.db
    }

    /// Populate the active map from the store.
    ///
    /// Stored messages were verified before they were written and are not
    /// verified again. Returns the number of sporks loaded.
    pub fn load_from_store(&self) -> usize {
        let mut loaded = 0;
        for spork in SporkId::ALL {
            match self.db.read(spork.id()) {
                Ok(Some(message)) => {
                    if message.value() > TIMESTAMP_THRESHOLD {
                        info!(
                            spork = spork.name(),
                            value = message.value(),
                            activation = %format_timestamp(message.value()),
                            "Loaded spork from store"
                        );
                    } else {
                        info!(spork = spork.name(), value = message.value(), "Loaded spork from store");
                    }
                    self.state.lock().insert(message);
                    loaded += 1;
                }
                Ok(None) => debug!(spork = spork.name(), "No previous value in store"),
                Err(e) => warn!(spork = spork.name(), error = %e, "Failed to read spork from store"),
            }
        }
        loaded
    }

    /// Effective value of a known spork.
    pub fn value(&self, spork: SporkId) -> i64 {
        self.state
            .lock()
            .active
            .get(&spork.id())
            .map_or_else(|| spork.default_value(), SporkMessage::value)
    }

    /// Value of the accepted message for `spork_id`, known or not.
    fn active_value(&self, spork_id: i32) -> Option<i64> {
        self.state
            .lock()
            .active
            .get(&spork_id)
            .map(SporkMessage::value)
    }

    /// Whether the effective value of a known spork lies in the past.
    pub fn is_active(&self, spork: SporkId) -> bool {
        self.value(spork) < self.clock.adjusted_time()
    }

    /// Whether a master signing key is installed.
    pub fn has_signing_key(&self) -> bool {
        self.signer.read().is_some()
    }

    /// Flush the backing store.
    pub fn flush(&self) -> SporkResult<()> {
        self.db.flush()
    }

    fn persist(&self, message: &SporkMessage) -> SporkResult<()> {
        self.db.write(message).map_err(|e| {
            error!(spork_id = message.spork_id(), error = %e, "Failed to persist spork");
            e
        })
    }

    fn execute_side_effects(&self, spork_id: i32, value: i64) {
        if SporkId::from_id(spork_id) != Some(SporkId::ReconsiderBlocks) {
            return;
        }
        match self.governor.request(value, self.clock.now()) {
            ReconsiderDecision::Execute(blocks) => {
                info!(blocks, "Reconsidering recent blocks");
                if let Err(e) = self.reprocessor.reprocess_blocks(blocks) {
                    error!(blocks, error = %e, "Block reprocessing failed");
                }
            }
            ReconsiderDecision::Ignored => {}
            ReconsiderDecision::TooSoon { elapsed } => {
                warn!(
                    elapsed,
                    min_interval = self.governor.config().min_interval_secs,
                    "Reconsider request too soon after the previous one"
                );
            }
            ReconsiderDecision::TooDeep { requested } => {
                warn!(
                    requested,
                    max_blocks = self.governor.config().max_blocks,
                    "Reconsider request exceeds the block limit"
                );
            }
        }
    }
}

impl<S, R, B> SporkApi for SporkManager<S, R, B>
where
    S: KeyValueStore,
    R: SporkRelay + ?Sized,
    B: BlockReprocessor + ?Sized,
{
    fn process_spork(&self, peer: PeerId, message: SporkMessage) -> ProcessOutcome {
        let spork_id = message.spork_id();
        let hash = message.hash();

        if let Some(cached) = self.state.lock().active.get(&spork_id) {
            if cached.time_signed() >= message.time_signed() {
                debug!(%peer, spork_id, hash = %hash_to_hex(&hash), "Spork already seen");
                return ProcessOutcome::Seen;
            }
        }

        if !message.check_signature(&self.authority) {
            warn!(%peer, spork_id, "Invalid spork signature");
            self.relay.penalize(peer, INVALID_SIGNATURE_PENALTY);
            return ProcessOutcome::InvalidSignature;
        }

        let outcome = {
            let mut state = self.state.lock();
            let outcome = match state.active.get(&spork_id) {
                Some(cached) if cached.time_signed() >= message.time_signed() => {
                    return ProcessOutcome::Seen;
                }
                Some(_) => ProcessOutcome::Updated,
                None => ProcessOutcome::New,
            };
            state.insert(message.clone());
            outcome
        };

        info!(
            %peer,
            spork = spork_name(spork_id),
            spork_id,
            value = message.value(),
            time_signed = message.time_signed(),
            ?outcome,
            "Accepted spork"
        );

        self.relay.relay_inventory(InventoryItem::spork(hash));
        self.execute_side_effects(spork_id, message.value());
        // A failed write leaves the update active in memory.
        self.persist(&message).ok();
        outcome
    }

    fn process_get_sporks(&self, peer: PeerId) -> usize {
        let messages = self.active_sporks();
        for message in &messages {
            self.relay.send_spork(peer, message);
        }
        debug!(%peer, count = messages.len(), "Sent active sporks");
        messages.len()
    }

    fn update_spork(&self, spork: SporkId, value: i64) -> SporkResult<SporkMessage> {
        let signer = self.signer.read().clone().ok_or(SporkError::NoSigningKey)?;
        let mut message = SporkMessage::new(spork.id(), value, self.clock.adjusted_time());
        message.sign(&signer)?;

        self.state.lock().insert(message.clone());
        self.relay.relay_inventory(InventoryItem::spork(message.hash()));
        info!(spork = spork.name(), value, "Updated spork");

        self.persist(&message)?;
        Ok(message)
    }

    fn is_spork_active(&self, spork_id: i32) -> bool {
        let value = self
            .active_value(spork_id)
            .or_else(|| SporkId::from_id(spork_id).map(SporkId::default_value))
            .unwrap_or(SPORK_OFF);
        value < self.clock.adjusted_time()
    }

    fn get_spork_value(&self, spork_id: i32) -> i64 {
        self.active_value(spork_id)
            .or_else(|| SporkId::from_id(spork_id).map(SporkId::default_value))
            .unwrap_or(UNKNOWN_SPORK_VALUE)
    }

    fn spork_name_by_id(&self, spork_id: i32) -> &'static str {
        spork_name(spork_id)
    }

    fn spork_id_by_name(&self, name: &str) -> Option<SporkId> {
        SporkId::from_name(name)
    }

    fn set_private_key(&self, wif: &str) -> SporkResult<()> {
        let signer = SporkSigner::from_wif(wif, &self.network_config)?;

        let mut probe = SporkMessage::new(0, 0, 0);
        probe.sign(&signer)?;
        if !probe.check_signature(&self.authority) {
            return Err(SporkError::InvalidKey(
                "key does not match the network spork key".to_string(),
            ));
        }

        *self.signer.write() = Some(signer);
        info!("Spork signing key installed");
        Ok(())
    }

    fn spork_by_hash(&self, hash: &Hash) -> Option<SporkMessage> {
        self.state.lock().by_hash.get(hash).cloned()
    }

    fn active_sporks(&self) -> Vec<SporkMessage> {
        self.state.lock().active.values().cloned().collect()
    }
}

impl<S, R, B> NetworkParameters for SporkManager<S, R, B>
where
    S: KeyValueStore,
    R: SporkRelay + ?Sized,
    B: BlockReprocessor + ?Sized,
{
    fn handbrake_height(&self) -> i64 {
        self.value(SporkId::HandbrakeHeight)
    }

    fn handbrake_force(&self, algorithm: Algorithm) -> i64 {
        match algorithm {
            Algorithm::TimeTravel => self.value(SporkId::HandbrakeForceExosis),
            Algorithm::X16R => self.value(SporkId::HandbrakeForceX16R),
        }
    }

    fn spacing_fix_height(&self) -> Option<i64> {
        self.state
            .lock()
            .active
            .get(&SporkId::FixHeight.id())
            .map(SporkMessage::value)
    }
}

fn format_timestamp(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| secs.to_string())
}
