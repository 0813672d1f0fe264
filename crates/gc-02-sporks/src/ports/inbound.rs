//! Driving ports (Inbound API)

use crate::domain::{SporkId, SporkMessage, SporkResult};
use shared_types::{Hash, PeerId};

/// What happened to an incoming spork message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// First message for this spork; now active.
    New,
    /// Replaced an older message for this spork.
    Updated,
    /// Not newer than the cached message; dropped.
    Seen,
    /// Signature did not verify; dropped and the peer penalized.
    InvalidSignature,
}

impl ProcessOutcome {
    /// True if the message changed local state.
    pub fn is_accepted(self) -> bool {
        matches!(self, ProcessOutcome::New | ProcessOutcome::Updated)
    }
}

/// Spork API used by the peer message loop, block validation and RPC.
pub trait SporkApi: Send + Sync {
    /// Handle a `spork` message from `peer`.
    fn process_spork(&self, peer: PeerId, message: SporkMessage) -> ProcessOutcome;

    /// Handle a `getsporks` request; returns the number of messages sent.
    fn process_get_sporks(&self, peer: PeerId) -> usize;

    /// Sign, relay and activate a new value. Requires the master key.
    fn update_spork(&self, spork: SporkId, value: i64) -> SporkResult<SporkMessage>;

    /// Whether the effective value of `spork_id` lies in the past.
    fn is_spork_active(&self, spork_id: i32) -> bool;

    /// Effective value of `spork_id`, `-1` for unknown ids.
    fn get_spork_value(&self, spork_id: i32) -> i64;

    /// Registry name for `spork_id`, `"Unknown"` if not registered.
    fn spork_name_by_id(&self, spork_id: i32) -> &'static str;

    /// Registry entry for an RPC name.
    fn spork_id_by_name(&self, name: &str) -> Option<SporkId>;

    /// Install the master signing key given as WIF.
    fn set_private_key(&self, wif: &str) -> SporkResult<()>;

    /// Accepted message with inventory hash `hash`.
    fn spork_by_hash(&self, hash: &Hash) -> Option<SporkMessage>;

    /// Every active message, ordered by spork id.
    fn active_sporks(&self) -> Vec<SporkMessage>;
}
