//! # gc-02-sporks
//!
//! Signed, network-wide overrides of compiled-in parameters.
//!
//! ## Architecture
//!
//! ```text
//!  peer "spork" ──→ freshness check ──→ signature check ──→ active map
//!                        │ (older: drop)      │ (bad: penalize)   │
//!                                                               ├─→ relay inv
//!                                                               ├─→ side effects
//!                                                               └─→ SporkDb
//!  peer "getsporks" ──→ send every active message
//! ```
//!
//! Each spork holds either a plain number or an activation timestamp. A
//! spork without an accepted message reports its compiled-in default.
//!
//! The manager also implements the proof-of-work `NetworkParameters` port,
//! so handbrake heights and forces can be changed without a release.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gc_02_sporks::{SporkManager, SporkApi, SporkNetworkConfig, SporkId};
//!
//! let sporks = SporkManager::new(SporkNetworkConfig::main(), store, relay, reprocessor)?;
//! sporks.load_from_store();
//! if sporks.is_active(SporkId::SuperblocksEnabled) { /* ... */ }
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;
pub mod store;

pub use domain::{
    GovernorConfig, KVStoreError, ReconsiderDecision, ReconsiderGovernor, SporkAuthority,
    SporkError, SporkId, SporkMessage, SporkNetworkConfig, SporkResult, SporkSigner, MESSAGE_MAGIC,
    SPORK_OFF, UNKNOWN_SPORK_VALUE,
};
pub use ports::{
    BlockReprocessor, KeyValueStore, ProcessOutcome, SporkApi, SporkRelay, SystemTimeSource,
    TimeSource,
};
pub use service::SporkManager;
pub use store::SporkDb;
