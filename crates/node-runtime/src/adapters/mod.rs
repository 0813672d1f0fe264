//! # Adapters
//!
//! Port implementations connecting the spork and proof-of-work crates to
//! storage engines and to the peer and chain layers.

pub mod network;
pub mod storage;

pub use network::{ChannelRelay, ChannelReprocessor, OutboundMessage, OutboundSender};
pub use storage::{NodeStore, OpenStoreError, SledStore};
