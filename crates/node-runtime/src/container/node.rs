//! # Node Container
//!
//! Builds every service once, in dependency order, and hands out shared
//! references.
//!
//! ```text
//! NodeConfig ──→ ChainParams, SporkNetworkConfig
//!            ──→ NodeStore ──→ SporkManager ──→ ProofOfWorkService
//!                                  │                  ↑
//!                                  └── NetworkParameters ┘
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::info;

use gc_01_proof_of_work::adapters::InMemoryChainIndex;
use gc_01_proof_of_work::{ChainParams, ProofOfWorkService};
use gc_02_sporks::{SporkApi, SporkManager};

use crate::adapters::{ChannelRelay, ChannelReprocessor, NodeStore, OutboundMessage};
use crate::container::config::NodeConfig;

/// Spork manager as wired into the node.
pub type NodeSporkManager = SporkManager<NodeStore, ChannelRelay, ChannelReprocessor>;

/// Proof-of-work service as wired into the node.
pub type NodeProofOfWork = ProofOfWorkService<InMemoryChainIndex, NodeSporkManager>;

/// Central container holding all service instances.
pub struct NodeContainer {
    /// Consensus parameters, immutable after startup.
    pub chain_params: Arc<ChainParams>,
    /// Block index consulted by retargeting.
    pub chain: Arc<InMemoryChainIndex>,
    /// Spork manager.
    pub sporks: Arc<NodeSporkManager>,
    /// Proof-of-work service reading handbrake settings from the sporks.
    pub pow: Arc<NodeProofOfWork>,
}

impl NodeContainer {
    /// Build all services. Returns the container and the receiving end of
    /// the outbound channel.
    pub fn new(config: &NodeConfig) -> Result<(Self, mpsc::UnboundedReceiver<OutboundMessage>)> {
        let chain_params = Arc::new(config.chain_params());
        chain_params
            .validate()
            .context("invalid chain parameters")?;

        let store_path = config.spork_store_path();
        let store = NodeStore::open(config.storage.backend, &store_path)
            .with_context(|| format!("failed to open spork store at {}", store_path.display()))?;
        info!(
            backend = %config.storage.backend,
            path = %store_path.display(),
            "Spork store opened"
        );

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let sporks = SporkManager::new(
            config.spork_network_config(),
            store,
            Arc::new(ChannelRelay::new(outbound_tx.clone())),
            Arc::new(ChannelReprocessor::new(outbound_tx)),
        )
        .context("invalid spork network configuration")?
        .with_governor(config.sporks.governor);

        let loaded = sporks.load_from_store();
        info!(loaded, "Sporks loaded from store");

        if let Some(wif) = &config.sporks.signing_key {
            sporks
                .set_private_key(wif)
                .context("spork signing key rejected")?;
        }

        let sporks = Arc::new(sporks);
        let chain = Arc::new(InMemoryChainIndex::new());
        let pow = Arc::new(ProofOfWorkService::new(
            Arc::clone(&chain_params),
            Arc::clone(&chain),
            Arc::clone(&sporks),
        ));

        Ok((
            Self {
                chain_params,
                chain,
                sporks,
                pow,
            },
            outbound_rx,
        ))
    }
}
