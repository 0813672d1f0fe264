//! # Node Runtime
//!
//! ## Startup Sequence
//!
//! 1. Build the container (chain params, store, spork manager, proof-of-work)
//! 2. Load persisted sporks and install the signing key, if configured
//! 3. Spawn the spork message handler
//!
//! ## Shutdown Sequence
//!
//! 1. Signal the handler to stop
//! 2. Wait for it to finish
//! 3. Flush the spork store

use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{error, info};

use gc_02_sporks::SporkApi;

use crate::adapters::OutboundMessage;
use crate::container::{NodeConfig, NodeContainer};
use crate::handlers::{InboundMessage, SporkMessageHandler};

/// Capacity of the inbound peer message queue.
pub const INBOUND_QUEUE_CAPACITY: usize = 1024;

/// The node runtime orchestrating all services.
pub struct NodeRuntime {
    container: Arc<NodeContainer>,
    inbound_tx: mpsc::Sender<InboundMessage>,
    inbound_rx: Mutex<Option<mpsc::Receiver<InboundMessage>>>,
    outbound_rx: Mutex<Option<mpsc::UnboundedReceiver<OutboundMessage>>>,
    shutdown_tx: watch::Sender<bool>,
    handler: Mutex<Option<JoinHandle<()>>>,
}

impl NodeRuntime {
    /// Create a new node runtime with configuration.
    pub fn new(config: &NodeConfig) -> Result<Self> {
        info!(network = %config.network, "Creating Gravity-Chain node runtime");

        let (container, outbound_rx) = NodeContainer::new(config)?;
        let (inbound_tx, inbound_rx) = mpsc::channel(INBOUND_QUEUE_CAPACITY);
        let (shutdown_tx, _) = watch::channel(false);

        Ok(Self {
            container: Arc::new(container),
            inbound_tx,
            inbound_rx: Mutex::new(Some(inbound_rx)),
            outbound_rx: Mutex::new(Some(outbound_rx)),
            shutdown_tx,
            handler: Mutex::new(None),
        })
    }

    /// Spawn the message handlers. Calling it twice is an error.
    pub fn start(&self) -> Result<()> {
        let receiver = self
            .inbound_rx
            .lock()
            .take()
            .context("node runtime already started")?;

        let handler = SporkMessageHandler::new(receiver, Arc::clone(&self.container.sporks));
        let mut shutdown = self.shutdown_tx.subscribe();
        let task = tokio::spawn(async move {
            tokio::select! {
                _ = handler.run() => {}
                _ = shutdown.changed() => {
                    info!("Spork handler received shutdown signal");
                }
            }
        });
        *self.handler.lock() = Some(task);

        info!(
            network = %self.container.chain_params.network,
            active_sporks = self.container.sporks.active_sporks().len(),
            "Node runtime started"
        );
        Ok(())
    }

    /// Queue for traffic from the peer layer.
    pub fn inbound_sender(&self) -> mpsc::Sender<InboundMessage> {
        self.inbound_tx.clone()
    }

    /// Traffic for the peer and chain layers. Available once.
    pub fn take_outbound(&self) -> Option<mpsc::UnboundedReceiver<OutboundMessage>> {
        self.outbound_rx.lock().take()
    }

    /// Get a reference to the service container.
    pub fn container(&self) -> Arc<NodeContainer> {
        Arc::clone(&self.container)
    }

    /// Stop the handlers and flush the store.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        self.shutdown_tx.send_replace(true);
        let task = self.handler.lock().take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                error!("Spork handler task failed: {}", e);
            }
        }
        if let Err(e) = self.container.sporks.flush() {
            error!("Failed to flush spork store: {}", e);
        }

        info!("Shutdown complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::StorageBackend;
    use gc_01_proof_of_work::{Network, NetworkParameters};
    use gc_02_sporks::{SporkId, SporkMessage, SporkSigner, MESSAGE_MAGIC};
    use shared_crypto::{encode_wif, Secp256k1KeyPair};
    use shared_types::{InventoryItem, PeerId};

    fn regtest_config(master: &Secp256k1KeyPair, dir: &std::path::Path) -> NodeConfig {
        let mut config = NodeConfig::default();
        config.network = Network::Regtest;
        config.storage.backend = StorageBackend::Sled;
        config.storage.data_dir = dir.to_path_buf();
        config.sporks.spork_pubkey = Some(hex::encode(master.public_key().to_bytes()));
        config
    }

    #[tokio::test]
    async fn test_inbound_spork_reaches_manager_and_relays() {
        let dir = tempfile::tempdir().unwrap();
        let master = Secp256k1KeyPair::generate(false);
        let runtime = NodeRuntime::new(&regtest_config(&master, dir.path())).unwrap();
        let mut outbound = runtime.take_outbound().unwrap();
        runtime.start().unwrap();
        assert!(runtime.start().is_err());

        let mut message = SporkMessage::new(SporkId::HandbrakeHeight.id(), 50, 1_000);
        message
            .sign(&SporkSigner::new(master.clone(), MESSAGE_MAGIC))
            .unwrap();
        runtime
            .inbound_sender()
            .send(InboundMessage::Spork {
                peer: PeerId(4),
                payload: message.encode(),
            })
            .await
            .unwrap();

        assert_eq!(
            outbound.recv().await,
            Some(OutboundMessage::Inventory(InventoryItem::spork(message.hash())))
        );
        let container = runtime.container();
        assert_eq!(container.sporks.handbrake_height(), 50);

        runtime.shutdown().await;
        assert_eq!(
            container.sporks.db().read(SporkId::HandbrakeHeight.id()).unwrap(),
            Some(message)
        );
    }

    #[tokio::test]
    async fn test_signing_key_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let master = Secp256k1KeyPair::generate(false);
        let mut config = regtest_config(&master, dir.path());
        config.sporks.signing_key = Some(encode_wif(&master, 221));

        let runtime = NodeRuntime::new(&config).unwrap();
        let sporks = runtime.container().sporks.clone();
        assert!(sporks.has_signing_key());
        sporks.update_spork(SporkId::SuperblocksEnabled, 0).unwrap();
        assert!(sporks.is_spork_active(SporkId::SuperblocksEnabled.id()));
    }

    #[test]
    fn test_foreign_signing_key_fails_startup() {
        let dir = tempfile::tempdir().unwrap();
        let master = Secp256k1KeyPair::generate(false);
        let mut config = regtest_config(&master, dir.path());
        config.sporks.signing_key = Some(encode_wif(&Secp256k1KeyPair::generate(false), 221));
        assert!(NodeRuntime::new(&config).is_err());
    }
}
