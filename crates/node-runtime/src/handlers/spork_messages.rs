//! # Spork Message Handler
//!
//! Drains inbound `spork` and `getsporks` messages from the peer layer and
//! feeds them to the spork manager.
//!
//! ## Flow
//!
//! 1. Peer layer receives `spork` → sends `InboundMessage::Spork` with the raw payload
//! 2. Handler decodes it; malformed payloads are dropped
//! 3. Spork manager checks freshness and signature, then relays and persists
//! 4. `getsporks` → every active message is sent back to the requester

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use gc_02_sporks::{ProcessOutcome, SporkApi, SporkMessage};
use shared_types::PeerId;

/// Spork traffic arriving from peers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// A `spork` message with its undecoded payload.
    Spork { peer: PeerId, payload: Vec<u8> },
    /// A `getsporks` request.
    GetSporks { peer: PeerId },
}

/// Result of handling one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandledMessage {
    /// Spork processed by the manager.
    Spork(ProcessOutcome),
    /// Payload could not be decoded.
    Malformed,
    /// `getsporks` answered with this many messages.
    SporksSent(usize),
}

/// Handler for inbound spork messages.
pub struct SporkMessageHandler<A: SporkApi + ?Sized> {
    receiver: mpsc::Receiver<InboundMessage>,
    sporks: Arc<A>,
}

impl<A: SporkApi + ?Sized> SporkMessageHandler<A> {
    pub fn new(receiver: mpsc::Receiver<InboundMessage>, sporks: Arc<A>) -> Self {
        Self { receiver, sporks }
    }

    /// Handle one message.
    pub fn handle(sporks: &A, message: InboundMessage) -> HandledMessage {
        match message {
            InboundMessage::Spork { peer, payload } => match SporkMessage::decode(&payload) {
                Ok(spork) => HandledMessage::Spork(sporks.process_spork(peer, spork)),
                Err(e) => {
                    warn!(%peer, error = %e, "Dropping malformed spork message");
                    HandledMessage::Malformed
                }
            },
            InboundMessage::GetSporks { peer } => {
                HandledMessage::SporksSent(sporks.process_get_sporks(peer))
            }
        }
    }

    /// Run the handler loop until every sender is dropped.
    pub async fn run(mut self) {
        info!("Spork message handler started");
        while let Some(message) = self.receiver.recv().await {
            let handled = Self::handle(&self.sporks, message);
            debug!(?handled, "Handled spork traffic");
        }
        info!("Spork message channel closed, exiting");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gc_02_sporks::{SporkId, SporkResult};
    use shared_types::Hash;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSporks {
        processed: Mutex<Vec<(PeerId, SporkMessage)>>,
    }

    impl SporkApi for RecordingSporks {
        fn process_spork(&self, peer: PeerId, message: SporkMessage) -> ProcessOutcome {
            self.processed.lock().unwrap().push((peer, message));
            ProcessOutcome::New
        }

        fn process_get_sporks(&self, _peer: PeerId) -> usize {
            self.processed.lock().unwrap().len()
        }

        fn update_spork(&self, _spork: SporkId, _value: i64) -> SporkResult<SporkMessage> {
            unimplemented!()
        }

        fn is_spork_active(&self, _spork_id: i32) -> bool {
            false
        }

        fn get_spork_value(&self, _spork_id: i32) -> i64 {
            -1
        }

        fn spork_name_by_id(&self, _spork_id: i32) -> &'static str {
            "Unknown"
        }

        fn spork_id_by_name(&self, _name: &str) -> Option<SporkId> {
            None
        }

        fn set_private_key(&self, _wif: &str) -> SporkResult<()> {
            Ok(())
        }

        fn spork_by_hash(&self, _hash: &Hash) -> Option<SporkMessage> {
            None
        }

        fn active_sporks(&self) -> Vec<SporkMessage> {
            Vec::new()
        }
    }

    #[test]
    fn test_decodes_and_forwards() {
        let sporks = RecordingSporks::default();
        let message = SporkMessage::new(10001, 1, 2);
        let handled = SporkMessageHandler::handle(
            &sporks,
            InboundMessage::Spork {
                peer: PeerId(1),
                payload: message.encode(),
            },
        );
        assert_eq!(handled, HandledMessage::Spork(ProcessOutcome::New));
        assert_eq!(*sporks.processed.lock().unwrap(), vec![(PeerId(1), message)]);
    }

    #[test]
    fn test_malformed_payload_dropped() {
        let sporks = RecordingSporks::default();
        let handled = SporkMessageHandler::handle(
            &sporks,
            InboundMessage::Spork {
                peer: PeerId(1),
                payload: vec![1, 2, 3],
            },
        );
        assert_eq!(handled, HandledMessage::Malformed);
        assert!(sporks.processed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_exits_when_senders_drop() {
        let sporks = Arc::new(RecordingSporks::default());
        let (tx, rx) = mpsc::channel(8);
        let handler = SporkMessageHandler::new(rx, Arc::clone(&sporks));
        let task = tokio::spawn(handler.run());

        tx.send(InboundMessage::Spork {
            peer: PeerId(2),
            payload: SporkMessage::new(10002, 0, 1).encode(),
        })
        .await
        .unwrap();
        drop(tx);

        task.await.unwrap();
        assert_eq!(sporks.processed.lock().unwrap().len(), 1);
    }
}
