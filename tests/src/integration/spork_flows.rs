//! # Spork Propagation Flows
//!
//! Peer traffic through the node's message handler into the spork manager.
//!
//! 1. **Freshness**: any delivery order of signed updates ends at the newest
//! 2. **Signature gate**: tampering with the wire bytes is always caught
//! 3. **getsporks**: a newly connected peer receives every active message

#[cfg(test)]
mod tests {
    use gc_02_sporks::adapters::InMemoryKVStore;
    use gc_02_sporks::{ProcessOutcome, SporkApi, SporkId, SporkMessage};
    use node_runtime::handlers::{HandledMessage, InboundMessage, SporkMessageHandler};
    use proptest::prelude::*;
    use shared_types::PeerId;

    use crate::integration::fixtures::{manager, Authority, NOW};

    const PEER: PeerId = PeerId(11);

    fn deliver<A: SporkApi>(sporks: &A, message: &SporkMessage) -> HandledMessage {
        SporkMessageHandler::handle(
            sporks,
            InboundMessage::Spork {
                peer: PEER,
                payload: message.encode(),
            },
        )
    }

    #[test]
    fn test_two_updates_either_order() {
        let authority = Authority::generate();
        let old = authority.signed(SporkId::InstantSendMaxValue.id(), 3, 50);
        let new = authority.signed(SporkId::InstantSendMaxValue.id(), 5, 100);

        for order in [[&old, &new], [&new, &old]] {
            let (sporks, _, _) = manager(&authority, InMemoryKVStore::new());
            for message in order {
                deliver(&sporks, message);
            }
            assert_eq!(sporks.get_spork_value(SporkId::InstantSendMaxValue.id()), 5);
        }
    }

    proptest! {
        #[test]
        fn prop_final_value_is_newest(times in proptest::collection::hash_set(1i64..10_000, 1..8)) {
            let authority = Authority::generate();
            let spork = SporkId::InstantSendMaxValue.id();
            // value mirrors time so the winner is identifiable
            let messages: Vec<_> = times.iter().map(|t| authority.signed(spork, *t, *t)).collect();
            let newest = *times.iter().max().unwrap();

            let (forward, _, _) = manager(&authority, InMemoryKVStore::new());
            for message in &messages {
                deliver(&forward, message);
            }
            let (reverse, _, _) = manager(&authority, InMemoryKVStore::new());
            for message in messages.iter().rev() {
                deliver(&reverse, message);
            }

            prop_assert_eq!(forward.get_spork_value(spork), newest);
            prop_assert_eq!(reverse.get_spork_value(spork), newest);
        }
    }

    #[test]
    fn test_replay_is_idempotent() {
        let authority = Authority::generate();
        let (sporks, relay, _) = manager(&authority, InMemoryKVStore::new());
        let message = authority.signed(SporkId::SuperblocksEnabled.id(), NOW - 1, 10);

        assert_eq!(
            deliver(&sporks, &message),
            HandledMessage::Spork(ProcessOutcome::New)
        );
        for _ in 0..3 {
            assert_eq!(
                deliver(&sporks, &message),
                HandledMessage::Spork(ProcessOutcome::Seen)
            );
        }
        assert_eq!(relay.inventory.lock().len(), 1);
        assert!(sporks.is_spork_active(SporkId::SuperblocksEnabled.id()));
    }

    #[test]
    fn test_tampered_wire_bytes_rejected() {
        let authority = Authority::generate();
        let message = authority.signed(SporkId::HandbrakeHeight.id(), 1_000, 10);
        let bytes = message.encode();

        // bytes 0..4 are the id, 4..12 the value, 12..20 the time
        for index in [0usize, 5, 13] {
            let (sporks, relay, _) = manager(&authority, InMemoryKVStore::new());
            let mut tampered = bytes.clone();
            tampered[index] ^= 0x01;

            let handled = SporkMessageHandler::handle(
                &sporks,
                InboundMessage::Spork {
                    peer: PEER,
                    payload: tampered,
                },
            );
            assert_eq!(handled, HandledMessage::Spork(ProcessOutcome::InvalidSignature));
            assert_eq!(*relay.penalties.lock(), vec![(PEER, 100)]);
            assert!(sporks.active_sporks().is_empty());
        }
    }

    #[test]
    fn test_new_peer_receives_active_sporks() {
        let authority = Authority::generate();
        let (sporks, relay, _) = manager(&authority, InMemoryKVStore::new());
        deliver(&sporks, &authority.signed(SporkId::HandbrakeHeight.id(), 10, 1));
        deliver(&sporks, &authority.signed(SporkId::HandbrakeForceX16R.id(), 2, 1));

        let handled =
            SporkMessageHandler::handle(&sporks, InboundMessage::GetSporks { peer: PeerId(99) });
        assert_eq!(handled, HandledMessage::SporksSent(2));

        let sent = relay.sent.lock();
        let ids: Vec<_> = sent.iter().map(|(_, m)| m.spork_id()).collect();
        assert_eq!(ids, vec![SporkId::HandbrakeHeight.id(), SporkId::HandbrakeForceX16R.id()]);
        assert!(sent.iter().all(|(peer, _)| *peer == PeerId(99)));
    }
}
