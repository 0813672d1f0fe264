//! # Spork Persistence Across Restarts
//!
//! Accepted sporks are written to sled and restored by the next process
//! without re-verification.

#[cfg(test)]
mod tests {
    use gc_01_proof_of_work::{Algorithm, NetworkParameters};
    use gc_02_sporks::{KeyValueStore, SporkApi, SporkDb, SporkId, SporkMessage};
    use node_runtime::adapters::SledStore;
    use shared_types::PeerId;

    use crate::integration::fixtures::{manager, Authority};

    #[test]
    fn test_restart_restores_active_sporks() {
        let dir = tempfile::tempdir().unwrap();
        let authority = Authority::generate();
        let height = authority.signed(SporkId::HandbrakeHeight.id(), 200, 10);
        let force = authority.signed(SporkId::HandbrakeForceX16R.id(), 8, 10);

        {
            let (sporks, _, _) = manager(&authority, SledStore::open(dir.path()).unwrap());
            sporks.process_spork(PeerId(1), height.clone());
            sporks.process_spork(PeerId(1), force.clone());
            sporks.flush().unwrap();
        }

        let (restarted, relay, _) = manager(&authority, SledStore::open(dir.path()).unwrap());
        assert_eq!(restarted.handbrake_height(), SporkId::HandbrakeHeight.default_value());
        assert_eq!(restarted.load_from_store(), 2);

        assert_eq!(restarted.handbrake_height(), 200);
        assert_eq!(restarted.handbrake_force(Algorithm::X16R), 8);
        assert_eq!(restarted.spork_by_hash(&height.hash()), Some(height.clone()));
        // loading does not re-announce
        assert!(relay.inventory.lock().is_empty());

        // a stale copy from a peer is ignored after restart
        let stale = authority.signed(SporkId::HandbrakeHeight.id(), 1, 5);
        assert_eq!(
            restarted.process_spork(PeerId(2), stale),
            gc_02_sporks::ProcessOutcome::Seen
        );
    }

    #[test]
    fn test_newer_update_overwrites_record() {
        let dir = tempfile::tempdir().unwrap();
        let authority = Authority::generate();
        let (sporks, _, _) = manager(&authority, SledStore::open(dir.path()).unwrap());
        let spork = SporkId::InstantSendMaxValue.id();

        sporks.process_spork(PeerId(1), authority.signed(spork, 10, 1));
        sporks.process_spork(PeerId(1), authority.signed(spork, 20, 2));

        let stored = sporks.db().read(spork).unwrap().unwrap();
        assert_eq!((stored.value(), stored.time_signed()), (20, 2));
    }

    #[test]
    fn test_store_record_format() {
        let dir = tempfile::tempdir().unwrap();
        let message = SporkMessage::new(SporkId::FixHeight.id(), 1_000, 3);
        {
            let db = SporkDb::new(SledStore::open(dir.path()).unwrap());
            db.write(&message).unwrap();
            db.flush().unwrap();
        }
        let raw = SledStore::open(dir.path()).unwrap();
        assert_eq!(
            raw.get(&SporkId::FixHeight.id().to_le_bytes()).unwrap(),
            Some(message.encode())
        );
    }
}
