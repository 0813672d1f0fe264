//! # Sporks Steering Proof-of-Work
//!
//! The spork manager is the retargeter's source of handbrake settings and of
//! the spacing-fix height. A signed update changes the next required target
//! without a release.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gc_01_proof_of_work::adapters::{InMemoryChainIndex, StaticNetworkParameters};
    use gc_01_proof_of_work::{
        Algorithm, CandidateHeader, ChainParams, CompactTarget, ProofOfWorkApi,
        ProofOfWorkService,
    };
    use gc_02_sporks::adapters::InMemoryKVStore;
    use gc_02_sporks::{SporkApi, SporkId};
    use shared_types::{PeerId, U256};

    use crate::integration::fixtures::{manager, Authority};

    const GENESIS_TIME: i64 = 1_550_000_000;
    const BITS: CompactTarget = CompactTarget(0x1d00_ffff);

    fn steady_x16r_chain(len: u64) -> Arc<InMemoryChainIndex> {
        let chain = InMemoryChainIndex::new();
        for h in 0..len {
            chain.append(
                Algorithm::X16R.version_tag(),
                GENESIS_TIME + h as i64 * 120,
                BITS,
            );
        }
        Arc::new(chain)
    }

    fn x16r_candidate(chain: &InMemoryChainIndex) -> CandidateHeader {
        CandidateHeader {
            version: Algorithm::X16R.version_tag(),
            time: chain.tip().unwrap().time + 120,
        }
    }

    #[test]
    fn test_handbrake_spork_divides_next_target() {
        let params = Arc::new(ChainParams::main());
        let chain = steady_x16r_chain(600);
        let candidate = x16r_candidate(&chain);
        let tip = chain.tip().unwrap();

        let reference = ProofOfWorkService::new(
            Arc::clone(&params),
            Arc::clone(&chain),
            Arc::new(StaticNetworkParameters::default().with_fix_height(0)),
        );
        let free = reference.get_next_work_required(&tip, &candidate).unwrap();

        let authority = Authority::generate();
        let (sporks, _, _) = manager(&authority, InMemoryKVStore::new());
        let sporks = Arc::new(sporks);
        let pow = ProofOfWorkService::new(Arc::clone(&params), Arc::clone(&chain), Arc::clone(&sporks));

        sporks.process_spork(PeerId(1), authority.signed(SporkId::FixHeight.id(), 0, 1));
        assert_eq!(pow.get_next_work_required(&tip, &candidate).unwrap(), free);

        sporks.process_spork(PeerId(1), authority.signed(SporkId::HandbrakeHeight.id(), 0, 1));
        sporks.process_spork(PeerId(1), authority.signed(SporkId::HandbrakeForceX16R.id(), 4, 1));

        let braked = pow.get_next_work_required(&tip, &candidate).unwrap();
        assert_eq!(braked.to_target(), free.to_target() / U256::from(4u64));
        assert_eq!(pow.handbrake_force(Algorithm::X16R.version_tag(), tip.height + 1), 4);
        assert_eq!(pow.handbrake_force(Algorithm::TimeTravel.version_tag(), tip.height + 1), 1);
    }

    #[test]
    fn test_future_handbrake_height_has_no_effect() {
        let params = Arc::new(ChainParams::main());
        let chain = steady_x16r_chain(600);
        let candidate = x16r_candidate(&chain);
        let tip = chain.tip().unwrap();

        let authority = Authority::generate();
        let (sporks, _, _) = manager(&authority, InMemoryKVStore::new());
        let sporks = Arc::new(sporks);
        let pow = ProofOfWorkService::new(Arc::clone(&params), Arc::clone(&chain), Arc::clone(&sporks));
        let before = pow.get_next_work_required(&tip, &candidate).unwrap();

        sporks.process_spork(PeerId(1), authority.signed(SporkId::HandbrakeHeight.id(), 1_000_000, 1));
        sporks.process_spork(PeerId(1), authority.signed(SporkId::HandbrakeForceX16R.id(), 4, 1));
        assert_eq!(pow.get_next_work_required(&tip, &candidate).unwrap(), before);
    }

    #[test]
    fn test_verifier_rejects_hash_above_braked_target() {
        let params = Arc::new(ChainParams::main());
        let chain = steady_x16r_chain(600);
        let candidate = x16r_candidate(&chain);
        let tip = chain.tip().unwrap();

        let authority = Authority::generate();
        let (sporks, _, _) = manager(&authority, InMemoryKVStore::new());
        let sporks = Arc::new(sporks);
        let pow = ProofOfWorkService::new(params, Arc::clone(&chain), Arc::clone(&sporks));
        let free = pow.get_next_work_required(&tip, &candidate).unwrap();

        sporks.process_spork(PeerId(1), authority.signed(SporkId::HandbrakeHeight.id(), 0, 1));
        sporks.process_spork(PeerId(1), authority.signed(SporkId::HandbrakeForceX16R.id(), 4, 1));
        let braked = pow.get_next_work_required(&tip, &candidate).unwrap();

        // exactly the unbraked target: good enough before, too weak now
        let hash = shared_types::u256_to_hash(&free.to_target());
        assert!(pow.check_proof_of_work(&hash, free));
        assert!(!pow.check_proof_of_work(&hash, braked));
    }
}
