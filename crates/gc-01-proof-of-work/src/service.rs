//! Proof-of-work service.
//!
//! Binds chain parameters, the block index and the network parameter source
//! into the [`ProofOfWorkApi`].

use crate::domain::{
    apply_emergency_decay, check_proof_of_work, handbrake_force, spacing_fix_active,
    BlockIndexEntry, CandidateHeader, ChainParams, CompactTarget, DarkGravityWave,
    IntervalRetarget, PowResult,
};
use crate::ports::{ChainIndex, NetworkParameters, ProofOfWorkApi};
use shared_types::Hash;
use std::sync::Arc;
use tracing::error;

/// Proof-of-work service.
///
/// ## Type Parameters
///
/// - `C`: Block index (ancestor lookup)
/// - `N`: Runtime network parameters (usually the spork manager)
pub struct ProofOfWorkService<C, N>
where
    C: ChainIndex + ?Sized,
    N: NetworkParameters + ?Sized,
{
    params: Arc<ChainParams>,
    chain: Arc<C>,
    network: Arc<N>,
}

impl<C, N> ProofOfWorkService<C, N>
where
    C: ChainIndex + ?Sized,
    N: NetworkParameters + ?Sized,
{
    pub fn new(params: Arc<ChainParams>, chain: Arc<C>, network: Arc<N>) -> Self {
        Self {
            params,
            chain,
            network,
        }
    }

    fn log_failure<T>(result: PowResult<T>, tip: &BlockIndexEntry) -> PowResult<T> {
        if let Err(e) = &result {
            error!(height = tip.height, error = %e, "Retarget invariant violated");
        }
        result
    }
}

impl<C, N> ProofOfWorkApi for ProofOfWorkService<C, N>
where
    C: ChainIndex + ?Sized,
    N: NetworkParameters + ?Sized,
{
    fn params(&self) -> &ChainParams {
        &self.params
    }

    fn check_proof_of_work(&self, hash: &Hash, bits: CompactTarget) -> bool {
        check_proof_of_work(hash, bits, &self.params)
    }

    fn get_next_work_required(
        &self,
        tip: &BlockIndexEntry,
        candidate: &CandidateHeader,
    ) -> PowResult<CompactTarget> {
        let dgw = DarkGravityWave::new(&self.params, &*self.chain, &*self.network);
        let bits = Self::log_failure(dgw.next_target(tip, candidate), tip)?;

        let fix_active = spacing_fix_active(tip.height, &self.params, &*self.network);
        Ok(apply_emergency_decay(
            bits,
            tip,
            candidate,
            &self.params,
            fix_active,
        ))
    }

    fn get_next_work_required_interval(
        &self,
        tip: &BlockIndexEntry,
        candidate: &CandidateHeader,
    ) -> PowResult<CompactTarget> {
        let retarget = IntervalRetarget::new(&self.params, &*self.chain);
        Self::log_failure(retarget.next_target(tip, candidate), tip)
    }

    fn handbrake_force(&self, version: i32, height: u64) -> u32 {
        handbrake_force(version, height, &self.params, &*self.network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryChainIndex, StaticNetworkParameters};
    use crate::domain::{Algorithm, PowError};

    const X16R: i32 = Algorithm::X16R.version_tag();

    fn service(
        params: ChainParams,
        chain: Arc<InMemoryChainIndex>,
    ) -> ProofOfWorkService<InMemoryChainIndex, StaticNetworkParameters> {
        ProofOfWorkService::new(
            Arc::new(params),
            chain,
            Arc::new(StaticNetworkParameters::default()),
        )
    }

    fn steady_chain(len: u64) -> Arc<InMemoryChainIndex> {
        let chain = Arc::new(InMemoryChainIndex::new());
        for h in 0..len as i64 {
            chain.append(X16R, 1_600_000_000 + h * 120, CompactTarget(0x1d00_ffff));
        }
        chain
    }

    #[test]
    fn test_decay_applies_after_retarget() {
        let params = ChainParams {
            pow_target_timespan_fix_height: 0,
            ..ChainParams::main()
        };
        let chain = steady_chain(600);
        let svc = service(params, chain.clone());
        let tip = chain.tip().unwrap();

        let prompt = svc
            .get_next_work_required(&tip, &CandidateHeader { version: X16R, time: tip.time + 120 })
            .unwrap();
        let stalled = svc
            .get_next_work_required(
                &tip,
                &CandidateHeader {
                    version: X16R,
                    time: tip.time + 240 * 3,
                },
            )
            .unwrap();

        // two halvings on top of the same retarget
        assert_eq!(stalled.to_target(), prompt.to_target() << 2);
    }

    #[test]
    fn test_regtest_keeps_tip_bits() {
        let chain = steady_chain(50);
        let svc = service(ChainParams::regtest(), chain.clone());
        let tip = chain.tip().unwrap();
        let out = svc
            .get_next_work_required(&tip, &CandidateHeader { version: X16R, time: tip.time + 60 })
            .unwrap();
        assert_eq!(out, tip.bits);
    }

    #[test]
    fn test_check_proof_of_work_uses_params() {
        let svc = service(ChainParams::main(), steady_chain(1));
        assert!(svc.check_proof_of_work(&[0u8; 32], CompactTarget(0x1e0f_ffff)));
        assert!(!svc.check_proof_of_work(&[0u8; 32], CompactTarget(0x1f0f_ffff)));
    }

    #[test]
    fn test_missing_history_surfaces_error() {
        let params = ChainParams {
            pow_target_timespan_fix_height: 0,
            ..ChainParams::main()
        };
        let full = steady_chain(700);
        let partial = Arc::new(full.top(5));
        let svc = service(params, partial.clone());
        let tip = partial.tip().unwrap();
        let err = svc
            .get_next_work_required(&tip, &CandidateHeader { version: X16R, time: tip.time })
            .unwrap_err();
        assert!(matches!(err, PowError::AncestorMissing { .. }));
    }

    #[test]
    fn test_interval_path() {
        let chain = steady_chain(10);
        let svc = service(ChainParams::main(), chain.clone());
        let tip = chain.tip().unwrap();
        let out = svc
            .get_next_work_required_interval(&tip, &CandidateHeader { version: X16R, time: tip.time })
            .unwrap();
        assert!(out.to_target() < tip.bits.to_target());
    }
}
