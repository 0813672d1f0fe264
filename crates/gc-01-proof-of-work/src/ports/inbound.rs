//! Driving ports (Inbound API)

use crate::domain::{BlockIndexEntry, CandidateHeader, ChainParams, CompactTarget, PowResult};
use shared_types::Hash;

/// Proof-of-work API used by block validation, mining and RPC.
pub trait ProofOfWorkApi: Send + Sync {
    /// Consensus parameters in force.
    fn params(&self) -> &ChainParams;

    /// Whether `hash` meets the target `bits` claims.
    fn check_proof_of_work(&self, hash: &Hash, bits: CompactTarget) -> bool;

    /// Target required of `candidate` on top of `tip`: the multi-algorithm
    /// retarget followed by emergency decay.
    fn get_next_work_required(
        &self,
        tip: &BlockIndexEntry,
        candidate: &CandidateHeader,
    ) -> PowResult<CompactTarget>;

    /// Target required by the single-algorithm interval rules.
    fn get_next_work_required_interval(
        &self,
        tip: &BlockIndexEntry,
        candidate: &CandidateHeader,
    ) -> PowResult<CompactTarget>;

    /// Braking force applied to a header version at `height`.
    fn handbrake_force(&self, version: i32, height: u64) -> u32;
}
