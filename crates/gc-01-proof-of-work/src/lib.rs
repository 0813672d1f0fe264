//! # gc-01-proof-of-work
//!
//! Proof-of-work subsystem for Gravity-Chain.
//!
//! ## Architecture
//!
//! Decides how much work the next block must prove and whether a header
//! proves it. Every computation is a pure function of resident ancestor
//! data, chain parameters and network parameters, and must be bit-identical
//! across nodes: any divergence forks the chain.
//!
//! ```text
//!                 ┌──────────────────────┐
//! candidate ────→ │ Dark Gravity Wave     │ ←── ChainIndex (ancestors)
//!                 │  ├─ per-algo average  │ ←── NetworkParameters
//!                 │  ├─ chain average     │      (handbrake, fix height)
//!                 │  └─ handbrake         │
//!                 └──────────┬───────────┘
//!                            ↓
//!                 ┌──────────────────────┐
//!                 │ Emergency decay       │ ──→ CompactTarget
//!                 └──────────────────────┘
//! ```
//!
//! ## Multi-Algorithm Mining
//!
//! Blocks may be mined with TimeTravel or X16R. The algorithm is tagged in
//! the header version. Each algorithm is retargeted against its own share of
//! the block spacing, then against the chain as a whole.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gc_01_proof_of_work::{ProofOfWorkService, ProofOfWorkApi, ChainParams};
//!
//! let pow = ProofOfWorkService::new(Arc::new(ChainParams::main()), chain, sporks);
//! let bits = pow.get_next_work_required(&tip, &candidate)?;
//! assert!(pow.check_proof_of_work(&header_hash, bits));
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    Algorithm, BlockIndexEntry, CandidateHeader, ChainParams, CompactTarget, DecodedTarget,
    Network, PowError, PowResult, ALGO_ACTIVE_COUNT, ALGO_VERSION_MASK,
};
pub use ports::{ChainIndex, NetworkParameters, ProofOfWorkApi};
pub use service::ProofOfWorkService;
