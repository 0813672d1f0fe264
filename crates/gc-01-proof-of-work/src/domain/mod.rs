//! Domain layer for the proof-of-work subsystem
//!
//! Pure computations over resident data. Nothing here performs I/O.
//!
//! - compact: 32-bit target encoding
//! - verify: header proof check
//! - retarget: multi-algorithm Dark Gravity Wave
//! - legacy: interval retargeting
//! - decay: stall recovery
//! - handbrake: runtime braking force

pub mod arith;

mod algorithm;
mod block;
mod compact;
mod decay;
mod errors;
mod handbrake;
mod legacy;
mod params;
mod retarget;
mod verify;

pub use algorithm::*;
pub use block::*;
pub use compact::*;
pub use decay::*;
pub use errors::*;
pub use handbrake::*;
pub use legacy::*;
pub use params::*;
pub use retarget::*;
pub use verify::*;
