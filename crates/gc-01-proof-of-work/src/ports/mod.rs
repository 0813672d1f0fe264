//! Ports (Hexagonal Architecture)
//!
//! - `inbound`: API exposed to block validation, mining and RPC
//! - `outbound`: chain history and runtime-tunable network parameters

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
