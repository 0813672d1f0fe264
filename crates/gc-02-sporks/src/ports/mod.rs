//! Ports (Hexagonal Architecture)
//!
//! - `inbound`: API exposed to the network message loop and RPC
//! - `outbound`: storage, peer relay, chain reprocessing and clock

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
