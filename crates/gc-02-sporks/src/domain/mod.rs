//! Domain layer: registry, messages, authentication and the reconsider governor.

mod errors;
mod governor;
mod message;
mod network;
mod signing;
mod spork_id;

pub use errors::*;
pub use governor::*;
pub use message::*;
pub use network::*;
pub use signing::*;
pub use spork_id::*;
