//! # Shared Types Crate
//!
//! Types shared by the proof-of-work and spork subsystems.
//!
//! ## Contents
//!
//! - **Entities**: `Hash`, `U256`, `PeerId`, inventory items.
//! - **Encoding**: little-endian integer and CompactSize framing used by the
//!   peer wire format and by the spork store.
//!
//! Hashes are stored in internal byte order. Rendering them as text reverses
//! the bytes, matching how block explorers and RPC callers display them.

pub mod encoding;
pub mod entities;
pub mod errors;

pub use encoding::{ByteReader, ByteWriter, MAX_SIZE};
pub use entities::*;
pub use errors::*;
