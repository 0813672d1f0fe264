//! # Gravity-Chain Test Suite
//!
//! Cross-crate flows that no single crate can test on its own.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs       # Recording ports, master key helpers
//!     ├── spork_flows.rs    # Freshness ordering, signature gate, getsporks
//!     ├── persistence.rs    # Sled-backed restart
//!     └── handbrake.rs      # Sporks steering difficulty retargeting
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p gc-tests
//! ```

pub mod integration;
