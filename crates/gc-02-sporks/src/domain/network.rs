//! Per-network spork authentication settings.

use gc_01_proof_of_work::Network;
use serde::{Deserialize, Serialize};

/// Public key (uncompressed SEC1, hex) allowed to sign sporks on main and test.
pub const MAINNET_SPORK_PUBKEY: &str = "04b04aa6945d4c96bdd7a12263ea204a1172f6ea4ebc3b0fa148375f54bb42b3657e1dfee1a90fdf6387e07ad69920523d63d6e71fb3edda3afe0e7661f2e32bbe";

/// Prefix mixed into every signed-message digest.
pub const MESSAGE_MAGIC: &str = "Exosis Signed Message:\n";

/// Where spork signatures must come from and how signer keys are encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SporkNetworkConfig {
    /// Hex-encoded SEC1 key of the spork authority. `None` accepts nothing.
    pub spork_pubkey: Option<String>,
    /// Signed-message magic.
    #[serde(default = "default_magic")]
    pub message_magic: String,
    /// Version byte of WIF-encoded private keys.
    pub secret_key_prefix: u8,
}

fn default_magic() -> String {
    MESSAGE_MAGIC.to_string()
}

impl SporkNetworkConfig {
    /// Main network.
    pub fn main() -> Self {
        Self {
            spork_pubkey: Some(MAINNET_SPORK_PUBKEY.to_string()),
            message_magic: default_magic(),
            secret_key_prefix: 111,
        }
    }

    /// Public test network. Shares the main network authority.
    pub fn testnet() -> Self {
        Self::main()
    }

    /// Local regression network. No authority until one is configured.
    pub fn regtest() -> Self {
        Self {
            spork_pubkey: None,
            message_magic: default_magic(),
            secret_key_prefix: 221,
        }
    }

    /// Preset for `network`.
    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Main => Self::main(),
            Network::Test => Self::testnet(),
            Network::Regtest => Self::regtest(),
        }
    }

    /// Replace the authority key.
    pub fn with_spork_pubkey(mut self, pubkey_hex: impl Into<String>) -> Self {
        self.spork_pubkey = Some(pubkey_hex.into());
        self
    }
}
