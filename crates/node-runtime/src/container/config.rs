//! # Node Configuration
//!
//! Sources, in increasing priority:
//!
//! 1. Built-in defaults
//! 2. TOML file (optional)
//! 3. `GC_*` environment variables
//!
//! ```toml
//! network = "main"
//!
//! [storage]
//! backend = "sled"
//! data_dir = "./data"
//!
//! [sporks]
//! signing_key = "<WIF>"
//!
//! [sporks.governor]
//! min_interval_secs = 600
//! max_blocks = 576
//!
//! [logging]
//! level = "info"
//! ```

use gc_01_proof_of_work::{ChainParams, Network};
use gc_02_sporks::{GovernorConfig, SporkNetworkConfig};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable selecting the network.
pub const ENV_NETWORK: &str = "GC_NETWORK";
/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "GC_DATA_DIR";
/// Environment variable holding the spork signing key (WIF).
pub const ENV_SPORK_KEY: &str = "GC_SPORK_KEY";
/// Environment variable overriding the log filter.
pub const ENV_LOG: &str = "GC_LOG";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range or unparseable.
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    /// The selected storage backend was not compiled in.
    #[error("storage backend '{0}' is not available in this build")]
    BackendUnavailable(StorageBackend),
}

/// Complete node configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeConfig {
    /// Network to join.
    pub network: Network,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Spork configuration.
    pub sporks: SporkConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Durable store used for sporks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Nothing survives a restart.
    Memory,
    #[default]
    Sled,
    RocksDb,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Sled => "sled",
            StorageBackend::RocksDb => "rocksdb",
        })
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Root data directory. Sporks live in `<data_dir>/<network>/sporks`.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: PathBuf::from("./data"),
        }
    }
}

/// Spork configuration.
#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SporkConfig {
    /// Master signing key (WIF). Only the spork authority sets this.
    pub signing_key: Option<String>,
    /// Replace the network's spork public key (hex). Needed on regtest.
    pub spork_pubkey: Option<String>,
    /// Reconsider-blocks limits.
    pub governor: GovernorConfig,
}

impl fmt::Debug for SporkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SporkConfig")
            .field("signing_key", &self.signing_key.as_ref().map(|_| "<redacted>"))
            .field("spork_pubkey", &self.spork_pubkey)
            .field("governor", &self.governor)
            .finish()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter directive, e.g. `info,gc_02_sporks=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl NodeConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Defaults, then `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&source)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides_with(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `GC_*` overrides read through `lookup`.
    pub fn apply_env_overrides_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(network) = lookup(ENV_NETWORK) {
            self.network = network.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_NETWORK,
                value: network.clone(),
            })?;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(key) = lookup(ENV_SPORK_KEY) {
            self.sporks.signing_key = Some(key);
        }
        if let Some(level) = lookup(ENV_LOG) {
            self.logging.level = level;
        }
        Ok(())
    }

    /// Reject settings the node cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if cfg!(not(feature = "rocksdb")) && self.storage.backend == StorageBackend::RocksDb {
            return Err(ConfigError::BackendUnavailable(StorageBackend::RocksDb));
        }
        if self.sporks.governor.min_interval_secs < 0 {
            return Err(ConfigError::InvalidValue {
                key: "sporks.governor.min_interval_secs",
                value: self.sporks.governor.min_interval_secs.to_string(),
            });
        }
        if self.sporks.governor.max_blocks < 0 {
            return Err(ConfigError::InvalidValue {
                key: "sporks.governor.max_blocks",
                value: self.sporks.governor.max_blocks.to_string(),
            });
        }
        Ok(())
    }

    /// Consensus parameters for the selected network.
    pub fn chain_params(&self) -> ChainParams {
        ChainParams::for_network(self.network)
    }

    /// Spork authentication settings, with the configured key override.
    pub fn spork_network_config(&self) -> SporkNetworkConfig {
        let config = SporkNetworkConfig::for_network(self.network);
        match &self.sporks.spork_pubkey {
            Some(pubkey) => config.with_spork_pubkey(pubkey.clone()),
            None => config,
        }
    }

    /// Directory holding the spork store.
    pub fn spork_store_path(&self) -> PathBuf {
        self.storage
            .data_dir
            .join(self.network.to_string())
            .join("sporks")
    }
}
