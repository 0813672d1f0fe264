//! # Spork Registry
//!
//! Every network parameter a spork can override, with its on-wire id, its
//! RPC name and its compiled-in default.
//!
//! Toggle-style sporks hold an activation epoch: the spork is "on" once the
//! adjusted network time has passed the value. [`SPORK_OFF`] is far enough in
//! the future to mean "never".

use std::fmt;

/// Value meaning "never active" (2099-01-01 00:00:00 UTC).
pub const SPORK_OFF: i64 = 4_070_908_800;

/// Value reported for ids missing from the registry.
pub const UNKNOWN_SPORK_VALUE: i64 = -1;

/// Name reported for ids missing from the registry.
pub const UNKNOWN_SPORK_NAME: &str = "Unknown";

/// A known spork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SporkId {
    InstantSendEnabled,
    InstantSendBlockFiltering,
    InstantSendMaxValue,
    MasternodePaymentEnforcement,
    SuperblocksEnabled,
    MasternodePayUpdatedNodes,
    ReconsiderBlocks,
    OldSuperblockFlag,
    RequireSentinelFlag,
    HandbrakeHeight,
    HandbrakeForceExosis,
    HandbrakeForceX16R,
    IgnoreSlightlyHigherCoinbase,
    IgnoreFounderRewardCheck,
    IgnoreFounderRewardValue,
    IgnoreMasternodeRewardValue,
    IgnoreMasternodeRewardPayee,
    BlockRewardSmoothHalvingStart,
    #[cfg(feature = "experimental-sporks")]
    CheckpointHeight,
    #[cfg(feature = "experimental-sporks")]
    CheckpointHashBits1,
    #[cfg(feature = "experimental-sporks")]
    CheckpointHashBits2,
    #[cfg(feature = "experimental-sporks")]
    CheckpointHashBits3,
    #[cfg(feature = "experimental-sporks")]
    CheckpointHashBits4,
    FixHeight,
}

impl SporkId {
    /// Every known spork, in id order.
    pub const ALL: &'static [SporkId] = &[
        SporkId::InstantSendEnabled,
        SporkId::InstantSendBlockFiltering,
        SporkId::InstantSendMaxValue,
        SporkId::MasternodePaymentEnforcement,
        SporkId::SuperblocksEnabled,
        SporkId::MasternodePayUpdatedNodes,
        SporkId::ReconsiderBlocks,
        SporkId::OldSuperblockFlag,
        SporkId::RequireSentinelFlag,
        SporkId::HandbrakeHeight,
        SporkId::HandbrakeForceExosis,
        SporkId::HandbrakeForceX16R,
        SporkId::IgnoreSlightlyHigherCoinbase,
        SporkId::IgnoreFounderRewardCheck,
        SporkId::IgnoreFounderRewardValue,
        SporkId::IgnoreMasternodeRewardValue,
        SporkId::IgnoreMasternodeRewardPayee,
        SporkId::BlockRewardSmoothHalvingStart,
        #[cfg(feature = "experimental-sporks")]
        SporkId::CheckpointHeight,
        #[cfg(feature = "experimental-sporks")]
        SporkId::CheckpointHashBits1,
        #[cfg(feature = "experimental-sporks")]
        SporkId::CheckpointHashBits2,
        #[cfg(feature = "experimental-sporks")]
        SporkId::CheckpointHashBits3,
        #[cfg(feature = "experimental-sporks")]
        SporkId::CheckpointHashBits4,
        SporkId::FixHeight,
    ];

    /// On-wire identifier.
    pub const fn id(self) -> i32 {
        match self {
            SporkId::InstantSendEnabled => 10001,
            SporkId::InstantSendBlockFiltering => 10002,
            SporkId::InstantSendMaxValue => 10004,
            SporkId::MasternodePaymentEnforcement => 10007,
            SporkId::SuperblocksEnabled => 10008,
            SporkId::MasternodePayUpdatedNodes => 10009,
            SporkId::ReconsiderBlocks => 10011,
            SporkId::OldSuperblockFlag => 10012,
            SporkId::RequireSentinelFlag => 10013,
            SporkId::HandbrakeHeight => 94680010,
            SporkId::HandbrakeForceExosis => 94680011,
            SporkId::HandbrakeForceX16R => 94680016,
            SporkId::IgnoreSlightlyHigherCoinbase => 94680021,
            SporkId::IgnoreFounderRewardCheck => 94680022,
            SporkId::IgnoreFounderRewardValue => 94680023,
            SporkId::IgnoreMasternodeRewardValue => 94680024,
            SporkId::IgnoreMasternodeRewardPayee => 94680025,
            SporkId::BlockRewardSmoothHalvingStart => 94680031,
            #[cfg(feature = "experimental-sporks")]
            SporkId::CheckpointHeight => 94680041,
            #[cfg(feature = "experimental-sporks")]
            SporkId::CheckpointHashBits1 => 94680042,
            #[cfg(feature = "experimental-sporks")]
            SporkId::CheckpointHashBits2 => 94680043,
            #[cfg(feature = "experimental-sporks")]
            SporkId::CheckpointHashBits3 => 94680044,
            #[cfg(feature = "experimental-sporks")]
            SporkId::CheckpointHashBits4 => 94680045,
            SporkId::FixHeight => 94680051,
        }
    }

    /// Name used by the RPC layer.
    pub const fn name(self) -> &'static str {
        match self {
            SporkId::InstantSendEnabled => "SPORK_2_INSTANTSEND_ENABLED",
            SporkId::InstantSendBlockFiltering => "SPORK_3_INSTANTSEND_BLOCK_FILTERING",
            SporkId::InstantSendMaxValue => "SPORK_5_INSTANTSEND_MAX_VALUE",
            SporkId::MasternodePaymentEnforcement => "SPORK_8_MASTERNODE_PAYMENT_ENFORCEMENT",
            SporkId::SuperblocksEnabled => "SPORK_9_SUPERBLOCKS_ENABLED",
            SporkId::MasternodePayUpdatedNodes => "SPORK_10_MASTERNODE_PAY_UPDATED_NODES",
            SporkId::ReconsiderBlocks => "SPORK_12_RECONSIDER_BLOCKS",
            SporkId::OldSuperblockFlag => "SPORK_13_OLD_SUPERBLOCK_FLAG",
            SporkId::RequireSentinelFlag => "SPORK_14_REQUIRE_SENTINEL_FLAG",
            SporkId::HandbrakeHeight => "SPORK_EXOSIS_01_HANDBRAKE_HEIGHT",
            SporkId::HandbrakeForceExosis => "SPORK_EXOSIS_01_HANDBRAKE_FORCE_EXOSIS",
            SporkId::HandbrakeForceX16R => "SPORK_EXOSIS_01_HANDBRAKE_FORCE_X16R",
            SporkId::IgnoreSlightlyHigherCoinbase => {
                "SPORK_EXOSIS_02_IGNORE_SLIGHTLY_HIGHER_COINBASE"
            }
            SporkId::IgnoreFounderRewardCheck => "SPORK_EXOSIS_02_IGNORE_FOUNDER_REWARD_CHECK",
            SporkId::IgnoreFounderRewardValue => "SPORK_EXOSIS_02_IGNORE_FOUNDER_REWARD_VALUE",
            SporkId::IgnoreMasternodeRewardValue => {
                "SPORK_EXOSIS_02_IGNORE_MASTERNODE_REWARD_VALUE"
            }
            SporkId::IgnoreMasternodeRewardPayee => {
                "SPORK_EXOSIS_02_IGNORE_MASTERNODE_REWARD_PAYEE"
            }
            SporkId::BlockRewardSmoothHalvingStart => {
                "SPORK_EXOSIS_03_BLOCK_REWARD_SMOOTH_HALVING_START"
            }
            #[cfg(feature = "experimental-sporks")]
            SporkId::CheckpointHeight => "SPORK_EXOSIS_04_CHECKPOINT_HEIGHT",
            #[cfg(feature = "experimental-sporks")]
            SporkId::CheckpointHashBits1 => "SPORK_EXOSIS_04_CHECKPOINT_HASHBITS_1",
            #[cfg(feature = "experimental-sporks")]
            SporkId::CheckpointHashBits2 => "SPORK_EXOSIS_04_CHECKPOINT_HASHBITS_2",
            #[cfg(feature = "experimental-sporks")]
            SporkId::CheckpointHashBits3 => "SPORK_EXOSIS_04_CHECKPOINT_HASHBITS_3",
            #[cfg(feature = "experimental-sporks")]
            SporkId::CheckpointHashBits4 => "SPORK_EXOSIS_04_CHECKPOINT_HASHBITS_4",
            SporkId::FixHeight => "SPORK_EXOSIS_05_FIX_HEIGHT",
        }
    }

    /// Compiled-in value used until a signed override is accepted.
    pub const fn default_value(self) -> i64 {
        match self {
            SporkId::InstantSendEnabled => 0,
            SporkId::InstantSendBlockFiltering => 0,
            SporkId::InstantSendMaxValue => 1000,
            SporkId::ReconsiderBlocks => 0,
            SporkId::HandbrakeForceExosis => 1,
            SporkId::HandbrakeForceX16R => 1,
            #[cfg(feature = "experimental-sporks")]
            SporkId::CheckpointHashBits1
            | SporkId::CheckpointHashBits2
            | SporkId::CheckpointHashBits3
            | SporkId::CheckpointHashBits4 => 0,
            SporkId::FixHeight => 105_000,
            _ => SPORK_OFF,
        }
    }

    /// Look up a spork by its on-wire id.
    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|spork| spork.id() == id)
    }

    /// Look up a spork by its RPC name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|spork| spork.name() == name)
    }
}

impl fmt::Display for SporkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name for a raw id, [`UNKNOWN_SPORK_NAME`] if it is not in the registry.
pub fn spork_name(id: i32) -> &'static str {
    SporkId::from_id(id).map_or(UNKNOWN_SPORK_NAME, SporkId::name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_and_names_are_unique() {
        let ids: HashSet<_> = SporkId::ALL.iter().map(|s| s.id()).collect();
        let names: HashSet<_> = SporkId::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(ids.len(), SporkId::ALL.len());
        assert_eq!(names.len(), SporkId::ALL.len());
    }

    #[test]
    fn test_all_is_sorted_by_id() {
        assert!(SporkId::ALL.windows(2).all(|w| w[0].id() < w[1].id()));
    }

    #[test]
    fn test_lookup_round_trips() {
        for spork in SporkId::ALL {
            assert_eq!(SporkId::from_id(spork.id()), Some(*spork));
            assert_eq!(SporkId::from_name(spork.name()), Some(*spork));
        }
    }

    #[test]
    fn test_known_defaults() {
        assert_eq!(SporkId::InstantSendMaxValue.default_value(), 1000);
        assert_eq!(SporkId::HandbrakeHeight.default_value(), SPORK_OFF);
        assert_eq!(SporkId::HandbrakeForceX16R.default_value(), 1);
        assert_eq!(SporkId::FixHeight.default_value(), 105_000);
        assert_eq!(SporkId::SuperblocksEnabled.default_value(), SPORK_OFF);
    }

    #[test]
    fn test_unknown_id() {
        assert_eq!(SporkId::from_id(12345), None);
        assert_eq!(spork_name(12345), "Unknown");
        assert_eq!(spork_name(10011), "SPORK_12_RECONSIDER_BLOCKS");
        assert_eq!(SporkId::from_name("SPORK_1_NOTHING"), None);
    }
}
