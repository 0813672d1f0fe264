//! # Reconsider-Blocks Governor
//!
//! A `SPORK_12_RECONSIDER_BLOCKS` update asks every node to re-validate its
//! most recent blocks. The governor bounds how often that can happen and how
//! deep it can reach.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Limits applied to reconsider requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernorConfig {
    /// Minimum seconds between two executed requests.
    pub min_interval_secs: i64,
    /// Largest accepted block count.
    pub max_blocks: i64,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            min_interval_secs: 600,
            max_blocks: 576,
        }
    }
}

/// Outcome of a reconsider request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconsiderDecision {
    /// Reconsider this many blocks.
    Execute(u32),
    /// Nothing requested.
    Ignored,
    /// Too close to the previous execution.
    TooSoon { elapsed: i64 },
    /// Requested depth exceeds the limit.
    TooDeep { requested: i64 },
}

/// Rate limiter owning the time of the last executed request.
#[derive(Debug, Default)]
pub struct ReconsiderGovernor {
    config: GovernorConfig,
    last_executed: Mutex<Option<i64>>,
}

impl ReconsiderGovernor {
    pub fn new(config: GovernorConfig) -> Self {
        Self {
            config,
            last_executed: Mutex::new(None),
        }
    }

    pub fn config(&self) -> GovernorConfig {
        self.config
    }

    /// Decide on a request for `blocks` at local time `now`.
    ///
    /// An `Execute` decision is recorded immediately; the caller is expected
    /// to act on it.
    pub fn request(&self, blocks: i64, now: i64) -> ReconsiderDecision {
        if blocks <= 0 {
            return ReconsiderDecision::Ignored;
        }

        let mut last = self.last_executed.lock();
        if let Some(previous) = *last {
            let elapsed = now - previous;
            if elapsed < self.config.min_interval_secs {
                return ReconsiderDecision::TooSoon { elapsed };
            }
        }
        if blocks > self.config.max_blocks {
            return ReconsiderDecision::TooDeep { requested: blocks };
        }
        let Ok(count) = u32::try_from(blocks) else {
            return ReconsiderDecision::TooDeep { requested: blocks };
        };

        *last = Some(now);
        ReconsiderDecision::Execute(count)
    }

    /// Time of the last executed request.
    pub fn last_executed(&self) -> Option<i64> {
        *self.last_executed.lock()
    }
}
