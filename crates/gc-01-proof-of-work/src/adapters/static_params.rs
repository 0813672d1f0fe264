//! Fixed network parameters, used where no spork manager is wired in.

use crate::domain::Algorithm;
use crate::ports::NetworkParameters;
use std::collections::HashMap;

/// Height value meaning "never" (2099-01-01 as a Unix timestamp).
pub const DISABLED_HEIGHT: i64 = 4_070_908_800;

/// Network parameters that never change.
#[derive(Clone, Debug)]
pub struct StaticNetworkParameters {
    handbrake_height: i64,
    forces: HashMap<Algorithm, i64>,
    fix_height: Option<i64>,
}

impl Default for StaticNetworkParameters {
    fn default() -> Self {
        Self {
            handbrake_height: DISABLED_HEIGHT,
            forces: HashMap::new(),
            fix_height: None,
        }
    }
}

impl StaticNetworkParameters {
    /// Enable the handbrake from `height` with per-algorithm forces.
    pub fn with_handbrake(mut self, height: i64, timetravel: i64, x16r: i64) -> Self {
        self.handbrake_height = height;
        self.forces.insert(Algorithm::TimeTravel, timetravel);
        self.forces.insert(Algorithm::X16R, x16r);
        self
    }

    /// Override the spacing-fix height.
    pub fn with_fix_height(mut self, height: i64) -> Self {
        self.fix_height = Some(height);
        self
    }
}

impl NetworkParameters for StaticNetworkParameters {
    fn handbrake_height(&self) -> i64 {
        self.handbrake_height
    }

    fn handbrake_force(&self, algorithm: Algorithm) -> i64 {
        self.forces.get(&algorithm).copied().unwrap_or(1)
    }

    fn spacing_fix_height(&self) -> Option<i64> {
        self.fix_height
    }
}
