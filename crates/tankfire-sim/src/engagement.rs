//! Per-turret engagement state, stored as an ECS component on each enemy turret.

use tankfire_core::config::EngagementConfig;
use tankfire_core::error::ConfigError;
use tankfire_engagement::{EngagementController, ScanClock};

/// The controller plus the clock that gates its scans.
#[derive(Debug, Clone)]
pub struct EnemyBrain {
    pub controller: EngagementController,
    pub clock: ScanClock,
}

impl EnemyBrain {
    pub fn new(config: EngagementConfig) -> Result<Self, ConfigError> {
        let clock = ScanClock::new(config.scan_interval_secs);
        Ok(Self {
            controller: EngagementController::new(config)?,
            clock,
        })
    }
}
