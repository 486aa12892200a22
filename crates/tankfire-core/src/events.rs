//! Events emitted by the engagement core and the simulation.

use serde::{Deserialize, Serialize};

use crate::enums::{Faction, ProjectileKind};
use crate::error::BallisticsError;
use crate::types::Vector3;

/// Result of one engagement scan, for the driver to act on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngagementEvent {
    /// Nothing in radius, outside the vision cone, or occluded.
    NoTarget,
    /// Target visible but the weapon is cooling down.
    TargetAcquired { target: u64 },
    /// Spawn a projectile with this velocity.
    Fire {
        target: u64,
        velocity: Vector3,
        expected_impact: Option<Vector3>,
    },
    /// Target visible but no firing vector could be computed this scan.
    FireSolutionFailed { target: u64, error: BallisticsError },
}

impl EngagementEvent {
    /// Target id, if this scan saw one.
    pub fn target(&self) -> Option<u64> {
        match self {
            Self::NoTarget => None,
            Self::TargetAcquired { target }
            | Self::Fire { target, .. }
            | Self::FireSolutionFailed { target, .. } => Some(*target),
        }
    }
}

/// Presentation events for the audio, particle, and HUD layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Scene (re)built.
    SceneLoaded { generation: u32 },
    /// Muzzle flash and firing sound.
    ShotFired {
        faction: Faction,
        kind: ProjectileKind,
        position: Vector3,
    },
    /// An enemy turret started seeing the player.
    TargetAcquired { turret: u64, target: u64 },
    /// An enemy turret lost sight of its target.
    TargetLost { turret: u64 },
    /// A turret saw its target but could not solve a shot.
    FireSolutionFailed { turret: u64, error: BallisticsError },
    /// A projectile struck a tank.
    Hit {
        faction: Faction,
        position: Vector3,
        remaining_health: u32,
    },
    /// Explosion particles and sound.
    Destroyed { faction: Faction, position: Vector3 },
    /// A projectile struck terrain or an obstacle.
    Impact { position: Vector3 },
    /// Player destroyed; a reset is scheduled.
    GameOver { reset_in_secs: f64 },
}
