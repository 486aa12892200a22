//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::{Faction, ProjectileKind};
use crate::types::Vector3;

/// World placement. Yaw in degrees, 0 = +z, clockwise seen from above.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vector3,
    pub yaw_degrees: f64,
}

/// Linear velocity (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vector3);

/// Marker for the player-controlled tank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerTank;

/// Marker for an enemy turret, with its search sweep rate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyTurret {
    /// Yaw sweep while searching (degrees per second).
    pub sweep_rate_degrees: f64,
    /// Lifetime of rounds this turret fires.
    pub round_lifetime_secs: f64,
}

/// Held player inputs, each in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DriveInput {
    pub throttle: f64,
    pub steering: f64,
    pub turret: f64,
    pub elevation: f64,
}

/// Hull movement limits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Mobility {
    pub speed: f64,
    pub turn_speed_degrees: f64,
}

/// Turret orientation relative to the hull.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TurretState {
    /// Yaw relative to hull heading (degrees).
    pub yaw_degrees: f64,
    /// Barrel elevation above the horizon (degrees).
    pub elevation_degrees: f64,
}

/// Player cannon state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cannon {
    pub max_range: f64,
    pub launch_multiplier: f64,
    pub min_launch_speed: f64,
    pub max_launch_speed: f64,
    /// Full reload duration (seconds).
    pub reload_secs: f64,
    /// Remaining reload time (seconds, 0 = ready).
    pub reload_remaining: f64,
    /// Whether a shot is being charged.
    pub charging: bool,
    /// Launch speed computed for the current elevation.
    pub launch_speed: f64,
    /// Predicted arc while charging.
    pub preview: Vec<Vector3>,
}

/// Hit points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }
}

/// Attached when health reaches zero; the entity is removed when the timer expires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Destroyed {
    pub despawn_in_secs: f64,
}

/// Hit sphere centered `height` above the entity origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitSphere {
    pub radius: f64,
    pub height: f64,
}

/// Side an entity fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allegiance(pub Faction);

/// In-flight projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub faction: Faction,
    /// Entity bits of the shooter, which the projectile never hits.
    pub owner: u64,
    /// Seconds left before the projectile expires (`None` = until impact).
    pub lifetime_remaining: Option<f64>,
}
