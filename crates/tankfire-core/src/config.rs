//! Scenario and per-agent configuration.
//!
//! Everything here is plain serde data. `ScenarioConfig` is the root of a
//! scenario JSON file; missing fields fall back to the tuning constants.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::Vector3;

/// How an engagement controller turns a target direction into a launch velocity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FireMode {
    /// Fire straight along the line of sight at `projectile_speed`.
    #[default]
    Direct,
    /// Lob the round: pitch the aim up by `launch_angle_degrees` and solve the
    /// launch speed for the horizontal distance to the target.
    Lofted { launch_angle_degrees: f64 },
}

/// Immutable per-agent engagement configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementConfig {
    /// Candidates farther than this are ignored (meters).
    pub detection_radius: f64,
    /// Full angular width of the vision cone (degrees, 0..=360).
    pub field_of_view_degrees: f64,
    /// Cadence of `scan_tick` (seconds).
    pub scan_interval_secs: f64,
    /// Maximum shots per second.
    pub fire_rate_hz: f64,
    /// Muzzle speed of direct-fire rounds (m/s).
    pub projectile_speed: f64,
    pub fire_mode: FireMode,
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            detection_radius: DEFAULT_DETECTION_RADIUS,
            field_of_view_degrees: DEFAULT_FIELD_OF_VIEW_DEGREES,
            scan_interval_secs: DEFAULT_SCAN_INTERVAL_SECS,
            fire_rate_hz: DEFAULT_FIRE_RATE_HZ,
            projectile_speed: DEFAULT_PROJECTILE_SPEED,
            fire_mode: FireMode::Direct,
        }
    }
}

impl EngagementConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("detection_radius", self.detection_radius)?;
        if !(0.0..=360.0).contains(&self.field_of_view_degrees) {
            return Err(ConfigError::invalid(
                "field_of_view_degrees",
                format!("{} is outside 0..=360", self.field_of_view_degrees),
            ));
        }
        positive("scan_interval_secs", self.scan_interval_secs)?;
        positive("fire_rate_hz", self.fire_rate_hz)?;
        positive("projectile_speed", self.projectile_speed)?;
        if let FireMode::Lofted {
            launch_angle_degrees,
        } = self.fire_mode
        {
            if !launch_angle_degrees.is_finite() {
                return Err(ConfigError::invalid(
                    "fire_mode.launch_angle_degrees",
                    "must be finite",
                ));
            }
        }
        Ok(())
    }

    /// Seconds between shots.
    pub fn cooldown_secs(&self) -> f64 {
        1.0 / self.fire_rate_hz
    }
}

/// Player tank tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTankConfig {
    pub spawn: Vector3,
    pub yaw_degrees: f64,
    pub health: u32,
    pub speed: f64,
    pub turn_speed_degrees: f64,
    /// Range the cannon solves its launch speed for (meters).
    pub max_range: f64,
    pub launch_multiplier: f64,
    pub min_launch_speed: f64,
    pub max_launch_speed: f64,
}

impl Default for PlayerTankConfig {
    fn default() -> Self {
        Self {
            spawn: Vector3::ZERO,
            yaw_degrees: 0.0,
            health: PLAYER_HEALTH,
            speed: TANK_SPEED,
            turn_speed_degrees: TANK_TURN_SPEED,
            max_range: SHELL_MAX_RANGE,
            launch_multiplier: SHELL_LAUNCH_MULTIPLIER,
            min_launch_speed: SHELL_MIN_LAUNCH_SPEED,
            max_launch_speed: SHELL_MAX_LAUNCH_SPEED,
        }
    }
}

impl PlayerTankConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.health == 0 {
            return Err(ConfigError::invalid("player.health", "must be at least 1"));
        }
        positive("player.speed", self.speed)?;
        positive("player.turn_speed_degrees", self.turn_speed_degrees)?;
        positive("player.max_range", self.max_range)?;
        positive("player.launch_multiplier", self.launch_multiplier)?;
        positive("player.max_launch_speed", self.max_launch_speed)?;
        if !(self.min_launch_speed >= 0.0 && self.min_launch_speed <= self.max_launch_speed) {
            return Err(ConfigError::invalid(
                "player.min_launch_speed",
                "must be non-negative and not above max_launch_speed",
            ));
        }
        Ok(())
    }

    /// Seconds between player shots.
    pub fn reload_secs(&self) -> f64 {
        self.max_range / RELOAD_RANGE_DIVISOR
    }
}

/// Shared settings for every enemy turret in a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub engagement: EngagementConfig,
    pub health: u32,
    /// Yaw sweep while searching (degrees per second).
    pub sweep_rate_degrees: f64,
    pub round_lifetime_secs: f64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            engagement: EngagementConfig::default(),
            health: ENEMY_HEALTH,
            sweep_rate_degrees: DEFAULT_SWEEP_RATE_DEGREES,
            round_lifetime_secs: ENEMY_ROUND_LIFETIME_SECS,
        }
    }
}

/// A fixed enemy turret placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyPlacement {
    pub position: Vector3,
    #[serde(default)]
    pub yaw_degrees: f64,
}

/// A fixed box obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleConfig {
    pub center: Vector3,
    pub half_extents: Vector3,
}

/// Random placement of additional turrets and obstacles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub enemy_count: usize,
    pub obstacle_count: usize,
    /// Placements are drawn from a ring between these radii around the player spawn.
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            enemy_count: 0,
            obstacle_count: 0,
            min_radius: 15.0,
            max_radius: 60.0,
        }
    }
}

/// Root of a scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub seed: u64,
    pub gravity: f64,
    pub player: PlayerTankConfig,
    pub enemy: EnemyConfig,
    pub enemies: Vec<EnemyPlacement>,
    pub obstacles: Vec<ObstacleConfig>,
    pub scatter: Option<ScatterConfig>,
}

impl Default for ScenarioConfig {
    /// One turret 20 m ahead of the player, facing it, with a wall off to the side.
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            gravity: GRAVITY,
            player: PlayerTankConfig::default(),
            enemy: EnemyConfig::default(),
            enemies: vec![EnemyPlacement {
                position: Vector3::new(0.0, 0.0, 20.0),
                yaw_degrees: 180.0,
            }],
            obstacles: vec![ObstacleConfig {
                center: Vector3::new(12.0, 1.5, 10.0),
                half_extents: Vector3::new(2.0, 1.5, 2.0),
            }],
            scatter: None,
        }
    }
}

impl ScenarioConfig {
    /// Parse and validate a scenario from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a scenario file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("gravity", self.gravity)?;
        self.player.validate()?;
        self.enemy.engagement.validate()?;
        if self.enemy.health == 0 {
            return Err(ConfigError::invalid("enemy.health", "must be at least 1"));
        }
        positive("enemy.round_lifetime_secs", self.enemy.round_lifetime_secs)?;
        let engagement = &self.enemy.engagement;
        if engagement.fire_mode == FireMode::Direct
            && self.enemy.round_lifetime_secs * engagement.projectile_speed < engagement.detection_radius
        {
            return Err(ConfigError::invalid(
                "enemy.round_lifetime_secs",
                format!(
                    "rounds travel {} m but turrets engage out to {} m",
                    self.enemy.round_lifetime_secs * engagement.projectile_speed,
                    engagement.detection_radius
                ),
            ));
        }
        if !self.enemy.sweep_rate_degrees.is_finite() {
            return Err(ConfigError::invalid(
                "enemy.sweep_rate_degrees",
                "must be finite",
            ));
        }
        if let Some(scatter) = &self.scatter {
            if !(scatter.min_radius >= 0.0 && scatter.min_radius < scatter.max_radius) {
                return Err(ConfigError::invalid(
                    "scatter.min_radius",
                    "must be non-negative and below max_radius",
                ));
            }
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be > 0")))
    }
}
