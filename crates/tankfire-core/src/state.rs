//! Game state snapshot: the complete visible state produced after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{SimTime, Vector3};

/// Complete game state produced by the engine after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Number of scene loads so far (1 after the first load).
    pub generation: u32,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub hud: HudView,
    pub events: Vec<GameEvent>,
}

/// Player tank state for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vector3,
    pub hull_yaw_degrees: f64,
    /// Turret yaw relative to the hull.
    pub turret_yaw_degrees: f64,
    pub elevation_degrees: f64,
    pub health: u32,
    pub destroyed: bool,
    pub reload_remaining: f64,
    pub charging: bool,
    pub launch_speed: f64,
    /// Predicted shell arc while charging (empty otherwise).
    pub arc_preview: Vec<Vector3>,
}

/// Enemy turret state for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u64,
    pub position: Vector3,
    pub yaw_degrees: f64,
    pub mode: EngagementMode,
    pub target_visible: bool,
    pub cooldown_remaining: f64,
    pub health: u32,
    pub destroyed: bool,
    pub detection_radius: f64,
    /// Left and right edges of the vision cone (unit vectors), for debug overlays.
    pub fov_edges: (Vector3, Vector3),
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub kind: ProjectileKind,
    pub faction: Faction,
    pub position: Vector3,
    pub velocity: Vector3,
}

/// Health display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HudView {
    pub player_health: u32,
    pub text: String,
}

impl HudView {
    pub fn new(player_health: u32) -> Self {
        Self {
            player_health,
            text: format!("Player Health\n{player_health}"),
        }
    }
}
