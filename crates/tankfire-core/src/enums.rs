//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Engagement controller state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngagementMode {
    /// No target currently visible.
    #[default]
    Searching,
    /// A target is inside radius, field of view, and line of sight.
    Engaged,
}

/// Overall scene phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Scene not yet built.
    #[default]
    Loading,
    /// Simulation running.
    Active,
    /// Simulation halted by the player.
    Paused,
    /// Player destroyed; waiting for the scheduled reset.
    GameOver,
}

/// Which side an entity or projectile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// Projectile kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Player cannon shell (lofted, no lifetime).
    Shell,
    /// Enemy turret round (expires).
    Round,
}
