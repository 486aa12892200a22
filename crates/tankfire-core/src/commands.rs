//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Axis inputs
//! are held until the next command for the same axis, like a held key.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Driving ---
    /// Forward/back input in [-1, 1].
    SetThrottle { value: f64 },
    /// Hull turn input in [-1, 1]; positive turns clockwise.
    SetSteering { value: f64 },

    // --- Turret ---
    /// Turret traverse input in [-1, 1]; positive turns clockwise.
    SetTurretInput { value: f64 },
    /// Cannon elevation input in [-1, 1]; positive raises the barrel.
    SetElevationInput { value: f64 },

    // --- Firing ---
    /// Start charging a shot; the arc preview is shown while charging.
    BeginCharge,
    /// Fire the charged shot.
    ReleaseFire,

    // --- Scene control ---
    /// Reload the scene immediately.
    ResetScene,
    Pause,
    Resume,
}
