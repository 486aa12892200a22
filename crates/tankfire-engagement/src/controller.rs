//! Engagement controller: scan, classify visibility, fire at a limited rate.
//!
//! Two states: `Searching` (initial) and `Engaged`. There is no terminal
//! state; the controller lives as long as its turret.
//!
//! The driver calls [`EngagementController::tick`] every simulation step and
//! [`EngagementController::scan_tick`] at the configured scan cadence (see
//! [`crate::clock::ScanClock`]). Gravity and the occlusion capability are
//! passed per call and never held.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use tankfire_ballistics::{firing_solution, AimRequest, RaycastTest};
use tankfire_core::config::EngagementConfig;
use tankfire_core::enums::EngagementMode;
use tankfire_core::error::ConfigError;
use tankfire_core::events::EngagementEvent;
use tankfire_core::types::{horizontal, Vector3};

use crate::fov::within_field_of_view;

/// A potential target reported by the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: u64,
    pub position: Vector3,
}

/// Per-scan snapshot of the environment.
#[derive(Debug, Clone, Copy)]
pub struct ScanContext<'a> {
    pub candidates: &'a [Candidate],
    /// Sensor and muzzle position.
    pub self_position: Vector3,
    /// Center of the vision cone.
    pub self_forward: Vector3,
    /// Gravity magnitude for lofted solutions.
    pub gravity: f64,
}

/// Mutable run-time state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementState {
    pub mode: EngagementMode,
    pub target_visible: bool,
    /// Seconds until the next shot is allowed (≥ 0).
    pub cooldown_remaining: f64,
    /// Id of the target seen on the last scan.
    pub current_target: Option<u64>,
}

/// Scan-and-trigger state machine for one turret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementController {
    config: EngagementConfig,
    state: EngagementState,
}

impl EngagementController {
    /// Create a controller in `Searching` with no cooldown.
    pub fn new(config: EngagementConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: EngagementState::default(),
        })
    }

    pub fn config(&self) -> &EngagementConfig {
        &self.config
    }

    pub fn state(&self) -> &EngagementState {
        &self.state
    }

    pub fn mode(&self) -> EngagementMode {
        self.state.mode
    }

    pub fn target_visible(&self) -> bool {
        self.state.target_visible
    }

    pub fn cooldown_remaining(&self) -> f64 {
        self.state.cooldown_remaining
    }

    /// Advance timers. Call every simulation step regardless of scan cadence.
    pub fn tick(&mut self, dt: f64) {
        self.state.cooldown_remaining = (self.state.cooldown_remaining - dt.max(0.0)).max(0.0);
    }

    /// Run one detection pass and decide whether to fire.
    pub fn scan_tick<R: RaycastTest + ?Sized>(
        &mut self,
        ctx: &ScanContext<'_>,
        occlusion: &R,
    ) -> EngagementEvent {
        // Step 1: detection volume
        let radius = self.config.detection_radius;
        let Some((target, distance)) = select_target(ctx, radius) else {
            return self.lose_target();
        };

        // Step 2: direction to target
        let direction = (target.position - ctx.self_position)
            .try_normalize()
            .unwrap_or_else(|| ctx.self_forward.normalize_or_zero());

        // Step 3: vision cone
        if !within_field_of_view(ctx.self_forward, direction, self.config.field_of_view_degrees) {
            return self.lose_target();
        }

        // Step 4: line of sight
        if distance > 0.0 {
            if let Some(hit) = occlusion.raycast(ctx.self_position, direction, distance) {
                debug!(target = target.id, blocker = ?hit.point, "line of sight blocked");
                return self.lose_target();
            }
        }

        // Step 5: engaged
        if self.state.mode != EngagementMode::Engaged {
            debug!(target = target.id, distance, "target acquired");
        }
        self.state.mode = EngagementMode::Engaged;
        self.state.target_visible = true;
        self.state.current_target = Some(target.id);

        if self.state.cooldown_remaining > 0.0 {
            return EngagementEvent::TargetAcquired { target: target.id };
        }

        let request = AimRequest {
            origin: ctx.self_position,
            direction,
            horizontal_range: horizontal(target.position - ctx.self_position).length(),
            speed: self.config.projectile_speed,
            gravity: ctx.gravity,
            mode: self.config.fire_mode,
        };

        match firing_solution(&request) {
            Ok(solution) => {
                self.state.cooldown_remaining = self.config.cooldown_secs();
                EngagementEvent::Fire {
                    target: target.id,
                    velocity: solution.launch_velocity,
                    expected_impact: solution.expected_impact_point,
                }
            }
            Err(error) => {
                warn!(target = target.id, %error, "no firing solution");
                EngagementEvent::FireSolutionFailed {
                    target: target.id,
                    error,
                }
            }
        }
    }

    fn lose_target(&mut self) -> EngagementEvent {
        if self.state.mode == EngagementMode::Engaged {
            debug!(target = ?self.state.current_target, "target lost");
        }
        self.state.mode = EngagementMode::Searching;
        self.state.target_visible = false;
        self.state.current_target = None;
        EngagementEvent::NoTarget
    }

    #[cfg(test)]
    pub(crate) fn set_cooldown(&mut self, secs: f64) {
        self.state.cooldown_remaining = secs;
    }
}

/// Nearest candidate within `radius`; ties go to the lowest id.
fn select_target(ctx: &ScanContext<'_>, radius: f64) -> Option<(Candidate, f64)> {
    ctx.candidates
        .iter()
        .map(|c| (*c, c.position.distance(ctx.self_position)))
        .filter(|(_, distance)| *distance <= radius)
        .min_by(|(a, da), (b, db)| da.total_cmp(db).then(a.id.cmp(&b.id)))
}
