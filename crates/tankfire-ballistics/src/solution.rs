//! Firing solutions: launch velocity plus expected impact point.

use serde::{Deserialize, Serialize};
use tracing::trace;

use tankfire_core::config::FireMode;
use tankfire_core::error::BallisticsError;
use tankfire_core::types::{horizontal, Vector3, UP};

use crate::trajectory::{elevation_degrees, range_for_speed, solve_launch_force};

/// Input to [`firing_solution`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimRequest {
    /// Launch point.
    pub origin: Vector3,
    /// Aim direction toward the target (need not be normalized).
    pub direction: Vector3,
    /// Horizontal distance to the target (meters). Used by lofted fire.
    pub horizontal_range: f64,
    /// Muzzle speed for direct fire (m/s).
    pub speed: f64,
    pub gravity: f64,
    pub mode: FireMode,
}

/// A computed shot, consumed immediately by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiringSolution {
    pub launch_velocity: Vector3,
    /// Where the arc returns to launch height, if it does.
    pub expected_impact_point: Option<Vector3>,
}

/// Compute the launch velocity for a shot.
///
/// Direct fire sends the round along `direction` at `speed`. Lofted fire
/// pitches the horizontal aim up by the configured angle and solves the
/// speed for `horizontal_range` with [`solve_launch_force`], so it fails with
/// `DegenerateAngle` at 0° or 90°.
pub fn firing_solution(request: &AimRequest) -> Result<FiringSolution, BallisticsError> {
    let solution = match request.mode {
        FireMode::Direct => direct(request)?,
        FireMode::Lofted {
            launch_angle_degrees,
        } => lofted(request, launch_angle_degrees)?,
    };
    trace!(
        velocity = ?solution.launch_velocity,
        impact = ?solution.expected_impact_point,
        "firing solution"
    );
    Ok(solution)
}

fn direct(request: &AimRequest) -> Result<FiringSolution, BallisticsError> {
    if !(request.speed.is_finite() && request.speed > 0.0) {
        return Err(BallisticsError::NoSolution);
    }
    let direction = request
        .direction
        .try_normalize()
        .ok_or(BallisticsError::NoSolution)?;
    let launch_velocity = direction * request.speed;

    // A rising shot comes back down at a computable point; a flat or
    // descending one never returns to launch height.
    let elevation = elevation_degrees(direction);
    let expected_impact_point = match horizontal(direction).try_normalize() {
        Some(heading) if elevation > 0.0 && request.gravity > 0.0 => {
            let range = range_for_speed(request.speed, elevation, request.gravity);
            Some(request.origin + heading * range)
        }
        _ => None,
    };

    Ok(FiringSolution {
        launch_velocity,
        expected_impact_point,
    })
}

fn lofted(request: &AimRequest, launch_angle_degrees: f64) -> Result<FiringSolution, BallisticsError> {
    let speed = solve_launch_force(request.horizontal_range, launch_angle_degrees, request.gravity)?;
    let heading = horizontal(request.direction)
        .try_normalize()
        .ok_or(BallisticsError::NoSolution)?;

    let angle = launch_angle_degrees.to_radians();
    let launch_direction = heading * angle.cos() + UP * angle.sin();

    Ok(FiringSolution {
        launch_velocity: launch_direction * speed,
        expected_impact_point: Some(request.origin + heading * request.horizontal_range),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::position_at;
    use approx::assert_relative_eq;
    use tankfire_core::constants::GRAVITY;

    fn request(direction: Vector3, mode: FireMode) -> AimRequest {
        AimRequest {
            origin: Vector3::new(0.0, 1.0, 0.0),
            direction,
            horizontal_range: horizontal(direction).length(),
            speed: 40.0,
            gravity: GRAVITY,
            mode,
        }
    }

    #[test]
    fn test_direct_fire_follows_line_of_sight() {
        let solution = firing_solution(&request(Vector3::new(0.0, 0.0, 5.0), FireMode::Direct)).unwrap();
        assert_relative_eq!(solution.launch_velocity.z, 40.0, epsilon = 1e-12);
        assert_relative_eq!(solution.launch_velocity.length(), 40.0, epsilon = 1e-12);
        // Flat shot never comes back to launch height.
        assert!(solution.expected_impact_point.is_none());
    }

    #[test]
    fn test_rising_direct_shot_predicts_landing() {
        let solution =
            firing_solution(&request(Vector3::new(0.0, 1.0, 1.0), FireMode::Direct)).unwrap();
        let impact = solution.expected_impact_point.unwrap();
        assert_relative_eq!(impact.z, 40.0 * 40.0 / GRAVITY, epsilon = 1e-6);
        assert_relative_eq!(impact.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_direct_fire_rejects_zero_direction() {
        assert_eq!(
            firing_solution(&request(Vector3::ZERO, FireMode::Direct)),
            Err(BallisticsError::NoSolution)
        );
    }

    #[test]
    fn test_lofted_shot_lands_at_target_range() {
        let mode = FireMode::Lofted {
            launch_angle_degrees: 30.0,
        };
        let req = request(Vector3::new(12.0, 0.0, 16.0), mode);
        let solution = firing_solution(&req).unwrap();
        let v = solution.launch_velocity;
        assert_relative_eq!(elevation_degrees(v), 30.0, epsilon = 1e-9);

        // Time of flight back to launch height, then check the landing point.
        let flight = 2.0 * v.y / GRAVITY;
        let landing = position_at(req.origin, v, GRAVITY, flight);
        let impact = solution.expected_impact_point.unwrap();
        assert_relative_eq!(landing.x, impact.x, epsilon = 1e-6);
        assert_relative_eq!(landing.z, impact.z, epsilon = 1e-6);
        assert_relative_eq!(impact.x.hypot(impact.z), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lofted_zero_angle_is_degenerate() {
        let mode = FireMode::Lofted {
            launch_angle_degrees: 0.0,
        };
        assert!(matches!(
            firing_solution(&request(Vector3::Z, mode)),
            Err(BallisticsError::DegenerateAngle { .. })
        ));
    }

    #[test]
    fn test_lofted_straight_up_has_no_heading() {
        let mode = FireMode::Lofted {
            launch_angle_degrees: 45.0,
        };
        assert_eq!(
            firing_solution(&request(Vector3::Y, mode)),
            Err(BallisticsError::NoSolution)
        );
    }
}
