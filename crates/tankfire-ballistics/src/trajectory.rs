//! Closed-form projectile range relations.
//!
//! Uses the flat-ground range identity `R = v² · sin(2θ) / g`: a projectile
//! launched at speed `v` and elevation `θ` under uniform gravity `g` lands at
//! launch height `R` meters away.

use tankfire_core::constants::DEGENERATE_ANGLE_EPSILON;
use tankfire_core::error::BallisticsError;
use tankfire_core::types::Vector3;

/// Launch speed needed to cover `target_range` meters at `launch_angle_degrees`
/// elevation before returning to launch height.
///
/// `speed = sqrt(range · g / sin(2θ))`. Angles where `sin(2θ)` is within
/// [`DEGENERATE_ANGLE_EPSILON`] of zero (0°, 90°, 180°, …) fail with
/// `DegenerateAngle`; callers substitute a minimum non-zero elevation. Angles
/// where `sin(2θ)` is negative have no real solution and fail with
/// `NoSolution`, as do negative ranges and non-positive gravity.
pub fn solve_launch_force(
    target_range: f64,
    launch_angle_degrees: f64,
    gravity: f64,
) -> Result<f64, BallisticsError> {
    if !launch_angle_degrees.is_finite()
        || !(target_range.is_finite() && target_range >= 0.0)
        || !(gravity.is_finite() && gravity > 0.0)
    {
        return Err(BallisticsError::NoSolution);
    }

    let sin_2theta = (2.0 * launch_angle_degrees.to_radians()).sin();
    if sin_2theta.abs() < DEGENERATE_ANGLE_EPSILON {
        return Err(BallisticsError::DegenerateAngle {
            angle_degrees: launch_angle_degrees,
        });
    }
    if sin_2theta < 0.0 {
        return Err(BallisticsError::NoSolution);
    }

    let speed = (target_range * gravity / sin_2theta).sqrt();
    if speed.is_finite() {
        Ok(speed)
    } else {
        Err(BallisticsError::NoSolution)
    }
}

/// Horizontal distance covered before returning to launch height.
/// Negative for elevations in (90°, 180°), where `sin(2θ) < 0`.
pub fn range_for_speed(speed: f64, launch_angle_degrees: f64, gravity: f64) -> f64 {
    speed * speed * (2.0 * launch_angle_degrees.to_radians()).sin() / gravity
}

/// Elevation of a direction above the horizontal plane (degrees).
pub fn elevation_degrees(direction: Vector3) -> f64 {
    let length = direction.length();
    if length < 1e-12 {
        return 0.0;
    }
    (direction.y / length).clamp(-1.0, 1.0).asin().to_degrees()
}
