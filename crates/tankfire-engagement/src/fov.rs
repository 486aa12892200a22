//! Field-of-view geometry.
//!
//! Yaw is measured in degrees from +z, clockwise seen from above, so
//! 90° points along +x.

use tankfire_core::types::{direction_from_yaw_pitch, Vector3};

/// Angle between two directions in degrees, in [0, 180].
/// Either vector being zero yields 0.
pub fn angle_between_degrees(a: Vector3, b: Vector3) -> f64 {
    match (a.try_normalize(), b.try_normalize()) {
        (Some(a), Some(b)) => a.dot(b).clamp(-1.0, 1.0).acos().to_degrees(),
        _ => 0.0,
    }
}

/// True if `direction` lies inside the cone of full width `fov_degrees`
/// centered on `forward`. The boundary counts as inside.
pub fn within_field_of_view(forward: Vector3, direction: Vector3, fov_degrees: f64) -> bool {
    angle_between_degrees(forward, direction) <= fov_degrees / 2.0
}

/// Horizontal unit direction for a yaw.
pub fn direction_from_yaw(yaw_degrees: f64) -> Vector3 {
    direction_from_yaw_pitch(yaw_degrees, 0.0)
}

/// Yaw of a direction's horizontal component, in [0, 360).
pub fn yaw_from_direction(direction: Vector3) -> f64 {
    direction.x.atan2(direction.z).to_degrees().rem_euclid(360.0)
}

/// Left and right edges of a vision cone, for debug overlays.
pub fn fov_boundaries(yaw_degrees: f64, fov_degrees: f64) -> (Vector3, Vector3) {
    let half = fov_degrees / 2.0;
    (
        direction_from_yaw(yaw_degrees - half),
        direction_from_yaw(yaw_degrees + half),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_between_axes() {
        assert_relative_eq!(angle_between_degrees(Vector3::Z, Vector3::X), 90.0, epsilon = 1e-9);
        assert_relative_eq!(angle_between_degrees(Vector3::Z, -Vector3::Z), 180.0, epsilon = 1e-9);
        assert_relative_eq!(
            angle_between_degrees(Vector3::Z, Vector3::new(0.0, 0.0, 7.0)),
            0.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_field_of_view_boundary() {
        let forward = Vector3::Z;
        let at_edge = direction_from_yaw(44.999);
        let past_edge = direction_from_yaw(45.5);
        assert!(within_field_of_view(forward, at_edge, 90.0));
        assert!(!within_field_of_view(forward, past_edge, 90.0));
        assert!(within_field_of_view(forward, -Vector3::Z, 360.0));
    }

    #[test]
    fn test_yaw_round_trip() {
        for yaw in [0.0, 45.0, 90.0, 180.0, 270.0, 359.0] {
            assert_relative_eq!(yaw_from_direction(direction_from_yaw(yaw)), yaw, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_fov_boundaries_are_symmetric() {
        let (left, right) = fov_boundaries(0.0, 60.0);
        assert_relative_eq!(left.x, -right.x, epsilon = 1e-12);
        assert_relative_eq!(angle_between_degrees(left, right), 60.0, epsilon = 1e-9);
        assert_relative_eq!(angle_between_degrees(Vector3::Z, left), 30.0, epsilon = 1e-9);
    }
}
