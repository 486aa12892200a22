//! Static arena geometry: a ground plane plus axis-aligned box obstacles.
//!
//! This is the collision collaborator for line-of-sight checks, arc previews,
//! and projectile impacts.

use tankfire_ballistics::{RayHit, RaycastTest};
use tankfire_core::types::{Aabb, Vector3};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArenaGeometry {
    ground_height: f64,
    obstacles: Vec<Aabb>,
}

impl ArenaGeometry {
    pub fn new(ground_height: f64, obstacles: Vec<Aabb>) -> Self {
        Self {
            ground_height,
            obstacles,
        }
    }

    pub fn ground_height(&self) -> f64 {
        self.ground_height
    }

    pub fn obstacles(&self) -> &[Aabb] {
        &self.obstacles
    }

    /// True if `point` is inside an obstacle.
    pub fn blocks(&self, point: Vector3) -> bool {
        self.obstacles.iter().any(|b| b.contains(point))
    }

    fn ground_hit(&self, origin: Vector3, direction: Vector3, max_distance: f64) -> Option<f64> {
        if origin.y < self.ground_height {
            return Some(0.0);
        }
        if direction.y >= 0.0 {
            return None;
        }
        let t = (origin.y - self.ground_height) / -direction.y;
        (t <= max_distance).then_some(t)
    }
}

impl RaycastTest for ArenaGeometry {
    fn raycast(&self, origin: Vector3, direction: Vector3, max_distance: f64) -> Option<RayHit> {
        let nearest = self
            .obstacles
            .iter()
            .filter_map(|b| b.ray_entry(origin, direction, max_distance))
            .chain(self.ground_hit(origin, direction, max_distance))
            .min_by(f64::total_cmp)?;

        Some(RayHit {
            point: origin + direction * nearest,
            distance: nearest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn arena() -> ArenaGeometry {
        ArenaGeometry::new(
            0.0,
            vec![Aabb::from_center(
                Vector3::new(0.0, 1.5, 10.0),
                Vector3::new(2.0, 1.5, 2.0),
            )],
        )
    }

    #[test]
    fn test_level_ray_hits_wall_face() {
        let hit = arena()
            .raycast(Vector3::new(0.0, 1.2, 0.0), Vector3::Z, 20.0)
            .unwrap();
        assert_relative_eq!(hit.distance, 8.0, epsilon = 1e-9);
        assert_relative_eq!(hit.point.z, 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ray_stops_short_of_wall() {
        assert!(arena()
            .raycast(Vector3::new(0.0, 1.2, 0.0), Vector3::Z, 7.5)
            .is_none());
    }

    #[test]
    fn test_ray_over_wall_is_clear() {
        assert!(arena()
            .raycast(Vector3::new(0.0, 4.0, 0.0), Vector3::Z, 20.0)
            .is_none());
    }

    #[test]
    fn test_descending_ray_hits_ground() {
        let direction = Vector3::new(0.0, -1.0, 1.0).normalize();
        let hit = arena()
            .raycast(Vector3::new(0.0, 2.0, 0.0), direction, 10.0)
            .unwrap();
        assert_relative_eq!(hit.point.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(hit.point.z, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_nearest_surface_wins() {
        // Ground at z = 12 lies behind the wall face at z = 8.
        let direction = Vector3::new(0.0, -0.1, 1.0).normalize();
        let hit = arena()
            .raycast(Vector3::new(0.0, 1.2, 0.0), direction, 50.0)
            .unwrap();
        assert_relative_eq!(hit.point.z, 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_blocks_inside_obstacle() {
        assert!(arena().blocks(Vector3::new(1.0, 1.0, 9.0)));
        assert!(!arena().blocks(Vector3::new(5.0, 1.0, 9.0)));
    }
}
