//! Collision capability consumed by the solver and the engagement loop.

use serde::{Deserialize, Serialize};

use tankfire_core::types::Vector3;

/// First blocking surface along a ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub point: Vector3,
    /// Distance from the ray origin to `point`.
    pub distance: f64,
}

/// Straight-line obstruction query supplied by the collision collaborator.
///
/// `direction` is normalized by the caller. Implementations report the
/// nearest hit no farther than `max_distance`, or `None` if the segment is clear.
pub trait RaycastTest {
    fn raycast(&self, origin: Vector3, direction: Vector3, max_distance: f64) -> Option<RayHit>;
}

/// Empty world: nothing ever blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoObstruction;

impl RaycastTest for NoObstruction {
    fn raycast(&self, _origin: Vector3, _direction: Vector3, _max_distance: f64) -> Option<RayHit> {
        None
    }
}

impl<F> RaycastTest for F
where
    F: Fn(Vector3, Vector3, f64) -> Option<RayHit>,
{
    fn raycast(&self, origin: Vector3, direction: Vector3, max_distance: f64) -> Option<RayHit> {
        self(origin, direction, max_distance)
    }
}
