//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

pub use glam::{DQuat, DVec3};

/// 3D vector in simulation space (meters).
/// x = Right, y = Up, z = Forward. Gravity acts along -y.
pub type Vector3 = DVec3;

/// World up axis.
pub const UP: Vector3 = Vector3::Y;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Axis-aligned box, used for arena obstacles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vector3,
    pub max: Vector3,
}

impl Aabb {
    /// Build a box from its center and half extents.
    pub fn from_center(center: Vector3, half_extents: Vector3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vector3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Slab test. Returns the entry distance along `direction` (assumed
    /// normalized) if the ray hits the box within `max_distance`.
    /// A ray starting inside the box hits at distance 0.
    pub fn ray_entry(&self, origin: Vector3, direction: Vector3, max_distance: f64) -> Option<f64> {
        let mut t_min = 0.0_f64;
        let mut t_max = max_distance;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < 1e-12 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

/// Horizontal projection of a vector (y zeroed).
pub fn horizontal(v: Vector3) -> Vector3 {
    Vector3::new(v.x, 0.0, v.z)
}

/// Unit direction for a yaw (degrees, 0 = +z, clockwise seen from above)
/// and an elevation (degrees above the horizon).
pub fn direction_from_yaw_pitch(yaw_degrees: f64, elevation_degrees: f64) -> Vector3 {
    let yaw = yaw_degrees.to_radians();
    let pitch = elevation_degrees.to_radians();
    Vector3::new(
        pitch.cos() * yaw.sin(),
        pitch.sin(),
        pitch.cos() * yaw.cos(),
    )
}
