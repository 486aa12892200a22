//! Arc prediction with obstruction truncation.
//!
//! Samples the closed-form kinematic path at fixed time steps and stops at
//! the first surface the arc runs into. Used for aim previews and for
//! checking whether a lob will clear cover.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use tankfire_core::types::Vector3;

use crate::obstruction::{RayHit, RaycastTest};

/// One predicted point on an arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub position: Vector3,
    /// Seconds since launch.
    pub elapsed: f64,
}

/// A collected arc prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub points: Vec<PathPoint>,
    /// The surface that cut the arc short, if any. When set, it is also the last point.
    pub obstruction: Option<RayHit>,
}

impl TrajectorySample {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Final predicted position (the impact point if obstructed).
    pub fn end(&self) -> Option<Vector3> {
        self.points.last().map(|p| p.position)
    }

    pub fn positions(&self) -> impl Iterator<Item = Vector3> + '_ {
        self.points.iter().map(|p| p.position)
    }
}

/// Closed-form position at time `t` with gravity along -y.
pub fn position_at(origin: Vector3, initial_velocity: Vector3, gravity: f64, t: f64) -> Vector3 {
    origin + initial_velocity * t + Vector3::new(0.0, -0.5 * gravity * t * t, 0.0)
}

/// Lazily samples an arc. Yields `origin` first, then up to `sample_count`
/// further points, and ends early at the first obstruction.
#[derive(Debug)]
pub struct PathSampler<'a, R: RaycastTest + ?Sized> {
    origin: Vector3,
    velocity: Vector3,
    gravity: f64,
    sample_count: usize,
    time_step: f64,
    obstruction: &'a R,
    next_index: usize,
    previous: Option<PathPoint>,
    hit: Option<RayHit>,
    done: bool,
}

/// Predict the arc of a projectile launched from `origin` at `initial_velocity`.
///
/// The returned sampler produces positions at `t = 0, Δt, …, N·Δt` where
/// `N = sample_count` and `Δt = time_step`. Between consecutive samples it
/// raycasts along the chord; a hit replaces the candidate sample and ends
/// the sequence. Samples that do not move from the previous one are never
/// occlusion-tested.
pub fn predict_path<R: RaycastTest + ?Sized>(
    origin: Vector3,
    initial_velocity: Vector3,
    gravity: f64,
    sample_count: usize,
    time_step: f64,
    obstruction: &R,
) -> PathSampler<'_, R> {
    PathSampler {
        origin,
        velocity: initial_velocity,
        gravity,
        sample_count,
        time_step,
        obstruction,
        next_index: 0,
        previous: None,
        hit: None,
        done: false,
    }
}

impl<R: RaycastTest + ?Sized> PathSampler<'_, R> {
    /// Drain the sampler into a [`TrajectorySample`].
    pub fn collect_sample(mut self) -> TrajectorySample {
        let points: Vec<PathPoint> = self.by_ref().collect();
        TrajectorySample {
            points,
            obstruction: self.hit,
        }
    }
}

impl<R: RaycastTest + ?Sized> Iterator for PathSampler<'_, R> {
    type Item = PathPoint;

    fn next(&mut self) -> Option<PathPoint> {
        if self.done {
            return None;
        }

        let Some(previous) = self.previous else {
            let first = PathPoint {
                position: self.origin,
                elapsed: 0.0,
            };
            self.previous = Some(first);
            self.next_index = 1;
            if self.sample_count == 0 {
                self.done = true;
            }
            return Some(first);
        };

        let elapsed = self.next_index as f64 * self.time_step;
        let candidate = PathPoint {
            position: position_at(self.origin, self.velocity, self.gravity, elapsed),
            elapsed,
        };

        let chord = candidate.position - previous.position;
        let length = chord.length();
        let point = if length > 1e-12 {
            let direction = chord / length;
            match self
                .obstruction
                .raycast(previous.position, direction, length)
            {
                Some(hit) => {
                    self.hit = Some(hit);
                    self.done = true;
                    let fraction = (hit.distance / length).clamp(0.0, 1.0);
                    PathPoint {
                        position: hit.point,
                        elapsed: previous.elapsed + self.time_step * fraction,
                    }
                }
                None => candidate,
            }
        } else {
            candidate
        };

        self.previous = Some(point);
        if self.next_index >= self.sample_count {
            self.done = true;
        } else {
            self.next_index += 1;
        }
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        // `next_index` never passes `sample_count` while the sampler is live.
        (1, (self.sample_count - self.next_index).checked_add(1))
    }
}

impl<R: RaycastTest + ?Sized> FusedIterator for PathSampler<'_, R> {}
