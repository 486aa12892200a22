//! Ballistic math for TANKFIRE.
//!
//! Closed-form launch-speed solving, arc prediction with obstruction
//! truncation, and firing solutions. Pure functions with no ECS or I/O
//! dependency; collision queries come in through [`RaycastTest`].

pub mod obstruction;
pub mod path;
pub mod solution;
pub mod trajectory;

pub use tankfire_core as core;

// Re-export key types for convenience.
pub use obstruction::{NoObstruction, RayHit, RaycastTest};
pub use path::{predict_path, PathPoint, PathSampler, TrajectorySample};
pub use solution::{firing_solution, AimRequest, FiringSolution};
pub use trajectory::{elevation_degrees, range_for_speed, solve_launch_force};
