//! Engagement logic for TANKFIRE enemy turrets.
//!
//! Implements the scan-and-trigger state machine, field-of-view geometry,
//! the scan cadence clock, and the projectile spawn capability the driver
//! supplies.

pub mod clock;
pub mod controller;
pub mod fov;
pub mod spawner;

pub use tankfire_core as core;

pub use clock::ScanClock;
pub use controller::{Candidate, EngagementController, EngagementState, ScanContext};
pub use spawner::{heading_rotation, launch, ProjectileSpawner};
