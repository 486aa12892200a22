//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components.

pub mod cleanup;
pub mod damage;
pub mod enemy_ai;
pub mod player;
pub mod projectiles;
pub mod snapshot;
