//! Simulation engine for TANKFIRE.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for a renderer or the CLI.

pub mod arena;
pub mod engagement;
pub mod engine;
pub mod scene;
pub mod systems;
pub mod world_setup;

pub use tankfire_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
