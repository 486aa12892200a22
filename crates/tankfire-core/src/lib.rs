//! Core types and definitions for the TANKFIRE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, configuration, errors, components, commands, events,
//! state snapshots, and constants. It has no dependency on the ECS or
//! any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

pub use error::{BallisticsError, ConfigError};
pub use types::Vector3;
