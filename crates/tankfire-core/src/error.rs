//! Error types for TANKFIRE.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures of the ballistic solver. None of these are fatal; callers
/// degrade to "no shot this cycle".
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize, Deserialize)]
pub enum BallisticsError {
    /// `sin(2θ)` is too close to zero for the closed-form range relation.
    #[error("degenerate launch angle {angle_degrees}°")]
    DegenerateAngle {
        /// The rejected launch angle.
        angle_degrees: f64,
    },

    /// The computed speed is not a real number, or the inputs cannot
    /// produce one.
    #[error("no real firing solution")]
    NoSolution,
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Scenario file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario file is not valid JSON for the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field is outside its allowed range.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Field name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
