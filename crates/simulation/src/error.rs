// ---------------------------------------------------------------------------
// SimError: construction and input-validation failures
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors raised at the edges of the solver.
///
/// Numeric trouble inside a tick is never reported here; it is clamped or
/// replaced in place. These variants cover rejected configurations and
/// rejected external requests, which leave the simulation untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Grid side length below the minimum of 3 cells.
    InvalidResolution(usize),
    /// World size is zero or negative.
    NonPositiveWorldSize(f32),
    /// Time step is zero or negative.
    NonPositiveTimeStep(f32),
    /// A parameter or input value is NaN or infinite.
    NonFiniteParameter { name: &'static str },
    /// A terrain array does not cover the N x N lattice.
    TerrainSizeMismatch { expected: usize, found: usize },
    /// Obstacle footprint or height is unusable.
    InvalidObstacle(String),
    /// No obstacle with this id is currently placed.
    UnknownObstacle(u32),
    /// A field name that no query layer answers to.
    UnknownLayer(String),
    /// JSON encoding or decoding failed.
    Json(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidResolution(n) => {
                write!(f, "Invalid resolution {n}: need at least 3 cells per side")
            }
            SimError::NonPositiveWorldSize(size) => {
                write!(f, "World size must be positive, got {size}")
            }
            SimError::NonPositiveTimeStep(dt) => {
                write!(f, "Time step must be positive, got {dt}")
            }
            SimError::NonFiniteParameter { name } => {
                write!(f, "Parameter '{name}' is not a finite number")
            }
            SimError::TerrainSizeMismatch { expected, found } => write!(
                f,
                "Terrain size mismatch: expected {expected} cells, found {found}"
            ),
            SimError::InvalidObstacle(msg) => write!(f, "Invalid obstacle: {msg}"),
            SimError::UnknownObstacle(id) => write!(f, "Unknown obstacle id {id}"),
            SimError::UnknownLayer(name) => write!(f, "Unknown layer '{name}'"),
            SimError::Json(msg) => write!(f, "JSON error: {msg}"),
        }
    }
}

impl std::error::Error for SimError {}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Json(e.to_string())
    }
}

/// Reject NaN and infinities for a named input.
pub(crate) fn ensure_finite(name: &'static str, value: f32) -> Result<f32, SimError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::NonFiniteParameter { name })
    }
}
