//! Construction parameters for a simulation instance.
//!
//! [`SimParams`] gathers the five values that fix a simulation for its whole
//! lifetime. They are validated once, at construction, so the tick loop can
//! divide by the cell spacing and index the interior without further checks.

use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_FRICTION, DEFAULT_GRAVITY, DEFAULT_RESOLUTION, DEFAULT_TIME_STEP, DEFAULT_WORLD_SIZE,
    MIN_RESOLUTION,
};
use crate::error::{ensure_finite, SimError};

/// Grid and physics parameters, immutable once a simulation is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Cells per side of the square lattice.
    pub resolution: usize,
    /// Physical side length of the simulated square.
    pub world_size: f32,
    /// Fixed tick duration in seconds.
    pub time_step: f32,
    pub gravity: f32,
    /// Linear damping coefficient applied to velocity.
    pub friction: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            world_size: DEFAULT_WORLD_SIZE,
            time_step: DEFAULT_TIME_STEP,
            gravity: DEFAULT_GRAVITY,
            friction: DEFAULT_FRICTION,
        }
    }
}

impl SimParams {
    pub fn new(
        resolution: usize,
        world_size: f32,
        time_step: f32,
        gravity: f32,
        friction: f32,
    ) -> Self {
        Self {
            resolution,
            world_size,
            time_step,
            gravity,
            friction,
        }
    }

    /// Same defaults with a different lattice size and world extent.
    pub fn with_grid(resolution: usize, world_size: f32) -> Self {
        Self {
            resolution,
            world_size,
            ..Self::default()
        }
    }

    /// Distance between neighbouring cell centres: worldSize / (N - 1).
    #[inline]
    pub fn cell_spacing(&self) -> f32 {
        self.world_size / (self.resolution - 1) as f32
    }

    /// Reject configurations that would later divide by zero or index out of bounds.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.resolution < MIN_RESOLUTION {
            return Err(SimError::InvalidResolution(self.resolution));
        }
        ensure_finite("world_size", self.world_size)?;
        ensure_finite("time_step", self.time_step)?;
        ensure_finite("gravity", self.gravity)?;
        ensure_finite("friction", self.friction)?;
        if self.world_size <= 0.0 {
            return Err(SimError::NonPositiveWorldSize(self.world_size));
        }
        if self.time_step <= 0.0 {
            return Err(SimError::NonPositiveTimeStep(self.time_step));
        }
        Ok(())
    }
}
