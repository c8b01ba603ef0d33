//! The simulation controller.
//!
//! [`SnowSimulation`] owns one [`SnowGrid`] and the parameters it was built
//! with, and is the only way to mutate either. It is a bevy `Resource`, so
//! the plugin schedules `tick()` in `FixedUpdate`, but it works standalone as
//! well: everything here is plain synchronous code.
//!
//! Mutations (`place_obstacle`, `inject_material`, `reset` and friends) are
//! meant to run between ticks. The read-only views always show the state
//! after the last completed tick plus any mutations applied since.

use bevy::prelude::*;

use crate::elevation::{normalize_elevation, ElevationPatch};
use crate::error::{ensure_finite, SimError};
use crate::grid::SnowGrid;
use crate::params::SimParams;
use crate::solver;
use crate::terrain::{self, Obstacle, ObstacleId, ObstacleSpec};

#[derive(Resource, Debug, Clone)]
pub struct SnowSimulation {
    params: SimParams,
    grid: SnowGrid,
    obstacles: Vec<Obstacle>,
    next_obstacle_id: u32,
    ticks: u64,
}

impl Default for SnowSimulation {
    fn default() -> Self {
        Self::from_validated(SimParams::default())
    }
}

impl SnowSimulation {
    /// Validate `params` and allocate a zeroed grid.
    pub fn new(params: SimParams) -> Result<Self, SimError> {
        params.validate()?;
        Ok(Self::from_validated(params))
    }

    /// Build without re-checking; callers guarantee `params.validate()` passed.
    pub(crate) fn from_validated(params: SimParams) -> Self {
        Self {
            grid: SnowGrid::new(params.resolution),
            params,
            obstacles: Vec::new(),
            next_obstacle_id: 0,
            ticks: 0,
        }
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn grid(&self) -> &SnowGrid {
        &self.grid
    }

    pub fn resolution(&self) -> usize {
        self.params.resolution
    }

    /// Number of completed ticks since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // -----------------------------------------------------------------------
    // Time stepping
    // -----------------------------------------------------------------------

    /// Run exactly one solver step.
    pub fn tick(&mut self) {
        solver::step(&mut self.grid, &self.params);
        self.ticks += 1;
    }

    /// Zero depth and velocity. Terrain and obstacles persist.
    pub fn reset(&mut self) {
        self.grid.reset();
    }

    /// Zero velocity only; deposited material stays where it is.
    pub fn reset_velocity(&mut self) {
        self.grid.reset_velocity();
    }

    // -----------------------------------------------------------------------
    // Read-only views
    // -----------------------------------------------------------------------

    pub fn current_depth(&self) -> &[f32] {
        self.grid.depth()
    }

    pub fn current_terrain(&self) -> &[f32] {
        self.grid.terrain()
    }

    /// `(velocity_x, velocity_y)` for every cell.
    pub fn current_velocity(&self) -> (&[f32], &[f32]) {
        (self.grid.velocity_x(), self.grid.velocity_y())
    }

    /// Per-cell `depth * speed`, the quantity a momentum heatmap colours.
    pub fn momentum_field(&self) -> Vec<f32> {
        let (u, v) = self.current_velocity();
        self.current_depth()
            .iter()
            .zip(u.iter().zip(v))
            .map(|(&h, (&u, &v))| h * (u * u + v * v).sqrt())
            .collect()
    }

    // -----------------------------------------------------------------------
    // Terrain modification
    // -----------------------------------------------------------------------

    /// Raise the terrain under a barrier and record the placement.
    pub fn place_obstacle(&mut self, spec: ObstacleSpec) -> Result<&Obstacle, SimError> {
        let id = ObstacleId(self.next_obstacle_id);
        let obstacle =
            terrain::place_obstacle(&mut self.grid, id, &spec, self.params.cell_spacing())?;
        self.next_obstacle_id += 1;
        debug!(
            "obstacle {} covers {} cells around {:?}",
            id.0,
            obstacle.cells.len(),
            obstacle.center
        );
        self.obstacles.push(obstacle);
        Ok(&self.obstacles[self.obstacles.len() - 1])
    }

    /// Remove a placed barrier, subtracting exactly what it added.
    pub fn remove_obstacle(&mut self, id: ObstacleId) -> Result<Obstacle, SimError> {
        let pos = self
            .obstacles
            .iter()
            .position(|o| o.id == id)
            .ok_or(SimError::UnknownObstacle(id.0))?;
        let obstacle = self.obstacles.remove(pos);
        terrain::remove_obstacle(&mut self.grid, &obstacle);
        Ok(obstacle)
    }

    /// Placed barriers, oldest first.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Gaussian deposit around `center`. Returns the number of cells touched.
    pub fn inject_material(
        &mut self,
        center: (usize, usize),
        amount: f32,
    ) -> Result<u32, SimError> {
        terrain::inject_material(&mut self.grid, center, amount)
    }

    // -----------------------------------------------------------------------
    // Terrain loading
    // -----------------------------------------------------------------------

    /// Replace the whole terrain with a row-major `N * N` height array.
    ///
    /// Obstacle records are dropped because their deltas are no longer part
    /// of the terrain. Depth and velocity are left alone.
    pub fn set_terrain(&mut self, heights: &[f32]) -> Result<(), SimError> {
        if heights.len() != self.grid.len() {
            return Err(SimError::TerrainSizeMismatch {
                expected: self.grid.len(),
                found: heights.len(),
            });
        }
        for &z in heights {
            ensure_finite("terrain", z)?;
        }
        self.grid.terrain.copy_from_slice(heights);
        self.obstacles.clear();
        Ok(())
    }

    /// Reset the simulation and take its terrain from an elevation patch.
    pub fn load_elevation(&mut self, patch: &ElevationPatch) -> Result<(), SimError> {
        let heights = normalize_elevation(patch, self.resolution());
        self.reset();
        self.set_terrain(&heights)
    }
}
