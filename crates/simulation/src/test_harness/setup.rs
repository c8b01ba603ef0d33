//! Builder methods for terrain, obstacle and deposit setup.

use bevy::prelude::*;

use crate::config::OBSTACLE_HEIGHT;
use crate::simulation::SnowSimulation;
use crate::terrain::ObstacleSpec;

use super::TestSnowfield;

impl TestSnowfield {
    // -----------------------------------------------------------------------
    // Direct setup (applied immediately, outside the schedule)
    // -----------------------------------------------------------------------

    /// Replace the terrain with `height(i, j)` for every cell.
    pub fn with_terrain(mut self, height: impl Fn(usize, usize) -> f32) -> Self {
        let mut sim = self.app.world_mut().resource_mut::<SnowSimulation>();
        let n = sim.resolution();
        let heights: Vec<f32> = (0..n * n).map(|k| height(k / n, k % n)).collect();
        sim.set_terrain(&heights).expect("terrain covers the grid");
        self
    }

    /// Terrain rising linearly with i by `rise` per cell.
    pub fn with_ramp(self, rise: f32) -> Self {
        self.with_terrain(move |i, _| i as f32 * rise)
    }

    /// An axis-aligned square barrier of the default height.
    pub fn with_obstacle(self, center: (usize, usize), size: f32) -> Self {
        self.with_obstacle_spec(ObstacleSpec {
            center,
            width: size,
            height: size,
            angle_degrees: 0.0,
            obstacle_height: OBSTACLE_HEIGHT,
        })
    }

    pub fn with_obstacle_spec(mut self, spec: ObstacleSpec) -> Self {
        self.app
            .world_mut()
            .resource_mut::<SnowSimulation>()
            .place_obstacle(spec)
            .expect("test obstacle must be valid");
        self
    }

    pub fn with_deposit(mut self, center: (usize, usize), amount: f32) -> Self {
        self.app
            .world_mut()
            .resource_mut::<SnowSimulation>()
            .inject_material(center, amount)
            .expect("test deposit must be finite");
        self
    }

    // -----------------------------------------------------------------------
    // Event-driven input (applied in PreSim of the next tick)
    // -----------------------------------------------------------------------

    /// Queue an input event for the next tick.
    pub fn send<E: Event>(&mut self, event: E) -> &mut Self {
        self.app.world_mut().send_event(event);
        self
    }
}
