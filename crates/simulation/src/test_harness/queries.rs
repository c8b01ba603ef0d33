//! Query and simulation-tick methods for `TestSnowfield`.

use bevy::prelude::*;

use crate::simulation::SnowSimulation;
use crate::stats::SnowStats;

use super::TestSnowfield;

impl TestSnowfield {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed-update ticks by directly executing the `FixedUpdate`
    /// schedule. This bypasses Bevy's time system, which `MinimalPlugins`
    /// does not advance between manual updates.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn simulation(&self) -> &SnowSimulation {
        self.resource::<SnowSimulation>()
    }

    /// Stats as of the last completed tick.
    pub fn stats(&self) -> &SnowStats {
        self.resource::<SnowStats>()
    }

    pub fn depth_at(&self, i: usize, j: usize) -> f32 {
        self.simulation().grid().depth_at(i, j)
    }

    pub fn terrain_at(&self, i: usize, j: usize) -> f32 {
        self.simulation().grid().terrain_at(i, j)
    }

    pub fn total_depth(&self) -> f32 {
        self.simulation().current_depth().iter().sum()
    }

    /// Every event of type `E` still held in the event buffers.
    pub fn events<E: Event + Clone>(&self) -> Vec<E> {
        let events = self.resource::<Events<E>>();
        let mut cursor = events.get_cursor();
        cursor.read(events).cloned().collect()
    }
}
