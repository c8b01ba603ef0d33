//! # TestSnowfield — headless integration test harness
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` + `SimulationPlugin` so
//! tests and benchmarks can drive the full ECS pipeline (events, tick,
//! stats) without a window or renderer.

mod assertions;
mod queries;
mod setup;

use bevy::prelude::*;

use crate::params::SimParams;
use crate::simulation::SnowSimulation;
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
///
/// Use builder methods to shape the terrain and deposits, then call `tick()`
/// to advance and query/assert on the resulting resources.
pub struct TestSnowfield {
    app: App,
}

impl Default for TestSnowfield {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSnowfield {
    /// 128 x 128 grid over 200 units with the default physics.
    pub fn new() -> Self {
        Self::from_plugin(SimulationPlugin::default())
    }

    /// Custom grid and physics. Panics on invalid parameters.
    pub fn with_params(params: SimParams) -> Self {
        let plugin = SimulationPlugin::new(params).expect("test params must be valid");
        Self::from_plugin(plugin)
    }

    /// Small grid with the default physics, handy for exact-value checks.
    pub fn small(resolution: usize, world_size: f32) -> Self {
        Self::with_params(SimParams::with_grid(resolution, world_size))
    }

    /// Wrap an already prepared simulation.
    pub fn from_simulation(simulation: SnowSimulation) -> Self {
        Self::from_plugin(SimulationPlugin::from_simulation(simulation))
    }

    fn from_plugin(plugin: SimulationPlugin) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(plugin);
        Self { app }
    }
}
