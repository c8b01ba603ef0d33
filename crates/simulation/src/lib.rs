use bevy::prelude::*;

pub mod agent_protocol;
pub mod config;
pub mod elevation;
pub mod error;
pub mod events;
pub mod grid;
pub mod params;
pub mod simulation;
pub mod simulation_sets;
pub mod solver;
pub mod state_hash;
pub mod stats;
pub mod terrain;
pub mod terrain_source;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;


pub use error::SimError;
pub use params::SimParams;
pub use simulation::SnowSimulation;
pub use simulation_sets::SimulationSet;
pub use stats::SnowStats;

use events::{
    InjectMaterial, LoadTerrain, ObstaclePlaced, PlaceObstacle, RemoveObstacle, ResetSimulation,
    ResetVelocity,
};

fn advance_simulation(mut sim: ResMut<SnowSimulation>) {
    sim.tick();
}

/// Registers the snowfield resources, events and `FixedUpdate` systems.
///
/// The plugin owns a fully built [`SnowSimulation`], so every validation
/// happens before the app is assembled and `build` itself cannot fail.
#[derive(Default)]
pub struct SimulationPlugin {
    simulation: SnowSimulation,
}

impl SimulationPlugin {
    /// Validate `params` and prepare an empty simulation.
    pub fn new(params: SimParams) -> Result<Self, SimError> {
        Ok(Self {
            simulation: SnowSimulation::new(params)?,
        })
    }

    /// Start from an already prepared simulation (terrain loaded, obstacles placed).
    pub fn from_simulation(simulation: SnowSimulation) -> Self {
        Self { simulation }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let time_step = self.simulation.params().time_step as f64;

        app.insert_resource(self.simulation.clone())
            .insert_resource(stats::compute_stats(&self.simulation))
            .insert_resource(Time::<Fixed>::from_seconds(time_step))
            .add_event::<InjectMaterial>()
            .add_event::<PlaceObstacle>()
            .add_event::<RemoveObstacle>()
            .add_event::<ResetSimulation>()
            .add_event::<ResetVelocity>()
            .add_event::<LoadTerrain>()
            .add_event::<ObstaclePlaced>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::PreSim,
                    SimulationSet::Simulation,
                    SimulationSet::PostSim,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                events::apply_input_events.in_set(SimulationSet::PreSim),
            )
            .add_systems(
                FixedUpdate,
                advance_simulation.in_set(SimulationSet::Simulation),
            )
            .add_systems(FixedUpdate, stats::update_stats.in_set(SimulationSet::PostSim));

        info!(
            "Snowfield {}x{} over {} units, dt = {}s",
            self.simulation.resolution(),
            self.simulation.resolution(),
            self.simulation.params().world_size,
            time_step
        );
    }
}
