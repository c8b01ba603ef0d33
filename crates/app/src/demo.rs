//! Headless demo: seeded snowfall over a loaded terrain, with periodic
//! progress logging and a fixed tick budget.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use simulation::config::OBSTACLE_HEIGHT;
use simulation::elevation::ElevationPatch;
use simulation::events::{apply_input_events, InjectMaterial};
use simulation::stats::update_stats;
use simulation::terrain::ObstacleSpec;
use simulation::terrain_source::generate_heights;
use simulation::{SimParams, SimulationSet, SnowSimulation, SnowStats};

use crate::run_config::RunConfig;

/// Ticks between snowfall bursts.
const SNOWFALL_INTERVAL: u64 = 30;
const FLAKES_PER_BURST: usize = 4;
/// Ticks between progress log lines.
const REPORT_INTERVAL: u64 = 60;

/// Build the starting simulation: terrain from file or noise, plus one
/// diagonal barrier across the middle of the grid.
pub fn build_simulation(
    config: &RunConfig,
) -> Result<SnowSimulation, Box<dyn std::error::Error>> {
    let params = SimParams {
        resolution: config.resolution,
        ..SimParams::default()
    };
    let mut sim = SnowSimulation::new(params)?;

    let patch: ElevationPatch = match &config.terrain_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str(&text)?
        }
        None => generate_heights(config.resolution, config.noise_seed()),
    };
    sim.load_elevation(&patch)?;

    let n = config.resolution;
    let barrier = sim.place_obstacle(ObstacleSpec {
        center: (n / 2, n / 2),
        width: params.world_size * 0.2,
        height: params.cell_spacing() * 2.0,
        angle_degrees: 30.0,
        obstacle_height: OBSTACLE_HEIGHT,
    })?;
    info!(
        "Placed demo barrier {} covering {} cells",
        barrier.id.0,
        barrier.cells.len()
    );
    Ok(sim)
}

#[derive(Resource)]
struct DemoState {
    rng: ChaCha8Rng,
    tick_budget: u64,
}

pub struct DemoPlugin {
    pub seed: u64,
    pub tick_budget: u64,
}

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(DemoState {
            rng: ChaCha8Rng::seed_from_u64(self.seed),
            tick_budget: self.tick_budget,
        })
        .add_systems(
            FixedUpdate,
            scatter_snowfall
                .in_set(SimulationSet::PreSim)
                .before(apply_input_events),
        )
        .add_systems(
            FixedUpdate,
            (report_progress, stop_after_budget)
                .chain()
                .in_set(SimulationSet::PostSim)
                .after(update_stats),
        );
    }
}

fn scatter_snowfall(
    mut state: ResMut<DemoState>,
    sim: Res<SnowSimulation>,
    mut deposits: EventWriter<InjectMaterial>,
) {
    if sim.ticks() % SNOWFALL_INTERVAL != 0 {
        return;
    }
    let n = sim.resolution();
    for _ in 0..FLAKES_PER_BURST {
        let center = (state.rng.gen_range(1..n - 1), state.rng.gen_range(1..n - 1));
        let amount = state.rng.gen_range(0.5..2.0);
        deposits.send(InjectMaterial { center, amount });
    }
}

fn report_progress(stats: Res<SnowStats>) {
    if stats.tick % REPORT_INTERVAL != 0 {
        return;
    }
    info!(
        "tick {:>5}  total {:>9.2}  max {:>6.2}  covered {:>6}  max speed {:>6.2}  checksum {:08x}",
        stats.tick,
        stats.total_depth,
        stats.max_depth,
        stats.covered_cells,
        stats.max_speed,
        stats.checksum
    );
}

fn stop_after_budget(
    stats: Res<SnowStats>,
    state: Res<DemoState>,
    mut exit: EventWriter<AppExit>,
) {
    if stats.tick >= state.tick_budget {
        info!(
            "Finished {} ticks, final checksum {:08x}",
            stats.tick, stats.checksum
        );
        exit.send(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simulation::SimulationPlugin;

    fn small_config() -> RunConfig {
        RunConfig {
            resolution: 24,
            ticks: 40,
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_build_simulation_from_noise() {
        let sim = build_simulation(&small_config()).expect("noise terrain always loads");
        assert_eq!(sim.resolution(), 24);
        assert_eq!(sim.obstacles().len(), 1);
        assert!(sim.current_terrain().iter().any(|&z| z > 0.0));
        assert_eq!(sim.current_depth().iter().sum::<f32>(), 0.0);
    }

    #[test]
    fn test_build_simulation_missing_file_fails() {
        let config = RunConfig {
            terrain_path: Some("/nonexistent/snowfield/patch.json".into()),
            ..small_config()
        };
        assert!(build_simulation(&config).is_err());
    }

    #[test]
    fn test_build_simulation_rejects_bad_resolution() {
        let config = RunConfig {
            resolution: 2,
            ..small_config()
        };
        assert!(build_simulation(&config).is_err());
    }

    #[test]
    fn test_demo_plugin_snows_and_exits() {
        let config = small_config();
        let sim = build_simulation(&config).expect("valid");
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(SimulationPlugin::from_simulation(sim))
            .add_plugins(DemoPlugin {
                seed: 3,
                tick_budget: config.ticks,
            });

        for _ in 0..config.ticks {
            app.world_mut().run_schedule(FixedUpdate);
        }
        let stats = app.world().resource::<SnowStats>();
        assert_eq!(stats.tick, config.ticks);
        assert!(stats.total_depth > 0.0, "snowfall bursts should have landed");

        let exits = app.world().resource::<Events<AppExit>>();
        assert!(!exits.is_empty(), "budget reached, exit requested");
    }
}
