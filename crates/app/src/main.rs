use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

mod agent_mode;
mod demo;
mod run_config;

use run_config::RunConfig;

fn main() {
    // Agent mode: headless JSON protocol on stdin/stdout
    if std::env::args().any(|arg| arg == "--agent") {
        agent_mode::run_agent_mode();
        return;
    }

    let config = match RunConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("snowfield: {e}");
            std::process::exit(2);
        }
    };

    let time_step = simulation::SimParams::default().time_step as f64;
    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            time_step,
        ))),
    )
    .add_plugins(LogPlugin::default());

    let sim = match demo::build_simulation(&config) {
        Ok(sim) => sim,
        Err(e) => {
            error!("Could not set up the simulation: {e}");
            std::process::exit(1);
        }
    };
    info!(
        "Running {} ticks on a {}x{} grid (seed {}, terrain {})",
        config.ticks,
        config.resolution,
        config.resolution,
        config.seed,
        config
            .terrain_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "procedural".to_string())
    );

    app.add_plugins(simulation::SimulationPlugin::from_simulation(sim))
        .add_plugins(demo::DemoPlugin {
            seed: config.seed,
            tick_budget: config.ticks,
        });

    app.run();
}
