//! Headless `--agent` mode: a blocking synchronous loop that reads JSON
//! commands from stdin and writes JSON responses to stdout.
//!
//! ## Protocol
//!
//! Each line of stdin is a JSON object with a `"cmd"` discriminator.
//! Each line of stdout is a JSON response with `"protocol_version"` and
//! `"type"` fields. See [`simulation::agent_protocol`] for the full schema.
//!
//! Commands run between ticks: mutations act on `SnowSimulation` directly so
//! the response can carry the outcome, and `step` drives the `FixedUpdate`
//! schedule once per tick.

use std::io::{BufRead, Write};

use bevy::prelude::*;

use simulation::agent_protocol::{
    error_response, make_response, query_layers, AgentCommand, AgentResponse, ResponsePayload,
    MAX_STEP_TICKS, PROTOCOL_VERSION,
};
use simulation::stats::compute_stats;
use simulation::terrain::ObstacleId;
use simulation::{SimulationPlugin, SnowSimulation};

pub fn run_agent_mode() {
    let mut app = build_agent_app(SimulationPlugin::default());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    // Send the "ready" message so the external program knows we are live.
    write_response(&mut stdout, &make_response(ResponsePayload::Ready));

    // Log to stderr so it does not interfere with the JSON protocol on stdout.
    eprintln!("snowfield agent mode v{PROTOCOL_VERSION} ready, waiting for commands on stdin");

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("stdin read error: {e}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<AgentCommand>(&line) {
            Ok(cmd) => process_command(cmd, &mut app),
            Err(e) => make_response(ResponsePayload::Error {
                message: format!("Parse error: {e}"),
            }),
        };
        let is_goodbye = matches!(response.payload, ResponsePayload::Goodbye);
        write_response(&mut stdout, &response);

        if is_goodbye {
            break;
        }
    }

    eprintln!("snowfield agent mode shutting down");
}

fn build_agent_app(plugin: SimulationPlugin) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(plugin);
    app
}

fn write_response(out: &mut impl Write, response: &AgentResponse) {
    match serde_json::to_string(response) {
        Ok(json) => {
            let _ = writeln!(out, "{json}");
            let _ = out.flush();
        }
        Err(e) => eprintln!("failed to encode response: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

fn process_command(cmd: AgentCommand, app: &mut App) -> AgentResponse {
    if let Some(spec) = cmd.obstacle_spec() {
        let mut sim = app.world_mut().resource_mut::<SnowSimulation>();
        return match sim.place_obstacle(spec) {
            Ok(obstacle) => make_response(ResponsePayload::ObstaclePlaced {
                obstacle: obstacle.clone(),
            }),
            Err(e) => error_response(&e),
        };
    }

    match cmd {
        AgentCommand::Observe => {
            let stats = compute_stats(app.world().resource::<SnowSimulation>());
            make_response(ResponsePayload::Observation { stats })
        }

        AgentCommand::Inject { i, j, amount } => {
            let mut sim = app.world_mut().resource_mut::<SnowSimulation>();
            match sim.inject_material((i, j), amount) {
                Ok(_) => make_response(ResponsePayload::Ok),
                Err(e) => error_response(&e),
            }
        }

        AgentCommand::RemoveObstacle { id } => {
            let mut sim = app.world_mut().resource_mut::<SnowSimulation>();
            match sim.remove_obstacle(ObstacleId(id)) {
                Ok(_) => make_response(ResponsePayload::Ok),
                Err(e) => error_response(&e),
            }
        }

        AgentCommand::Step { ticks } => {
            for _ in 0..ticks.min(MAX_STEP_TICKS) {
                app.world_mut().run_schedule(FixedUpdate);
            }
            let tick = app.world().resource::<SnowSimulation>().ticks();
            make_response(ResponsePayload::StepComplete { tick })
        }

        AgentCommand::Reset => {
            app.world_mut().resource_mut::<SnowSimulation>().reset();
            make_response(ResponsePayload::Ok)
        }

        AgentCommand::ResetVelocity => {
            app.world_mut()
                .resource_mut::<SnowSimulation>()
                .reset_velocity();
            make_response(ResponsePayload::Ok)
        }

        AgentCommand::LoadTerrain { patch } => {
            let mut sim = app.world_mut().resource_mut::<SnowSimulation>();
            match sim.load_elevation(&patch) {
                Ok(()) => make_response(ResponsePayload::Ok),
                Err(e) => error_response(&e),
            }
        }

        AgentCommand::Query { layers } => {
            match query_layers(app.world().resource::<SnowSimulation>(), &layers) {
                Ok(layers) => make_response(ResponsePayload::QueryResult { layers }),
                Err(e) => error_response(&e),
            }
        }

        AgentCommand::Quit => make_response(ResponsePayload::Goodbye),

        // handled above
        AgentCommand::PlaceObstacle { .. } => make_response(ResponsePayload::Ok),
    }
}
