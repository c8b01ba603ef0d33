//! Agent text protocol types for the `--agent` headless mode.
//!
//! External programs (scripts, test drivers) steer the snowfield over
//! newline-delimited JSON on stdin/stdout. Commands carry a `"cmd"` tag;
//! responses carry `"protocol_version"` plus a `"type"` tag.
//!
//! The types live here so they can be unit-tested without the binary. The
//! I/O loop itself is in `crates/app/src/agent_mode.rs`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::OBSTACLE_HEIGHT;
use crate::elevation::ElevationPatch;
use crate::error::SimError;
use crate::simulation::SnowSimulation;
use crate::stats::SnowStats;
use crate::terrain::{Obstacle, ObstacleSpec};

// ---------------------------------------------------------------------------
// Commands (stdin → simulation)
// ---------------------------------------------------------------------------

/// A single command sent by the external agent over stdin.
#[derive(Debug, Deserialize)]
#[serde(tag = "cmd")]
pub enum AgentCommand {
    /// Request the current statistics snapshot.
    #[serde(rename = "observe")]
    Observe,

    /// Gaussian deposit centred on cell (i, j).
    #[serde(rename = "inject")]
    Inject { i: usize, j: usize, amount: f32 },

    /// Place a barrier. `width`/`height` are the footprint in world units.
    #[serde(rename = "place_obstacle")]
    PlaceObstacle {
        i: usize,
        j: usize,
        width: f32,
        height: f32,
        #[serde(default)]
        angle: f32,
        #[serde(default = "default_obstacle_height")]
        obstacle_height: f32,
    },

    #[serde(rename = "remove_obstacle")]
    RemoveObstacle { id: u32 },

    /// Advance the simulation by `ticks` fixed-update ticks.
    #[serde(rename = "step")]
    Step { ticks: u64 },

    #[serde(rename = "reset")]
    Reset,

    #[serde(rename = "reset_velocity")]
    ResetVelocity,

    /// Reset, then replace the terrain with a normalized elevation patch.
    #[serde(rename = "load_terrain")]
    LoadTerrain { patch: ElevationPatch },

    /// Request one or more per-cell fields by name.
    #[serde(rename = "query")]
    Query { layers: Vec<String> },

    /// Gracefully shut down the agent session.
    #[serde(rename = "quit")]
    Quit,
}

fn default_obstacle_height() -> f32 {
    OBSTACLE_HEIGHT
}

impl AgentCommand {
    /// The obstacle request carried by a `place_obstacle` command.
    pub fn obstacle_spec(&self) -> Option<ObstacleSpec> {
        match *self {
            AgentCommand::PlaceObstacle {
                i,
                j,
                width,
                height,
                angle,
                obstacle_height,
            } => Some(ObstacleSpec {
                center: (i, j),
                width,
                height,
                angle_degrees: angle,
                obstacle_height,
            }),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Responses (simulation → stdout)
// ---------------------------------------------------------------------------

/// Every response includes the protocol version and a tagged payload.
#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub protocol_version: u32,
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ResponsePayload {
    #[serde(rename = "ready")]
    Ready,

    #[serde(rename = "observation")]
    Observation { stats: SnowStats },

    /// The placement record, including the id to remove it later.
    #[serde(rename = "obstacle_placed")]
    ObstaclePlaced { obstacle: Obstacle },

    /// The simulation has advanced; reports the total tick count.
    #[serde(rename = "step_complete")]
    StepComplete { tick: u64 },

    /// A JSON object keyed by layer name, each a row-major array.
    #[serde(rename = "query_result")]
    QueryResult { layers: Value },

    #[serde(rename = "ok")]
    Ok,

    #[serde(rename = "error")]
    Error { message: String },

    #[serde(rename = "goodbye")]
    Goodbye,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Current protocol version. Bump when the command/response schema changes.
pub const PROTOCOL_VERSION: u32 = 1;

/// Upper bound on ticks run by a single `step` command.
pub const MAX_STEP_TICKS: u64 = 10_000;

/// Layer names accepted by `query`.
pub const QUERY_LAYERS: [&str; 5] = ["depth", "terrain", "velocity_x", "velocity_y", "momentum"];

pub fn make_response(payload: ResponsePayload) -> AgentResponse {
    AgentResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}

/// Wrap a failure as an `error` response.
pub fn error_response(err: &SimError) -> AgentResponse {
    make_response(ResponsePayload::Error {
        message: err.to_string(),
    })
}

/// Collect the requested fields into a JSON object keyed by layer name.
///
/// Any unknown name fails the whole query.
pub fn query_layers(sim: &SnowSimulation, layers: &[String]) -> Result<Value, SimError> {
    let mut out = Map::new();
    for name in layers {
        let values: Vec<f32> = match name.as_str() {
            "depth" => sim.current_depth().to_vec(),
            "terrain" => sim.current_terrain().to_vec(),
            "velocity_x" => sim.current_velocity().0.to_vec(),
            "velocity_y" => sim.current_velocity().1.to_vec(),
            "momentum" => sim.momentum_field(),
            other => return Err(SimError::UnknownLayer(other.to_string())),
        };
        out.insert(name.clone(), serde_json::to_value(values)?);
    }
    Ok(Value::Object(out))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
