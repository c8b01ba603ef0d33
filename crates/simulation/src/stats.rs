use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::simulation::SnowSimulation;
use crate::state_hash::state_checksum;

/// Aggregate view of the simulation, refreshed after every tick.
#[derive(Resource, Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowStats {
    pub total_depth: f32,
    /// Mean depth over all N * N cells, boundary included.
    pub average_depth: f32,
    pub max_depth: f32,
    /// Cells holding any material at all.
    pub covered_cells: u32,
    pub max_speed: f32,
    pub max_momentum: f32,
    pub tick: u64,
    pub checksum: u32,
}

pub fn compute_stats(sim: &SnowSimulation) -> SnowStats {
    let depth = sim.current_depth();
    let (vx, vy) = sim.current_velocity();

    let mut total = 0.0_f64;
    let mut max_depth = 0.0_f32;
    let mut covered = 0u32;
    let mut max_speed = 0.0_f32;
    let mut max_momentum = 0.0_f32;

    for ((&h, &u), &v) in depth.iter().zip(vx).zip(vy) {
        total += h as f64;
        max_depth = max_depth.max(h);
        if h > 0.0 {
            covered += 1;
        }
        let speed = (u * u + v * v).sqrt();
        max_speed = max_speed.max(speed);
        max_momentum = max_momentum.max(h * speed);
    }

    let average = if depth.is_empty() {
        0.0
    } else {
        total / depth.len() as f64
    };

    SnowStats {
        total_depth: total as f32,
        average_depth: average as f32,
        max_depth,
        covered_cells: covered,
        max_speed,
        max_momentum,
        tick: sim.ticks(),
        checksum: state_checksum(sim.grid()),
    }
}

pub fn update_stats(sim: Res<SnowSimulation>, mut stats: ResMut<SnowStats>) {
    *stats = compute_stats(&sim);
}
