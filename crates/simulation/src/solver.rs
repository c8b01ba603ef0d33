//! Advection-forcing solver: advances velocity and depth by one fixed step.
//!
//! Each tick runs two passes over the interior cells [1, N-2] x [1, N-2]:
//!
//!   1. Forcing: central-difference terrain gradient drives an explicit Euler
//!      update of velocity with linear friction, then each component is
//!      clamped to +/- `MAX_VELOCITY`. Velocity relaxes toward the terminal
//!      value `-gravity * grad(Z) / friction`.
//!   2. Advection: semi-Lagrangian backward trace. Each cell looks back along
//!      its velocity, bilinearly samples the frozen `depth`, applies
//!      `DEPTH_DECAY`, clamps into [0, MAX_DEPTH] and writes `depth_next`.
//!
//! The boundary ring of `depth_next` is then forced to zero (open, absorbing
//! edge) and the depth buffers are swapped. Pass 1 finishes over every cell
//! before pass 2 reads any velocity, and pass 2 never reads what it writes.

use crate::config::{DEPTH_DECAY, MAX_DEPTH, MAX_VELOCITY};
use crate::grid::{sample_bilinear, sanitize, SnowGrid};
use crate::params::SimParams;

/// Pass 1: slope-driven acceleration with friction damping.
pub fn apply_slope_forcing(grid: &mut SnowGrid, params: &SimParams) {
    let n = grid.resolution;
    let dt = params.time_step;
    let g = params.gravity;
    let friction = params.friction;
    let inv_two_dx = 1.0 / (2.0 * params.cell_spacing());

    let SnowGrid {
        terrain,
        velocity_x,
        velocity_y,
        ..
    } = grid;

    for i in 1..n - 1 {
        for j in 1..n - 1 {
            let k = i * n + j;
            let zx = (terrain[k + n] - terrain[k - n]) * inv_two_dx;
            let zy = (terrain[k + 1] - terrain[k - 1]) * inv_two_dx;

            let u = velocity_x[k] + dt * (-g * zx - friction * velocity_x[k]);
            let v = velocity_y[k] + dt * (-g * zy - friction * velocity_y[k]);

            velocity_x[k] = sanitize(u.clamp(-MAX_VELOCITY, MAX_VELOCITY));
            velocity_y[k] = sanitize(v.clamp(-MAX_VELOCITY, MAX_VELOCITY));
        }
    }
}

/// Depth at the next tick for interior cell (i, j), traced back along its velocity.
///
/// A non-finite velocity component counts as zero for this trace only.
#[inline]
pub fn trace_back_depth(
    depth: &[f32],
    n: usize,
    i: usize,
    j: usize,
    velocity: (f32, f32),
    dt_over_dx: f32,
) -> f32 {
    let back_x = i as f32 - sanitize(velocity.0) * dt_over_dx;
    let back_y = j as f32 - sanitize(velocity.1) * dt_over_dx;
    let sampled = sample_bilinear(depth, n, back_x, back_y) * DEPTH_DECAY;
    sanitize(sampled).clamp(0.0, MAX_DEPTH)
}

/// Pass 2: semi-Lagrangian advection of `depth` into `depth_next`.
pub fn advect_depth(grid: &mut SnowGrid, params: &SimParams) {
    let n = grid.resolution;
    let dt_over_dx = params.time_step / params.cell_spacing();

    let SnowGrid {
        depth,
        depth_next,
        velocity_x,
        velocity_y,
        ..
    } = grid;
    let depth: &[f32] = depth;

    for i in 1..n - 1 {
        for j in 1..n - 1 {
            let k = i * n + j;
            depth_next[k] =
                trace_back_depth(depth, n, i, j, (velocity_x[k], velocity_y[k]), dt_over_dx);
        }
    }
}

/// Force the outer ring (i or j in {0, N-1}) of a field to zero.
pub fn drain_boundary(field: &mut [f32], n: usize) {
    for t in 0..n {
        field[t * n] = 0.0;
        field[t * n + n - 1] = 0.0;
        field[t] = 0.0;
        field[(n - 1) * n + t] = 0.0;
    }
}

/// Advance the grid by exactly one time step. Never fails.
pub fn step(grid: &mut SnowGrid, params: &SimParams) {
    apply_slope_forcing(grid, params);
    advect_depth(grid, params);
    drain_boundary(&mut grid.depth_next, grid.resolution);
    grid.swap_depth_buffers();
}
