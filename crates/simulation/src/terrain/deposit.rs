//! Gaussian material deposits into the depth field.

use crate::config::{DEPOSIT_RADIUS, DEPOSIT_SIGMA_FACTOR};
use crate::error::{ensure_finite, SimError};
use crate::grid::SnowGrid;

/// Kernel weight for a cell at squared distance `d2` (in cells) from the centre.
///
/// `w = exp(-d2 / (2 * sigma^2))` with `sigma = DEPOSIT_SIGMA_FACTOR * DEPOSIT_RADIUS`.
#[inline]
pub fn deposit_weight(d2: i64) -> f64 {
    let sigma = DEPOSIT_RADIUS as f64 * DEPOSIT_SIGMA_FACTOR;
    (-(d2 as f64) / (2.0 * sigma * sigma)).exp()
}

/// Add `amount` of material around `center` with Gaussian falloff.
///
/// Every offset inside the (2r+1)^2 square is visited; cells outside the
/// interior band [1, N-2] on either axis are skipped, so nothing is ever
/// deposited on the boundary ring. Depth is not clamped here; the next tick
/// brings it back into range. Returns the number of cells that received
/// material.
pub fn inject_material(
    grid: &mut SnowGrid,
    center: (usize, usize),
    amount: f32,
) -> Result<u32, SimError> {
    let amount = ensure_finite("amount", amount)?;
    let r = DEPOSIT_RADIUS;
    let reach = grid.resolution + r as usize;
    if center.0 >= reach || center.1 >= reach {
        return Ok(0);
    }
    let n = grid.resolution as i64;
    let (ci, cj) = (center.0 as i64, center.1 as i64);
    let mut touched = 0u32;

    for dj in -r..=r {
        for di in -r..=r {
            let i = ci + di;
            let j = cj + dj;
            if i < 1 || i > n - 2 || j < 1 || j > n - 2 {
                continue;
            }
            let w = deposit_weight(di * di + dj * dj);
            let k = (i * n + j) as usize;
            // Accumulate in f64 and store as f32, matching a float64 caller
            // writing into a float32 field.
            grid.depth[k] = (grid.depth[k] as f64 + amount as f64 * w) as f32;
            touched += 1;
        }
    }

    Ok(touched)
}
