//! Barrier placement on the terrain field.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::config::MIN_RESOLUTION;
use crate::error::{ensure_finite, SimError};
use crate::grid::SnowGrid;

/// Identifier handed out by the simulation for each placed barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

/// A placement request: where, how large (world units), how rotated, how tall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    /// Centre cell (i, j).
    pub center: (usize, usize),
    /// Footprint extent along i, in world units.
    pub width: f32,
    /// Footprint extent along j, in world units.
    pub height: f32,
    pub angle_degrees: f32,
    /// Elevation added to every covered cell.
    pub obstacle_height: f32,
}

/// A placed barrier and the cells it raised.
///
/// `cells` keeps duplicates produced by rotation aliasing: every entry added
/// one `obstacle_height`, so removal subtracts one per entry as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub center: (usize, usize),
    pub width: f32,
    pub height: f32,
    pub angle_degrees: f32,
    pub obstacle_height: f32,
    pub cells: Vec<(usize, usize)>,
}

impl Obstacle {
    pub fn spec(&self) -> ObstacleSpec {
        ObstacleSpec {
            center: self.center,
            width: self.width,
            height: self.height,
            angle_degrees: self.angle_degrees,
            obstacle_height: self.obstacle_height,
        }
    }
}

/// Round to the nearest integer, with exact halves going toward +infinity.
///
/// `round_half_up(-0.5) == 0` and `round_half_up(0.5) == 1`. Obstacle shapes
/// depend on this rule; `f64::round` (half away from zero) would shift
/// cells at exact half offsets.
#[inline]
pub fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Footprint extent in cells along one axis: `max(1, round(size / spacing))`.
#[inline]
fn footprint_cells(size: f32, spacing: f64) -> i64 {
    round_half_up(size as f64 / spacing).max(1)
}

/// Largest footprint extent, in cells per axis, accepted on an N-cell grid.
#[inline]
pub fn max_footprint_cells(n: usize) -> i64 {
    2 * n as i64
}

fn validate_spec(spec: &ObstacleSpec, cell_spacing: f32, n: usize) -> Result<(), SimError> {
    let width = ensure_finite("width", spec.width)?;
    let height = ensure_finite("height", spec.height)?;
    ensure_finite("angle_degrees", spec.angle_degrees)?;
    ensure_finite("obstacle_height", spec.obstacle_height)?;
    if width <= 0.0 || height <= 0.0 {
        return Err(SimError::InvalidObstacle(format!(
            "footprint must be positive, got {width} x {height}"
        )));
    }
    let spacing = cell_spacing as f64;
    let limit = max_footprint_cells(n);
    let (w_cells, h_cells) = (
        footprint_cells(width, spacing),
        footprint_cells(height, spacing),
    );
    if w_cells > limit || h_cells > limit {
        return Err(SimError::InvalidObstacle(format!(
            "footprint of {w_cells} x {h_cells} cells exceeds {limit} cells per side"
        )));
    }
    Ok(())
}

/// Cells covered by a (possibly rotated) rectangular footprint.
///
/// Half-extents are `floor(max(1, round(size / spacing)) / 2)` cells. Each
/// offset (di, dj) is rotated by the angle, rounded to the nearest cell and
/// clamped into the interior [1, N-2]. Adjacent rows may alias onto the same
/// cell at steep angles; the duplicates are returned as-is.
///
/// Footprints wider than [`max_footprint_cells`] on either axis produce no
/// cells.
pub fn rasterize_footprint(
    spec: &ObstacleSpec,
    cell_spacing: f32,
    n: usize,
) -> Vec<(usize, usize)> {
    if n < MIN_RESOLUTION {
        return Vec::new();
    }
    let spacing = cell_spacing as f64;
    let w_cells = footprint_cells(spec.width, spacing);
    let h_cells = footprint_cells(spec.height, spacing);
    if w_cells > max_footprint_cells(n) || h_cells > max_footprint_cells(n) {
        return Vec::new();
    }
    let half_w = w_cells / 2;
    let half_h = h_cells / 2;

    let angle = spec.angle_degrees as f64 * PI / 180.0;
    let (sin, cos) = angle.sin_cos();

    // Centres beyond i64 saturate; the interior clamp pulls them back anyway.
    let ci = i64::try_from(spec.center.0).unwrap_or(i64::MAX);
    let cj = i64::try_from(spec.center.1).unwrap_or(i64::MAX);
    let hi = n as i64 - 2;

    let mut cells = Vec::with_capacity(((2 * half_w + 1) * (2 * half_h + 1)) as usize);
    for dj in -half_h..=half_h {
        for di in -half_w..=half_w {
            let ri = round_half_up(di as f64 * cos - dj as f64 * sin);
            let rj = round_half_up(di as f64 * sin + dj as f64 * cos);
            let ii = ci.saturating_add(ri).clamp(1, hi);
            let jj = cj.saturating_add(rj).clamp(1, hi);
            cells.push((ii as usize, jj as usize));
        }
    }
    cells
}

/// Raise the terrain under a barrier footprint. Depth is never touched.
///
/// A zero or negative width or height is rejected with
/// [`SimError::InvalidObstacle`] rather than widened to one cell, as is a
/// footprint larger than [`max_footprint_cells`] on either axis.
pub fn place_obstacle(
    grid: &mut SnowGrid,
    id: ObstacleId,
    spec: &ObstacleSpec,
    cell_spacing: f32,
) -> Result<Obstacle, SimError> {
    validate_spec(spec, cell_spacing, grid.resolution)?;
    let cells = rasterize_footprint(spec, cell_spacing, grid.resolution);

    for &(i, j) in &cells {
        let k = grid.index(i, j);
        grid.terrain[k] += spec.obstacle_height;
    }

    Ok(Obstacle {
        id,
        center: spec.center,
        width: spec.width,
        height: spec.height,
        angle_degrees: spec.angle_degrees,
        obstacle_height: spec.obstacle_height,
        cells,
    })
}

/// Undo a placement by subtracting exactly what it added.
pub fn remove_obstacle(grid: &mut SnowGrid, obstacle: &Obstacle) {
    for &(i, j) in &obstacle.cells {
        let k = grid.index(i, j);
        grid.terrain[k] -= obstacle.obstacle_height;
    }
}
