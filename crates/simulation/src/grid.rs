//! Fixed-size square lattice holding every simulated field.
//!
//! All fields are row-major `N * N` arrays of `f32` with `index(i, j) = i * N + j`.
//! They are allocated together and never resized, so a single index is valid
//! for every field at once.

use serde::{Deserialize, Serialize};

/// Terrain, depth and velocity fields for one simulation instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowGrid {
    pub(crate) resolution: usize,
    /// Base elevation. Changed only by obstacles and terrain loads.
    pub(crate) terrain: Vec<f32>,
    /// Accumulated material depth, the primary simulated quantity.
    pub(crate) depth: Vec<f32>,
    /// Scratch buffer the advection pass writes into; swapped with `depth`.
    pub(crate) depth_next: Vec<f32>,
    pub(crate) velocity_x: Vec<f32>,
    pub(crate) velocity_y: Vec<f32>,
}

impl SnowGrid {
    /// Allocate an `n * n` lattice with every field zeroed.
    pub fn new(resolution: usize) -> Self {
        let len = resolution * resolution;
        Self {
            resolution,
            terrain: vec![0.0; len],
            depth: vec![0.0; len],
            depth_next: vec![0.0; len],
            velocity_x: vec![0.0; len],
            velocity_y: vec![0.0; len],
        }
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i * self.resolution + j
    }

    #[inline]
    pub fn in_bounds(&self, i: usize, j: usize) -> bool {
        i < self.resolution && j < self.resolution
    }

    /// True for cells strictly inside the boundary ring: i, j in [1, N-2].
    #[inline]
    pub fn is_interior(&self, i: usize, j: usize) -> bool {
        i >= 1 && j >= 1 && i + 1 < self.resolution && j + 1 < self.resolution
    }

    #[inline]
    pub fn depth_at(&self, i: usize, j: usize) -> f32 {
        self.depth[self.index(i, j)]
    }

    #[inline]
    pub fn terrain_at(&self, i: usize, j: usize) -> f32 {
        self.terrain[self.index(i, j)]
    }

    #[inline]
    pub fn velocity_at(&self, i: usize, j: usize) -> (f32, f32) {
        let k = self.index(i, j);
        (self.velocity_x[k], self.velocity_y[k])
    }

    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    pub fn terrain(&self) -> &[f32] {
        &self.terrain
    }

    pub fn velocity_x(&self) -> &[f32] {
        &self.velocity_x
    }

    pub fn velocity_y(&self) -> &[f32] {
        &self.velocity_y
    }

    /// Zero depth and velocity. Terrain, and therefore every obstacle, is kept.
    pub fn reset(&mut self) {
        self.depth.fill(0.0);
        self.depth_next.fill(0.0);
        self.velocity_x.fill(0.0);
        self.velocity_y.fill(0.0);
    }

    /// Zero velocity only, leaving deposited material in place.
    pub fn reset_velocity(&mut self) {
        self.velocity_x.fill(0.0);
        self.velocity_y.fill(0.0);
    }

    /// Exchange `depth` and `depth_next` without copying.
    #[inline]
    pub(crate) fn swap_depth_buffers(&mut self) {
        std::mem::swap(&mut self.depth, &mut self.depth_next);
    }
}

/// Replace NaN and infinities by 0.
#[inline]
pub fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Sample a row-major `n * n` field at fractional coordinates (x along i, y along j).
///
/// Coordinates are clamped into [0, n-1] (open domain, no wrapping) and the
/// upper corner index is clamped to n-1, so the edge row/column is returned
/// unblended at and beyond the far edge. At integer coordinates the result
/// is exactly the stored value.
pub fn sample_bilinear(field: &[f32], n: usize, x: f32, y: f32) -> f32 {
    let max = (n - 1) as f32;
    let x = x.clamp(0.0, max);
    let y = y.clamp(0.0, max);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(n - 1);
    let y1 = (y0 + 1).min(n - 1);
    let sx = x - x0 as f32;
    let sy = y - y0 as f32;

    let a = field[x0 * n + y0];
    let b = field[x1 * n + y0];
    let c = field[x0 * n + y1];
    let d = field[x1 * n + y1];

    (a * (1.0 - sx) + b * sx) * (1.0 - sy) + (c * (1.0 - sx) + d * sx) * sy
}
