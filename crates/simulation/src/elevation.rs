//! Elevation patches and their normalization into the terrain grid.
//!
//! An [`ElevationPatch`] is a square block of raw elevation samples in the
//! shape served by the DEM backend: `{ "n", "min", "max", "elevation" }`
//! with `elevation[row j][column i]`. [`normalize_elevation`] rescales the
//! samples into terrain heights and centres the patch inside the N x N grid.

use serde::{Deserialize, Serialize};

use crate::config::{MIN_ELEVATION_RANGE, TERRAIN_HEIGHT_SCALE, VERTICAL_EXAGGERATION};
use crate::grid::sanitize;

/// Raw elevation samples for a square patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevationPatch {
    /// Side length of the patch in samples.
    pub n: usize,
    /// Lowest elevation in the patch; treated as 0 when absent.
    #[serde(default)]
    pub min: Option<f32>,
    /// Highest elevation in the patch; treated as 1 when absent.
    #[serde(default)]
    pub max: Option<f32>,
    /// Samples indexed `[j][i]`.
    pub elevation: Vec<Vec<f32>>,
}

impl ElevationPatch {
    /// Build a patch from rows, deriving `n`, `min` and `max` from the data.
    pub fn from_rows(elevation: Vec<Vec<f32>>) -> Self {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &e in elevation.iter().flatten() {
            if e.is_finite() {
                min = min.min(e);
                max = max.max(e);
            }
        }
        let (min, max) = if min <= max { (min, max) } else { (0.0, 0.0) };
        Self {
            n: elevation.len(),
            min: Some(min),
            max: Some(max),
            elevation,
        }
    }
}

/// Terrain heights for an `resolution x resolution` grid built from `patch`.
///
/// Each sample maps to `(e - min) / max(1e-6, max - min) * 80 * 1.2`. Sample
/// (i, j) lands on cell (i + offset, j + offset) with
/// `offset = floor((N - n) / 2)`; samples falling outside the grid are
/// dropped and uncovered cells stay at 0. Non-finite results become 0.
pub fn normalize_elevation(patch: &ElevationPatch, resolution: usize) -> Vec<f32> {
    let n = resolution as i64;
    let mut heights = vec![0.0_f32; resolution * resolution];

    let min = patch.min.unwrap_or(0.0);
    let max = patch.max.unwrap_or(1.0);
    let range = (max - min).max(MIN_ELEVATION_RANGE);
    let scale = TERRAIN_HEIGHT_SCALE * VERTICAL_EXAGGERATION;
    let offset = (n - patch.n as i64).div_euclid(2);

    for (j, row) in patch.elevation.iter().enumerate().take(patch.n) {
        for (i, &e) in row.iter().enumerate().take(patch.n) {
            let ii = i as i64 + offset;
            let jj = j as i64 + offset;
            if ii < 0 || ii >= n || jj < 0 || jj >= n {
                continue;
            }
            heights[(ii * n + jj) as usize] = sanitize((e - min) / range * scale);
        }
    }
    heights
}
