//! Procedural terrain source for runs without a DEM patch.
//!
//! Produces fBm OpenSimplex2 noise normalized to [0, 1] and wraps it in an
//! [`ElevationPatch`], so generated terrain goes through the same
//! normalization path as real elevation data.

use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};

use crate::config::{
    TERRAIN_BASE_FREQUENCY, TERRAIN_LACUNARITY, TERRAIN_OCTAVES, TERRAIN_PERSISTENCE,
};
use crate::elevation::ElevationPatch;

/// Generate a `resolution x resolution` elevation patch from `seed`.
pub fn generate_heights(resolution: usize, seed: i32) -> ElevationPatch {
    let mut noise = FastNoiseLite::with_seed(seed);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(TERRAIN_BASE_FREQUENCY));
    noise.set_fractal_type(Some(FractalType::FBm));
    noise.set_fractal_octaves(Some(TERRAIN_OCTAVES));
    noise.set_fractal_gain(Some(TERRAIN_PERSISTENCE));
    noise.set_fractal_lacunarity(Some(TERRAIN_LACUNARITY));

    let rows = (0..resolution)
        .map(|j| {
            (0..resolution)
                .map(|i| {
                    let raw = noise.get_noise_2d(i as f32, j as f32);
                    // fBm output is in [-1, 1]
                    ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
                })
                .collect()
        })
        .collect();

    ElevationPatch::from_rows(rows)
}
