//! Deterministic checksum of the simulated fields.
//!
//! Feeds the resolution followed by terrain, depth, velocity_x and velocity_y
//! (each cell's `f32` bit pattern, little-endian, row-major) into xxh32.
//! Two runs that produce the same checksum after the same number of ticks
//! hold bit-identical state.

use xxhash_rust::xxh32::Xxh32;

use crate::grid::SnowGrid;

const CHECKSUM_SEED: u32 = 0;

pub fn state_checksum(grid: &SnowGrid) -> u32 {
    let mut hasher = Xxh32::new(CHECKSUM_SEED);
    hasher.update(&(grid.resolution() as u64).to_le_bytes());
    for field in [
        grid.terrain(),
        grid.depth(),
        grid.velocity_x(),
        grid.velocity_y(),
    ] {
        for value in field {
            hasher.update(&value.to_bits().to_le_bytes());
        }
    }
    hasher.digest()
}
