//! Terrain modification: barrier placement and material deposits.
//!
//! Barriers ("obstacles") permanently raise `terrain` over a rectangular,
//! optionally rotated footprint. Each placement is recorded with the exact
//! list of cells it touched so it can be removed again by subtracting what
//! was added. Deposits add material to `depth` through a Gaussian kernel so
//! that a click produces a smooth mound instead of a single-cell spike.
//!
//! Neither operation ever writes into the outermost boundary ring.

pub mod deposit;
pub mod obstacle;

#[cfg(test)]
mod tests;

pub use deposit::{deposit_weight, inject_material};
pub use obstacle::{
    max_footprint_cells, place_obstacle, rasterize_footprint, remove_obstacle, round_half_up,
    Obstacle, ObstacleId, ObstacleSpec,
};
