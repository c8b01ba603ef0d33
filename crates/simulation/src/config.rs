pub const DEFAULT_RESOLUTION: usize = 128;
pub const DEFAULT_WORLD_SIZE: f32 = 200.0;
pub const DEFAULT_TIME_STEP: f32 = 0.016;
pub const DEFAULT_GRAVITY: f32 = 9.81;
pub const DEFAULT_FRICTION: f32 = 0.9;

/// Smallest lattice that still has an interior cell.
pub const MIN_RESOLUTION: usize = 3;

/// Per-component velocity bound (world units per second), enforced every tick.
pub const MAX_VELOCITY: f32 = 30.0;

/// Saturation depth. Advected depth is clamped into [0, MAX_DEPTH].
pub const MAX_DEPTH: f32 = 50.0;

/// Per-tick settling/sublimation loss applied to advected depth.
pub const DEPTH_DECAY: f32 = 0.999;

/// Deposit kernel radius in cells.
pub const DEPOSIT_RADIUS: i64 = 5;
/// Gaussian sigma as a fraction of the deposit radius.
pub const DEPOSIT_SIGMA_FACTOR: f64 = 0.6;

/// Elevation added by a barrier when the caller does not give one.
pub const OBSTACLE_HEIGHT: f32 = 40.0;

/// Normalized elevation [0,1] maps to [0, TERRAIN_HEIGHT_SCALE * VERTICAL_EXAGGERATION].
pub const TERRAIN_HEIGHT_SCALE: f32 = 80.0;
pub const VERTICAL_EXAGGERATION: f32 = 1.2;
/// Floor for the elevation range so a flat patch does not divide by zero.
pub const MIN_ELEVATION_RANGE: f32 = 1e-6;

pub const TERRAIN_OCTAVES: i32 = 5;
pub const TERRAIN_PERSISTENCE: f32 = 0.5;
pub const TERRAIN_LACUNARITY: f32 = 2.0;
pub const TERRAIN_BASE_FREQUENCY: f32 = 0.02;
