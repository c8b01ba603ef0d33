//! Ordering of the snowfield systems inside `FixedUpdate`.
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** – Drains input events (deposits, obstacles, resets, terrain
//!   loads) and applies them to `SnowSimulation`. All external mutation
//!   happens here, never while a tick is in flight.
//! * **Simulation** – Exactly one solver step.
//! * **PostSim** – Read-only aggregation: `SnowStats` and the state checksum.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
///
/// Configured as a chain: `PreSim` → `Simulation` → `PostSim`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    PreSim,
    Simulation,
    PostSim,
}
