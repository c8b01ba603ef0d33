use bevy::prelude::*;

use crate::elevation::ElevationPatch;
use crate::simulation::SnowSimulation;
use crate::terrain::{Obstacle, ObstacleId, ObstacleSpec};

// =============================================================================
// Input events
// =============================================================================

/// Drop material around a cell.
#[derive(Event, Debug, Clone)]
pub struct InjectMaterial {
    pub center: (usize, usize),
    pub amount: f32,
}

#[derive(Event, Debug, Clone)]
pub struct PlaceObstacle {
    pub spec: ObstacleSpec,
}

#[derive(Event, Debug, Clone)]
pub struct RemoveObstacle {
    pub id: ObstacleId,
}

/// Zero depth and velocity; terrain stays.
#[derive(Event, Debug, Clone, Default)]
pub struct ResetSimulation;

/// Zero velocity only.
#[derive(Event, Debug, Clone, Default)]
pub struct ResetVelocity;

/// Reset and replace the terrain with a normalized elevation patch.
#[derive(Event, Debug, Clone)]
pub struct LoadTerrain {
    pub patch: ElevationPatch,
}

// =============================================================================
// Output events
// =============================================================================

/// Fired once per successful `PlaceObstacle`, carrying the assigned id.
#[derive(Event, Debug, Clone)]
pub struct ObstaclePlaced {
    pub obstacle: Obstacle,
}

// =============================================================================
// System
// =============================================================================

/// Apply all pending input events to the simulation.
///
/// Events are grouped by kind and applied in a fixed order: terrain loads,
/// resets, velocity resets, removals, placements, then deposits. A rejected
/// event is logged and skipped; the others still apply.
#[allow(clippy::too_many_arguments)]
pub fn apply_input_events(
    mut sim: ResMut<SnowSimulation>,
    mut loads: EventReader<LoadTerrain>,
    mut resets: EventReader<ResetSimulation>,
    mut velocity_resets: EventReader<ResetVelocity>,
    mut removals: EventReader<RemoveObstacle>,
    mut placements: EventReader<PlaceObstacle>,
    mut deposits: EventReader<InjectMaterial>,
    mut placed: EventWriter<ObstaclePlaced>,
) {
    for event in loads.read() {
        match sim.load_elevation(&event.patch) {
            Ok(()) => info!(
                "Loaded {}x{} elevation patch onto {}x{} grid",
                event.patch.n,
                event.patch.n,
                sim.resolution(),
                sim.resolution()
            ),
            Err(e) => warn!("Rejected terrain load: {e}"),
        }
    }

    if resets.read().count() > 0 {
        sim.reset();
        info!("Simulation reset at tick {}", sim.ticks());
    }

    if velocity_resets.read().count() > 0 {
        sim.reset_velocity();
        info!("Velocity reset at tick {}", sim.ticks());
    }

    for event in removals.read() {
        match sim.remove_obstacle(event.id) {
            Ok(obstacle) => info!(
                "Removed obstacle {} ({} cells)",
                obstacle.id.0,
                obstacle.cells.len()
            ),
            Err(e) => warn!("Rejected obstacle removal: {e}"),
        }
    }

    for event in placements.read() {
        match sim.place_obstacle(event.spec) {
            Ok(obstacle) => {
                info!(
                    "Placed obstacle {} at {:?}, {} cells",
                    obstacle.id.0,
                    obstacle.center,
                    obstacle.cells.len()
                );
                placed.send(ObstaclePlaced {
                    obstacle: obstacle.clone(),
                });
            }
            Err(e) => warn!("Rejected obstacle at {:?}: {e}", event.spec.center),
        }
    }

    for event in deposits.read() {
        match sim.inject_material(event.center, event.amount) {
            Ok(touched) => debug!("Deposit at {:?} touched {touched} cells", event.center),
            Err(e) => warn!("Rejected deposit at {:?}: {e}", event.center),
        }
    }
}
