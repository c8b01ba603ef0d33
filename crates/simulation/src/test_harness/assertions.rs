//! Assertion helpers for the solver's standing guarantees.

use crate::config::{MAX_DEPTH, MAX_VELOCITY};

use super::TestSnowfield;

impl TestSnowfield {
    /// Depth in [0, MAX_DEPTH], boundary ring empty, velocity finite and
    /// within +/- MAX_VELOCITY.
    pub fn assert_invariants(&self) {
        let sim = self.simulation();
        let grid = sim.grid();
        let n = grid.resolution();
        let (vx, vy) = sim.current_velocity();

        for i in 0..n {
            for j in 0..n {
                let k = grid.index(i, j);
                let h = grid.depth()[k];
                assert!(h.is_finite(), "depth at ({i},{j}) is {h}");
                assert!(
                    (0.0..=MAX_DEPTH).contains(&h),
                    "depth {h} at ({i},{j}) out of range"
                );
                if !grid.is_interior(i, j) {
                    assert_eq!(h, 0.0, "boundary cell ({i},{j}) holds material");
                }
                for (name, v) in [("velocity_x", vx[k]), ("velocity_y", vy[k])] {
                    assert!(v.is_finite(), "{name} at ({i},{j}) is {v}");
                    assert!(
                        v.abs() <= MAX_VELOCITY,
                        "{name} {v} at ({i},{j}) exceeds the clamp"
                    );
                }
            }
        }
    }

    /// Stats resource matches a fresh recomputation.
    pub fn assert_stats_current(&self) {
        let fresh = crate::stats::compute_stats(self.simulation());
        assert_eq!(self.stats(), &fresh, "SnowStats is stale");
    }
}
