//! Tests for barrier rasterization and Gaussian deposits.

use std::collections::HashSet;

use super::*;
use crate::error::SimError;
use crate::grid::SnowGrid;

fn spec(center: (usize, usize), width: f32, height: f32, angle: f32) -> ObstacleSpec {
    ObstacleSpec {
        center,
        width,
        height,
        angle_degrees: angle,
        obstacle_height: 40.0,
    }
}

// -------------------------------------------------------------------------
// Rounding
// -------------------------------------------------------------------------

#[test]
fn test_round_half_up_halves() {
    assert_eq!(round_half_up(0.5), 1);
    assert_eq!(round_half_up(-0.5), 0);
    assert_eq!(round_half_up(1.5), 2);
    assert_eq!(round_half_up(-1.5), -1);
    assert_eq!(round_half_up(2.49), 2);
    assert_eq!(round_half_up(-2.51), -3);
    assert_eq!(round_half_up(0.0), 0);
}

// -------------------------------------------------------------------------
// Footprint rasterization
// -------------------------------------------------------------------------

#[test]
fn test_single_cell_footprint() {
    let cells = rasterize_footprint(&spec((2, 2), 2.0, 2.0, 0.0), 2.0, 5);
    assert_eq!(cells, vec![(2, 2)]);
}

#[test]
fn test_tiny_footprint_still_covers_one_cell() {
    let cells = rasterize_footprint(&spec((4, 4), 0.01, 0.01, 0.0), 2.0, 10);
    assert_eq!(cells, vec![(4, 4)]);
}

#[test]
fn test_unrotated_footprint_dimensions() {
    // 10 x 5 world units at the default spacing (200 / 127):
    // width 6.35 cells -> 6 -> half 3 -> 7 columns; height 3.175 -> 3 -> half 1 -> 3 rows
    let spacing = 200.0 / 127.0;
    let cells = rasterize_footprint(&spec((64, 64), 10.0, 5.0, 0.0), spacing, 128);
    assert_eq!(cells.len(), 21);
    let unique: HashSet<_> = cells.iter().copied().collect();
    assert_eq!(unique.len(), 21);
    assert!(cells.iter().all(|&(i, _)| (61..=67).contains(&i)));
    assert!(cells.iter().all(|&(_, j)| (63..=65).contains(&j)));
}

#[test]
fn test_even_cell_count_rounds_up_to_odd_span() {
    // 2 cells wide -> half extent 1 -> offsets -1..=1
    let cells = rasterize_footprint(&spec((5, 5), 4.0, 2.0, 0.0), 2.0, 12);
    assert_eq!(cells, vec![(4, 5), (5, 5), (6, 5)]);
}

#[test]
fn test_ninety_degree_rotation_transposes() {
    let flat = rasterize_footprint(&spec((5, 5), 6.0, 2.0, 0.0), 2.0, 12);
    let rotated = rasterize_footprint(&spec((5, 5), 6.0, 2.0, 90.0), 2.0, 12);
    assert_eq!(flat, vec![(4, 5), (5, 5), (6, 5)]);
    assert_eq!(rotated, vec![(5, 4), (5, 5), (5, 6)]);
}

#[test]
fn test_diagonal_rotation_aliases_cells() {
    let cells = rasterize_footprint(&spec((10, 10), 10.0, 10.0, 45.0), 2.0, 24);
    assert_eq!(cells.len(), 25, "one entry per footprint offset");
    let unique: HashSet<_> = cells.iter().copied().collect();
    assert!(
        unique.len() < cells.len(),
        "45 degree rotation should alias some offsets onto the same cell"
    );
}

#[test]
fn test_footprint_clamped_to_interior() {
    let n = 8;
    let cells = rasterize_footprint(&spec((1, 1), 14.0, 14.0, 30.0), 1.0, n);
    assert!(!cells.is_empty());
    for &(i, j) in &cells {
        assert!((1..=n - 2).contains(&i), "i={i} outside interior");
        assert!((1..=n - 2).contains(&j), "j={j} outside interior");
    }
}

#[test]
fn test_footprint_far_outside_grid_lands_on_edge_band() {
    let cells = rasterize_footprint(&spec((500, 3), 1.0, 1.0, 0.0), 1.0, 6);
    assert_eq!(cells, vec![(4, 3)]);
}

#[test]
fn test_extreme_center_clamps_onto_edge_band() {
    let cells = rasterize_footprint(&spec((i64::MAX as usize, 2), 1.0, 1.0, 0.0), 1.0, 6);
    assert_eq!(cells, vec![(4, 2)]);
    let cells = rasterize_footprint(&spec((usize::MAX, usize::MAX), 3.0, 3.0, 45.0), 1.0, 6);
    assert!(cells.iter().all(|&c| c == (4, 4)), "got {cells:?}");
}

#[test]
fn test_oversized_footprint_rasterizes_to_nothing() {
    assert!(rasterize_footprint(&spec((3, 3), 1e30, 1e30, 0.0), 2.0, 5).is_empty());
    assert!(rasterize_footprint(&spec((3, 3), 17.0, 1.0, 0.0), 1.0, 8).is_empty());
    assert_eq!(rasterize_footprint(&spec((3, 3), 16.0, 1.0, 0.0), 1.0, 8).len(), 17);
}

// -------------------------------------------------------------------------
// Placement and removal
// -------------------------------------------------------------------------

#[test]
fn test_place_raises_terrain_only() {
    let mut grid = SnowGrid::new(5);
    let obstacle = place_obstacle(&mut grid, ObstacleId(0), &spec((2, 2), 2.0, 2.0, 0.0), 2.0)
        .expect("valid obstacle");
    assert_eq!(obstacle.cells, vec![(2, 2)]);
    assert_eq!(grid.terrain_at(2, 2), 40.0);
    assert!(grid.depth().iter().all(|&d| d == 0.0));
    let raised = grid.terrain().iter().filter(|&&z| z != 0.0).count();
    assert_eq!(raised, 1);
}

#[test]
fn test_aliased_cells_are_raised_once_per_entry() {
    let mut grid = SnowGrid::new(24);
    let obstacle = place_obstacle(&mut grid, ObstacleId(3), &spec((10, 10), 10.0, 10.0, 45.0), 2.0)
        .expect("valid obstacle");
    let total: f32 = grid.terrain().iter().sum();
    assert!((total - 40.0 * obstacle.cells.len() as f32).abs() < 1e-3);
    assert!(grid.terrain().iter().any(|&z| z >= 80.0));
}

#[test]
fn test_remove_restores_terrain() {
    let mut grid = SnowGrid::new(24);
    let before = grid.terrain().to_vec();
    let obstacle = place_obstacle(&mut grid, ObstacleId(1), &spec((10, 12), 8.0, 4.0, 135.0), 2.0)
        .expect("valid obstacle");
    assert_ne!(grid.terrain(), before.as_slice());
    remove_obstacle(&mut grid, &obstacle);
    assert_eq!(grid.terrain(), before.as_slice());
}

#[test]
fn test_record_keeps_request() {
    let mut grid = SnowGrid::new(12);
    let request = spec((5, 6), 4.0, 6.0, 45.0);
    let obstacle = place_obstacle(&mut grid, ObstacleId(9), &request, 2.0).expect("valid");
    assert_eq!(obstacle.id, ObstacleId(9));
    assert_eq!(obstacle.spec(), request);
}

#[test]
fn test_invalid_obstacles_leave_grid_untouched() {
    let mut grid = SnowGrid::new(8);
    let zero_width = spec((3, 3), 0.0, 2.0, 0.0);
    assert!(matches!(
        place_obstacle(&mut grid, ObstacleId(0), &zero_width, 1.0),
        Err(SimError::InvalidObstacle(_))
    ));

    let mut nan_height = spec((3, 3), 2.0, 2.0, 0.0);
    nan_height.obstacle_height = f32::NAN;
    assert_eq!(
        place_obstacle(&mut grid, ObstacleId(0), &nan_height, 1.0),
        Err(SimError::NonFiniteParameter {
            name: "obstacle_height"
        })
    );

    let bad_angle = spec((3, 3), 2.0, 2.0, f32::INFINITY);
    assert!(place_obstacle(&mut grid, ObstacleId(0), &bad_angle, 1.0).is_err());

    let huge = spec((2, 2), 1e30, 1e30, 0.0);
    assert!(matches!(
        place_obstacle(&mut grid, ObstacleId(0), &huge, 2.0),
        Err(SimError::InvalidObstacle(_))
    ));
    let too_wide = spec((3, 3), 1e6, 1.0, 0.0);
    assert!(matches!(
        place_obstacle(&mut grid, ObstacleId(0), &too_wide, 2.0),
        Err(SimError::InvalidObstacle(_))
    ));

    assert!(grid.terrain().iter().all(|&z| z == 0.0));
}

#[test]
fn test_obstacle_record_json_shape() {
    let mut grid = SnowGrid::new(8);
    let obstacle =
        place_obstacle(&mut grid, ObstacleId(2), &spec((3, 3), 1.0, 1.0, 0.0), 1.0).expect("valid");
    let json = serde_json::to_value(&obstacle).expect("serialize");
    assert_eq!(json["id"], 2);
    assert_eq!(json["center"], serde_json::json!([3, 3]));
    assert_eq!(json["cells"], serde_json::json!([[3, 3]]));
    assert_eq!(json["obstacle_height"], 40.0);
}

// -------------------------------------------------------------------------
// Deposits
// -------------------------------------------------------------------------

#[test]
fn test_deposit_weight_kernel() {
    assert_eq!(deposit_weight(0), 1.0);
    // sigma = 3 cells -> exp(-1 / 18)
    assert!((deposit_weight(1) - (-1.0_f64 / 18.0).exp()).abs() < 1e-12);
    assert!(deposit_weight(4) < deposit_weight(1));
    assert!(deposit_weight(50) > 0.0);
}

#[test]
fn test_inject_small_grid_fills_interior_only() {
    let mut grid = SnowGrid::new(5);
    let touched = inject_material(&mut grid, (2, 2), 1.0).expect("finite amount");
    assert_eq!(touched, 9);
    assert_eq!(grid.depth_at(2, 2), 1.0);
    for i in 0..5 {
        for j in 0..5 {
            if grid.is_interior(i, j) {
                assert!(grid.depth_at(i, j) > 0.0);
            } else {
                assert_eq!(grid.depth_at(i, j), 0.0, "boundary ({i},{j}) received material");
            }
        }
    }
}

#[test]
fn test_inject_is_symmetric() {
    let mut grid = SnowGrid::new(32);
    inject_material(&mut grid, (16, 16), 2.0).expect("finite amount");
    assert_eq!(grid.depth_at(14, 16), grid.depth_at(18, 16));
    assert_eq!(grid.depth_at(16, 13), grid.depth_at(16, 19));
    assert_eq!(grid.depth_at(13, 17), grid.depth_at(17, 13));
    assert!(grid.depth_at(16, 16) > grid.depth_at(17, 16));
    assert_eq!(grid.depth_at(22, 16), 0.0, "outside the 5-cell radius");
}

#[test]
fn test_inject_near_corner_is_truncated() {
    let mut grid = SnowGrid::new(20);
    let touched = inject_material(&mut grid, (1, 1), 1.0).expect("finite amount");
    // i, j in [1, 6]
    assert_eq!(touched, 36);
    assert_eq!(grid.depth_at(0, 0), 0.0);
}

#[test]
fn test_inject_accumulates() {
    let mut grid = SnowGrid::new(16);
    inject_material(&mut grid, (8, 8), 1.5).expect("finite amount");
    inject_material(&mut grid, (8, 8), 1.5).expect("finite amount");
    assert!((grid.depth_at(8, 8) - 3.0).abs() < 1e-6);
}

#[test]
fn test_inject_outside_grid_touches_nothing() {
    let mut grid = SnowGrid::new(10);
    let touched = inject_material(&mut grid, (1000, 4), 1.0).expect("finite amount");
    assert_eq!(touched, 0);
    assert!(grid.depth().iter().all(|&d| d == 0.0));
}

#[test]
fn test_inject_at_extreme_center_touches_nothing() {
    let mut grid = SnowGrid::new(10);
    for center in [(i64::MAX as usize, 2), (2, usize::MAX), (usize::MAX, usize::MAX)] {
        let touched = inject_material(&mut grid, center, 1.0).expect("finite amount");
        assert_eq!(touched, 0, "center {center:?}");
    }
    // just inside reach: the kernel edge still lands on the last interior column
    assert!(inject_material(&mut grid, (13, 4), 1.0).expect("finite") > 0);
    assert_eq!(inject_material(&mut grid, (15, 4), 1.0), Ok(0));
}

#[test]
fn test_inject_rejects_non_finite_amount() {
    let mut grid = SnowGrid::new(10);
    assert_eq!(
        inject_material(&mut grid, (5, 5), f32::NAN),
        Err(SimError::NonFiniteParameter { name: "amount" })
    );
    assert!(grid.depth().iter().all(|&d| d == 0.0));
}
