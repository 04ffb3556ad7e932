//! # Structural Framing and Concrete Volumes
//!
//! Coarse grid approximation of a reinforced-concrete frame: beam lines every
//! 5 m in both directions, columns between beam lines, one slab per floor,
//! perimeter walls and a raft foundation under the whole footprint.
//!
//! These are rules of thumb, not a layout solver. Two quirks are reproduced
//! as they are:
//!
//! - beam volume is multiplied by the full building height, not per floor
//! - column volume uses one floor height regardless of the floor count
//!   (the floor count already enters through the column total)
//!
//! Section sizes follow the minimums quoted from IS 456:2000.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::framing::{ConcreteVolumes, StructuralGrid};
//!
//! let grid = StructuralGrid::layout(20.0, 15.0, 3);
//! assert_eq!(grid.num_beams, 20);
//! assert_eq!(grid.num_columns, 93);
//!
//! let volumes = ConcreteVolumes::compute(20.0, 15.0, 3, &grid);
//! assert!((volumes.total() - 581.61).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Geometric Constants (meters)
// ============================================================================

/// Storey height
pub const FLOOR_HEIGHT_M: f64 = 3.0;

/// Square column side (IS 456:2000 Cl. 26.5.3.1 minimum)
pub const COLUMN_SIZE_M: f64 = 0.3;

/// Beam width (IS 456:2000 Cl. 26.5.1.1b minimum)
pub const BEAM_WIDTH_M: f64 = 0.25;

/// Beam depth (assumed, not derived from span)
pub const BEAM_DEPTH_M: f64 = 0.4;

/// Slab thickness (IS 456:2000 Table 24 two-way minimum)
pub const SLAB_THICKNESS_M: f64 = 0.125;

/// Wall thickness (assumed)
pub const WALL_THICKNESS_M: f64 = 0.2;

/// Foundation depth (assumed, independent of soil)
pub const FOUNDATION_DEPTH_M: f64 = 1.0;

/// Beam and column grid spacing
pub const GRID_SPACING_M: f64 = 5.0;

// ============================================================================
// Grid Sizing
// ============================================================================

/// Beam and column counts for the building.
///
/// Counts saturate at `u64::MAX` instead of overflowing, so any footprint
/// the validator accepts has a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralGrid {
    /// Beam lines counted along the length
    pub beam_lines_length: u64,
    /// Beam lines counted along the width
    pub beam_lines_width: u64,
    /// Column lines along the length (beam lines - 1)
    pub column_lines_length: u64,
    /// Column lines along the width (beam lines - 1)
    pub column_lines_width: u64,
    /// Total beams (per floor-height unit)
    pub num_beams: u64,
    /// Columns on one floor
    pub columns_per_floor: u64,
    /// Columns over all floors
    pub num_columns: u64,
}

impl StructuralGrid {
    /// Lay out the grid for a footprint in meters.
    pub fn layout(length_m: f64, width_m: f64, floors: u32) -> Self {
        let beam_lines_length = beam_lines(length_m);
        let beam_lines_width = beam_lines(width_m);

        let column_lines_length = beam_lines_length.saturating_sub(1);
        let column_lines_width = beam_lines_width.saturating_sub(1);
        let columns_per_floor = column_lines_length
            .saturating_mul(beam_lines_width)
            .saturating_add(column_lines_width.saturating_mul(beam_lines_length));

        StructuralGrid {
            beam_lines_length,
            beam_lines_width,
            column_lines_length,
            column_lines_width,
            num_beams: beam_lines_length.saturating_mul(beam_lines_width),
            columns_per_floor,
            num_columns: columns_per_floor.saturating_mul(u64::from(floors)),
        }
    }
}

/// Number of beam lines across a span: one per started 5 m bay, plus the closing line.
fn beam_lines(span_m: f64) -> u64 {
    // float-to-int `as` saturates; NaN and negatives become 0
    ((span_m / GRID_SPACING_M).ceil() as u64).saturating_add(1)
}

/// Total building height (m)
pub fn building_height_m(floors: u32) -> f64 {
    floors as f64 * FLOOR_HEIGHT_M
}

// ============================================================================
// Concrete Volumes
// ============================================================================

/// Concrete volume of each structural element (m³).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteVolumes {
    pub beams: f64,
    pub columns: f64,
    pub slabs: f64,
    pub walls: f64,
    pub foundation: f64,
}

impl ConcreteVolumes {
    /// Compute element volumes for a footprint in meters.
    pub fn compute(length_m: f64, width_m: f64, floors: u32, grid: &StructuralGrid) -> Self {
        let building_height = building_height_m(floors);

        ConcreteVolumes {
            beams: BEAM_WIDTH_M * BEAM_DEPTH_M * building_height * grid.num_beams as f64,
            columns: grid.num_columns as f64 * (COLUMN_SIZE_M * COLUMN_SIZE_M) * FLOOR_HEIGHT_M,
            slabs: length_m * width_m * SLAB_THICKNESS_M * floors as f64,
            walls: 2.0 * (length_m + width_m) * WALL_THICKNESS_M * building_height,
            foundation: length_m * width_m * FOUNDATION_DEPTH_M,
        }
    }

    /// Total concrete volume (m³), summed in element order
    pub fn total(&self) -> f64 {
        self.beams + self.columns + self.slabs + self.walls + self.foundation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beam_lines_round_up() {
        assert_eq!(beam_lines(20.0), 5); // exactly 4 bays
        assert_eq!(beam_lines(20.1), 6); // a started bay counts
        assert_eq!(beam_lines(0.5), 2);
    }

    #[test]
    fn test_grid_20_by_15() {
        let grid = StructuralGrid::layout(20.0, 15.0, 3);
        assert_eq!(grid.beam_lines_length, 5);
        assert_eq!(grid.beam_lines_width, 4);
        assert_eq!(grid.column_lines_length, 4);
        assert_eq!(grid.column_lines_width, 3);
        assert_eq!(grid.num_beams, 20);
        // 4*4 + 3*5
        assert_eq!(grid.columns_per_floor, 31);
        assert_eq!(grid.num_columns, 93);
    }

    #[test]
    fn test_volumes_20_by_15_by_3() {
        let grid = StructuralGrid::layout(20.0, 15.0, 3);
        let v = ConcreteVolumes::compute(20.0, 15.0, 3, &grid);

        // 0.25 * 0.4 * 9 * 20
        assert!((v.beams - 18.0).abs() < 1e-9);
        // 93 * 0.09 * 3
        assert!((v.columns - 25.11).abs() < 1e-9);
        // 20 * 15 * 0.125 * 3
        assert!((v.slabs - 112.5).abs() < 1e-9);
        // 2 * 35 * 0.2 * 9
        assert!((v.walls - 126.0).abs() < 1e-9);
        assert!((v.foundation - 300.0).abs() < 1e-9);
        assert!((v.total() - 581.61).abs() < 1e-9);
    }

    #[test]
    fn test_beam_volume_scales_with_building_height() {
        let one = ConcreteVolumes::compute(10.0, 10.0, 1, &StructuralGrid::layout(10.0, 10.0, 1));
        let four = ConcreteVolumes::compute(10.0, 10.0, 4, &StructuralGrid::layout(10.0, 10.0, 4));
        assert!((four.beams - 4.0 * one.beams).abs() < 1e-9);
        // Foundation is per footprint, not per floor
        assert_eq!(four.foundation, one.foundation);
    }

    #[test]
    fn test_huge_footprint_does_not_overflow() {
        let grid = StructuralGrid::layout(1e6, 1e6, 1);
        assert_eq!(grid.beam_lines_length, 200_001);
        assert_eq!(grid.num_beams, 200_001 * 200_001);
        assert_eq!(grid.columns_per_floor, 2 * 200_000 * 200_001);

        let tower = StructuralGrid::layout(1.0, 1.0, 2_000_000_000);
        // 1*2 + 1*2 columns per floor
        assert_eq!(tower.num_columns, 4 * 2_000_000_000);
    }

    #[test]
    fn test_extreme_span_saturates() {
        let grid = StructuralGrid::layout(f64::MAX, f64::MAX, u32::MAX);
        assert_eq!(grid.beam_lines_length, u64::MAX);
        assert_eq!(grid.num_beams, u64::MAX);
        assert_eq!(grid.num_columns, u64::MAX);
    }

    #[test]
    fn test_building_height() {
        assert_eq!(building_height_m(1), 3.0);
        assert_eq!(building_height_m(10), 30.0);
    }
}
