//! Baking the color pipeline into a 3D LUT.
//!
//! Export walks a regular grid through the same [`grade_rgb`] path the
//! pixel pass uses, so a baked cube applied at full intensity reproduces
//! the grade to within 8-bit rounding. Geometry (orientation, rotation,
//! crop) is view state and is not baked.

use crate::pipeline::{grade_rgb, BakedLuts};
use crate::OpsResult;
use filmgrade_core::AdjustmentState;
use filmgrade_lut::{cube, Lut3D};
use std::path::Path;
use tracing::debug;

/// Default grid size for exported LUTs.
pub const EXPORT_LUT_SIZE: usize = 33;

/// Bakes the color pipeline of a state into a LUT grid.
///
/// Each grid node `(r, g, b)` is mapped to `i / (size - 1) * 255`, graded
/// through the full stage order, and stored back normalized. A neutral
/// state bakes the identity LUT.
pub fn bake_lut(state: &AdjustmentState, size: usize) -> OpsResult<Lut3D> {
    let baked = BakedLuts::bake(state);
    let step = 255.0 / (size - 1) as f32;
    let mut data = Vec::with_capacity(size * size * size * 3);

    for b in 0..size {
        for g in 0..size {
            for r in 0..size {
                let graded = grade_rgb(
                    [r as f32 * step, g as f32 * step, b as f32 * step],
                    state,
                    &baked,
                );
                data.push(graded[0] / 255.0);
                data.push(graded[1] / 255.0);
                data.push(graded[2] / 255.0);
            }
        }
    }

    // The grid is filled blue-major above but stored red-fastest, so the
    // push order already matches the memory layout.
    Ok(Lut3D::from_data(data, size)?)
}

/// Bakes the pipeline and writes it as a `.cube` file.
pub fn export_cube(state: &AdjustmentState, size: usize, path: &Path) -> OpsResult<()> {
    let lut = bake_lut(state, size)?;
    debug!(size, path = %path.display(), "exporting baked LUT");
    std::fs::write(path, cube::write(&lut)).map_err(filmgrade_lut::LutError::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn neutral_state_bakes_identity() {
        let lut = bake_lut(&AdjustmentState::default(), 9).unwrap();
        for i in 0..9 {
            let expected = i as f32 / 8.0;
            let node = lut.get(i, i, i);
            for c in 0..3 {
                // 8-bit rounding at each grid node.
                assert_abs_diff_eq!(node[c], expected, epsilon = 0.5 / 255.0 + 1e-6);
            }
        }
    }

    #[test]
    fn inversion_bakes_reversed_ramp() {
        let state = AdjustmentState {
            inverted: true,
            ..AdjustmentState::default()
        };
        let lut = bake_lut(&state, 5).unwrap();
        assert_abs_diff_eq!(lut.get(0, 0, 0)[0], 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(lut.get(4, 4, 4)[0], 0.0, epsilon = 1e-3);
    }

    #[test]
    fn grid_axes_are_independent() {
        let state = AdjustmentState {
            red_gain: 0.5,
            ..AdjustmentState::default()
        };
        let lut = bake_lut(&state, 5).unwrap();
        // Only the red axis is scaled.
        let node = lut.get(4, 4, 4);
        assert_abs_diff_eq!(node[0], 0.5, epsilon = 2.0 / 255.0);
        assert_abs_diff_eq!(node[1], 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(node[2], 1.0, epsilon = 1e-3);
    }

    #[test]
    fn export_writes_readable_cube() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grade.cube");
        export_cube(&AdjustmentState::default(), EXPORT_LUT_SIZE, &path).unwrap();
        let lut = cube::read(&path).unwrap();
        assert_eq!(lut.size(), EXPORT_LUT_SIZE);
    }
}
