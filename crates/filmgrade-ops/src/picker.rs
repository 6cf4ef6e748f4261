//! On-image color sampling.
//!
//! The picker answers "what color is under the cursor" in both spaces the
//! UI cares about: the untouched source pixel and the fully graded value.
//! Display coordinates are mapped back through the crop/rotation
//! transform so the sampled source pixel is exactly the one being shown.

use crate::geometry::display_to_source;
use crate::pipeline::{grade_rgb, BakedLuts};
use filmgrade_core::{AdjustmentState, PixelBuffer};

/// A sampled color: the raw source pixel and its graded counterpart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickedColor {
    /// Source pixel coordinates the display point mapped to.
    pub source_xy: (u32, u32),
    /// The ungraded source RGB.
    pub source_rgb: [u8; 3],
    /// The RGB after the full grading pass.
    pub graded_rgb: [u8; 3],
}

/// Samples the color at a display (cropped view) coordinate.
///
/// Returns `None` when the coordinate falls in rotation padding, outside
/// the crop, or on a transparent source pixel.
pub fn pick_color(
    source: &PixelBuffer,
    state: &AdjustmentState,
    x: u32,
    y: u32,
) -> Option<PickedColor> {
    let (sx, sy) = display_to_source(state, source.width(), source.height(), x, y)?;
    let px = source.pixel(sx, sy);
    if px[3] == 0 {
        return None;
    }

    let baked = BakedLuts::bake(state);
    let graded = grade_rgb([px[0] as f32, px[1] as f32, px[2] as f32], state, &baked);

    Some(PickedColor {
        source_xy: (sx, sy),
        source_rgb: [px[0], px[1], px[2]],
        graded_rgb: [
            graded[0].round() as u8,
            graded[1].round() as u8,
            graded[2].round() as u8,
        ],
    })
}
