//! Tone-mapping lookup table.
//!
//! Folds exposure, contrast, black/white point, and shadow/highlight
//! shaping into a single precomputed 256-entry table. The table is cheap
//! to rebuild and is regenerated unconditionally on every recompute.
//!
//! The formulas are kept literal, including the highlights sign
//! convention: export round-trip correctness depends only on the pipeline
//! being self-consistent, not on matching any external tool's convention.

use filmgrade_core::AdjustmentState;

/// Bakes the tone-mapping LUT for a state.
///
/// Per entry, with `v = i / 255`:
/// 1. exposure: `v *= 2^(exposure / 50)`
/// 2. contrast: `v = (v - 0.5) * f + 0.5` with
///    `f = 259(contrast + 255) / (255(259 - contrast))`
/// 3. levels: `v = (v - black) / (white - black)` with
///    `black = -blacks * 0.002`, `white = 1 - whites * 0.002`,
///    skipped when the denominator is zero
/// 4. shadows: `v += shadows * 0.005 * (1-v)^2 * v * 4`
/// 5. highlights: `v += highlights * 0.005 * v^2 * (1-v) * 4`
///
/// The result is scaled back to `[0, 255]`, rounded, and clamped. All
/// sliders at zero produce the identity table.
///
/// # Example
///
/// ```rust
/// use filmgrade_core::AdjustmentState;
/// use filmgrade_ops::tone::bake_tone_lut;
///
/// let lut = bake_tone_lut(&AdjustmentState::default());
/// assert_eq!(lut[200], 200);
/// ```
pub fn bake_tone_lut(state: &AdjustmentState) -> [u8; 256] {
    let exposure_mult = (state.exposure / 50.0).exp2();
    let contrast_factor =
        (259.0 * (state.contrast + 255.0)) / (255.0 * (259.0 - state.contrast));
    let black_point = -state.blacks * 0.002;
    let white_point = 1.0 - state.whites * 0.002;
    let levels_range = white_point - black_point;

    let mut lut = [0u8; 256];
    for (i, out) in lut.iter_mut().enumerate() {
        let mut v = i as f32 / 255.0;

        v *= exposure_mult;
        v = (v - 0.5) * contrast_factor + 0.5;
        if levels_range.abs() > f32::EPSILON {
            v = (v - black_point) / levels_range;
        }
        v += state.shadows * 0.005 * (1.0 - v) * (1.0 - v) * v * 4.0;
        v += state.highlights * 0.005 * v * v * (1.0 - v) * 4.0;

        *out = (v * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(f: impl FnOnce(&mut AdjustmentState)) -> AdjustmentState {
        let mut s = AdjustmentState::default();
        f(&mut s);
        s
    }

    #[test]
    fn neutral_is_identity() {
        let lut = bake_tone_lut(&AdjustmentState::default());
        for (i, &v) in lut.iter().enumerate() {
            assert_eq!(v as usize, i, "identity broken at {i}");
        }
    }

    #[test]
    fn positive_exposure_brightens_midtones() {
        let lut = bake_tone_lut(&state_with(|s| s.exposure = 50.0));
        assert!(lut[128] > 128);
        assert_eq!(lut[0], 0);
    }

    #[test]
    fn positive_contrast_steepens_around_middle() {
        let lut = bake_tone_lut(&state_with(|s| s.contrast = 50.0));
        assert!(lut[64] < 64);
        assert!(lut[192] > 192);
    }

    #[test]
    fn degenerate_levels_is_guarded() {
        // whites = 500 would put the white point at the black point; the
        // slider range prevents it, but the guard must hold regardless.
        let mut s = AdjustmentState::default();
        s.blacks = 0.0;
        s.whites = 500.0;
        let lut = bake_tone_lut(&s);
        assert!(lut.iter().all(|&v| v <= 255));
    }

    #[test]
    fn shadows_lift_dark_values() {
        let lut = bake_tone_lut(&state_with(|s| s.shadows = 100.0));
        assert!(lut[40] > 40);
        // Endpoints are fixed points of the shadow term.
        assert_eq!(lut[0], 0);
        assert_eq!(lut[255], 255);
    }

    #[test]
    fn highlights_formula_is_literal() {
        // Positive highlights pushes bright values up under the literal
        // formula; whether that "boosts" or "recovers" is a naming
        // question the pipeline stays agnostic about.
        let lut = bake_tone_lut(&state_with(|s| s.highlights = 100.0));
        assert!(lut[200] > 200);
        assert_eq!(lut[255], 255);
    }

    #[test]
    fn blacks_shift_black_point() {
        let lut = bake_tone_lut(&state_with(|s| s.blacks = 50.0));
        // black_point = -0.1, so input 0 maps to 0.1/1.1 of full scale.
        assert!(lut[0] > 0);
    }
}
