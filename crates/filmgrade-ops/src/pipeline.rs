//! The ordered per-pixel grading pass.
//!
//! Every recompute walks the working buffer through a fixed stage order:
//!
//! 1. invert (negative to positive)
//! 2. white-balance gains
//! 3. tone-mapping LUT (exposure, contrast, levels, shadows/highlights)
//! 4. master RGB curve LUT
//! 5. per-channel curve LUTs
//! 6. loaded LUT 1 (intensity blend)
//! 7. loaded LUT 2 (intensity blend)
//! 8. final clamp + histogram accumulation
//!
//! The order is load-bearing: curves operate on tone-mapped values and
//! loaded LUTs see the fully graded color. The exporter and the color
//! picker reuse [`grade_rgb`] so all three paths stay bit-consistent.
//!
//! Fully transparent pixels are rotation padding: they are passed through
//! untouched and excluded from the histograms.

use crate::curve::bake_curve;
use crate::tone::bake_tone_lut;
use crate::white_balance::channel_gains;
use filmgrade_core::{AdjustmentState, HistogramAccum, Histograms, PixelBuffer};
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The per-recompute derived tables: one tone LUT, four curve LUTs, and
/// the combined white-balance gains.
///
/// Rebuilt unconditionally on every pass; baking five 256-entry tables is
/// noise next to the pixel loop.
#[derive(Debug, Clone)]
pub struct BakedLuts {
    /// Tone-mapping LUT (stage 3).
    pub tone: [u8; 256],
    /// Master RGB curve LUT (stage 4).
    pub rgb: [u8; 256],
    /// Red curve LUT (stage 5).
    pub red: [u8; 256],
    /// Green curve LUT (stage 5).
    pub green: [u8; 256],
    /// Blue curve LUT (stage 5).
    pub blue: [u8; 256],
    /// White-balance gains (stage 2).
    pub gains: [f32; 3],
}

impl BakedLuts {
    /// Bakes all derived tables for a state.
    pub fn bake(state: &AdjustmentState) -> Self {
        Self {
            tone: bake_tone_lut(state),
            rgb: bake_curve(state.curves.rgb.points()),
            red: bake_curve(state.curves.red.points()),
            green: bake_curve(state.curves.green.points()),
            blue: bake_curve(state.curves.blue.points()),
            gains: channel_gains(state),
        }
    }
}

/// Clamps a stage value into the 0..=255 LUT index range.
#[inline]
fn lut_index(v: f32) -> usize {
    v.round().clamp(0.0, 255.0) as usize
}

/// Runs stages 1-7 on one RGB value (components in `[0, 255]`).
///
/// Returns the graded color clamped to `[0, 255]`. This is the single
/// shared evaluation path for the pixel pass, the LUT exporter, and the
/// color picker.
pub fn grade_rgb(rgb: [f32; 3], state: &AdjustmentState, baked: &BakedLuts) -> [f32; 3] {
    let mut c = rgb;

    // Stage 1: invert.
    if state.inverted {
        for v in &mut c {
            *v = 255.0 - *v;
        }
    }

    // Stage 2: white balance. Not clamped here; the gain product may
    // exceed the display range until the tone LUT index clamp.
    for (v, gain) in c.iter_mut().zip(baked.gains) {
        *v *= gain;
    }

    // Stage 3: tone-mapping LUT.
    for v in &mut c {
        *v = baked.tone[lut_index(*v)] as f32;
    }

    // Stage 4: master RGB curve.
    for v in &mut c {
        *v = baked.rgb[lut_index(*v)] as f32;
    }

    // Stage 5: per-channel curves.
    c[0] = baked.red[lut_index(c[0])] as f32;
    c[1] = baked.green[lut_index(c[1])] as f32;
    c[2] = baked.blue[lut_index(c[2])] as f32;

    // Stages 6-7: loaded LUTs over the graded color.
    for slot in [&state.lut1, &state.lut2].into_iter().flatten() {
        let sampled = slot.lut.sample([c[0] / 255.0, c[1] / 255.0, c[2] / 255.0]);
        let k = slot.intensity;
        for i in 0..3 {
            c[i] = c[i] * (1.0 - k) + sampled[i] * 255.0 * k;
        }
    }

    [
        c[0].clamp(0.0, 255.0),
        c[1].clamp(0.0, 255.0),
        c[2].clamp(0.0, 255.0),
    ]
}

/// Grades one interleaved RGBA row in place, accumulating histograms.
fn grade_row(row: &mut [u8], state: &AdjustmentState, baked: &BakedLuts, acc: &mut HistogramAccum) {
    for px in row.chunks_exact_mut(4) {
        if px[3] == 0 {
            // Rotation padding.
            continue;
        }
        let graded = grade_rgb([px[0] as f32, px[1] as f32, px[2] as f32], state, baked);
        px[0] = graded[0].round() as u8;
        px[1] = graded[1].round() as u8;
        px[2] = graded[2].round() as u8;
        acc.accumulate(px[0], px[1], px[2]);
    }
}

/// Runs the full grading pass over a working buffer.
///
/// Returns the graded buffer plus peak-normalized histograms. The source
/// buffer is expected to already be rasterized (oriented, rotated,
/// cropped) by the geometry engine.
pub fn grade_buffer(src: &PixelBuffer, state: &AdjustmentState) -> (PixelBuffer, Histograms) {
    let baked = BakedLuts::bake(state);
    let mut out = src.clone();
    let width = out.width() as usize;
    trace!(
        width = out.width(),
        height = out.height(),
        "grading buffer"
    );

    let acc = grade_rows(out.data_mut(), width, state, &baked);
    let histograms = acc.normalize();
    (out, histograms)
}

#[cfg(feature = "parallel")]
fn grade_rows(
    data: &mut [u8],
    width: usize,
    state: &AdjustmentState,
    baked: &BakedLuts,
) -> HistogramAccum {
    let row_bytes = (width * 4).max(4);
    data.par_chunks_mut(row_bytes)
        .map(|row| {
            let mut acc = HistogramAccum::new();
            grade_row(row, state, baked, &mut acc);
            acc
        })
        .reduce(HistogramAccum::new, |mut a, b| {
            a.merge(&b);
            a
        })
}

#[cfg(not(feature = "parallel"))]
fn grade_rows(
    data: &mut [u8],
    width: usize,
    state: &AdjustmentState,
    baked: &BakedLuts,
) -> HistogramAccum {
    let row_bytes = (width * 4).max(4);
    let mut acc = HistogramAccum::new();
    for row in data.chunks_mut(row_bytes) {
        grade_row(row, state, baked, &mut acc);
    }
    acc
}
