//! White balance channel gains.
//!
//! Combines the manual per-channel gain multipliers with the temp/tint
//! bias sliders into one multiplicative gain per channel. Temp moves
//! along the blue-amber axis (positive warms: more red, less blue), tint
//! along the green-magenta axis (positive shifts magenta: less green).
//! The gains are applied before tone mapping and are deliberately not
//! pre-clamped; clamping happens only when the result indexes the tone
//! LUT.

use filmgrade_core::{AdjustmentState, PixelBuffer};

/// Computes the combined `[red, green, blue]` gains for a state.
///
/// Neutral sliders and unit manual gains yield `[1.0, 1.0, 1.0]`.
/// Results are floored at zero so gains stay non-negative.
///
/// # Example
///
/// ```rust
/// use filmgrade_core::AdjustmentState;
/// use filmgrade_ops::white_balance::channel_gains;
///
/// let gains = channel_gains(&AdjustmentState::default());
/// assert_eq!(gains, [1.0, 1.0, 1.0]);
/// ```
pub fn channel_gains(state: &AdjustmentState) -> [f32; 3] {
    let temp = state.temp / 200.0;
    let tint = state.tint / 200.0;
    [
        (state.red_gain * (1.0 + temp)).max(0.0),
        (state.green_gain * (1.0 - tint)).max(0.0),
        (state.blue_gain * (1.0 - temp)).max(0.0),
    ]
}

/// Gray-world auto color: per-channel gains that equalize the channel
/// means of the (optionally inverted) source.
///
/// Each gain is `mean_luma / mean_channel`, clamped to `[0.2, 5.0]` so a
/// heavily tinted frame cannot explode a near-zero channel. Transparent
/// pixels are excluded. Returns unit gains for an empty or fully
/// transparent buffer.
pub fn auto_gains(source: &PixelBuffer, inverted: bool) -> [f32; 3] {
    let mut sums = [0.0f64; 3];
    let mut count = 0u64;
    for px in source.data().chunks_exact(4) {
        if px[3] == 0 {
            continue;
        }
        for (sum, &v) in sums.iter_mut().zip(&px[..3]) {
            let v = if inverted { 255.0 - v as f64 } else { v as f64 };
            *sum += v;
        }
        count += 1;
    }
    if count == 0 {
        return [1.0, 1.0, 1.0];
    }

    let means = sums.map(|s| s / count as f64);
    let luma = 0.299 * means[0] + 0.587 * means[1] + 0.114 * means[2];
    means.map(|m| {
        if m <= f64::EPSILON {
            1.0
        } else {
            (luma / m).clamp(0.2, 5.0) as f32
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_is_unity() {
        assert_eq!(channel_gains(&AdjustmentState::default()), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn warm_temp_raises_red_lowers_blue() {
        let state = AdjustmentState {
            temp: 50.0,
            ..AdjustmentState::default()
        };
        let [r, g, b] = channel_gains(&state);
        assert!(r > 1.0);
        assert_eq!(g, 1.0);
        assert!(b < 1.0);
    }

    #[test]
    fn magenta_tint_lowers_green() {
        let state = AdjustmentState {
            tint: 50.0,
            ..AdjustmentState::default()
        };
        let [r, g, b] = channel_gains(&state);
        assert_eq!(r, 1.0);
        assert!(g < 1.0);
        assert_eq!(b, 1.0);
    }

    #[test]
    fn manual_gains_multiply() {
        let state = AdjustmentState {
            red_gain: 2.0,
            temp: 50.0,
            ..AdjustmentState::default()
        };
        let [r, _, _] = channel_gains(&state);
        assert!((r - 2.5).abs() < 1e-6);
    }

    #[test]
    fn gains_never_negative() {
        let state = AdjustmentState {
            temp: 100.0,
            blue_gain: 0.1,
            ..AdjustmentState::default()
        };
        let [_, _, b] = channel_gains(&state);
        assert!(b >= 0.0);
    }

    #[test]
    fn auto_gains_neutralize_a_cast() {
        // A uniformly red-heavy frame: red gets pulled down, blue up.
        let mut buf = PixelBuffer::new_opaque(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                buf.set_pixel(x, y, [200, 100, 50, 255]);
            }
        }
        let [r, g, b] = auto_gains(&buf, false);
        assert!(r < 1.0);
        assert!(b > g && g > r);
        // Applying the gains equalizes the means.
        assert!((200.0 * r - 100.0 * g).abs() < 1.0);
        assert!((100.0 * g - 50.0 * b).abs() < 1.0);
    }

    #[test]
    fn auto_gains_on_gray_are_unity() {
        let mut buf = PixelBuffer::new_opaque(2, 2);
        for y in 0..2 {
            for x in 0..2 {
                buf.set_pixel(x, y, [128, 128, 128, 255]);
            }
        }
        let gains = auto_gains(&buf, false);
        for v in gains {
            assert!((v - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn auto_gains_respect_inversion() {
        // 205 inverts to 50 and 55 to 200: the cast flips sides.
        let mut buf = PixelBuffer::new_opaque(2, 2);
        for y in 0..2 {
            for x in 0..2 {
                buf.set_pixel(x, y, [205, 128, 55, 255]);
            }
        }
        let [r, _, b] = auto_gains(&buf, true);
        assert!(r > 1.0);
        assert!(b < 1.0);
    }

    #[test]
    fn empty_buffer_is_unity() {
        let buf = PixelBuffer::new_transparent(3, 3);
        assert_eq!(auto_gains(&buf, false), [1.0, 1.0, 1.0]);
    }
}
