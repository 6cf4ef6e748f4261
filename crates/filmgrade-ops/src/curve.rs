//! Monotone cubic curve fitting.
//!
//! Fits a monotone cubic Hermite spline (Fritsch-Carlson tangents)
//! through user-placed control points and bakes it into a 256-entry
//! lookup table. Monotone tangent limiting guarantees the interpolant
//! never overshoots between control points, so a monotone point set
//! always yields a monotone LUT.

use filmgrade_core::ControlPoint;

/// Number of entries in a baked curve LUT.
pub const CURVE_LUT_SIZE: usize = 256;

/// Cubic coefficients for one spline segment, evaluated as
/// `y = ((c3*t + c2)*t + c1)*t + y0` with `t = x - x0`.
#[derive(Debug, Clone, Copy)]
struct Segment {
    x0: f32,
    y0: f32,
    c1: f32,
    c2: f32,
    c3: f32,
}

/// Bakes a control-point curve into a 256-entry lookup table.
///
/// Input x outside the first/last control point clamps to that
/// endpoint's y. Fewer than 2 points yields the identity ramp.
///
/// # Example
///
/// ```rust
/// use filmgrade_core::ControlPoint;
/// use filmgrade_ops::curve::bake_curve;
///
/// let identity = bake_curve(&[
///     ControlPoint::new(0.0, 0.0),
///     ControlPoint::new(255.0, 255.0),
/// ]);
/// assert_eq!(identity[128], 128);
/// ```
pub fn bake_curve(points: &[ControlPoint]) -> [u8; CURVE_LUT_SIZE] {
    let mut lut = [0u8; CURVE_LUT_SIZE];
    if points.len() < 2 {
        for (i, v) in lut.iter_mut().enumerate() {
            *v = i as u8;
        }
        return lut;
    }

    let segments = fit_segments(points);
    let first = points[0];
    let last = points[points.len() - 1];

    for (i, v) in lut.iter_mut().enumerate() {
        let x = i as f32;
        let y = if x <= first.x {
            first.y
        } else if x >= last.x {
            last.y
        } else {
            eval_segments(&segments, x)
        };
        *v = y.round().clamp(0.0, 255.0) as u8;
    }

    lut
}

/// Computes monotone-limited tangents and converts each Hermite segment
/// to polynomial form.
fn fit_segments(points: &[ControlPoint]) -> Vec<Segment> {
    let n = points.len();
    let mut dx = Vec::with_capacity(n - 1);
    let mut slope = Vec::with_capacity(n - 1);
    for i in 0..n - 1 {
        let h = (points[i + 1].x - points[i].x).max(f32::EPSILON);
        dx.push(h);
        slope.push((points[i + 1].y - points[i].y) / h);
    }

    // Endpoint tangents take the adjacent secant; interior tangents are
    // zero across a sign change and otherwise the weighted harmonic mean
    // of the neighboring secants.
    let mut tangent = vec![0.0f32; n];
    tangent[0] = slope[0];
    tangent[n - 1] = slope[n - 2];
    for i in 1..n - 1 {
        let m0 = slope[i - 1];
        let m1 = slope[i];
        if m0 * m1 <= 0.0 {
            tangent[i] = 0.0;
        } else {
            let common = dx[i - 1] + dx[i];
            tangent[i] = 3.0 * common / ((common + dx[i]) / m0 + (common + dx[i - 1]) / m1);
        }
    }

    let mut segments = Vec::with_capacity(n - 1);
    for i in 0..n - 1 {
        let h = dx[i];
        let m = slope[i];
        let t0 = tangent[i];
        let t1 = tangent[i + 1];
        segments.push(Segment {
            x0: points[i].x,
            y0: points[i].y,
            c1: t0,
            c2: (3.0 * m - 2.0 * t0 - t1) / h,
            c3: (t0 + t1 - 2.0 * m) / (h * h),
        });
    }
    segments
}

/// Evaluates the spline at `x`, which must lie within the control-point
/// range.
fn eval_segments(segments: &[Segment], x: f32) -> f32 {
    // Last segment whose start is at or below x.
    let seg = segments
        .iter()
        .rev()
        .find(|s| s.x0 <= x)
        .unwrap_or(&segments[0]);
    let t = x - seg.x0;
    ((seg.c3 * t + seg.c2) * t + seg.c1) * t + seg.y0
}
