//! Rotation, orientation, and crop geometry.
//!
//! The geometry engine works in three coordinate spaces:
//!
//! - **source pixels** - the oriented source image
//! - **bounding box pixels** - the axis-aligned box enclosing the
//!   fine-rotated source (`W' = W|cos t| + H|sin t|`)
//! - **normalized crop** - the crop rectangle in the bounding box's unit
//!   square
//!
//! Rotation changes re-derive the crop through explicit conversions
//! between these spaces ([`crop_to_box_pixels`] / [`crop_from_box_pixels`])
//! so the center-preserving, shrink-only recrop stays auditable.

use crate::{OpsError, OpsResult};
use filmgrade_core::{AdjustmentState, CropRect, Orientation, PixelBuffer};

/// Source dimensions after applying a 90-degree orientation.
#[inline]
pub fn oriented_size(width: u32, height: u32, orientation: Orientation) -> (u32, u32) {
    if orientation.swaps_axes() {
        (height, width)
    } else {
        (width, height)
    }
}

/// Size of the axis-aligned bounding box of a `width x height` image
/// rotated by `degrees`.
pub fn bounding_box_size(width: f32, height: f32, degrees: f32) -> (f32, f32) {
    let rad = degrees.to_radians();
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    (width * cos + height * sin, width * sin + height * cos)
}

/// Pixel size of the maximal inscribed rectangle with the source's
/// aspect ratio inside the rotated bounding box.
///
/// Closed form: `h = min(W*H/W', H*H/H')`, `w = h * W/H`, where `(W, H)`
/// is the oriented source size and `(W', H')` the bounding box.
pub fn inscribed_size(width: f32, height: f32, degrees: f32) -> (f32, f32) {
    let (bw, bh) = bounding_box_size(width, height, degrees);
    let h = (width * height / bw).min(height * height / bh);
    (h * width / height, h)
}

/// Converts a normalized crop into bounding-box pixels: size plus center
/// offset from the box center.
pub fn crop_to_box_pixels(crop: &CropRect, box_w: f32, box_h: f32) -> (f32, f32, f32, f32) {
    let (cx, cy) = crop.center();
    (
        crop.w * box_w,
        crop.h * box_h,
        (cx - 0.5) * box_w,
        (cy - 0.5) * box_h,
    )
}

/// Converts bounding-box pixel size and center offset back into a
/// normalized crop, clamped into the unit square.
pub fn crop_from_box_pixels(w: f32, h: f32, dx: f32, dy: f32, box_w: f32, box_h: f32) -> CropRect {
    let nw = (w / box_w).min(1.0);
    let nh = (h / box_h).min(1.0);
    let cx = 0.5 + dx / box_w;
    let cy = 0.5 + dy / box_h;
    CropRect::new(cx - nw * 0.5, cy - nh * 0.5, nw, nh)
}

/// Recomputes the crop when fine rotation changes.
///
/// The crop's pixel size and center offset are carried from the old
/// bounding box into the new one, shrunk (never grown) to fit the new
/// maximal inscribed rectangle, then clamped into the unit square. This
/// keeps framing intent while the user scrubs rotation and guarantees
/// the crop never exposes rotation padding.
pub fn recrop_for_rotation(
    crop: &CropRect,
    src_width: u32,
    src_height: u32,
    orientation: Orientation,
    old_degrees: f32,
    new_degrees: f32,
) -> CropRect {
    let (ow, oh) = oriented_size(src_width, src_height, orientation);
    let (ow, oh) = (ow as f32, oh as f32);

    let (old_bw, old_bh) = bounding_box_size(ow, oh, old_degrees);
    let (new_bw, new_bh) = bounding_box_size(ow, oh, new_degrees);
    let (max_w, max_h) = inscribed_size(ow, oh, new_degrees);

    let (mut w, mut h, dx, dy) = crop_to_box_pixels(crop, old_bw, old_bh);

    let scale = (max_w / w).min(max_h / h).min(1.0);
    w *= scale;
    h *= scale;

    crop_from_box_pixels(w, h, dx, dy, new_bw, new_bh)
}

/// A corner of the crop rectangle, for resize drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

/// Resizes a crop by dragging one corner to a new normalized position.
///
/// The opposite corner stays anchored. With `aspect` set (width over
/// height, in bounding-box pixels) the dragged axis pair is shrunk to
/// honor the ratio. The result is clamped to the unit square and to the
/// inscribed rectangle of the current rotation, and never collapses below
/// a minimal size.
pub fn resize_crop(
    crop: &CropRect,
    corner: Corner,
    to_x: f32,
    to_y: f32,
    aspect: Option<f32>,
    src_width: u32,
    src_height: u32,
    orientation: Orientation,
    degrees: f32,
) -> CropRect {
    const MIN_SIDE: f32 = 0.01;

    let (ow, oh) = oriented_size(src_width, src_height, orientation);
    let (box_w, box_h) = bounding_box_size(ow as f32, oh as f32, degrees);
    let (max_w, max_h) = inscribed_size(ow as f32, oh as f32, degrees);
    // Extreme aspect ratios can push the inscribed bound below MIN_SIDE;
    // the bound must never drop under the floor of the clamp below.
    let max_nw = (max_w / box_w).min(1.0).max(MIN_SIDE);
    let max_nh = (max_h / box_h).min(1.0).max(MIN_SIDE);

    let to_x = to_x.clamp(0.0, 1.0);
    let to_y = to_y.clamp(0.0, 1.0);

    // The anchored corner.
    let (ax, ay) = match corner {
        Corner::TopLeft => (crop.x + crop.w, crop.y + crop.h),
        Corner::TopRight => (crop.x, crop.y + crop.h),
        Corner::BottomLeft => (crop.x + crop.w, crop.y),
        Corner::BottomRight => (crop.x, crop.y),
    };

    let mut w = (to_x - ax).abs().clamp(MIN_SIDE, max_nw);
    let mut h = (to_y - ay).abs().clamp(MIN_SIDE, max_nh);

    if let Some(ratio) = aspect {
        // Shrink whichever axis overshoots the ratio, in pixel terms.
        let pw = w * box_w;
        let ph = h * box_h;
        if pw / ph > ratio {
            w = ph * ratio / box_w;
        } else {
            h = pw / ratio / box_h;
        }
        w = w.max(MIN_SIDE);
        h = h.max(MIN_SIDE);
    }

    let x = if to_x < ax { ax - w } else { ax };
    let y = if to_y < ay { ay - h } else { ay };
    CropRect::new(x, y, w, h)
}

/// Applies a 90-degree orientation to a buffer.
pub fn orient(src: &PixelBuffer, orientation: Orientation) -> PixelBuffer {
    match orientation {
        Orientation::Deg0 => src.clone(),
        Orientation::Deg90 => rotate_90_cw(src),
        Orientation::Deg180 => rotate_180(src),
        Orientation::Deg270 => rotate_90_ccw(src),
    }
}

/// Rotates a buffer 90 degrees clockwise.
fn rotate_90_cw(src: &PixelBuffer) -> PixelBuffer {
    let (w, h) = (src.width(), src.height());
    let mut dst = PixelBuffer::new_transparent(h, w);
    for y in 0..h {
        for x in 0..w {
            dst.set_pixel(h - 1 - y, x, src.pixel(x, y));
        }
    }
    dst
}

/// Rotates a buffer 90 degrees counter-clockwise.
fn rotate_90_ccw(src: &PixelBuffer) -> PixelBuffer {
    let (w, h) = (src.width(), src.height());
    let mut dst = PixelBuffer::new_transparent(h, w);
    for y in 0..h {
        for x in 0..w {
            dst.set_pixel(y, w - 1 - x, src.pixel(x, y));
        }
    }
    dst
}

/// Rotates a buffer 180 degrees.
fn rotate_180(src: &PixelBuffer) -> PixelBuffer {
    let (w, h) = (src.width(), src.height());
    let mut dst = PixelBuffer::new_transparent(w, h);
    for y in 0..h {
        for x in 0..w {
            dst.set_pixel(w - 1 - x, h - 1 - y, src.pixel(x, y));
        }
    }
    dst
}

/// Rotates a buffer by a fine angle into its bounding box.
///
/// Inverse-mapped bilinear resampling; pixels whose preimage falls
/// outside the source are written fully transparent so the grading pass
/// can skip them.
pub fn rotate_fine(src: &PixelBuffer, degrees: f32) -> PixelBuffer {
    if degrees == 0.0 {
        return src.clone();
    }
    let (sw, sh) = (src.width() as f32, src.height() as f32);
    let (bw, bh) = bounding_box_size(sw, sh, degrees);
    let (dst_w, dst_h) = (bw.round() as u32, bh.round() as u32);
    let mut dst = PixelBuffer::new_transparent(dst_w, dst_h);

    let rad = degrees.to_radians();
    let (sin, cos) = (rad.sin(), rad.cos());
    let (dcx, dcy) = (dst_w as f32 * 0.5, dst_h as f32 * 0.5);
    let (scx, scy) = (sw * 0.5, sh * 0.5);

    for y in 0..dst_h {
        for x in 0..dst_w {
            // Inverse rotation of the destination pixel center.
            let px = x as f32 + 0.5 - dcx;
            let py = y as f32 + 0.5 - dcy;
            let sx = px * cos + py * sin + scx - 0.5;
            let sy = -px * sin + py * cos + scy - 0.5;
            if let Some(rgba) = sample_bilinear(src, sx, sy) {
                dst.set_pixel(x, y, rgba);
            }
        }
    }
    dst
}

/// Bilinear RGBA sample at a fractional source coordinate.
///
/// Returns `None` when the coordinate lies fully outside the source.
fn sample_bilinear(src: &PixelBuffer, x: f32, y: f32) -> Option<[u8; 4]> {
    let (w, h) = (src.width() as i64, src.height() as i64);
    if x < -1.0 || y < -1.0 || x >= w as f32 || y >= h as f32 {
        return None;
    }
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let fetch = |px: i64, py: i64| -> [f32; 4] {
        if px < 0 || py < 0 || px >= w || py >= h {
            // Transparent outside the source.
            [0.0; 4]
        } else {
            let p = src.pixel(px as u32, py as u32);
            [p[0] as f32, p[1] as f32, p[2] as f32, p[3] as f32]
        }
    };

    let c00 = fetch(x0, y0);
    let c10 = fetch(x0 + 1, y0);
    let c01 = fetch(x0, y0 + 1);
    let c11 = fetch(x0 + 1, y0 + 1);

    let mut out = [0u8; 4];
    for i in 0..4 {
        let top = c00[i] * (1.0 - fx) + c10[i] * fx;
        let bottom = c01[i] * (1.0 - fx) + c11[i] * fx;
        out[i] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    if out[3] == 0 {
        return None;
    }
    Some(out)
}

/// Extracts the crop region from a bounding-box buffer.
pub fn extract_crop(src: &PixelBuffer, crop: &CropRect) -> OpsResult<PixelBuffer> {
    if !crop.is_valid() {
        return Err(OpsError::InvalidParameter(format!(
            "crop outside unit square: {crop}"
        )));
    }
    let (x, y, w, h) = crop.to_pixels(src.width(), src.height());
    let mut dst = PixelBuffer::new_transparent(w, h);
    for row in 0..h {
        for col in 0..w {
            dst.set_pixel(col, row, src.pixel(x + col, y + row));
        }
    }
    Ok(dst)
}

/// Rasterizes the visible region of a source image for a state:
/// orientation, then fine rotation into the bounding box, then crop.
pub fn rasterize(src: &PixelBuffer, state: &AdjustmentState) -> OpsResult<PixelBuffer> {
    let oriented = orient(src, state.orientation);
    let rotated = rotate_fine(&oriented, state.rotation);
    extract_crop(&rotated, &state.crop)
}

/// Maps a display (cropped view) coordinate back to a source pixel.
///
/// Replicates the rasterization transform in reverse: crop offset, then
/// inverse fine rotation about the bounding-box center, then inverse
/// orientation. Returns `None` for coordinates that land in rotation
/// padding or outside the source.
pub fn display_to_source(
    state: &AdjustmentState,
    src_width: u32,
    src_height: u32,
    x: u32,
    y: u32,
) -> Option<(u32, u32)> {
    let (ow, oh) = oriented_size(src_width, src_height, state.orientation);
    let (bw, bh) = bounding_box_size(ow as f32, oh as f32, state.rotation);
    let (box_w, box_h) = (bw.round() as u32, bh.round() as u32);

    let (cx0, cy0, cw, ch) = state.crop.to_pixels(box_w, box_h);
    if x >= cw || y >= ch {
        return None;
    }
    let bx = (x + cx0) as f32 + 0.5 - box_w as f32 * 0.5;
    let by = (y + cy0) as f32 + 0.5 - box_h as f32 * 0.5;

    let rad = state.rotation.to_radians();
    let (sin, cos) = (rad.sin(), rad.cos());
    let ox = bx * cos + by * sin + ow as f32 * 0.5 - 0.5;
    let oy = -bx * sin + by * cos + oh as f32 * 0.5 - 0.5;

    let ox = ox.round();
    let oy = oy.round();
    if ox < 0.0 || oy < 0.0 || ox >= ow as f32 || oy >= oh as f32 {
        return None;
    }
    let (ox, oy) = (ox as u32, oy as u32);

    // Inverse orientation: oriented coords back to source coords.
    let (sx, sy) = match state.orientation {
        Orientation::Deg0 => (ox, oy),
        Orientation::Deg90 => (oy, src_height - 1 - ox),
        Orientation::Deg180 => (src_width - 1 - ox, src_height - 1 - oy),
        Orientation::Deg270 => (src_width - 1 - oy, ox),
    };
    Some((sx, sy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_at_zero_is_source() {
        let (w, h) = bounding_box_size(400.0, 300.0, 0.0);
        assert!((w - 400.0).abs() < 1e-4);
        assert!((h - 300.0).abs() < 1e-4);
    }

    #[test]
    fn bounding_box_grows_with_rotation() {
        let (w, h) = bounding_box_size(400.0, 300.0, 30.0);
        assert!(w > 400.0);
        assert!(h > 300.0);
    }

    #[test]
    fn inscribed_at_zero_is_full_frame() {
        let (w, h) = inscribed_size(400.0, 300.0, 0.0);
        assert!((w - 400.0).abs() < 1e-3);
        assert!((h - 300.0).abs() < 1e-3);
    }

    #[test]
    fn inscribed_fits_and_keeps_aspect() {
        for deg in [-45.0f32, -20.0, 5.0, 33.0, 45.0] {
            let (w, h) = inscribed_size(400.0, 300.0, deg);
            let (bw, bh) = bounding_box_size(400.0, 300.0, deg);
            assert!(w <= bw + 1e-3 && h <= bh + 1e-3);
            assert!((w / h - 400.0 / 300.0).abs() < 1e-3, "aspect broken at {deg}");
            assert!(w < 400.0 && h < 300.0, "must shrink at {deg}");
        }
    }

    #[test]
    fn recrop_full_frame_becomes_inscribed() {
        let crop = recrop_for_rotation(&CropRect::FULL, 400, 300, Orientation::Deg0, 0.0, 20.0);
        assert!(crop.is_valid());
        let (bw, bh) = bounding_box_size(400.0, 300.0, 20.0);
        let (iw, ih) = inscribed_size(400.0, 300.0, 20.0);
        assert!(crop.w * bw <= iw + 1.0);
        assert!(crop.h * bh <= ih + 1.0);
        // A centered crop stays centered.
        let (cx, cy) = crop.center();
        assert!((cx - 0.5).abs() < 1e-3);
        assert!((cy - 0.5).abs() < 1e-3);
    }

    #[test]
    fn recrop_never_grows() {
        let small = CropRect::new(0.4, 0.4, 0.2, 0.2);
        for (from, to) in [(0.0f32, 30.0f32), (30.0, 10.0), (10.0, 0.0)] {
            let out = recrop_for_rotation(&small, 400, 300, Orientation::Deg0, from, to);
            let (old_bw, old_bh) = bounding_box_size(400.0, 300.0, from);
            let (new_bw, new_bh) = bounding_box_size(400.0, 300.0, to);
            assert!(out.w * new_bw <= small.w * old_bw + 1e-3);
            assert!(out.h * new_bh <= small.h * old_bh + 1e-3);
            assert!(out.is_valid());
        }
    }

    #[test]
    fn recrop_bound_holds_for_many_angles() {
        let mut crop = CropRect::new(0.1, 0.2, 0.6, 0.5);
        let mut prev = 0.0f32;
        for deg in [5.0f32, 12.0, -8.0, 45.0, -45.0, 0.0] {
            crop = recrop_for_rotation(&crop, 640, 480, Orientation::Deg0, prev, deg);
            let (bw, bh) = bounding_box_size(640.0, 480.0, deg);
            let (iw, ih) = inscribed_size(640.0, 480.0, deg);
            assert!(crop.is_valid(), "invalid at {deg}");
            assert!(crop.w * bw <= iw + 1.0, "width bound at {deg}");
            assert!(crop.h * bh <= ih + 1.0, "height bound at {deg}");
            prev = deg;
        }
    }

    #[test]
    fn resize_drags_one_corner() {
        let crop = CropRect::new(0.2, 0.2, 0.4, 0.4);
        let out = resize_crop(
            &crop,
            Corner::BottomRight,
            0.9,
            0.8,
            None,
            400,
            300,
            Orientation::Deg0,
            0.0,
        );
        assert!((out.x - 0.2).abs() < 1e-6);
        assert!((out.y - 0.2).abs() < 1e-6);
        assert!((out.w - 0.7).abs() < 1e-6);
        assert!((out.h - 0.6).abs() < 1e-6);
    }

    #[test]
    fn resize_with_aspect_holds_pixel_ratio() {
        let crop = CropRect::new(0.0, 0.0, 0.5, 0.5);
        let out = resize_crop(
            &crop,
            Corner::BottomRight,
            1.0,
            1.0,
            Some(1.0),
            400,
            300,
            Orientation::Deg0,
            0.0,
        );
        let (pw, ph) = (out.w * 400.0, out.h * 300.0);
        assert!((pw / ph - 1.0).abs() < 1e-3);
        assert!(out.is_valid());
    }

    #[test]
    fn resize_clamps_to_inscribed_bound_when_rotated() {
        // Dragging top-left to the box corner asks for a full-frame crop,
        // which the 20-degree inscribed bound must cut down.
        let crop = CropRect::new(0.5, 0.5, 0.5, 0.5);
        let out = resize_crop(
            &crop,
            Corner::TopLeft,
            0.0,
            0.0,
            None,
            400,
            300,
            Orientation::Deg0,
            20.0,
        );
        let (bw, bh) = bounding_box_size(400.0, 300.0, 20.0);
        let (iw, ih) = inscribed_size(400.0, 300.0, 20.0);
        assert!(out.w < 1.0 && out.h < 1.0);
        assert!(out.w * bw <= iw + 1e-3);
        assert!(out.h * bh <= ih + 1e-3);
    }

    #[test]
    fn resize_on_extreme_aspect_at_full_rotation() {
        // A 1000x10 strip at 45 degrees has an inscribed rectangle far
        // below the minimum crop side; the resize must floor gracefully.
        let crop = CropRect::new(0.4, 0.4, 0.2, 0.2);
        let out = resize_crop(
            &crop,
            Corner::BottomRight,
            1.0,
            1.0,
            None,
            1000,
            10,
            Orientation::Deg0,
            45.0,
        );
        assert!(out.is_valid());
        assert!(out.w > 0.0 && out.h > 0.0);
    }

    #[test]
    fn resize_never_collapses() {
        let crop = CropRect::new(0.4, 0.4, 0.2, 0.2);
        let out = resize_crop(
            &crop,
            Corner::TopLeft,
            0.6,
            0.6,
            None,
            400,
            300,
            Orientation::Deg0,
            0.0,
        );
        assert!(out.w > 0.0 && out.h > 0.0);
        assert!(out.is_valid());
    }

    #[test]
    fn orient_90_swaps_dimensions() {
        let mut src = PixelBuffer::new_opaque(3, 2);
        src.set_pixel(0, 0, [255, 0, 0, 255]);
        let out = orient(&src, Orientation::Deg90);
        assert_eq!((out.width(), out.height()), (2, 3));
        // Top-left travels to top-right under a clockwise turn.
        assert_eq!(out.pixel(1, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn orient_180_flips_both_axes() {
        let mut src = PixelBuffer::new_opaque(3, 2);
        src.set_pixel(0, 0, [255, 0, 0, 255]);
        let out = orient(&src, Orientation::Deg180);
        assert_eq!(out.pixel(2, 1), [255, 0, 0, 255]);
    }

    #[test]
    fn fine_rotation_pads_with_transparency() {
        let src = PixelBuffer::new_opaque(40, 20);
        let out = rotate_fine(&src, 30.0);
        assert!(out.width() > 40);
        assert!(out.height() > 20);
        // Bounding-box corners are rotation padding.
        assert_eq!(out.pixel(0, 0)[3], 0);
        // The box center is source content.
        assert_eq!(out.pixel(out.width() / 2, out.height() / 2)[3], 255);
    }

    #[test]
    fn zero_rotation_is_identity() {
        let mut src = PixelBuffer::new_opaque(5, 4);
        src.set_pixel(2, 3, [9, 8, 7, 255]);
        assert_eq!(rotate_fine(&src, 0.0), src);
    }

    #[test]
    fn extract_crop_quarter() {
        let mut src = PixelBuffer::new_opaque(8, 8);
        src.set_pixel(4, 4, [1, 2, 3, 255]);
        let out = extract_crop(&src, &CropRect::new(0.5, 0.5, 0.5, 0.5)).unwrap();
        assert_eq!((out.width(), out.height()), (4, 4));
        assert_eq!(out.pixel(0, 0), [1, 2, 3, 255]);
    }

    #[test]
    fn display_to_source_identity_geometry() {
        let state = AdjustmentState::default();
        assert_eq!(display_to_source(&state, 10, 8, 3, 4), Some((3, 4)));
        assert_eq!(display_to_source(&state, 10, 8, 10, 0), None);
    }

    #[test]
    fn display_to_source_with_crop_offset() {
        let state = AdjustmentState {
            crop: CropRect::new(0.5, 0.5, 0.5, 0.5),
            ..AdjustmentState::default()
        };
        assert_eq!(display_to_source(&state, 10, 8, 0, 0), Some((5, 4)));
    }

    #[test]
    fn display_to_source_inverts_orientation() {
        let state = AdjustmentState {
            orientation: Orientation::Deg90,
            ..AdjustmentState::default()
        };
        // Oriented (1, 0) came from source top-left's 90 CW image: the
        // pixel at oriented (h-1-y, x) is source (x, y).
        let src = display_to_source(&state, 3, 2, 1, 0).unwrap();
        assert_eq!(src, (0, 0));
    }
}
