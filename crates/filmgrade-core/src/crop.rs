//! Normalized crop rectangle.
//!
//! The crop is expressed in the unit square of the rotated bounding box:
//! `(0, 0)` is the box's top-left, `(1, 1)` its bottom-right. Keeping the
//! crop normalized lets rotation changes re-derive pixel coordinates
//! without touching the stored rectangle's meaning.

use serde::{Deserialize, Serialize};

/// A crop rectangle normalized to `[0, 1]^2`.
///
/// # Invariants
///
/// - `0 <= x`, `0 <= y`
/// - `x + w <= 1`, `y + h <= 1`
/// - `w > 0`, `h > 0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl CropRect {
    /// The full-frame crop.
    pub const FULL: CropRect = CropRect {
        x: 0.0,
        y: 0.0,
        w: 1.0,
        h: 1.0,
    };

    /// Creates a crop rectangle, clamped into the unit square.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }.clamped()
    }

    /// Center point of the rectangle.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Returns this rectangle clamped into the unit square.
    ///
    /// Size is capped at 1.0 per axis first, then the origin is shifted
    /// so the rectangle fits; the size is never grown.
    pub fn clamped(mut self) -> Self {
        self.w = self.w.clamp(f32::EPSILON, 1.0);
        self.h = self.h.clamp(f32::EPSILON, 1.0);
        self.x = self.x.clamp(0.0, 1.0 - self.w);
        self.y = self.y.clamp(0.0, 1.0 - self.h);
        self
    }

    /// Returns this rectangle translated by `(dx, dy)`, clamped so it
    /// stays within the unit square.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
        .clamped()
    }

    /// Converts to pixel coordinates within a `width x height` box.
    ///
    /// The result is clamped so at least one pixel remains and the region
    /// stays inside the box.
    pub fn to_pixels(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let px = (self.x * width as f32).round() as u32;
        let py = (self.y * height as f32).round() as u32;
        let pw = ((self.w * width as f32).round() as u32).max(1);
        let ph = ((self.h * height as f32).round() as u32).max(1);
        let px = px.min(width.saturating_sub(1));
        let py = py.min(height.saturating_sub(1));
        let pw = pw.min(width - px);
        let ph = ph.min(height - py);
        (px, py, pw, ph)
    }

    /// Returns `true` if the rectangle satisfies the unit-square
    /// invariants.
    pub fn is_valid(&self) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.w > 0.0
            && self.h > 0.0
            && self.x + self.w <= 1.0 + 1e-6
            && self.y + self.h <= 1.0 + 1e-6
    }
}

impl Default for CropRect {
    fn default() -> Self {
        Self::FULL
    }
}

impl std::fmt::Display for CropRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CropRect({:.4}, {:.4}, {:.4}x{:.4})",
            self.x, self.y, self.w, self.h
        )
    }
}
