//! The adjustment state record and its components.
//!
//! [`AdjustmentState`] is the single unit of undo/redo: every slider,
//! curve, crop, and LUT slot lives on it, and any change triggers a full
//! recompute downstream. All sliders are biased around 0 in `[-100, 100]`
//! with 0 meaning "no effect".

use crate::CropRect;
use filmgrade_lut::LutState;
use serde::{Deserialize, Serialize};

/// A single control point on a tone curve, in `[0, 255]^2` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Input intensity.
    pub x: f32,
    /// Output intensity.
    pub y: f32,
}

impl ControlPoint {
    /// Creates a new control point.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Curve channel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveChannel {
    /// Master curve applied to all three channels.
    Rgb,
    /// Red channel curve.
    Red,
    /// Green channel curve.
    Green,
    /// Blue channel curve.
    Blue,
}

/// A tone curve defined by sorted control points.
///
/// # Invariants
///
/// - at least 2 points, sorted by `x`
/// - the first point sits at `x = 0` and the last at `x = 255`; their `x`
///   coordinates are immutable (only `y` moves)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    points: Vec<ControlPoint>,
}

impl Curve {
    /// Creates the identity curve `{(0,0), (255,255)}`.
    pub fn identity() -> Self {
        Self {
            points: vec![ControlPoint::new(0.0, 0.0), ControlPoint::new(255.0, 255.0)],
        }
    }

    /// The sorted control points.
    #[inline]
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Returns `true` if every point lies on the `y = x` diagonal.
    pub fn is_identity(&self) -> bool {
        self.points.iter().all(|p| (p.x - p.y).abs() < 1e-6)
    }

    /// Inserts an interior control point, keeping the list sorted.
    ///
    /// Coordinates are clamped to `[0, 255]`; `x` is additionally kept
    /// strictly between the fixed endpoints. Returns the index of the new
    /// point.
    pub fn add_point(&mut self, x: f32, y: f32) -> usize {
        let x = x.clamp(1.0, 254.0);
        let y = y.clamp(0.0, 255.0);
        let idx = self
            .points
            .iter()
            .position(|p| p.x > x)
            .unwrap_or(self.points.len() - 1);
        self.points.insert(idx, ControlPoint::new(x, y));
        idx
    }

    /// Moves a control point.
    ///
    /// Endpoints only move in `y`; interior points are confined between
    /// their neighbors so the list stays sorted.
    pub fn move_point(&mut self, index: usize, x: f32, y: f32) {
        if index >= self.points.len() {
            return;
        }
        let y = y.clamp(0.0, 255.0);
        let last = self.points.len() - 1;
        if index == 0 || index == last {
            // Endpoint x is fixed.
            self.points[index].y = y;
            return;
        }
        // Neighbors may sit closer than the 1.0 margin; the interval must
        // stay non-empty and inside [prev.x, next.x] to keep sort order.
        let min_x = (self.points[index - 1].x + 1.0).min(self.points[index + 1].x);
        let max_x = (self.points[index + 1].x - 1.0).max(min_x);
        self.points[index] = ControlPoint::new(x.clamp(min_x, max_x), y);
    }

    /// Removes an interior control point. Endpoints are kept.
    pub fn remove_point(&mut self, index: usize) {
        if index == 0 || index + 1 >= self.points.len() {
            return;
        }
        self.points.remove(index);
    }
}

impl Default for Curve {
    fn default() -> Self {
        Self::identity()
    }
}

/// The four curves of an adjustment state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurveSet {
    /// Master curve applied to all channels.
    pub rgb: Curve,
    /// Red channel curve.
    pub red: Curve,
    /// Green channel curve.
    pub green: Curve,
    /// Blue channel curve.
    pub blue: Curve,
}

impl CurveSet {
    /// Gets a curve by channel.
    #[inline]
    pub fn get(&self, channel: CurveChannel) -> &Curve {
        match channel {
            CurveChannel::Rgb => &self.rgb,
            CurveChannel::Red => &self.red,
            CurveChannel::Green => &self.green,
            CurveChannel::Blue => &self.blue,
        }
    }

    /// Gets a mutable curve by channel.
    #[inline]
    pub fn get_mut(&mut self, channel: CurveChannel) -> &mut Curve {
        match channel {
            CurveChannel::Rgb => &mut self.rgb,
            CurveChannel::Red => &mut self.red,
            CurveChannel::Green => &mut self.green,
            CurveChannel::Blue => &mut self.blue,
        }
    }
}

/// Coarse orientation in 90-degree steps, applied before fine rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// No rotation.
    #[default]
    Deg0,
    /// 90 degrees clockwise.
    Deg90,
    /// 180 degrees.
    Deg180,
    /// 270 degrees clockwise.
    Deg270,
}

impl Orientation {
    /// Returns `true` if this orientation swaps width and height.
    #[inline]
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }

    /// The next orientation clockwise.
    pub fn rotated_cw(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    /// The orientation in degrees.
    #[inline]
    pub fn degrees(self) -> u32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Parses an orientation from degrees (must be a multiple of 90).
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees % 360 {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }
}

/// The full adjustment state of an edit session.
///
/// All sliders range over `[-100, 100]` with 0 as the neutral value.
/// Manual channel gains default to 1.0 and stay non-negative. The crop
/// rectangle is normalized to the rotated bounding box of the oriented
/// source.
///
/// LUT slots are excluded from serde: hosts persist LUTs as file
/// references and reload the grids on open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentState {
    /// Treat the source as a negative (invert before grading).
    pub inverted: bool,
    /// Exposure bias, stops scaled by 1/50.
    pub exposure: f32,
    /// Contrast around mid-gray.
    pub contrast: f32,
    /// Highlight shaping amount.
    pub highlights: f32,
    /// Shadow lift amount.
    pub shadows: f32,
    /// White point offset.
    pub whites: f32,
    /// Black point offset.
    pub blacks: f32,
    /// White balance: blue-amber axis.
    pub temp: f32,
    /// White balance: green-magenta axis.
    pub tint: f32,
    /// Manual red gain multiplier.
    pub red_gain: f32,
    /// Manual green gain multiplier.
    pub green_gain: f32,
    /// Manual blue gain multiplier.
    pub blue_gain: f32,
    /// Fine rotation in degrees, `[-45, 45]`.
    pub rotation: f32,
    /// Coarse orientation in 90-degree steps.
    pub orientation: Orientation,
    /// Crop rectangle normalized to the rotated bounding box.
    pub crop: CropRect,
    /// The four tone curves.
    pub curves: CurveSet,
    /// First loaded LUT slot.
    #[serde(skip)]
    pub lut1: Option<LutState>,
    /// Second loaded LUT slot, applied after the first.
    #[serde(skip)]
    pub lut2: Option<LutState>,
}

impl Default for AdjustmentState {
    fn default() -> Self {
        Self {
            inverted: false,
            exposure: 0.0,
            contrast: 0.0,
            highlights: 0.0,
            shadows: 0.0,
            whites: 0.0,
            blacks: 0.0,
            temp: 0.0,
            tint: 0.0,
            red_gain: 1.0,
            green_gain: 1.0,
            blue_gain: 1.0,
            rotation: 0.0,
            orientation: Orientation::Deg0,
            crop: CropRect::FULL,
            curves: CurveSet::default(),
            lut1: None,
            lut2: None,
        }
    }
}

impl AdjustmentState {
    /// Returns `true` if every adjustment is at its neutral value and no
    /// LUT is loaded.
    pub fn is_neutral(&self) -> bool {
        !self.inverted
            && self.exposure == 0.0
            && self.contrast == 0.0
            && self.highlights == 0.0
            && self.shadows == 0.0
            && self.whites == 0.0
            && self.blacks == 0.0
            && self.temp == 0.0
            && self.tint == 0.0
            && self.red_gain == 1.0
            && self.green_gain == 1.0
            && self.blue_gain == 1.0
            && self.rotation == 0.0
            && self.orientation == Orientation::Deg0
            && self.crop == CropRect::FULL
            && self.curves.rgb.is_identity()
            && self.curves.red.is_identity()
            && self.curves.green.is_identity()
            && self.curves.blue.is_identity()
            && self.lut1.is_none()
            && self.lut2.is_none()
    }
}
