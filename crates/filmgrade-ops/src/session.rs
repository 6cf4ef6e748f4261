//! Edit session orchestration.
//!
//! [`EditSession`] owns the immutable source buffer, the current
//! [`AdjustmentState`], and the undo/redo [`History`], and wires the
//! geometry, pipeline, bake, and picker engines together behind one
//! surface. Hosts follow the gesture discipline: call
//! [`begin_edit`](EditSession::begin_edit) once per intentional edit
//! gesture, mutate the state, then [`recompute`](EditSession::recompute).

use crate::geometry::{self, recrop_for_rotation};
use crate::picker::{self, PickedColor};
use crate::{bake, pipeline, white_balance, OpsError, OpsResult};
use filmgrade_core::{AdjustmentState, CropRect, Histograms, History, PixelBuffer};
use filmgrade_lut::LutState;
use std::path::Path;
use tracing::{debug, info};

/// Which of the two LUT slots an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LutSlot {
    /// First slot, applied before the second.
    One,
    /// Second slot.
    Two,
}

/// The result of one recompute: the graded view and its histograms.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// The rasterized, graded image.
    pub buffer: PixelBuffer,
    /// Peak-normalized histograms of the graded image.
    pub histograms: Histograms,
}

/// An editing session over one source image.
///
/// The source buffer never changes; every recompute re-rasterizes the
/// visible region and re-grades it from scratch.
#[derive(Debug, Clone)]
pub struct EditSession {
    source: PixelBuffer,
    state: AdjustmentState,
    history: History,
}

impl EditSession {
    /// Opens a session on a source buffer with a neutral state.
    pub fn new(source: PixelBuffer) -> Self {
        info!(
            width = source.width(),
            height = source.height(),
            "opening edit session"
        );
        Self {
            source,
            state: AdjustmentState::default(),
            history: History::new(),
        }
    }

    /// The immutable source buffer.
    #[inline]
    pub fn source(&self) -> &PixelBuffer {
        &self.source
    }

    /// The current adjustment state.
    #[inline]
    pub fn state(&self) -> &AdjustmentState {
        &self.state
    }

    /// Mutable access to the current state.
    ///
    /// Call [`begin_edit`](Self::begin_edit) first if the mutation is an
    /// undoable gesture.
    #[inline]
    pub fn state_mut(&mut self) -> &mut AdjustmentState {
        &mut self.state
    }

    /// The undo/redo history.
    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Snapshots the current state ahead of an edit gesture.
    pub fn begin_edit(&mut self) {
        self.history.record(&self.state);
    }

    /// Restores the previous snapshot. Returns `false` when the undo
    /// stack is empty.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.state) {
            Some(restored) => {
                self.state = restored;
                true
            }
            None => false,
        }
    }

    /// Re-applies the last undone edit. Returns `false` when the redo
    /// stack is empty.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.state) {
            Some(restored) => {
                self.state = restored;
                true
            }
            None => false,
        }
    }

    /// Resets all adjustments to neutral, as one undoable gesture.
    pub fn reset(&mut self) {
        self.begin_edit();
        self.state = AdjustmentState::default();
    }

    /// Sets the fine rotation angle, re-deriving the crop so it stays
    /// within the new bounding box. One undoable gesture.
    pub fn set_rotation(&mut self, degrees: f32) -> OpsResult<()> {
        if !(-45.0..=45.0).contains(&degrees) {
            return Err(OpsError::InvalidParameter(format!(
                "rotation {degrees} outside [-45, 45]"
            )));
        }
        self.begin_edit();
        self.state.crop = recrop_for_rotation(
            &self.state.crop,
            self.source.width(),
            self.source.height(),
            self.state.orientation,
            self.state.rotation,
            degrees,
        );
        self.state.rotation = degrees;
        Ok(())
    }

    /// Gray-world auto color: derives channel gains that neutralize the
    /// source's color cast and resets the temp/tint bias. One undoable
    /// gesture.
    pub fn auto_color(&mut self) {
        let [r, g, b] = white_balance::auto_gains(&self.source, self.state.inverted);
        debug!(r, g, b, "auto color gains");
        self.begin_edit();
        self.state.red_gain = r;
        self.state.green_gain = g;
        self.state.blue_gain = b;
        self.state.temp = 0.0;
        self.state.tint = 0.0;
    }

    /// Replaces the crop rectangle. One undoable gesture.
    pub fn set_crop(&mut self, crop: CropRect) -> OpsResult<()> {
        if !crop.is_valid() {
            return Err(OpsError::InvalidParameter(format!(
                "crop outside unit square: {crop}"
            )));
        }
        self.begin_edit();
        self.state.crop = crop;
        Ok(())
    }

    /// Steps the orientation 90 degrees clockwise, rotating the crop
    /// rectangle with the image. One undoable gesture.
    pub fn rotate_cw(&mut self) {
        self.begin_edit();
        let c = self.state.crop;
        // Unit-square rect under a clockwise quarter turn.
        self.state.crop = CropRect::new(1.0 - c.y - c.h, c.x, c.h, c.w);
        self.state.orientation = self.state.orientation.rotated_cw();
    }

    /// Loads a `.cube` file into a LUT slot at full intensity. One
    /// undoable gesture.
    pub fn load_lut(&mut self, slot: LutSlot, path: &Path) -> OpsResult<()> {
        let loaded = LutState::from_cube_file(path)?;
        debug!(name = %loaded.name, size = loaded.lut.size(), ?slot, "loaded LUT");
        self.begin_edit();
        *self.slot_mut(slot) = Some(loaded);
        Ok(())
    }

    /// Sets a slot's blend intensity, clamped to `[0, 1]`. One undoable
    /// gesture; an empty slot is left untouched, history included.
    pub fn set_lut_intensity(&mut self, slot: LutSlot, intensity: f32) {
        if self.slot_mut(slot).is_none() {
            return;
        }
        self.begin_edit();
        if let Some(state) = self.slot_mut(slot).take() {
            *self.slot_mut(slot) = Some(state.with_intensity(intensity));
        }
    }

    /// Unloads a LUT slot. One undoable gesture.
    pub fn clear_lut(&mut self, slot: LutSlot) {
        self.begin_edit();
        *self.slot_mut(slot) = None;
    }

    fn slot_mut(&mut self, slot: LutSlot) -> &mut Option<LutState> {
        match slot {
            LutSlot::One => &mut self.state.lut1,
            LutSlot::Two => &mut self.state.lut2,
        }
    }

    /// Rasterizes and grades the visible region of the source.
    pub fn recompute(&self) -> OpsResult<RenderOutput> {
        let visible = geometry::rasterize(&self.source, &self.state)?;
        let (buffer, histograms) = pipeline::grade_buffer(&visible, &self.state);
        Ok(RenderOutput { buffer, histograms })
    }

    /// Bakes the color pipeline into a `.cube` file.
    pub fn export_cube(&self, path: &Path) -> OpsResult<()> {
        bake::export_cube(&self.state, bake::EXPORT_LUT_SIZE, path)
    }

    /// Samples source and graded color at a display coordinate.
    pub fn pick_color(&self, x: u32, y: u32) -> Option<PickedColor> {
        picker::pick_color(&self.source, &self.state, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmgrade_core::Orientation;

    fn session() -> EditSession {
        EditSession::new(PixelBuffer::new_opaque(40, 30))
    }

    #[test]
    fn edit_undo_redo_cycle() {
        let mut s = session();
        s.begin_edit();
        s.state_mut().exposure = 25.0;

        assert!(s.undo());
        assert_eq!(s.state().exposure, 0.0);
        assert!(s.redo());
        assert_eq!(s.state().exposure, 25.0);
        assert!(!s.redo());
    }

    #[test]
    fn reset_is_undoable() {
        let mut s = session();
        s.begin_edit();
        s.state_mut().contrast = 30.0;
        s.reset();
        assert!(s.state().is_neutral());
        assert!(s.undo());
        assert_eq!(s.state().contrast, 30.0);
    }

    #[test]
    fn auto_color_is_undoable_and_resets_bias() {
        let mut source = PixelBuffer::new_opaque(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                source.set_pixel(x, y, [200, 100, 50, 255]);
            }
        }
        let mut s = EditSession::new(source);
        s.begin_edit();
        s.state_mut().temp = 40.0;

        s.auto_color();
        assert_eq!(s.state().temp, 0.0);
        assert!(s.state().red_gain < 1.0);
        assert!(s.state().blue_gain > 1.0);

        assert!(s.undo());
        assert_eq!(s.state().temp, 40.0);
        assert_eq!(s.state().red_gain, 1.0);
    }

    #[test]
    fn set_rotation_validates_range() {
        let mut s = session();
        assert!(s.set_rotation(46.0).is_err());
        assert!(s.set_rotation(-12.5).is_ok());
        assert_eq!(s.state().rotation, -12.5);
    }

    #[test]
    fn set_rotation_shrinks_crop_into_bounding_box() {
        let mut s = session();
        s.set_rotation(20.0).unwrap();
        let crop = s.state().crop;
        assert!(crop.is_valid());
        assert!(crop.w < 1.0 && crop.h < 1.0);
        // Undo restores both the angle and the full-frame crop.
        assert!(s.undo());
        assert_eq!(s.state().rotation, 0.0);
        assert_eq!(s.state().crop, CropRect::FULL);
    }

    #[test]
    fn rotate_cw_steps_orientation_and_carries_crop() {
        let mut s = session();
        s.begin_edit();
        s.state_mut().crop = CropRect::new(0.0, 0.0, 0.5, 0.5);
        s.rotate_cw();
        assert_eq!(s.state().orientation, Orientation::Deg90);
        // Top-left quadrant lands in the top-right after a CW turn.
        let c = s.state().crop;
        assert!((c.x - 0.5).abs() < 1e-6);
        assert!((c.y - 0.0).abs() < 1e-6);

        // Four turns come back around.
        s.rotate_cw();
        s.rotate_cw();
        s.rotate_cw();
        assert_eq!(s.state().orientation, Orientation::Deg0);
        assert!((s.state().crop.x - 0.0).abs() < 1e-6);
    }

    #[test]
    fn recompute_matches_crop_size() {
        let mut s = session();
        s.begin_edit();
        s.state_mut().crop = CropRect::new(0.25, 0.0, 0.5, 1.0);
        let out = s.recompute().unwrap();
        assert_eq!(out.buffer.width(), 20);
        assert_eq!(out.buffer.height(), 30);
    }

    #[test]
    fn recompute_with_orientation_swaps_output_axes() {
        let mut s = session();
        s.rotate_cw();
        let out = s.recompute().unwrap();
        assert_eq!(out.buffer.width(), 30);
        assert_eq!(out.buffer.height(), 40);
    }

    #[test]
    fn lut_slot_lifecycle() {
        use filmgrade_lut::{cube, Lut3D};
        use std::io::Write as _;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(cube::write(&Lut3D::identity(5)).as_bytes())
            .unwrap();

        let mut s = session();
        s.load_lut(LutSlot::One, file.path()).unwrap();
        assert!(s.state().lut1.is_some());

        s.set_lut_intensity(LutSlot::One, 0.3);
        assert_eq!(s.state().lut1.as_ref().unwrap().intensity, 0.3);

        s.clear_lut(LutSlot::One);
        assert!(s.state().lut1.is_none());

        // Three gestures, three undos.
        assert!(s.undo());
        assert_eq!(s.state().lut1.as_ref().unwrap().intensity, 0.3);
        assert!(s.undo());
        assert_eq!(s.state().lut1.as_ref().unwrap().intensity, 1.0);
        assert!(s.undo());
        assert!(s.state().lut1.is_none());
    }

    #[test]
    fn intensity_on_empty_slot_is_noop() {
        let mut s = session();
        s.begin_edit();
        s.state_mut().exposure = 10.0;
        assert!(s.undo());

        // The empty-slot no-op must not snapshot or clear redo.
        s.set_lut_intensity(LutSlot::Two, 0.5);
        assert!(s.state().lut2.is_none());
        assert_eq!(s.history().undo_depth(), 0);
        assert_eq!(s.history().redo_depth(), 1);
        assert!(s.redo());
        assert_eq!(s.state().exposure, 10.0);
    }

    #[test]
    fn missing_lut_file_does_not_touch_history() {
        let mut s = session();
        assert!(s
            .load_lut(LutSlot::One, Path::new("/nonexistent/grade.cube"))
            .is_err());
        assert_eq!(s.history().undo_depth(), 0);
    }
}
