//! Loaded LUT slot state.

use crate::{cube, Lut3D, LutResult};
use std::path::Path;
use std::sync::Arc;

/// A loaded LUT occupying one of the pipeline's two LUT slots.
///
/// The grid is immutable once loaded and shared behind an [`Arc`], so
/// cloning a slot (for undo snapshots) never copies grid data.
///
/// # Example
///
/// ```rust
/// use filmgrade_lut::{cube, Lut3D, LutState};
///
/// let text = cube::write(&Lut3D::identity(17));
/// let slot = LutState::from_cube_text("identity", &text).unwrap();
/// assert_eq!(slot.lut.size(), 17);
/// assert_eq!(slot.intensity, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LutState {
    /// Display name (usually the source file stem).
    pub name: String,
    /// Blend intensity in `[0, 1]`; 1.0 applies the LUT fully.
    pub intensity: f32,
    /// The shared, immutable grid.
    pub lut: Arc<Lut3D>,
}

impl LutState {
    /// Loads a slot from raw `.cube` text at full intensity.
    pub fn from_cube_text(name: impl Into<String>, text: &str) -> LutResult<Self> {
        let lut = cube::parse(text)?;
        Ok(Self {
            name: name.into(),
            intensity: 1.0,
            lut: Arc::new(lut),
        })
    }

    /// Loads a slot from a `.cube` file, naming it after the file stem.
    pub fn from_cube_file<P: AsRef<Path>>(path: P) -> LutResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("lut")
            .to_string();
        let text = std::fs::read_to_string(path)?;
        Self::from_cube_text(name, &text)
    }

    /// Returns this slot with the intensity clamped to `[0, 1]`.
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_is_clamped() {
        let text = cube::write(&Lut3D::identity(2));
        let slot = LutState::from_cube_text("x", &text).unwrap();
        assert_eq!(slot.clone().with_intensity(1.5).intensity, 1.0);
        assert_eq!(slot.with_intensity(-0.5).intensity, 0.0);
    }

    #[test]
    fn clone_shares_grid() {
        let text = cube::write(&Lut3D::identity(2));
        let slot = LutState::from_cube_text("x", &text).unwrap();
        let copy = slot.clone();
        assert!(Arc::ptr_eq(&slot.lut, &copy.lut));
    }
}
