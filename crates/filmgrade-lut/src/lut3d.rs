//! 3-dimensional lookup table.
//!
//! A 3D LUT maps RGB input to RGB output through a cube of color values.
//! In this pipeline it serves two roles: loaded creative looks applied as
//! the last grading stages, and the export target a full grade is baked
//! into.

use crate::{LutError, LutResult};

/// A 3-dimensional lookup table.
///
/// Stores a cube of RGB output values indexed by input RGB. Standard sizes
/// are 17, 33, or 65 per side; baked exports use 33.
///
/// # Structure
///
/// - `size^3` RGB triples, flattened into one float vector
/// - R varies fastest, then G, then B (matching `.cube` file order):
///   `index = (r + g*size + b*size^2) * 3`
/// - Values are normalized to `[0, 1]`
///
/// # Example
///
/// ```rust
/// use filmgrade_lut::Lut3D;
///
/// let lut = Lut3D::identity(33);
/// let out = lut.sample([0.5, 0.3, 0.2]);
/// assert!((out[0] - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lut3D {
    /// Flat grid data, `size^3 * 3` floats, R-fastest order.
    data: Vec<f32>,
    /// Cube size per side.
    size: usize,
}

impl Lut3D {
    /// Creates an identity (pass-through) 3D LUT.
    pub fn identity(size: usize) -> Self {
        let mut data = Vec::with_capacity(size * size * size * 3);
        let n = (size - 1) as f32;
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    data.push(r as f32 / n);
                    data.push(g as f32 / n);
                    data.push(b as f32 / n);
                }
            }
        }
        Self { data, size }
    }

    /// Creates a 3D LUT from raw data.
    ///
    /// Data must be in R-fastest order with exactly `size^3 * 3` floats,
    /// and `size` must be at least 2.
    pub fn from_data(data: Vec<f32>, size: usize) -> LutResult<Self> {
        if size < 2 {
            return Err(LutError::InvalidSize(format!(
                "size must be at least 2, got {size}"
            )));
        }
        let expected = size * size * size * 3;
        if data.len() != expected {
            return Err(LutError::InvalidSize(format!(
                "expected {} floats for size {}, got {}",
                expected,
                size,
                data.len()
            )));
        }
        Ok(Self { data, size })
    }

    /// Cube size per side.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The flat grid data, R-fastest order.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the flat index of grid vertex (r, g, b).
    #[inline]
    fn index(&self, r: usize, g: usize, b: usize) -> usize {
        (r + g * self.size + b * self.size * self.size) * 3
    }

    /// Gets the stored triple at grid vertex (r, g, b).
    #[inline]
    pub fn get(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        let i = self.index(r, g, b);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Samples the LUT at a normalized RGB coordinate via trilinear
    /// interpolation.
    ///
    /// Inputs are clamped to `[0, 1]`. Sampling at an exact grid point
    /// returns the stored value.
    pub fn sample(&self, rgb: [f32; 3]) -> [f32; 3] {
        let n = (self.size - 1) as f32;
        let r = rgb[0].clamp(0.0, 1.0) * n;
        let g = rgb[1].clamp(0.0, 1.0) * n;
        let b = rgb[2].clamp(0.0, 1.0) * n;

        // Floor clamped so floor+1 stays a valid vertex.
        let ri = (r.floor() as usize).min(self.size - 2);
        let gi = (g.floor() as usize).min(self.size - 2);
        let bi = (b.floor() as usize).min(self.size - 2);

        let rf = r - ri as f32;
        let gf = g - gi as f32;
        let bf = b - bi as f32;

        let c000 = self.get(ri, gi, bi);
        let c100 = self.get(ri + 1, gi, bi);
        let c010 = self.get(ri, gi + 1, bi);
        let c110 = self.get(ri + 1, gi + 1, bi);
        let c001 = self.get(ri, gi, bi + 1);
        let c101 = self.get(ri + 1, gi, bi + 1);
        let c011 = self.get(ri, gi + 1, bi + 1);
        let c111 = self.get(ri + 1, gi + 1, bi + 1);

        // Blend along R, then G, then B.
        let mut out = [0.0f32; 3];
        for i in 0..3 {
            let c00 = c000[i] * (1.0 - rf) + c100[i] * rf;
            let c10 = c010[i] * (1.0 - rf) + c110[i] * rf;
            let c01 = c001[i] * (1.0 - rf) + c101[i] * rf;
            let c11 = c011[i] * (1.0 - rf) + c111[i] * rf;

            let c0 = c00 * (1.0 - gf) + c10 * gf;
            let c1 = c01 * (1.0 - gf) + c11 * gf;

            out[i] = c0 * (1.0 - bf) + c1 * bf;
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_midpoint() {
        let lut = Lut3D::identity(17);
        let out = lut.sample([0.5, 0.3, 0.8]);
        assert!((out[0] - 0.5).abs() < 1e-5);
        assert!((out[1] - 0.3).abs() < 1e-5);
        assert!((out[2] - 0.8).abs() < 1e-5);
    }

    #[test]
    fn exact_at_grid_points() {
        let lut = Lut3D::identity(9);
        let n = 8.0f32;
        for i in 0..9usize {
            for j in [0usize, 4, 8] {
                for k in [0usize, 8] {
                    let coord = [i as f32 / n, j as f32 / n, k as f32 / n];
                    let out = lut.sample(coord);
                    let stored = lut.get(i, j, k);
                    assert_eq!(out, stored, "mismatch at ({i},{j},{k})");
                }
            }
        }
    }

    #[test]
    fn corners() {
        let lut = Lut3D::identity(33);
        let black = lut.sample([0.0, 0.0, 0.0]);
        assert_eq!(black, [0.0, 0.0, 0.0]);

        let white = lut.sample([1.0, 1.0, 1.0]);
        assert!((white[0] - 1.0).abs() < 1e-6);

        let red = lut.sample([1.0, 0.0, 0.0]);
        assert!((red[0] - 1.0).abs() < 1e-6);
        assert!(red[1].abs() < 1e-6);
    }

    #[test]
    fn out_of_range_is_clamped() {
        let lut = Lut3D::identity(17);
        let out = lut.sample([1.5, -0.5, 0.5]);
        assert!((out[0] - 1.0).abs() < 1e-6);
        assert!(out[1].abs() < 1e-6);
    }

    #[test]
    fn from_data_validates_length() {
        assert!(Lut3D::from_data(vec![0.0; 8 * 3], 2).is_ok());
        assert!(Lut3D::from_data(vec![0.0; 7 * 3], 2).is_err());
        assert!(Lut3D::from_data(vec![0.0; 3], 1).is_err());
    }
}
