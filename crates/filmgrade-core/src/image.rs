//! RGBA working buffer.
//!
//! The pipeline operates on interleaved 8-bit RGBA in row-major order.
//! Alpha is meaningful: rotation padding is written fully transparent and
//! the grading pass skips those pixels entirely.

use crate::{Error, Result};

/// An owned, interleaved RGBA8 pixel buffer.
///
/// # Memory Layout
///
/// Pixels are stored row-major, top-to-bottom:
///
/// ```text
/// [R G B A R G B A ...]  <- Row 0
/// [R G B A R G B A ...]  <- Row 1
/// ```
///
/// # Example
///
/// ```rust
/// use filmgrade_core::PixelBuffer;
///
/// let mut buf = PixelBuffer::new_opaque(4, 4);
/// buf.set_pixel(1, 2, [200, 100, 50, 255]);
/// assert_eq!(buf.pixel(1, 2), [200, 100, 50, 255]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a buffer filled with transparent black.
    ///
    /// Transparent pixels mark padding and are skipped by the grading
    /// pass.
    pub fn new_transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Creates a buffer filled with opaque black.
    pub fn new_opaque(width: u32, height: u32) -> Self {
        let mut data = vec![0; width as usize * height as usize * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wraps an existing interleaved RGBA vector.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw interleaved RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the raw interleaved RGBA bytes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer, returning the raw bytes.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel (x, y). Caller must ensure bounds.
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Returns the RGBA value at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds; use [`try_pixel`](Self::try_pixel)
    /// for checked access.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Checked pixel access.
    pub fn try_pixel(&self, x: u32, y: u32) -> Result<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        Ok(self.pixel(x, y))
    }

    /// Writes the RGBA value at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_buffer_has_full_alpha() {
        let buf = PixelBuffer::new_opaque(2, 2);
        assert_eq!(buf.pixel(1, 1)[3], 255);
    }

    #[test]
    fn transparent_buffer_has_zero_alpha() {
        let buf = PixelBuffer::new_transparent(2, 2);
        assert_eq!(buf.pixel(0, 0)[3], 0);
    }

    #[test]
    fn from_rgba_validates_length() {
        assert!(PixelBuffer::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(PixelBuffer::from_rgba(2, 2, vec![0; 15]).is_err());
    }

    #[test]
    fn try_pixel_bounds() {
        let buf = PixelBuffer::new_opaque(2, 2);
        assert!(buf.try_pixel(1, 1).is_ok());
        assert!(buf.try_pixel(2, 0).is_err());
    }
}
