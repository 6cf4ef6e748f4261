//! Adobe/Resolve .cube LUT format support.
//!
//! The .cube format is a simple text-based LUT format widely supported by
//! DaVinci Resolve, Adobe applications, and most grading tools.
//!
//! # Format
//!
//! ```text
//! # Comment
//! TITLE "LUT Name"
//! LUT_3D_SIZE 33
//! 0.0 0.0 0.0
//! ...
//! 1.0 1.0 1.0
//! ```
//!
//! Parsing is deliberately lenient: creative LUTs found in the wild are
//! frequently sloppy, so unknown keywords and malformed data lines are
//! skipped rather than rejected, and a missing `LUT_3D_SIZE` falls back
//! to 33. The only hard failure is a grid with too few triples to sample.

use crate::{Lut3D, LutError, LutResult};
use std::fmt::Write as _;
use std::path::Path;

/// Default cube size when the file carries no `LUT_3D_SIZE` directive.
pub const DEFAULT_SIZE: usize = 33;

/// Reads a 3D LUT from a .cube file on disk.
///
/// # Example
///
/// ```rust,ignore
/// let lut = cube::read("grade.cube")?;
/// ```
pub fn read<P: AsRef<Path>>(path: P) -> LutResult<Lut3D> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse(&text)
}

/// Parses a 3D LUT from raw `.cube` text.
///
/// Rules:
/// - blank lines and `#` comments are skipped
/// - `LUT_3D_SIZE N` sets the cube size (default 33 when absent or
///   malformed)
/// - any other line with at least 3 numeric tokens is appended as one RGB
///   triple, in file order (R-fastest)
/// - all other lines (TITLE, DOMAIN_MIN/MAX, garbage) are skipped silently
///
/// # Example
///
/// ```rust
/// use filmgrade_lut::cube;
///
/// let lut = cube::parse("LUT_3D_SIZE 2\n0 0 0\n1 0 0\n0 1 0\n1 1 0\n\
///                        0 0 1\n1 0 1\n0 1 1\n1 1 1\n").unwrap();
/// assert_eq!(lut.size(), 2);
/// ```
pub fn parse(text: &str) -> LutResult<Lut3D> {
    let mut size = DEFAULT_SIZE;
    let mut data: Vec<f32> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("LUT_3D_SIZE") {
            if let Some(n) = rest.split_whitespace().next().and_then(|t| t.parse::<usize>().ok())
            {
                if n >= 2 {
                    size = n;
                }
            }
            continue;
        }

        if let Some(rgb) = parse_rgb(line) {
            data.extend_from_slice(&rgb);
        }
    }

    let expected = size * size * size * 3;
    if data.len() < expected {
        return Err(LutError::ParseError(format!(
            "expected {} triples for size {}, found {}",
            size * size * size,
            size,
            data.len() / 3
        )));
    }
    data.truncate(expected);

    Lut3D::from_data(data, size)
}

/// Serializes a 3D LUT to `.cube` text.
///
/// Emits `LUT_3D_SIZE N` followed by one `%.6f %.6f %.6f` line per grid
/// point, B-major / G-mid / R-minor order.
pub fn write(lut: &Lut3D) -> String {
    let size = lut.size();
    let mut out = String::with_capacity(size * size * size * 27 + 32);
    let _ = writeln!(out, "LUT_3D_SIZE {size}");
    for b in 0..size {
        for g in 0..size {
            for r in 0..size {
                let rgb = lut.get(r, g, b);
                let _ = writeln!(out, "{:.6} {:.6} {:.6}", rgb[0], rgb[1], rgb[2]);
            }
        }
    }
    out
}

/// Attempts to parse a data line as one RGB triple.
///
/// Returns `None` when the line has fewer than 3 tokens or any of the
/// first 3 tokens is non-numeric.
fn parse_rgb(line: &str) -> Option<[f32; 3]> {
    let mut tokens = line.split_whitespace();
    let r = tokens.next()?.parse::<f32>().ok()?;
    let g = tokens.next()?.parse::<f32>().ok()?;
    let b = tokens.next()?.parse::<f32>().ok()?;
    Some([r, g, b])
}
