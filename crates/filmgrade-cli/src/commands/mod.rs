//! CLI command implementations

pub mod bake;
pub mod convert;
pub mod histogram;
pub mod info;

use crate::AdjustArgs;
use anyhow::{bail, Context, Result};
use filmgrade_core::{AdjustmentState, PixelBuffer};
use filmgrade_lut::LutState;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Loads a PNG into an RGBA working buffer.
///
/// 8-bit RGB and RGBA inputs are accepted; RGB gains an opaque alpha.
pub fn load_png(path: &Path) -> Result<PixelBuffer> {
    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let decoder = png::Decoder::new(std::io::BufReader::new(file));
    let mut reader = decoder
        .read_info()
        .with_context(|| format!("Failed to decode: {}", path.display()))?;

    let buf_size = reader
        .output_buffer_size()
        .context("cannot determine output buffer size")?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .with_context(|| format!("Failed to decode: {}", path.display()))?;
    buf.truncate(info.buffer_size());

    let rgba = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgba, png::BitDepth::Eight) => buf,
        (png::ColorType::Rgb, png::BitDepth::Eight) => {
            let mut rgba = Vec::with_capacity(buf.len() / 3 * 4);
            for px in buf.chunks_exact(3) {
                rgba.extend_from_slice(px);
                rgba.push(255);
            }
            rgba
        }
        (ct, bd) => bail!(
            "unsupported PNG layout {:?}/{:?} in {} (8-bit RGB/RGBA only)",
            ct,
            bd,
            path.display()
        ),
    };

    PixelBuffer::from_rgba(info.width, info.height, rgba)
        .with_context(|| format!("Invalid pixel data in {}", path.display()))
}

/// Writes a working buffer as an 8-bit RGBA PNG.
pub fn save_png(path: &Path, image: &PixelBuffer) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .with_context(|| format!("Failed to encode: {}", path.display()))?;
    png_writer
        .write_image_data(image.data())
        .with_context(|| format!("Failed to write: {}", path.display()))?;
    Ok(())
}

/// Loads a preset YAML into an adjustment state.
pub fn load_preset(path: &Path) -> Result<AdjustmentState> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read preset: {}", path.display()))?;
    serde_yaml::from_str(&text)
        .with_context(|| format!("Invalid preset: {}", path.display()))
}

/// Builds the adjustment state from a preset plus command-line overrides.
pub fn resolve_state(args: &AdjustArgs) -> Result<AdjustmentState> {
    let mut state = match &args.preset {
        Some(path) => load_preset(path)?,
        None => AdjustmentState::default(),
    };

    if args.invert {
        state.inverted = true;
    }
    for (flag, field) in [
        (args.exposure, &mut state.exposure),
        (args.contrast, &mut state.contrast),
        (args.highlights, &mut state.highlights),
        (args.shadows, &mut state.shadows),
        (args.whites, &mut state.whites),
        (args.blacks, &mut state.blacks),
        (args.temp, &mut state.temp),
        (args.tint, &mut state.tint),
        (args.red_gain, &mut state.red_gain),
        (args.green_gain, &mut state.green_gain),
        (args.blue_gain, &mut state.blue_gain),
    ] {
        if let Some(v) = flag {
            *field = v;
        }
    }

    if let Some(path) = &args.lut1 {
        let slot = LutState::from_cube_file(path)
            .with_context(|| format!("Failed to load LUT: {}", path.display()))?;
        state.lut1 = Some(slot.with_intensity(args.lut1_intensity));
    }
    if let Some(path) = &args.lut2 {
        let slot = LutState::from_cube_file(path)
            .with_context(|| format!("Failed to load LUT: {}", path.display()))?;
        state.lut2 = Some(slot.with_intensity(args.lut2_intensity));
    }

    Ok(state)
}
