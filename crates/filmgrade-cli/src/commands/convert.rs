//! Image grading command

use crate::ConvertArgs;
use anyhow::{bail, Context, Result};
use filmgrade_core::{CropRect, Orientation};
use filmgrade_ops::{geometry, pipeline, white_balance};
use tracing::debug;

pub fn run(args: ConvertArgs, verbose: bool) -> Result<()> {
    let mut state = super::resolve_state(&args.adjust)?;

    if !(-45.0..=45.0).contains(&args.rotation) {
        bail!("rotation {} outside [-45, 45]", args.rotation);
    }
    state.rotation = args.rotation;
    state.orientation = Orientation::from_degrees(args.orientation)
        .with_context(|| format!("orientation {} is not a multiple of 90", args.orientation))?;
    if let Some(spec) = &args.crop {
        state.crop = parse_crop(spec)?;
    }

    let source = super::load_png(&args.input)?;
    if args.auto_color {
        let [r, g, b] = white_balance::auto_gains(&source, state.inverted);
        state.red_gain = r;
        state.green_gain = g;
        state.blue_gain = b;
        state.temp = 0.0;
        state.tint = 0.0;
    }
    if verbose {
        println!(
            "Grading {} ({}x{})",
            args.input.display(),
            source.width(),
            source.height()
        );
    }

    let visible = geometry::rasterize(&source, &state)?;
    let (graded, _) = pipeline::grade_buffer(&visible, &state);
    debug!(
        width = graded.width(),
        height = graded.height(),
        "graded output"
    );

    super::save_png(&args.output, &graded)?;
    if verbose {
        println!("Wrote {}", args.output.display());
    }
    Ok(())
}

/// Parses `x,y,w,h` into a normalized crop rectangle.
fn parse_crop(spec: &str) -> Result<CropRect> {
    let parts: Vec<f32> = spec
        .split(',')
        .map(|t| t.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .with_context(|| format!("invalid crop spec: {spec}"))?;
    if parts.len() != 4 {
        bail!("crop spec needs 4 values (x,y,w,h), got {}", parts.len());
    }
    let crop = CropRect::new(parts[0], parts[1], parts[2], parts[3]);
    if !crop.is_valid() {
        bail!("crop spec outside the unit square: {spec}");
    }
    Ok(crop)
}
